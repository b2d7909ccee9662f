use std::sync::Arc;

use bindery::config::{split_profiles, AppContext, DocumentLoader, DEFAULT_BASE};
use bindery::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE.to_string());

    let mut loader = DocumentLoader::new(base);
    if let Ok(raw) = std::env::var("APP_PROFILES") {
        loader = loader.profiles(split_profiles(&raw));
    }

    // Configuration errors are fatal
    let document = loader.load().inspect_err(|e| logger::log_error(&e.to_string()))?;
    let ctx = AppContext::bind(&document).inspect_err(|e| logger::log_error(&e.to_string()))?;

    logger::init(&ctx.logging)?;
    logger::log_profiles(document.applied_profiles());

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = ctx.server.worker_threads() {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(Arc::new(ctx)))
}

async fn async_main(ctx: Arc<AppContext>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = ctx.server.socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &ctx);

    server::run(listener, ctx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::log_error(&format!("Failed to listen for shutdown signal: {e}"));
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}
