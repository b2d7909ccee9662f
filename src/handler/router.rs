//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, route match and
//! rendering through the shared renderer.

use crate::config::AppContext;
use crate::handler::service::ServiceDescriptor;
use crate::http;
use crate::logger;
use crate::render::RenderKind;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    ctx: Arc<AppContext>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();

    let response = route(method, path, &ctx);

    if ctx.logging.access_log {
        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok());
        logger::log_access(
            peer.as_ref(),
            method,
            path,
            response.status().as_u16(),
            content_type,
            started.elapsed(),
        );
    }

    Ok(response)
}

/// Route a request to its response
pub fn route(method: &Method, path: &str, ctx: &AppContext) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response();
    }

    let descriptor = ServiceDescriptor::from(&ctx.application);
    match path {
        "/service" => ctx.renderer.respond(RenderKind::Json, &descriptor),
        "/service.js" => ctx
            .renderer
            .respond(RenderKind::JavaScript, &descriptor.script()),
        "/service.txt" => ctx
            .renderer
            .respond(RenderKind::Text, &descriptor.service_name),
        _ => match path.strip_prefix("/render/") {
            Some(tag) => render_tagged(ctx, tag, &descriptor),
            None => http::build_404_response(),
        },
    }
}

/// Render the descriptor with the kind named by `tag`
fn render_tagged(
    ctx: &AppContext,
    tag: &str,
    descriptor: &ServiceDescriptor,
) -> Response<Full<Bytes>> {
    match tag.parse::<RenderKind>() {
        Ok(kind) => ctx.renderer.respond(kind, descriptor),
        Err(e) => {
            logger::log_render_failed(tag, &e);
            crate::render::HttpSink::new().into_error_response(&e)
        }
    }
}
