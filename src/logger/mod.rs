//! Logger module
//!
//! Logging for configuration binding, rendering and the HTTP server:
//! - Startup and shutdown messages
//! - Access logging
//! - Error and warning logging with optional log files

pub mod writer;

pub use writer::Level;

use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::{AppContext, LoggingProperties};

/// Initialize the logger from the bound `logging` section.
///
/// Should be called once at application startup. An unknown level falls
/// back to `info` with a warning.
pub fn init(logging: &LoggingProperties) -> std::io::Result<()> {
    let (level, unknown) = match logging.level.parse::<Level>() {
        Ok(level) => (level, None),
        Err(e) => (Level::Info, Some(e)),
    };
    writer::init(
        level,
        logging.access_log_file.as_deref(),
        logging.error_log_file.as_deref(),
    )?;
    if let Some(e) = unknown {
        log_warning(&format!("{e}, using info"));
    }
    Ok(())
}

fn enabled(level: Level) -> bool {
    writer::get().map_or(Level::Info, writer::LogWriter::level) <= level
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, ctx: &AppContext) {
    if !enabled(Level::Info) {
        return;
    }
    write_info("======================================");
    write_info(&format!(
        "Service '{}' started",
        ctx.application.service_name()
    ));
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", ctx.logging.level));
    if let Some(workers) = ctx.server.worker_threads() {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = ctx.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = ctx.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info(&format!("Renderer: {:?}", ctx.renderer));
    write_info("======================================");
}

pub fn log_profiles(profiles: &[String]) {
    if enabled(Level::Info) && !profiles.is_empty() {
        write_info(&format!("[CONFIG] Active profiles: {}", profiles.join(", ")));
    }
}

pub fn log_section_bound(prefix: &str, fields: usize, explicit: usize) {
    if enabled(Level::Debug) {
        write_info(&format!(
            "[CONFIG] Bound '{prefix}': {explicit}/{fields} fields from source"
        ));
    }
}

pub fn log_render_failed(kind: &str, err: &impl std::fmt::Display) {
    log_error(&format!("[RENDER] {kind} render failed: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    if enabled(Level::Error) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if enabled(Level::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_shutdown() {
    if enabled(Level::Info) {
        write_info("[SHUTDOWN] Stopped accepting connections");
    }
}

/// One access log line in common log style, plus the response content type
pub fn log_access(
    peer: Option<&SocketAddr>,
    method: &Method,
    path: &str,
    status: u16,
    content_type: Option<&str>,
    elapsed: Duration,
) {
    if !enabled(Level::Info) {
        return;
    }
    write_access(&format_access(
        peer,
        method,
        path,
        status,
        content_type,
        elapsed,
    ));
}

fn format_access(
    peer: Option<&SocketAddr>,
    method: &Method,
    path: &str,
    status: u16,
    content_type: Option<&str>,
    elapsed: Duration,
) -> String {
    format!(
        "{} - - [{}] \"{method} {path}\" {status} \"{}\" {:.3}",
        peer.map_or_else(|| "-".to_string(), |p| p.ip().to_string()),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        content_type.unwrap_or("-"),
        elapsed.as_secs_f64(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_access() {
        let peer: SocketAddr = "192.168.1.1:5000".parse().unwrap();
        let line = format_access(
            Some(&peer),
            &Method::GET,
            "/service",
            200,
            Some("application/json"),
            Duration::from_micros(1500),
        );
        assert!(line.starts_with("192.168.1.1 - - ["));
        assert!(line.contains("\"GET /service\" 200 \"application/json\" 0.00"));
    }

    #[test]
    fn test_format_access_without_peer() {
        let line = format_access(None, &Method::POST, "/x", 405, None, Duration::ZERO);
        assert!(line.starts_with("- - - ["));
        assert!(line.contains("\"POST /x\" 405 \"-\" 0.000"));
    }
}
