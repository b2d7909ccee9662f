//! Typed configuration binding and response rendering for a small HTTP
//! service.
//!
//! Startup loads a layered document, binds typed sections from it and builds
//! the renderer registry into an [`crate::config::AppContext`]. Request handlers
//! share that context read-only and finish by rendering through it.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod render;
pub mod server;

pub use error::{ConfigError, RenderError};
