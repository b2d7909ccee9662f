// Application context module
// Bound sections and the renderer registry, built once at startup

use super::binder::bind_section;
use super::document::Document;
use super::properties::{ApplicationProperties, LoggingProperties, ServerProperties};
use crate::error::ConfigError;
use crate::render::Renderer;

/// Process-wide, read-only context shared by request handlers through `Arc`
#[derive(Debug)]
pub struct AppContext {
    pub application: ApplicationProperties,
    pub server: ServerProperties,
    pub logging: LoggingProperties,
    pub renderer: Renderer,
}

impl AppContext {
    /// Bind every section from `document` and build the default renderer
    pub fn bind(document: &Document) -> Result<Self, ConfigError> {
        Ok(Self {
            application: bind_section(document)?,
            server: bind_section(document)?,
            logging: bind_section(document)?,
            renderer: Renderer::with_defaults(),
        })
    }
}
