// Configuration module entry point
// Loads hierarchical documents and binds them onto typed sections

mod binder;
mod document;
mod properties;
mod section;
mod state;

// Re-export public types
pub use binder::{bind, bind_section};
pub use document::{
    split_profiles, Document, DocumentLoader, DEFAULT_BASE, ENV_PREFIX, ENV_SEPARATOR,
    PROFILES_KEY,
};
pub use properties::{ApplicationProperties, LoggingProperties, ServerProperties};
pub use section::{BoundFields, ConfigSection, FieldDefault, FieldSpec, FieldValue};
pub use state::AppContext;

// Formats accepted by `Document::parse`
pub use ::config::FileFormat;
