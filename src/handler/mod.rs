//! Request handler module
//!
//! Routes requests to the service endpoints and renders their responses.

pub mod router;
pub mod service;

// Re-export main entry point
pub use router::{handle_request, route};
pub use service::ServiceDescriptor;
