//! HTTP protocol layer module
//!
//! Status responses that do not go through the renderer.

pub mod response;

pub use response::{build_404_response, build_405_response};
