//! Response rendering module
//!
//! Serializes a payload according to a `RenderKind` and writes it, header
//! first, into a response sink.

mod kind;
mod registry;
mod sink;
mod variants;

pub use kind::RenderKind;
pub use registry::Renderer;
pub use sink::{HttpSink, ResponseSink};
pub use variants::{
    HtmlRender, InlineModelRender, JavaScriptRender, JsonRender, ModelRender, Render, TextRender,
};

/// A render kind paired with the payload to serialize
#[derive(Debug)]
pub struct RenderRequest<'a, T: ?Sized> {
    pub kind: RenderKind,
    pub payload: &'a T,
}

impl<'a, T: ?Sized> RenderRequest<'a, T> {
    pub const fn new(kind: RenderKind, payload: &'a T) -> Self {
        Self { kind, payload }
    }
}
