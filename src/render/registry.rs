//! Renderer registry
//!
//! Maps each `RenderKind` to its registered variant. Adding a variant is an
//! explicit `register` call.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::kind::RenderKind;
use super::sink::{HttpSink, ResponseSink};
use super::variants::{
    HtmlRender, InlineModelRender, JavaScriptRender, JsonRender, ModelRender, Render, TextRender,
};
use super::RenderRequest;
use crate::error::RenderError;
use crate::logger;

/// Fixed registry of render variants
pub struct Renderer {
    variants: HashMap<RenderKind, Box<dyn Render>>,
}

impl Renderer {
    /// Registry with no variants
    pub fn new() -> Self {
        Self {
            variants: HashMap::new(),
        }
    }

    /// JSON, JavaScript, text and HTML, with the inline model renderer
    pub fn with_defaults() -> Self {
        Self::with_model(Arc::new(InlineModelRender))
    }

    /// Default variants with a custom model renderer for script responses
    pub fn with_model(model: Arc<dyn ModelRender>) -> Self {
        let mut renderer = Self::new();
        renderer.register(Box::new(JsonRender));
        renderer.register(Box::new(JavaScriptRender::new(model)));
        renderer.register(Box::new(TextRender));
        renderer.register(Box::new(HtmlRender));
        renderer
    }

    /// Register a variant under its kind, returning the one it replaces
    pub fn register(&mut self, variant: Box<dyn Render>) -> Option<Box<dyn Render>> {
        self.variants.insert(variant.kind(), variant)
    }

    pub fn supports(&self, kind: RenderKind) -> bool {
        self.variants.contains_key(&kind)
    }

    fn variant(&self, kind: RenderKind) -> Result<&dyn Render, RenderError> {
        self.variants
            .get(&kind)
            .map(|variant| &**variant)
            .ok_or_else(|| RenderError::UnsupportedKind(kind.name().to_string()))
    }

    /// Render `value` as `kind` into `sink`.
    ///
    /// An unregistered kind fails before the sink is touched. Otherwise the
    /// content type is set first; a serialization failure afterwards leaves
    /// that header in place and writes no body.
    pub fn render<T: Serialize + ?Sized>(
        &self,
        sink: &mut dyn ResponseSink,
        kind: RenderKind,
        value: &T,
    ) -> Result<(), RenderError> {
        let variant = self.variant(kind)?;
        sink.set_content_type(variant.content_type())?;
        let value = serde_json::to_value(value)?;
        let body = variant.render_body(&value)?;
        sink.write_body(body)
    }

    pub fn dispatch<T: Serialize + ?Sized>(
        &self,
        sink: &mut dyn ResponseSink,
        request: RenderRequest<'_, T>,
    ) -> Result<(), RenderError> {
        self.render(sink, request.kind, request.payload)
    }

    /// Render into a fresh HTTP response; failures become a logged 500
    pub fn respond<T: Serialize + ?Sized>(
        &self,
        kind: RenderKind,
        value: &T,
    ) -> Response<Full<Bytes>> {
        let mut sink = HttpSink::new();
        match self.render(&mut sink, kind, value) {
            Ok(()) => sink.into_response(),
            Err(e) => {
                logger::log_render_failed(kind.name(), &e);
                sink.into_error_response(&e)
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.variants.keys().map(|k| k.name()).collect();
        kinds.sort_unstable();
        f.debug_struct("Renderer").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use serde::ser::{Error as _, Serializer};
    use serde_json::{json, Value};

    /// Sink that records the order of operations
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        content_type: Option<&'static str>,
        body: Option<Bytes>,
    }

    impl ResponseSink for RecordingSink {
        fn set_content_type(&mut self, content_type: &'static str) -> Result<(), RenderError> {
            self.events.push(format!("header:{content_type}"));
            self.content_type = Some(content_type);
            Ok(())
        }

        fn write_body(&mut self, body: Bytes) -> Result<(), RenderError> {
            self.events.push(format!("body:{}", body.len()));
            self.body = Some(body);
            Ok(())
        }

        fn content_type(&self) -> Option<&'static str> {
            self.content_type
        }

        fn is_committed(&self) -> bool {
            self.body.is_some()
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not representable"))
        }
    }

    struct Recording {
        seen: std::sync::Mutex<Vec<Value>>,
    }

    impl ModelRender for Recording {
        fn render_model(&self, model: &Value) -> Result<Bytes, RenderError> {
            self.seen.lock().unwrap().push(model.clone());
            Ok(Bytes::from_static(b"/* model */"))
        }
    }

    #[test]
    fn test_header_before_body_for_every_registered_kind() {
        let renderer = Renderer::with_defaults();
        for kind in RenderKind::ALL.into_iter().filter(|k| renderer.supports(*k)) {
            let mut sink = RecordingSink::default();
            renderer.render(&mut sink, kind, "ok").unwrap();
            assert_eq!(sink.events.len(), 2, "{kind}");
            assert_eq!(sink.events[0], format!("header:{}", kind.content_type()));
            assert!(sink.events[1].starts_with("body:"));
            assert_eq!(sink.content_type(), Some(kind.content_type()));
        }
    }

    #[test]
    fn test_unregistered_kind_leaves_sink_untouched() {
        let renderer = Renderer::with_defaults();
        assert!(!renderer.supports(RenderKind::Xml));

        let mut sink = RecordingSink::default();
        let err = renderer
            .render(&mut sink, RenderKind::Xml, &json!({"a": 1}))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedKind(ref k) if k == "XML"));
        assert!(sink.events.is_empty());
        assert!(!sink.is_committed());
    }

    #[test]
    fn test_empty_registry() {
        let renderer = Renderer::new();
        let mut sink = RecordingSink::default();
        assert!(renderer.render(&mut sink, RenderKind::Json, &1).is_err());
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_serialize_failure_keeps_header() {
        let renderer = Renderer::with_defaults();
        let mut sink = HttpSink::new();
        let err = renderer
            .render(&mut sink, RenderKind::Json, &Unserializable)
            .unwrap_err();
        assert!(matches!(err, RenderError::Serialize(_)));
        assert_eq!(sink.content_type(), Some("application/json"));
        assert!(!sink.is_committed());
    }

    #[test]
    fn test_javascript_scenario() {
        let model = Arc::new(Recording {
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let renderer = Renderer::with_model(model.clone());

        let mut sink = HttpSink::new();
        renderer
            .render(&mut sink, RenderKind::JavaScript, "ok")
            .unwrap();
        assert_eq!(sink.content_type(), Some("application/javascript"));
        assert_eq!(sink.body().unwrap().as_ref(), b"/* model */");
        assert_eq!(*model.seen.lock().unwrap(), vec![json!("ok")]);
    }

    #[test]
    fn test_dispatch_request() {
        let renderer = Renderer::with_defaults();
        let mut sink = HttpSink::new();
        let payload = json!({"name": "orders"});
        renderer
            .dispatch(&mut sink, RenderRequest::new(RenderKind::Json, &payload))
            .unwrap();
        assert_eq!(sink.body().unwrap().as_ref(), br#"{"name":"orders"}"#);
    }

    #[test]
    fn test_second_render_into_same_sink_fails() {
        let renderer = Renderer::with_defaults();
        let mut sink = HttpSink::new();
        renderer.render(&mut sink, RenderKind::Text, "one").unwrap();
        let err = renderer
            .render(&mut sink, RenderKind::Text, "two")
            .unwrap_err();
        assert!(matches!(err, RenderError::AlreadyCommitted));
        assert_eq!(sink.body().unwrap().as_ref(), b"one");
    }

    #[test]
    fn test_header_stays_committed_after_failed_render() {
        let renderer = Renderer::with_defaults();
        let mut sink = HttpSink::new();
        assert!(renderer
            .render(&mut sink, RenderKind::Json, &Unserializable)
            .is_err());

        let err = renderer
            .render(&mut sink, RenderKind::Text, "late")
            .unwrap_err();
        assert!(matches!(err, RenderError::AlreadyCommitted));
        assert_eq!(sink.content_type(), Some("application/json"));
        assert!(sink.body().is_none());
    }

    #[test]
    fn test_json_keeps_field_order() {
        #[derive(Serialize)]
        struct Ordered {
            zeta: u8,
            alpha: u8,
        }

        let renderer = Renderer::with_defaults();
        let mut sink = HttpSink::new();
        renderer
            .render(&mut sink, RenderKind::Json, &Ordered { zeta: 1, alpha: 2 })
            .unwrap();
        assert_eq!(sink.body().unwrap().as_ref(), br#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_register_replaces_variant() {
        struct Shouting;
        impl Render for Shouting {
            fn kind(&self) -> RenderKind {
                RenderKind::Text
            }
            fn render_body(&self, value: &Value) -> Result<Bytes, RenderError> {
                Ok(Bytes::from(value.as_str().unwrap_or_default().to_uppercase()))
            }
        }

        let mut renderer = Renderer::with_defaults();
        assert!(renderer.register(Box::new(Shouting)).is_some());
        let mut sink = HttpSink::new();
        renderer.render(&mut sink, RenderKind::Text, "quiet").unwrap();
        assert_eq!(sink.body().unwrap().as_ref(), b"QUIET");
    }

    #[tokio::test]
    async fn test_respond_success() {
        let response = Renderer::with_defaults().respond(RenderKind::Json, &json!([1, 2]));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"[1,2]");
    }

    #[test]
    fn test_respond_failure_is_500() {
        let response =
            Renderer::with_defaults().respond(RenderKind::Html, &json!({"not": "markup"}));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["Content-Type"], "text/html; charset=utf-8");
    }
}
