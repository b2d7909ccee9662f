//! Render variants
//!
//! Each variant fixes its content type and turns a payload into body bytes.
//! The registry sets the header before asking a variant for the body.

use hyper::body::Bytes;
use serde_json::Value;
use std::sync::Arc;

use super::kind::RenderKind;
use crate::error::RenderError;

/// One registered render implementation
pub trait Render: Send + Sync {
    fn kind(&self) -> RenderKind;

    fn content_type(&self) -> &'static str {
        self.kind().content_type()
    }

    /// Serialize the payload into body bytes
    fn render_body(&self, value: &Value) -> Result<Bytes, RenderError>;
}

/// Framework-level model render used by script responses
pub trait ModelRender: Send + Sync {
    fn render_model(&self, model: &Value) -> Result<Bytes, RenderError>;
}

/// Emits string models as script source and anything else as a JSON literal
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineModelRender;

impl ModelRender for InlineModelRender {
    fn render_model(&self, model: &Value) -> Result<Bytes, RenderError> {
        match model {
            Value::String(source) => Ok(Bytes::from(source.clone())),
            other => Ok(Bytes::from(serde_json::to_vec(other)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRender;

impl Render for JsonRender {
    fn kind(&self) -> RenderKind {
        RenderKind::Json
    }

    fn render_body(&self, value: &Value) -> Result<Bytes, RenderError> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }
}

/// Script responses; the body comes from the model renderer
#[derive(Clone)]
pub struct JavaScriptRender {
    model: Arc<dyn ModelRender>,
}

impl JavaScriptRender {
    pub fn new(model: Arc<dyn ModelRender>) -> Self {
        Self { model }
    }
}

impl Default for JavaScriptRender {
    fn default() -> Self {
        Self::new(Arc::new(InlineModelRender))
    }
}

impl Render for JavaScriptRender {
    fn kind(&self) -> RenderKind {
        RenderKind::JavaScript
    }

    fn render_body(&self, value: &Value) -> Result<Bytes, RenderError> {
        self.model.render_model(value)
    }
}

/// Plain text; scalars only
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRender;

impl Render for TextRender {
    fn kind(&self) -> RenderKind {
        RenderKind::Text
    }

    fn render_body(&self, value: &Value) -> Result<Bytes, RenderError> {
        match value {
            Value::String(s) => Ok(Bytes::from(s.clone())),
            Value::Number(n) => Ok(Bytes::from(n.to_string())),
            Value::Bool(b) => Ok(Bytes::from(b.to_string())),
            Value::Null => Ok(Bytes::new()),
            other => Err(RenderError::Unrepresentable {
                kind: RenderKind::Text.name(),
                shape: shape(other),
            }),
        }
    }
}

/// HTML markup passed through verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRender;

impl Render for HtmlRender {
    fn kind(&self) -> RenderKind {
        RenderKind::Html
    }

    fn render_body(&self, value: &Value) -> Result<Bytes, RenderError> {
        match value {
            Value::String(markup) => Ok(Bytes::from(markup.clone())),
            Value::Null => Ok(Bytes::new()),
            other => Err(RenderError::Unrepresentable {
                kind: RenderKind::Html.name(),
                shape: shape(other),
            }),
        }
    }
}

const fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = JsonRender.render_body(&json!({"name": "orders"})).unwrap();
        assert_eq!(body.as_ref(), br#"{"name":"orders"}"#);
    }

    #[test]
    fn test_inline_model_render() {
        let model = InlineModelRender;
        assert_eq!(model.render_model(&json!("ok")).unwrap().as_ref(), b"ok");
        assert_eq!(model.render_model(&json!([1, 2])).unwrap().as_ref(), b"[1,2]");
    }

    #[test]
    fn test_javascript_delegates_to_model() {
        struct Fixed;
        impl ModelRender for Fixed {
            fn render_model(&self, _model: &Value) -> Result<Bytes, RenderError> {
                Ok(Bytes::from_static(b"fixed();"))
            }
        }

        let render = JavaScriptRender::new(Arc::new(Fixed));
        assert_eq!(render.content_type(), "application/javascript");
        assert_eq!(render.render_body(&json!("ignored")).unwrap().as_ref(), b"fixed();");
    }

    #[test]
    fn test_text_scalars() {
        assert_eq!(TextRender.render_body(&json!("hi")).unwrap().as_ref(), b"hi");
        assert_eq!(TextRender.render_body(&json!(42)).unwrap().as_ref(), b"42");
        assert_eq!(TextRender.render_body(&json!(true)).unwrap().as_ref(), b"true");
        assert!(TextRender.render_body(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_text_rejects_structures() {
        let err = TextRender.render_body(&json!({"a": 1})).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Unrepresentable {
                kind: "TEXT",
                shape: "object"
            }
        ));
    }

    #[test]
    fn test_html_rejects_non_markup() {
        assert_eq!(
            HtmlRender.render_body(&json!("<p>x</p>")).unwrap().as_ref(),
            b"<p>x</p>"
        );
        assert!(matches!(
            HtmlRender.render_body(&json!([1])),
            Err(RenderError::Unrepresentable { shape: "array", .. })
        ));
    }
}
