//! Render kind module
//!
//! The closed set of response content types the renderer understands.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Content-type classification of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Json,
    JavaScript,
    Text,
    Html,
    Xml,
}

impl RenderKind {
    pub const ALL: [Self; 5] = [
        Self::Json,
        Self::JavaScript,
        Self::Text,
        Self::Html,
        Self::Xml,
    ];

    /// Canonical `Content-Type` header value
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::JavaScript => "application/javascript",
            Self::Text => "text/plain; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
            Self::Xml => "application/xml",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::JavaScript => "JAVASCRIPT",
            Self::Text => "TEXT",
            Self::Html => "HTML",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderKind {
    type Err = RenderError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "js" | "javascript" => Ok(Self::JavaScript),
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            _ => Err(RenderError::UnsupportedKind(tag.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(RenderKind::Json.content_type(), "application/json");
        assert_eq!(RenderKind::JavaScript.content_type(), "application/javascript");
        assert_eq!(RenderKind::Text.content_type(), "text/plain; charset=utf-8");
        assert_eq!(RenderKind::Html.content_type(), "text/html; charset=utf-8");
        assert_eq!(RenderKind::Xml.content_type(), "application/xml");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("JSON".parse::<RenderKind>().unwrap(), RenderKind::Json);
        assert_eq!("js".parse::<RenderKind>().unwrap(), RenderKind::JavaScript);
        assert_eq!("JavaScript".parse::<RenderKind>().unwrap(), RenderKind::JavaScript);
        assert_eq!("txt".parse::<RenderKind>().unwrap(), RenderKind::Text);
    }

    #[test]
    fn test_unknown_tag() {
        let err = "yaml".parse::<RenderKind>().unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedKind(ref tag) if tag == "yaml"));
        assert!("htm".parse::<RenderKind>().is_err());
        assert_eq!("HTML".parse::<RenderKind>().unwrap(), RenderKind::Html);
    }
}
