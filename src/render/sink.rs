//! Response sink module
//!
//! A sink receives the content type first, then exactly one body. Setting the
//! content type commits the header; it is never rolled back.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::error::RenderError;
use crate::logger;

/// Output target of a render operation (headers + body)
pub trait ResponseSink {
    /// Set the `Content-Type` header; the first call commits it
    fn set_content_type(&mut self, content_type: &'static str) -> Result<(), RenderError>;

    /// Write the body; fails without a content type or when a body exists
    fn write_body(&mut self, body: Bytes) -> Result<(), RenderError>;

    fn content_type(&self) -> Option<&'static str>;

    /// Whether a body has been written
    fn is_committed(&self) -> bool;
}

/// Sink accumulating into a hyper response
#[derive(Debug)]
pub struct HttpSink {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Option<Bytes>,
}

impl Default for HttpSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSink {
    pub const fn new() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub const fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: None,
        }
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Build the response from what the sink holds
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let body = self.body.unwrap_or_default();
        let mut builder = Response::builder()
            .status(self.status)
            .header("Content-Length", body.len());
        if let Some(content_type) = self.content_type {
            builder = builder.header("Content-Type", content_type);
        }

        builder.body(Full::new(body)).unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
    }

    /// Build a 500 response after a render failure.
    ///
    /// A committed content type stays on the response with an empty body;
    /// without one the error is reported as plain text.
    pub fn into_error_response(self, error: &RenderError) -> Response<Full<Bytes>> {
        let (content_type, body) = match self.content_type {
            Some(content_type) => (content_type, Bytes::new()),
            None => (
                "text/plain; charset=utf-8",
                Bytes::from(format!("500 Internal Server Error: {error}")),
            ),
        };

        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header("Content-Type", content_type)
            .header("Content-Length", body.len())
            .body(Full::new(body))
            .unwrap_or_else(|e| {
                logger::log_error(&format!("Failed to build 500 response: {e}"));
                Response::new(Full::new(Bytes::new()))
            })
    }
}

impl ResponseSink for HttpSink {
    fn set_content_type(&mut self, content_type: &'static str) -> Result<(), RenderError> {
        if self.content_type.is_some() || self.body.is_some() {
            return Err(RenderError::AlreadyCommitted);
        }
        self.content_type = Some(content_type);
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), RenderError> {
        if self.content_type.is_none() {
            return Err(RenderError::HeaderNotSet);
        }
        if self.body.is_some() {
            return Err(RenderError::AlreadyCommitted);
        }
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
