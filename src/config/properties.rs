// Configuration properties module
// Typed sections bound at startup

use std::net::SocketAddr;

use super::section::{BoundFields, ConfigSection, FieldSpec};
use crate::error::ConfigError;

/// `spring.application` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationProperties {
    name: String,
}

impl ApplicationProperties {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uppercased application name, or `""` when no name is configured
    pub fn service_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        self.name.to_uppercase()
    }
}

impl ConfigSection for ApplicationProperties {
    const PREFIX: &'static str = "spring.application";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::string("name", "name", "")];

    fn from_fields(fields: &BoundFields) -> Result<Self, ConfigError> {
        Ok(Self {
            name: fields.string("name"),
        })
    }
}

/// `server` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProperties {
    pub host: String,
    pub port: u16,
    /// Worker threads; `0` uses one per CPU core
    pub workers: usize,
    /// Per-connection timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 0,
            request_timeout: 30,
        }
    }
}

impl ServerProperties {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub const fn worker_threads(&self) -> Option<usize> {
        if self.workers == 0 {
            None
        } else {
            Some(self.workers)
        }
    }
}

impl ConfigSection for ServerProperties {
    const PREFIX: &'static str = "server";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("host", "host", "127.0.0.1"),
        FieldSpec::integer("port", "port", 8080),
        FieldSpec::integer("workers", "workers", 0),
        FieldSpec::integer("request_timeout", "request-timeout", 30),
    ];

    fn from_fields(fields: &BoundFields) -> Result<Self, ConfigError> {
        let port = u16::try_from(fields.integer("port"))
            .map_err(|e| ConfigError::bind(fields.key("port"), e))?;
        let workers = usize::try_from(fields.integer("workers"))
            .map_err(|e| ConfigError::bind(fields.key("workers"), e))?;
        let request_timeout = u64::try_from(fields.integer("request_timeout"))
            .map_err(|e| ConfigError::bind(fields.key("request_timeout"), e))?;

        Ok(Self {
            host: fields.string("host"),
            port,
            workers,
            request_timeout,
        })
    }
}

/// `logging` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingProperties {
    pub level: String,
    pub access_log: bool,
    /// Access log file path (stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingProperties {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl ConfigSection for LoggingProperties {
    const PREFIX: &'static str = "logging";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("level", "level", "info"),
        FieldSpec::boolean("access_log", "access-log", true),
        FieldSpec::string("access_log_file", "access-log-file", ""),
        FieldSpec::string("error_log_file", "error-log-file", ""),
    ];

    fn from_fields(fields: &BoundFields) -> Result<Self, ConfigError> {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        Ok(Self {
            level: fields.string("level"),
            access_log: fields.boolean("access_log"),
            access_log_file: non_empty(fields.string("access_log_file")),
            error_log_file: non_empty(fields.string("error_log_file")),
        })
    }
}
