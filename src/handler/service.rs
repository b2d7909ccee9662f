//! Service descriptor served by the application routes

use serde::Serialize;

use crate::config::ApplicationProperties;

/// Public view of the bound application section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub service_name: String,
}

impl ServiceDescriptor {
    /// Script assigning the service name to a global
    pub fn script(&self) -> String {
        format!(
            "var SERVICE_NAME = {};",
            serde_json::Value::String(self.service_name.clone())
        )
    }
}

impl From<&ApplicationProperties> for ServiceDescriptor {
    fn from(app: &ApplicationProperties) -> Self {
        Self {
            name: app.name().to_string(),
            service_name: app.service_name(),
        }
    }
}
