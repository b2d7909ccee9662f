// Configuration document module
// Wraps the layered `config` source that sections are bound from

use config::{Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default base file stem, resolved against any supported extension
pub const DEFAULT_BASE: &str = "application";

/// Environment variable prefix for overrides (`APP_SERVER__PORT`)
pub const ENV_PREFIX: &str = "APP";

/// Separator between nested key segments in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Key listing the active profiles, comma separated
pub const PROFILES_KEY: &str = "spring.profiles.active";

/// Hierarchical key-value document
#[derive(Debug, Clone)]
pub struct Document {
    inner: config::Config,
    profiles: Vec<String>,
}

impl Document {
    /// A document with no keys at all
    pub fn empty() -> Self {
        Self {
            inner: config::Config::default(),
            profiles: Vec::new(),
        }
    }

    /// Parse an in-memory document in the given format
    pub fn parse(text: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let inner = config::Config::builder()
            .add_source(File::from_str(text, format))
            .build()
            .map_err(ConfigError::Parse)?;
        Ok(Self {
            inner,
            profiles: Vec::new(),
        })
    }

    /// Parse an in-memory YAML document
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, FileFormat::Yaml)
    }

    /// Look up a dotted key.
    ///
    /// Absent keys and explicit nulls both yield `Ok(None)`; a value that
    /// cannot be deserialized as `T` is an error.
    pub(crate) fn lookup<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, config::ConfigError> {
        match self.inner.get::<Option<T>>(key) {
            Ok(value) => Ok(value),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Profiles whose overlays were layered into this document
    pub fn applied_profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Profiles named by `spring.profiles.active`
    pub fn active_profiles(&self) -> Result<Vec<String>, ConfigError> {
        let raw = self
            .lookup::<String>(PROFILES_KEY)
            .map_err(|e| ConfigError::bind(PROFILES_KEY, e))?
            .unwrap_or_default();
        Ok(split_profiles(&raw))
    }
}

/// Split a comma separated profile list, dropping empty entries
pub fn split_profiles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Layered document loader.
///
/// Layers from lowest to highest priority: the base file, explicitly
/// registered property sources, one overlay per active profile, and the
/// environment.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    base: PathBuf,
    property_sources: Vec<PathBuf>,
    profiles: Option<Vec<String>>,
    env_prefix: Option<String>,
}

impl DocumentLoader {
    /// Loader for the base file stem (without extension)
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            property_sources: Vec::new(),
            profiles: None,
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Register an extra property source file; it must exist when loading
    #[must_use]
    pub fn property_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.property_sources.push(path.into());
        self
    }

    /// Force the active profiles instead of reading `spring.profiles.active`
    #[must_use]
    pub fn profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = Some(profiles.into_iter().map(Into::into).collect());
        self
    }

    /// Read environment overrides under a different prefix
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Skip the environment layer
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Build the layered document
    pub fn load(&self) -> Result<Document, ConfigError> {
        let profiles = match &self.profiles {
            Some(profiles) => profiles.clone(),
            None => self.build(&[])?.active_profiles()?,
        };
        self.build(&profiles)
    }

    fn build(&self, profiles: &[String]) -> Result<Document, ConfigError> {
        let base = self.base.to_string_lossy();

        let mut builder =
            config::Config::builder().add_source(File::with_name(&base).required(false));

        for path in &self.property_sources {
            builder = builder.add_source(File::from(path.as_path()));
        }

        for profile in profiles {
            builder =
                builder.add_source(File::with_name(&format!("{base}-{profile}")).required(false));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR),
            );
        }

        let inner = builder.build().map_err(ConfigError::Parse)?;
        Ok(Document {
            inner,
            profiles: profiles.to_vec(),
        })
    }
}
