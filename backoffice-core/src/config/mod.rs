mod loader;
pub mod typed;
pub mod value;

use std::collections::HashMap;
use std::ops::Deref;
use std::path::Path;

pub use typed::{ConfigProperties, PropertyMeta};
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable that overrides the requested profile.
pub const PROFILE_ENV: &str = "BACKOFFICE_PROFILE";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// A value was present and well-typed but outside the accepted domain.
    Invalid { key: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Back-office configuration loaded from YAML files, `.env` files, and environment variables.
///
/// `BackofficeConfig` (= `BackofficeConfig<()>`) provides raw key-value access only.
/// `BackofficeConfig<T>` adds typed access to a config section via `Deref<Target = T>`.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml` (base)
/// 2. `application-{profile}.yaml` (profile override)
/// 3. `.env` file (loaded into process environment)
/// 4. `.env.{profile}` file (loaded into process environment)
/// 5. Environment variables (e.g., `APP_DATA_MAX_PER_PAGE` overrides `app.data.max_per_page`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `BACKOFFICE_PROFILE` env var > argument.
#[derive(Debug, Clone)]
pub struct BackofficeConfig<T = ()> {
    values: HashMap<String, ConfigValue>,
    /// `APP_*` variables seen at load time, replayed for typed sections.
    env: HashMap<String, String>,
    profile: String,
    typed: T,
}

impl BackofficeConfig {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration for the given profile from `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        loader::load_yaml_file(&dir.join(format!("application-{active_profile}.yaml")), &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        // `app.data.max_per_page` <-> `APP_DATA_MAX_PER_PAGE`
        let env: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(loader::ENV_PREFIX))
            .collect();
        for (env_key, env_val) in &env {
            loader::overlay_env(env_key, env_val, &mut values);
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");

        Ok(BackofficeConfig {
            values,
            env,
            profile: active_profile,
            typed: (),
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(BackofficeConfig {
            values,
            env: HashMap::new(),
            profile: profile.to_string(),
            typed: (),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        BackofficeConfig {
            values: HashMap::new(),
            env: HashMap::new(),
            profile: "test".to_string(),
            typed: (),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Upgrade to a typed config by constructing `T` from the raw values.
    ///
    /// Environment variables named after the section's declared keys are
    /// applied first, so `APP_DATA_MAX_PER_PAGE` reaches `app.data.max_per_page`
    /// even when no YAML file mentions it.
    ///
    /// ```ignore
    /// let config = BackofficeConfig::load("dev")?.with_typed::<DataConfig>()?;
    /// config.max_per_page  // typed field access via Deref
    /// ```
    pub fn with_typed<C: ConfigProperties>(mut self) -> Result<BackofficeConfig<C>, ConfigError> {
        let meta = C::properties_metadata();
        loader::overlay_section_env(meta.iter().map(|m| m.full_key.as_str()), &self.env, &mut self.values);
        let typed = C::from_config(&self)?;
        Ok(BackofficeConfig {
            values: self.values,
            env: self.env,
            profile: self.profile,
            typed,
        })
    }
}

impl<T> BackofficeConfig<T> {
    /// Get a typed value for the given dot-separated key (raw access).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    /// Check whether a key exists in the config.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Get a reference to the typed config layer.
    pub fn typed(&self) -> &T {
        &self.typed
    }
}

impl<T> Deref for BackofficeConfig<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.typed
    }
}
