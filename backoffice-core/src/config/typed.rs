use super::{BackofficeConfig, ConfigError, FromConfigValue};

/// Metadata about a single configuration property.
#[derive(Debug, Clone)]
pub struct PropertyMeta {
    /// Relative key (e.g., `"max_per_page"`).
    pub key: String,
    /// Absolute key (e.g., `"app.data.max_per_page"`).
    pub full_key: String,
    /// Rust type name (e.g., `"u64"`).
    pub type_name: &'static str,
    /// Whether the property is required (no default and not `Option`).
    pub required: bool,
    /// Default value as a string, if any.
    pub default_value: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl PropertyMeta {
    /// Metadata for an optional property with a default.
    pub fn with_default(
        prefix: &str,
        key: &str,
        type_name: &'static str,
        default_value: impl ToString,
        description: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            full_key: format!("{prefix}.{key}"),
            type_name,
            required: false,
            default_value: Some(default_value.to_string()),
            description: Some(description.to_string()),
        }
    }
}

/// Trait for strongly-typed configuration sections.
///
/// ```ignore
/// impl ConfigProperties for DataConfig {
///     fn prefix() -> &'static str { "app.data" }
///     fn properties_metadata() -> Vec<PropertyMeta> { ... }
///     fn from_config(config: &BackofficeConfig) -> Result<Self, ConfigError> {
///         Ok(Self { max_per_page: read_or(config, Self::prefix(), "max_per_page", 1000)? })
///     }
/// }
/// ```
pub trait ConfigProperties: Sized {
    /// The configuration key prefix (e.g., `"app.data"`).
    fn prefix() -> &'static str;

    /// Metadata about all expected properties.
    fn properties_metadata() -> Vec<PropertyMeta>;

    /// Construct from a `BackofficeConfig` instance.
    fn from_config(config: &BackofficeConfig) -> Result<Self, ConfigError>;
}

/// Read `{prefix}.{key}`, falling back to `default` when the key is absent.
pub fn read_or<V: FromConfigValue>(
    config: &BackofficeConfig,
    prefix: &str,
    key: &str,
    default: V,
) -> Result<V, ConfigError> {
    config.get_or(&format!("{prefix}.{key}"), default)
}
