use backoffice_core::config::typed::read_or;
use backoffice_core::{BackofficeConfig, ConfigError, ConfigProperties, PropertyMeta};

const DEFAULT_MAX_PER_PAGE: u64 = 1000;

/// `app.data` section: limits applied when decoding list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataConfig {
    /// Page size used when a request does not name one. `0` returns everything.
    pub default_per_page: u64,
    /// Largest page size a request may ask for.
    pub max_per_page: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_per_page: 0,
            max_per_page: DEFAULT_MAX_PER_PAGE,
        }
    }
}

impl ConfigProperties for DataConfig {
    fn prefix() -> &'static str {
        "app.data"
    }

    fn properties_metadata() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta::with_default(Self::prefix(), "default_per_page", "u64", 0, "Page size when the request has none (0 = all)"),
            PropertyMeta::with_default(Self::prefix(), "max_per_page", "u64", DEFAULT_MAX_PER_PAGE, "Upper bound on requested page size"),
        ]
    }

    fn from_config(config: &BackofficeConfig) -> Result<Self, ConfigError> {
        let default_per_page = read_or(config, Self::prefix(), "default_per_page", 0u64)?;
        let max_per_page = read_or(config, Self::prefix(), "max_per_page", DEFAULT_MAX_PER_PAGE)?;
        if max_per_page == 0 {
            return Err(ConfigError::Invalid {
                key: format!("{}.max_per_page", Self::prefix()),
                message: "must be at least 1".into(),
            });
        }
        if default_per_page > max_per_page {
            return Err(ConfigError::Invalid {
                key: format!("{}.default_per_page", Self::prefix()),
                message: format!("{default_per_page} exceeds max_per_page ({max_per_page})"),
            });
        }
        Ok(Self {
            default_per_page,
            max_per_page,
        })
    }
}
