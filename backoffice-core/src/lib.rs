//! # backoffice-core
//!
//! Ambient runtime shared by the back-office crates: layered configuration,
//! the HTTP-facing [`HttpError`], garde validation reports and tracing setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{
    BackofficeConfig, ConfigError, ConfigProperties, ConfigValue, FromConfigValue, PropertyMeta,
};
pub use error::{error_response, HttpError};
pub use logging::{init_tracing, LogConfig, LogFormat};
pub use validation::{FieldError, ValidationErrorResponse};

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{BackofficeConfig, ConfigProperties, HttpError, LogConfig};
    pub use crate::validation::Validate;
}
