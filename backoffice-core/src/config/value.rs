use super::ConfigError;

/// A scalar (or list) leaf of the flattened configuration tree.
///
/// Environment overrides always arrive as `String`; conversions parse them.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;
        match value {
            Yaml::Null => ConfigValue::Null,
            Yaml::Bool(b) => ConfigValue::Bool(*b),
            Yaml::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Integer(i),
                (None, Some(f)) => ConfigValue::Float(f),
                (None, None) => ConfigValue::String(n.to_string()),
            },
            Yaml::String(s) => ConfigValue::String(s.clone()),
            Yaml::Sequence(items) => ConfigValue::List(items.iter().map(Self::from_yaml).collect()),
            // Mappings never reach a leaf; tagged values keep their debug form.
            other => ConfigValue::String(format!("{other:?}")),
        }
    }
}

/// Conversion from a raw [`ConfigValue`] into the type a section reads.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be read from the back-office configuration",
    note = "supported: String, u64, bool and Option<T> of those"
)]
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

fn type_mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        Ok(match value {
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Null | ConfigValue::List(_) => return Err(type_mismatch(key, "String")),
        })
    }
}

impl FromConfigValue for u64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let parsed = match value {
            ConfigValue::Integer(i) => u64::try_from(*i).ok(),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| type_mismatch(key, "u64"))
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            ConfigValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(type_mismatch(key, "bool")),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Null => Ok(None),
            present => T::from_config_value(present, key).map(Some),
        }
    }
}
