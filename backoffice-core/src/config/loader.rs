use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load and parse a YAML file, flattening it into the values map.
///
/// A missing file is not an error.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if path.exists() {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        load_yaml_str(&content, values)?;
    }
    Ok(())
}

/// Parse a YAML string and flatten it into the values map.
pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Flatten a YAML tree into dot-separated keys.
pub(crate) fn flatten_yaml(
    prefix: &str,
    value: &serde_yaml::Value,
    out: &mut HashMap<String, ConfigValue>,
) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key_str = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            if !prefix.is_empty() {
                out.insert(
                    prefix.to_string(),
                    ConfigValue::List(seq.iter().map(ConfigValue::from_yaml).collect()),
                );
                for (i, item) in seq.iter().enumerate() {
                    flatten_yaml(&format!("{prefix}.{i}"), item, out);
                }
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
            }
        }
    }
}

/// Namespace of environment variables that override configuration keys.
pub(crate) const ENV_PREFIX: &str = "APP_";

/// Overlay a single environment variable onto the values map.
///
/// Because keys may themselves contain underscores (`max_per_page`), the
/// variable overrides the existing key whose underscored upper-case form
/// matches; otherwise it is stored under the fully dotted form until a typed
/// section claims it (see [`overlay_section_env`]).
pub(crate) fn overlay_env(env_key: &str, env_val: &str, values: &mut HashMap<String, ConfigValue>) {
    if !env_key.starts_with(ENV_PREFIX) {
        return;
    }
    let existing = values
        .keys()
        .find(|key| env_name(key) == env_key)
        .cloned();
    let key = existing.unwrap_or_else(|| env_key.to_lowercase().replace('_', "."));
    values.insert(key, ConfigValue::String(env_val.to_string()));
}

/// Apply environment overrides for keys a typed section declares.
///
/// Covers keys that no YAML file sets, where [`overlay_env`] had nothing to
/// match `APP_DATA_MAX_PER_PAGE` against.
pub(crate) fn overlay_section_env<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    env: &HashMap<String, String>,
    values: &mut HashMap<String, ConfigValue>,
) {
    for key in keys {
        if let Some(val) = env.get(&env_name(key)) {
            values.insert(key.to_string(), ConfigValue::String(val.clone()));
        }
    }
}

/// `app.data.max_per_page` -> `APP_DATA_MAX_PER_PAGE`
pub(crate) fn env_name(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_underscored_key() {
        let mut values = HashMap::new();
        values.insert("app.data.max_per_page".to_string(), ConfigValue::Integer(10));
        overlay_env("APP_DATA_MAX_PER_PAGE", "50", &mut values);
        assert!(matches!(
            values.get("app.data.max_per_page"),
            Some(ConfigValue::String(s)) if s == "50"
        ));
    }

    #[test]
    fn env_without_yaml_key_is_dotted() {
        let mut values = HashMap::new();
        overlay_env("APP_LOG_FORMAT", "json", &mut values);
        assert!(values.contains_key("app.log.format"));
    }

    #[test]
    fn foreign_env_is_ignored() {
        let mut values = HashMap::new();
        overlay_env("PATH", "/usr/bin", &mut values);
        assert!(values.is_empty());
    }

    #[test]
    fn section_keys_claim_underscored_env() {
        let env = HashMap::from([
            ("APP_DATA_MAX_PER_PAGE".to_string(), "20".to_string()),
            ("APP_OTHER_KEY".to_string(), "x".to_string()),
        ]);
        let mut values = HashMap::new();
        for (k, v) in &env {
            overlay_env(k, v, &mut values);
        }
        assert!(!values.contains_key("app.data.max_per_page"));

        overlay_section_env(["app.data.max_per_page", "app.data.default_per_page"], &env, &mut values);
        assert_eq!(
            values.get("app.data.max_per_page"),
            Some(&ConfigValue::String("20".into()))
        );
        assert!(!values.contains_key("app.data.default_per_page"));
        assert!(!values.contains_key("app.other_key"));
    }
}
