use std::env;

use serde::{Deserialize, Serialize};

/// Knobs that change validation behavior of the runtime.
///
/// Defaults favor explicit errors over the historical silent behavior:
/// object construction checks its field count, method arity is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Reject `object_create` calls whose value count differs from the
    /// class's field count. When off, extra values and missing names are
    /// silently dropped during method dispatch.
    pub strict_field_arity: bool,
    /// Reject method calls whose argument count differs from the method's
    /// declared parameter count.
    pub enforce_method_arity: bool,
    /// Upper bound on simultaneously live heap slots. Allocation past the
    /// limit fails with an out-of-memory error.
    pub max_live_values: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            strict_field_arity: true,
            enforce_method_arity: false,
            max_live_values: None,
        }
    }
}

impl RuntimeConfig {
    /// Parses a JSON document. Missing keys take their default value.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reads overrides from `LUOYAN_STRICT_FIELD_ARITY`,
    /// `LUOYAN_ENFORCE_METHOD_ARITY` and `LUOYAN_MAX_LIVE_VALUES`.
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(flag) = lookup("LUOYAN_STRICT_FIELD_ARITY").and_then(|v| parse_flag(&v)) {
            config.strict_field_arity = flag;
        }
        if let Some(flag) = lookup("LUOYAN_ENFORCE_METHOD_ARITY").and_then(|v| parse_flag(&v)) {
            config.enforce_method_arity = flag;
        }
        if let Some(limit) = lookup("LUOYAN_MAX_LIVE_VALUES").and_then(|v| v.trim().parse().ok())
        {
            config.max_live_values = Some(limit);
        }
        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = RuntimeConfig::default();
        assert!(config.strict_field_arity);
        assert!(!config.enforce_method_arity);
        assert_eq!(config.max_live_values, None);
    }

    #[test]
    fn json_fills_missing_keys_with_defaults() {
        let config = RuntimeConfig::from_json(r#"{ "enforce_method_arity": true }"#).unwrap();
        assert!(config.enforce_method_arity);
        assert!(config.strict_field_arity);

        let back = RuntimeConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn json_rejects_wrong_types() {
        assert!(RuntimeConfig::from_json(r#"{ "max_live_values": "many" }"#).is_err());
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LUOYAN_STRICT_FIELD_ARITY", "off"),
            ("LUOYAN_ENFORCE_METHOD_ARITY", "1"),
            ("LUOYAN_MAX_LIVE_VALUES", "64"),
        ]
        .into_iter()
        .collect();
        let config = RuntimeConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(!config.strict_field_arity);
        assert!(config.enforce_method_arity);
        assert_eq!(config.max_live_values, Some(64));
    }

    #[test]
    fn env_ignores_garbage() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "LUOYAN_STRICT_FIELD_ARITY" => Some("maybe".to_string()),
            "LUOYAN_MAX_LIVE_VALUES" => Some("-3".to_string()),
            _ => None,
        });
        assert_eq!(config, RuntimeConfig::default());
    }
}
