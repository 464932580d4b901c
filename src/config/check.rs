//! Detect configuration keys absent from a YAML file.

use serde_yaml::Value;

pub const KNOWN_FIELDS: [&str; 4] = [
    "api_url",
    "login_timeout_secs",
    "api_timeout_secs",
    "time_format",
];

/// Keys of [`KNOWN_FIELDS`] missing from `content`. Unparsable content
/// reports every key as missing.
pub fn missing_fields(content: &str) -> Vec<&'static str> {
    let parsed = serde_yaml::from_str::<Value>(content).ok();
    let map = parsed.as_ref().and_then(Value::as_mapping);

    KNOWN_FIELDS
        .iter()
        .copied()
        .filter(|k| map.is_none_or(|m| !m.contains_key(Value::String((*k).to_string()))))
        .collect()
}
