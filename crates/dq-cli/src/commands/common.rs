//! Helpers shared by CLI commands

use anyhow::{Context, Result};

/// Parse an inline `--vars` payload into the JSON map dbt receives.
///
/// YAML is a superset of JSON here, so both `{"k": "v"}` and `k: v`
/// spellings are accepted.
pub fn parse_vars(raw: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(raw)
        .with_context(|| format!("Failed to parse --vars payload: {raw}"))?;
    match yaml_to_json(&parsed) {
        serde_json::Value::Object(map) => {
            log::debug!("Parsed --vars payload with {} entries", map.len());
            Ok(map)
        }
        other => anyhow::bail!("--vars must be a mapping, got: {other}"),
    }
}

/// Convert a YAML value to JSON, stringifying non-string mapping keys.
pub fn yaml_to_json(value: &serde_yaml::Value) -> serde_json::Value {
    match value {
        serde_yaml::Value::Null => serde_json::Value::Null,
        serde_yaml::Value::Bool(b) => serde_json::Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            serde_json::to_value(n).unwrap_or(serde_json::Value::Null)
        }
        serde_yaml::Value::String(s) => serde_json::Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => {
            serde_json::Value::Array(seq.iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => serde_yaml::to_string(other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default(),
                };
                object.insert(key, yaml_to_json(v));
            }
            serde_json::Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
