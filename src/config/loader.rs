use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Failed to read parameter file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Missing parameter `{0}`")]
    MissingParameter(String),
    #[error("Invalid parameter `{key}`: {reason}")]
    InvalidParameter { key: String, reason: String },
}

impl ParamError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ParamError::InvalidParameter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Flat `section.name -> value` view over a vehicle parameter document.
///
/// Nested YAML mappings are flattened with `.` separators, so
///
/// ```yaml
/// inertia:
///   mass: 350.0
/// ```
///
/// is looked up as `inertia.mass`.
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    values: BTreeMap<String, Value>,
}

impl ParamMap {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ParamError> {
        let document: Value = serde_yaml::from_str(yaml)?;
        let mut values = BTreeMap::new();
        flatten(&document, "", &mut values)?;
        Ok(Self { values })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParamError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a map directly from key/value pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::from(v)))
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), Value::from(value));
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Look up a required numeric parameter.
    pub fn require(&self, key: &str) -> Result<f64, ParamError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ParamError::MissingParameter(key.to_string()))?;
        let number = value
            .as_f64()
            .ok_or_else(|| ParamError::invalid(key, format!("expected a number, found {value:?}")))?;
        if !number.is_finite() {
            return Err(ParamError::invalid(key, "value must be finite"));
        }
        Ok(number)
    }
}

fn flatten(value: &Value, prefix: &str, out: &mut BTreeMap<String, Value>) -> Result<(), ParamError> {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let key = match key {
                    Value::String(s) => s.clone(),
                    other => {
                        return Err(ParamError::invalid(
                            prefix,
                            format!("non-string key {other:?}"),
                        ))
                    }
                };
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(child, &full_key, out)?;
            }
        }
        Value::Tagged(tagged) => flatten(&tagged.value, prefix, out)?,
        Value::Null if prefix.is_empty() => {}
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
    Ok(())
}
