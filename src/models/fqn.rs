//! Fully qualified names
//!
//! Schema elements are named by a `(namespace, name)` pair. The canonical
//! string form is `namespace.name`; on the wire the pair travels as
//! `{"namespace": ..., "name": ...}`.

use crate::core::error::ModelError;
use crate::core::validation::is_valid_fqn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FullyQualifiedName {
    namespace: String,
    name: String,
}

impl FullyQualifiedName {
    pub fn new(namespace: &str, name: &str) -> Result<Self, ModelError> {
        Self::parse(&format!("{namespace}.{name}"))
    }

    /// Parse the `namespace.name` form
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        if !is_valid_fqn(value) {
            return Err(ModelError::invalid("fqn", format!("must be a valid FQN, got '{value}'")));
        }
        let (namespace, name) = value
            .split_once('.')
            .ok_or_else(|| ModelError::invalid("fqn", "must be a valid FQN"))?;
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Accepts either the string form or a `{namespace, name}` object
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Object(map) => {
                let part = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or_default();
                Self::new(part("namespace"), part("name"))
            }
            _ => Err(ModelError::invalid("fqn", "must be a valid FQN")),
        }
    }

    pub fn is_valid(value: &Value) -> bool {
        Self::from_value(value).is_ok()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for FullyQualifiedName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for FullyQualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_display() {
        let fqn = FullyQualifiedName::parse("general.person").unwrap();
        assert_eq!(fqn.namespace(), "general");
        assert_eq!(fqn.name(), "person");
        assert_eq!(fqn.to_string(), "general.person");
    }

    #[test]
    fn test_new_rejects_empty_parts() {
        assert!(FullyQualifiedName::new("", "person").is_err());
        assert!(FullyQualifiedName::new("general", "").is_err());
        assert!(FullyQualifiedName::new("gen.eral", "person").is_err());
    }

    #[test]
    fn test_from_value_accepts_both_forms() {
        let a = FullyQualifiedName::from_value(&json!("nc.SubjectIdentification")).unwrap();
        let b = FullyQualifiedName::from_value(&json!({
            "namespace": "nc",
            "name": "SubjectIdentification"
        }))
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        assert!(!FullyQualifiedName::is_valid(&json!(null)));
        assert!(!FullyQualifiedName::is_valid(&json!(12)));
        assert!(!FullyQualifiedName::is_valid(&json!({ "namespace": "nc" })));
        assert!(!FullyQualifiedName::is_valid(&json!("nc")));
    }

    #[test]
    fn test_serializes_as_object() {
        let fqn: FullyQualifiedName = "nc.PersonGivenName".parse().unwrap();
        assert_eq!(
            serde_json::to_value(&fqn).unwrap(),
            json!({ "namespace": "nc", "name": "PersonGivenName" })
        );
        let back: FullyQualifiedName = serde_json::from_value(json!("nc.PersonGivenName")).unwrap();
        assert_eq!(back, fqn);
    }
}
