//! Resource schema surface published to the host
//!
//! The host owns diffing and planning; it only needs to know each
//! attribute's type, whether the caller or the server sets it, and which
//! attributes are mutually exclusive.

use serde::Serialize;
use serde_json::Value;

use crate::error::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Int,
    Float,
    Bool,
}

/// Who sets an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMode {
    /// Must be set by the caller.
    Required,
    /// May be set by the caller.
    Optional,
    /// Set by the server only.
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub mode: AttributeMode,
    pub description: &'static str,
    #[serde(skip_serializing_if = "is_empty_group")]
    pub exactly_one_of: &'static [&'static str],
}

impl Attribute {
    const fn new(
        name: &'static str,
        kind: AttributeType,
        mode: AttributeMode,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            mode,
            description,
            exactly_one_of: &[],
        }
    }

    #[must_use]
    pub const fn required(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, AttributeMode::Required, description)
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, AttributeMode::Optional, description)
    }

    #[must_use]
    pub const fn computed(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, AttributeMode::Computed, description)
    }

    /// Exactly one attribute of `group` (which includes this one) must be set.
    #[must_use]
    pub const fn exactly_one_of(mut self, group: &'static [&'static str]) -> Self {
        self.exactly_one_of = group;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check required attributes and exclusive groups in a desired state.
    ///
    /// Absent, `null` and empty-string values all count as unset.
    pub fn check_desired(&self, state: &Value) -> Result<(), ProviderError> {
        for attribute in &self.attributes {
            if attribute.mode == AttributeMode::Required && !is_set(state.get(attribute.name)) {
                return Err(ProviderError::InvalidAttributes(format!(
                    "{}: \"{}\" is required",
                    self.type_name, attribute.name
                )));
            }
            if !attribute.exactly_one_of.is_empty() {
                let set = attribute
                    .exactly_one_of
                    .iter()
                    .filter(|name| is_set(state.get(**name)))
                    .count();
                if set != 1 {
                    return Err(ProviderError::InvalidAttributes(format!(
                        "{}: exactly one of {} must be set",
                        self.type_name,
                        attribute.exactly_one_of.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_empty_group(group: &&'static [&'static str]) -> bool {
    group.is_empty()
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ResourceSchema {
        ResourceSchema {
            type_name: "wistia_test",
            description: "test",
            attributes: vec![
                Attribute::required("name", AttributeType::String, "Name."),
                Attribute::optional("a", AttributeType::String, "A.").exactly_one_of(&["a", "b"]),
                Attribute::optional("b", AttributeType::String, "B.").exactly_one_of(&["a", "b"]),
                Attribute::computed("id", AttributeType::Int, "Id."),
            ],
        }
    }

    #[test]
    fn test_required_attribute() {
        let err = schema().check_desired(&json!({"a": "x"})).unwrap_err();
        assert!(err.to_string().contains("\"name\" is required"));
        let err = schema().check_desired(&json!({"name": "", "a": "x"})).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidAttributes(_)));
    }

    #[test]
    fn test_exactly_one_of() {
        assert!(schema().check_desired(&json!({"name": "n", "a": "x"})).is_ok());
        assert!(schema().check_desired(&json!({"name": "n", "b": "y", "a": null})).is_ok());
        assert!(schema().check_desired(&json!({"name": "n"})).is_err());
        assert!(schema()
            .check_desired(&json!({"name": "n", "a": "x", "b": "y"}))
            .is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(schema()).unwrap();
        assert_eq!(value["attributes"][0]["type"], "string");
        assert_eq!(value["attributes"][0]["mode"], "required");
        assert!(value["attributes"][0].get("exactly_one_of").is_none());
        assert_eq!(value["attributes"][1]["exactly_one_of"], json!(["a", "b"]));
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(schema().attribute("id").unwrap().mode, AttributeMode::Computed);
        assert!(schema().attribute("missing").is_none());
    }
}
