use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Entity the engine was working on when the error occurred
///
/// Built from the `error.entity_info` object of an error body. Known keys
/// land in their own fields, every other string-valued key is kept in
/// `additional_info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExceptionContext {
    /// Provider prefix of the entity kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_prefix: Option<String>,
    /// Provider version of the entity kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_version: Option<String>,
    /// Entity kind name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind_name: Option<String>,
    /// Any other context the engine attached (entity uuid, spec version, ...)
    #[serde(flatten)]
    pub additional_info: BTreeMap<String, String>,
}

impl ExceptionContext {
    /// Extract context from an `entity_info` object
    pub fn from_entity_info(info: &Map<String, Value>) -> Self {
        let mut context = Self::default();

        for (key, value) in info {
            let Some(text) = scalar_to_string(value) else {
                continue;
            };

            match key.as_str() {
                "provider_prefix" => context.provider_prefix = Some(text),
                "provider_version" => context.provider_version = Some(text),
                "kind_name" => context.kind_name = Some(text),
                _ => {
                    context.additional_info.insert(key.clone(), text);
                }
            }
        }

        context
    }

    /// Whether no context was attached
    pub fn is_empty(&self) -> bool {
        self.provider_prefix.is_none()
            && self.provider_version.is_none()
            && self.kind_name.is_none()
            && self.additional_info.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
