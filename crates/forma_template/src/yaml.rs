//! YAML loading.
//!
//! YAML documents are normalized into the JSON data model before decoding:
//! merge keys are applied, short-form function tags (`!Ref X`,
//! `!GetAtt A.B`, `!Sub ...`) become their long form, and non-string mapping
//! keys are stringified.

use forma_value::IntrinsicFunction;
use serde_yaml::Value as YamlValue;
use tracing::warn;

use crate::error::TemplateResult;

/// Parse YAML text into a JSON node with short-form tags expanded.
pub fn parse(content: &str) -> TemplateResult<serde_json::Value> {
    let mut document: YamlValue = serde_yaml::from_str(content)?;
    document.apply_merge()?;
    Ok(normalize(document))
}

/// Convert a YAML node into a JSON node, expanding function tags.
pub fn normalize(node: YamlValue) -> serde_json::Value {
    match node {
        YamlValue::Null => serde_json::Value::Null,
        YamlValue::Bool(b) => serde_json::Value::Bool(b),
        YamlValue::Number(n) => number(&n),
        YamlValue::String(s) => serde_json::Value::String(s),
        YamlValue::Sequence(items) => {
            serde_json::Value::Array(items.into_iter().map(normalize).collect())
        }
        YamlValue::Mapping(mapping) => serde_json::Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (key_string(key), normalize(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            match IntrinsicFunction::from_yaml_tag(&tag) {
                Some(function) => {
                    let args = short_form_args(function, tagged.value);
                    let mut call = serde_json::Map::new();
                    call.insert(function.key().to_string(), args);
                    serde_json::Value::Object(call)
                }
                None => {
                    warn!("Ignoring unknown YAML tag {}", tag);
                    normalize(tagged.value)
                }
            }
        }
    }
}

/// `!GetAtt Resource.Attribute` is the only short form whose scalar payload
/// differs from the long form: it becomes `[Resource, Attribute]`.
fn short_form_args(function: IntrinsicFunction, value: YamlValue) -> serde_json::Value {
    match (function, value) {
        (IntrinsicFunction::GetAtt, YamlValue::String(path)) => match path.split_once('.') {
            Some((logical_id, attribute)) => serde_json::json!([logical_id, attribute]),
            None => serde_json::Value::String(path),
        },
        (_, value) => normalize(value),
    }
}

fn number(n: &serde_yaml::Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        serde_json::Value::from(i)
    } else if let Some(u) = n.as_u64() {
        serde_json::Value::from(u)
    } else {
        let f = n.as_f64().unwrap_or(f64::NAN);
        match serde_json::Number::from_f64(f) {
            Some(number) => serde_json::Value::Number(number),
            None => {
                warn!("Replacing non-finite number {} with null", n);
                serde_json::Value::Null
            }
        }
    }
}

fn key_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => normalize(other).to_string(),
    }
}
