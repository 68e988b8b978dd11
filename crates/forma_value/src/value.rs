//! The property value model.
//!
//! Every property slot in a template decodes into a [`Value`]. Decoding is
//! total: anything a JSON parser accepts becomes some `Value`, and encoding
//! gives back a structurally equal tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::error::ValueResult;
use crate::intrinsic::{pseudo, Intrinsic, IntrinsicFunction};

/// A literal scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Literal {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Literal::String(s) => serde_json::Value::String(s.clone()),
            Literal::Number(n) => serde_json::Value::Number(n.clone()),
            Literal::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::String(s) => serializer.serialize_str(s),
            Literal::Number(n) => n.serialize(serializer),
            Literal::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// A property value: a literal, an intrinsic call, or an aggregate of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Literal(Literal),
    Intrinsic(Intrinsic),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Decode a generic JSON node.
    ///
    /// An object with exactly one key naming a known function is always read
    /// as an intrinsic call, even if a literal single-key map was intended.
    pub fn decode(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Literal(Literal::Bool(b)),
            serde_json::Value::Number(n) => Value::Literal(Literal::Number(n)),
            serde_json::Value::String(s) => Value::Literal(Literal::String(s)),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::decode).collect())
            }
            serde_json::Value::Object(mut map) => {
                let function = match map.keys().next() {
                    Some(key) if map.len() == 1 => IntrinsicFunction::from_key(key),
                    _ => None,
                };
                if let Some(function) = function {
                    let payload = map.remove(function.key()).unwrap_or_default();
                    return Value::Intrinsic(Intrinsic::new(function, Value::decode(payload)));
                }
                Value::Map(
                    map.into_iter()
                        .map(|(key, value)| (key, Value::decode(value)))
                        .collect(),
                )
            }
        }
    }

    /// Encode back into a generic JSON node.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Literal(literal) => literal.to_json(),
            Value::Intrinsic(intrinsic) => intrinsic.to_json(),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Literal(Literal::String(s.into()))
    }

    pub fn intrinsic(function: IntrinsicFunction, args: impl Into<Value>) -> Self {
        Value::Intrinsic(Intrinsic::new(function, args))
    }

    /// Build an intrinsic from its wire key or YAML tag name.
    pub fn try_intrinsic(name: &str, args: impl Into<Value>) -> ValueResult<Self> {
        let function = name.parse::<IntrinsicFunction>()?;
        Ok(Self::intrinsic(function, args))
    }

    /// `{"Ref": logical_id}`
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::intrinsic(IntrinsicFunction::Ref, Value::string(logical_id))
    }

    /// `{"Fn::GetAtt": [logical_id, attribute]}`
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::GetAtt,
            Value::List(vec![Value::string(logical_id), attribute.into()]),
        )
    }

    /// `{"Fn::Join": [delimiter, [values...]]}`
    pub fn join(delimiter: impl Into<String>, values: Vec<Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Join,
            Value::List(vec![Value::string(delimiter), Value::List(values)]),
        )
    }

    /// `{"Fn::Sub": template}`
    pub fn sub(template: impl Into<String>) -> Self {
        Self::intrinsic(IntrinsicFunction::Sub, Value::string(template))
    }

    /// `{"Fn::Sub": [template, {variables}]}`
    pub fn sub_with(template: impl Into<String>, variables: BTreeMap<String, Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Sub,
            Value::List(vec![Value::string(template), Value::Map(variables)]),
        )
    }

    /// `{"Fn::Select": [index, list]}`
    pub fn select(index: impl Into<Value>, list: impl Into<Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Select,
            Value::List(vec![index.into(), list.into()]),
        )
    }

    /// `{"Fn::Split": [delimiter, source]}`
    pub fn split(delimiter: impl Into<String>, source: impl Into<Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Split,
            Value::List(vec![Value::string(delimiter), source.into()]),
        )
    }

    /// `{"Fn::FindInMap": [map, top_level_key, second_level_key]}`
    pub fn find_in_map(
        map_name: impl Into<Value>,
        top_level_key: impl Into<Value>,
        second_level_key: impl Into<Value>,
    ) -> Self {
        Self::intrinsic(
            IntrinsicFunction::FindInMap,
            Value::List(vec![
                map_name.into(),
                top_level_key.into(),
                second_level_key.into(),
            ]),
        )
    }

    pub fn import_value(name: impl Into<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::ImportValue, name)
    }

    pub fn base64(input: impl Into<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::Base64, input)
    }

    /// `{"Fn::Cidr": [ip_block, count, cidr_bits]}`
    pub fn cidr(
        ip_block: impl Into<Value>,
        count: impl Into<Value>,
        cidr_bits: impl Into<Value>,
    ) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Cidr,
            Value::List(vec![ip_block.into(), count.into(), cidr_bits.into()]),
        )
    }

    pub fn get_azs(region: impl Into<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::GetAZs, region)
    }

    /// `{"Fn::If": [condition, if_true, if_false]}`
    pub fn if_(
        condition: impl Into<String>,
        if_true: impl Into<Value>,
        if_false: impl Into<Value>,
    ) -> Self {
        Self::intrinsic(
            IntrinsicFunction::If,
            Value::List(vec![
                Value::string(condition),
                if_true.into(),
                if_false.into(),
            ]),
        )
    }

    pub fn equals(left: impl Into<Value>, right: impl Into<Value>) -> Self {
        Self::intrinsic(
            IntrinsicFunction::Equals,
            Value::List(vec![left.into(), right.into()]),
        )
    }

    /// `{"Fn::Not": [condition]}`
    pub fn not(condition: impl Into<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::Not, Value::List(vec![condition.into()]))
    }

    pub fn and(conditions: Vec<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::And, Value::List(conditions))
    }

    pub fn or(conditions: Vec<Value>) -> Self {
        Self::intrinsic(IntrinsicFunction::Or, Value::List(conditions))
    }

    /// `{"Condition": name}`
    pub fn condition(name: impl Into<String>) -> Self {
        Self::intrinsic(IntrinsicFunction::Condition, Value::string(name))
    }

    /// Stack-scoped name: `{"Fn::Sub": "${AWS::StackName}-<suffix>"}`.
    pub fn name(suffix: &str) -> Self {
        Self::sub(format!("${{{}}}-{}", pseudo::STACK_NAME, suffix))
    }

    pub fn account_id() -> Self {
        Self::reference(pseudo::ACCOUNT_ID)
    }

    pub fn notification_arns() -> Self {
        Self::reference(pseudo::NOTIFICATION_ARNS)
    }

    /// `{"Ref": "AWS::NoValue"}`, which removes the property it is assigned to.
    pub fn no_value() -> Self {
        Self::reference(pseudo::NO_VALUE)
    }

    pub fn partition() -> Self {
        Self::reference(pseudo::PARTITION)
    }

    pub fn region() -> Self {
        Self::reference(pseudo::REGION)
    }

    pub fn stack_id() -> Self {
        Self::reference(pseudo::STACK_ID)
    }

    pub fn stack_name() -> Self {
        Self::reference(pseudo::STACK_NAME)
    }

    pub fn url_suffix() -> Self {
        Self::reference(pseudo::URL_SUFFIX)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Literal(_))
    }

    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Value::Intrinsic(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Literal(Literal::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Literal(Literal::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Literal(Literal::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_intrinsic(&self) -> Option<&Intrinsic> {
        match self {
            Value::Intrinsic(intrinsic) => Some(intrinsic),
            _ => None,
        }
    }

    /// Logical IDs named by any `Ref` or `Fn::GetAtt` inside this value,
    /// in document order, without pseudo parameters. Duplicates are kept.
    pub fn references(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    /// Logical IDs named by `${...}` placeholders of any `Fn::Sub` inside
    /// this value, in document order. Duplicates are kept.
    pub fn sub_references(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_sub_references(&mut found);
        found
    }

    fn collect_sub_references<'a>(&'a self, found: &mut Vec<&'a str>) {
        match self {
            Value::Intrinsic(intrinsic) => {
                found.extend(intrinsic.sub_references());
                intrinsic.args.collect_sub_references(found);
            }
            Value::List(items) => items.iter().for_each(|item| item.collect_sub_references(found)),
            Value::Map(map) => map.values().for_each(|item| item.collect_sub_references(found)),
            Value::Null | Value::Literal(_) => {}
        }
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a str>) {
        match self {
            Value::Intrinsic(intrinsic) => {
                if let Some(target) = intrinsic.target() {
                    if !pseudo::is_pseudo_parameter(target) {
                        found.push(target);
                    }
                }
                intrinsic.args.collect_references(found);
            }
            Value::List(items) => items.iter().for_each(|item| item.collect_references(found)),
            Value::Map(map) => map.values().for_each(|item| item.collect_references(found)),
            Value::Null | Value::Literal(_) => {}
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Literal(literal) => literal.serialize(serializer),
            Value::Intrinsic(intrinsic) => intrinsic.serialize(serializer),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::decode)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(Literal::String(s)) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        Value::decode(raw)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Literal(Literal::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Literal(Literal::Number(n.into()))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Literal(Literal::Number(n.into()))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Literal(Literal::Number(n.into()))
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, |n| Value::Literal(Literal::Number(n)))
    }
}

impl From<Intrinsic> for Value {
    fn from(intrinsic: Intrinsic) -> Self {
        Value::Intrinsic(intrinsic)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_ref_is_intrinsic() {
        let value = Value::decode(json!({"Ref": "Foo"}));
        assert_eq!(value, Value::reference("Foo"));
        assert!(value.is_intrinsic());
    }

    #[test]
    fn test_decode_string_is_literal() {
        let value = Value::decode(json!("Foo"));
        assert_eq!(value, Value::string("Foo"));
        assert!(value.is_literal());
    }

    #[test]
    fn test_function_name_wins_over_literal_map() {
        // A property map whose only key happens to be "Condition" is read as a call.
        let value = Value::decode(json!({"Condition": "IsProd"}));
        assert_eq!(value, Value::condition("IsProd"));
    }

    #[test]
    fn test_multi_key_map_is_not_intrinsic() {
        let value = Value::decode(json!({"Ref": "Foo", "Extra": 1}));
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Ref"], Value::string("Foo"));
    }

    #[test]
    fn test_unknown_function_key_is_plain_map() {
        let raw = json!({"Fn::Length": [1, 2]});
        let value = Value::decode(raw.clone());
        assert!(value.as_map().is_some());
        assert_eq!(value.to_json(), raw);
    }

    #[test]
    fn test_nested_join_decodes_recursively() {
        let value = Value::decode(json!({"Fn::Join": ["-", ["prefix", {"Ref": "Env"}]]}));
        assert_eq!(
            value,
            Value::join("-", vec!["prefix".into(), Value::reference("Env")])
        );
    }

    #[test]
    fn test_malformed_get_att_is_preserved() {
        let raw = json!({"Fn::GetAtt": 7});
        let value = Value::decode(raw.clone());
        let intrinsic = value.as_intrinsic().unwrap();
        assert_eq!(intrinsic.function, IntrinsicFunction::GetAtt);
        assert_eq!(intrinsic.args.as_i64(), Some(7));
        assert_eq!(value.to_json(), raw);
    }

    #[test]
    fn test_numbers_keep_identity() {
        assert_eq!(Value::decode(json!(3)).to_json(), json!(3));
        assert_eq!(Value::decode(json!(3.5)).to_json(), json!(3.5));
        assert_eq!(Value::decode(json!(-2)).as_i64(), Some(-2));
        assert_eq!(Value::from(f64::NAN), Value::Null);
    }

    #[test]
    fn test_null_round_trip() {
        let raw = json!({"A": null, "B": [null]});
        assert_eq!(Value::decode(raw.clone()).to_json(), raw);
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let value = Value::join("", vec![Value::sub("${AWS::Region}"), 1i64.into(), true.into()]);
        let serialized = serde_json::to_value(&value).unwrap();
        assert_eq!(serialized, value.to_json());
    }

    #[test]
    fn test_deserialize_decodes() {
        let value: Value = serde_json::from_str(r#"{"Fn::GetAZs": ""}"#).unwrap();
        assert_eq!(value, Value::get_azs(""));
    }

    #[test]
    fn test_ref_stays_bare() {
        assert_eq!(Value::reference("X").to_json(), json!({"Ref": "X"}));
        assert_eq!(Value::condition("C").to_json(), json!({"Condition": "C"}));
        assert_eq!(Value::base64("x").to_json(), json!({"Fn::Base64": "x"}));
    }

    #[test]
    fn test_constructor_shapes() {
        assert_eq!(
            Value::get_att("Role", "Arn").to_json(),
            json!({"Fn::GetAtt": ["Role", "Arn"]})
        );
        assert_eq!(
            Value::select(0i64, Value::get_azs(Value::reference(pseudo::REGION))).to_json(),
            json!({"Fn::Select": [0, {"Fn::GetAZs": {"Ref": "AWS::Region"}}]})
        );
        assert_eq!(
            Value::split(",", "a,b").to_json(),
            json!({"Fn::Split": [",", "a,b"]})
        );
        assert_eq!(
            Value::find_in_map("RegionMap", Value::reference(pseudo::REGION), "AMI").to_json(),
            json!({"Fn::FindInMap": ["RegionMap", {"Ref": "AWS::Region"}, "AMI"]})
        );
        assert_eq!(
            Value::cidr("10.0.0.0/16", 6i64, 8i64).to_json(),
            json!({"Fn::Cidr": ["10.0.0.0/16", 6, 8]})
        );
        assert_eq!(
            Value::if_("IsProd", "big", Value::reference(pseudo::NO_VALUE)).to_json(),
            json!({"Fn::If": ["IsProd", "big", {"Ref": "AWS::NoValue"}]})
        );
        assert_eq!(
            Value::not(Value::equals(Value::reference("Env"), "prod")).to_json(),
            json!({"Fn::Not": [{"Fn::Equals": [{"Ref": "Env"}, "prod"]}]})
        );
        assert_eq!(
            Value::and(vec![Value::condition("A"), Value::condition("B")]).to_json(),
            json!({"Fn::And": [{"Condition": "A"}, {"Condition": "B"}]})
        );
        assert_eq!(
            Value::name("vpc").to_json(),
            json!({"Fn::Sub": "${AWS::StackName}-vpc"})
        );
    }

    #[test]
    fn test_sub_with_variables() {
        let mut vars = BTreeMap::new();
        vars.insert("Domain".to_string(), Value::reference("RootDomain"));
        let value = Value::sub_with("www.${Domain}", vars);
        assert_eq!(
            value.to_json(),
            json!({"Fn::Sub": ["www.${Domain}", {"Domain": {"Ref": "RootDomain"}}]})
        );
    }

    #[test]
    fn test_try_intrinsic() {
        assert_eq!(
            Value::try_intrinsic("ImportValue", "shared-vpc").unwrap(),
            Value::import_value("shared-vpc")
        );
        assert!(Value::try_intrinsic("Fn::Nope", "x").is_err());
    }

    #[test]
    fn test_references_skip_pseudo_parameters() {
        let value = Value::join(
            ":",
            vec![
                Value::reference(pseudo::PARTITION),
                Value::get_att("Bucket", "Arn"),
                Value::reference("Queue"),
                Value::intrinsic(IntrinsicFunction::GetAtt, "Role.Arn"),
            ],
        );
        assert_eq!(value.references(), vec!["Bucket", "Queue", "Role"]);
    }

    #[test]
    fn test_sub_references_nested() {
        let value = Value::join(
            "",
            vec![
                Value::sub("https://${Api}.execute-api.${AWS::Region}.${AWS::URLSuffix}/"),
                Value::reference("Stage"),
            ],
        );
        assert_eq!(value.sub_references(), vec!["Api"]);
        assert_eq!(value.references(), vec!["Stage"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::string("plain").to_string(), "plain");
        assert_eq!(Value::reference("X").to_string(), r#"{"Ref":"X"}"#);
        assert_eq!(Value::from(5i64).to_string(), "5");
    }
}
