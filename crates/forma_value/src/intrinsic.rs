//! Intrinsic function definitions.
//!
//! An intrinsic is a deferred-evaluation call embedded in a template in place
//! of a literal, such as `{"Ref": "MyBucket"}` or
//! `{"Fn::Join": ["-", ["a", "b"]]}`. Intrinsics are only modelled here,
//! never evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

/// The fixed set of intrinsic functions recognized when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntrinsicFunction {
    Ref,
    GetAtt,
    Join,
    Sub,
    Select,
    Split,
    FindInMap,
    ImportValue,
    If,
    Not,
    Equals,
    And,
    Or,
    Base64,
    Cidr,
    GetAZs,
    Condition,
    Transform,
}

impl IntrinsicFunction {
    /// Wire key used in the long (JSON) form.
    pub fn key(&self) -> &'static str {
        match self {
            IntrinsicFunction::Ref => "Ref",
            IntrinsicFunction::GetAtt => "Fn::GetAtt",
            IntrinsicFunction::Join => "Fn::Join",
            IntrinsicFunction::Sub => "Fn::Sub",
            IntrinsicFunction::Select => "Fn::Select",
            IntrinsicFunction::Split => "Fn::Split",
            IntrinsicFunction::FindInMap => "Fn::FindInMap",
            IntrinsicFunction::ImportValue => "Fn::ImportValue",
            IntrinsicFunction::If => "Fn::If",
            IntrinsicFunction::Not => "Fn::Not",
            IntrinsicFunction::Equals => "Fn::Equals",
            IntrinsicFunction::And => "Fn::And",
            IntrinsicFunction::Or => "Fn::Or",
            IntrinsicFunction::Base64 => "Fn::Base64",
            IntrinsicFunction::Cidr => "Fn::Cidr",
            IntrinsicFunction::GetAZs => "Fn::GetAZs",
            IntrinsicFunction::Condition => "Condition",
            IntrinsicFunction::Transform => "Fn::Transform",
        }
    }

    /// Parse a long-form wire key. Matching is exact and case sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.key() == key)
    }

    /// The function named by a single-key JSON object, if `node` is one.
    pub fn of_node(node: &serde_json::Value) -> Option<Self> {
        match node.as_object() {
            Some(map) if map.len() == 1 => map.keys().next().and_then(|key| Self::from_key(key)),
            _ => None,
        }
    }

    /// YAML short-form tag name, without the leading `!`.
    pub fn yaml_tag(&self) -> &'static str {
        let key = self.key();
        key.strip_prefix("Fn::").unwrap_or(key)
    }

    /// Parse a YAML short-form tag. A leading `!` is accepted.
    pub fn from_yaml_tag(tag: &str) -> Option<Self> {
        let tag = tag.strip_prefix('!').unwrap_or(tag);
        Self::all().into_iter().find(|f| f.yaml_tag() == tag)
    }

    pub fn all() -> Vec<Self> {
        vec![
            IntrinsicFunction::Ref,
            IntrinsicFunction::GetAtt,
            IntrinsicFunction::Join,
            IntrinsicFunction::Sub,
            IntrinsicFunction::Select,
            IntrinsicFunction::Split,
            IntrinsicFunction::FindInMap,
            IntrinsicFunction::ImportValue,
            IntrinsicFunction::If,
            IntrinsicFunction::Not,
            IntrinsicFunction::Equals,
            IntrinsicFunction::And,
            IntrinsicFunction::Or,
            IntrinsicFunction::Base64,
            IntrinsicFunction::Cidr,
            IntrinsicFunction::GetAZs,
            IntrinsicFunction::Condition,
            IntrinsicFunction::Transform,
        ]
    }
}

impl std::fmt::Display for IntrinsicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for IntrinsicFunction {
    type Err = ValueError;

    fn from_str(s: &str) -> ValueResult<Self> {
        Self::from_key(s)
            .or_else(|| Self::from_yaml_tag(s))
            .ok_or_else(|| ValueError::UnknownFunction(s.to_string()))
    }
}

/// A single intrinsic function call.
///
/// Arguments are kept exactly as decoded. Shapes the function would not accept
/// (a numeric `Fn::GetAtt`, a three-element `Fn::Join`) are preserved rather
/// than rejected, so newer or malformed usages still round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Intrinsic {
    pub function: IntrinsicFunction,
    pub args: Box<Value>,
}

impl Intrinsic {
    pub fn new(function: IntrinsicFunction, args: impl Into<Value>) -> Self {
        Self {
            function,
            args: Box::new(args.into()),
        }
    }

    /// Logical ID named by a `Ref` or `Fn::GetAtt`.
    ///
    /// Both `Fn::GetAtt` forms are understood: `["Id", "Attr"]` and `"Id.Attr"`.
    /// Returns `None` for other functions or when the target is not a literal.
    pub fn target(&self) -> Option<&str> {
        match self.function {
            IntrinsicFunction::Ref => self.args.as_str(),
            IntrinsicFunction::GetAtt => match self.args.as_ref() {
                Value::List(items) => items.first().and_then(Value::as_str),
                other => other
                    .as_str()
                    .map(|s| s.split_once('.').map_or(s, |(id, _)| id)),
            },
            _ => None,
        }
    }

    /// Logical ID and attribute name of an `Fn::GetAtt` with literal arguments.
    pub fn get_att_parts(&self) -> Option<(&str, &str)> {
        if self.function != IntrinsicFunction::GetAtt {
            return None;
        }
        match self.args.as_ref() {
            Value::List(items) if items.len() == 2 => {
                Some((items[0].as_str()?, items[1].as_str()?))
            }
            other => other.as_str()?.split_once('.'),
        }
    }

    /// Whether this is a `Ref` to one of the `AWS::` pseudo parameters.
    pub fn is_pseudo_ref(&self) -> bool {
        self.function == IntrinsicFunction::Ref
            && self.args.as_str().is_some_and(pseudo::is_pseudo_parameter)
    }

    /// Placeholder names of an `Fn::Sub` template, in order.
    ///
    /// Both forms are understood: `"template"` and `["template", {vars}]`.
    /// Escaped `${!Literal}` placeholders are skipped.
    pub fn sub_variables(&self) -> Vec<&str> {
        if self.function != IntrinsicFunction::Sub {
            return Vec::new();
        }
        let template = match self.args.as_ref() {
            Value::List(items) => items.first().and_then(Value::as_str),
            other => other.as_str(),
        };
        let (Some(template), Some(re)) = (template, SUB_PLACEHOLDER.as_ref()) else {
            return Vec::new();
        };
        re.captures_iter(template)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str().trim())
            .filter(|name| !name.is_empty() && !name.starts_with('!'))
            .collect()
    }

    /// Logical IDs named by `${Id}` or `${Id.Attr}` placeholders of an
    /// `Fn::Sub`, without pseudo parameters or names bound in its variable map.
    pub fn sub_references(&self) -> Vec<&str> {
        let bound = match self.args.as_ref() {
            Value::List(items) => items.get(1).and_then(Value::as_map),
            _ => None,
        };
        self.sub_variables()
            .into_iter()
            .filter(|name| bound.map_or(true, |vars| !vars.contains_key(*name)))
            .map(|name| name.split_once('.').map_or(name, |(id, _)| id))
            .filter(|id| !pseudo::is_pseudo_parameter(id))
            .collect()
    }

    /// Encode into the long wire form `{ key: args }`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(1);
        map.insert(self.function.key().to_string(), self.args.to_json());
        serde_json::Value::Object(map)
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.function.key(), self.args.as_ref())?;
        map.end()
    }
}

static SUB_PLACEHOLDER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").ok());

/// Pseudo parameters predefined by the deployment engine.
pub mod pseudo {
    pub const ACCOUNT_ID: &str = "AWS::AccountId";
    pub const NOTIFICATION_ARNS: &str = "AWS::NotificationARNs";
    pub const NO_VALUE: &str = "AWS::NoValue";
    pub const PARTITION: &str = "AWS::Partition";
    pub const REGION: &str = "AWS::Region";
    pub const STACK_ID: &str = "AWS::StackId";
    pub const STACK_NAME: &str = "AWS::StackName";
    pub const URL_SUFFIX: &str = "AWS::URLSuffix";

    pub const ALL: &[&str] = &[
        ACCOUNT_ID,
        NOTIFICATION_ARNS,
        NO_VALUE,
        PARTITION,
        REGION,
        STACK_ID,
        STACK_NAME,
        URL_SUFFIX,
    ];

    pub fn is_pseudo_parameter(name: &str) -> bool {
        ALL.contains(&name)
    }
}
