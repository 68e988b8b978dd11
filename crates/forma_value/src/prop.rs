//! Structured property slots that may also hold an intrinsic call.
//!
//! Schemas model nested blocks and lists as concrete types, but templates
//! routinely put a whole block behind `Fn::If` or `Fn::GetAtt`. A [`Prop`]
//! accepts either form and keeps which one was present.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::intrinsic::{pseudo, Intrinsic, IntrinsicFunction};
use crate::value::Value;

/// A nested property: an intrinsic call or a value of the concrete shape `T`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Prop<T> {
    Intrinsic(Intrinsic),
    Value(T),
}

/// A list property: the whole list, or any single entry, may be an intrinsic.
pub type PropList<T> = Prop<Vec<Prop<T>>>;

impl<T> Prop<T> {
    pub fn from_intrinsic(intrinsic: Intrinsic) -> Self {
        Prop::Intrinsic(intrinsic)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Prop::Value(value) => Some(value),
            Prop::Intrinsic(_) => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut T> {
        match self {
            Prop::Value(value) => Some(value),
            Prop::Intrinsic(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Prop::Value(value) => Some(value),
            Prop::Intrinsic(_) => None,
        }
    }

    pub fn as_intrinsic(&self) -> Option<&Intrinsic> {
        match self {
            Prop::Intrinsic(intrinsic) => Some(intrinsic),
            Prop::Value(_) => None,
        }
    }

    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Prop::Intrinsic(_))
    }

    /// `{"Ref": "AWS::NoValue"}`, which removes the property when deployed.
    pub fn is_no_value(&self) -> bool {
        self.as_intrinsic().is_some_and(|intrinsic| {
            intrinsic.function == IntrinsicFunction::Ref
                && intrinsic.args.as_str() == Some(pseudo::NO_VALUE)
        })
    }
}

impl<T> Prop<Vec<Prop<T>>> {
    /// A literal list of concrete entries.
    pub fn list(items: impl IntoIterator<Item = T>) -> Self {
        Prop::Value(items.into_iter().map(Prop::Value).collect())
    }

    /// Concrete entries, in order. Intrinsic entries are skipped, and a list
    /// that is itself an intrinsic yields nothing.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.as_value()
            .into_iter()
            .flatten()
            .filter_map(Prop::as_value)
    }
}

impl<T: Default> Default for Prop<T> {
    fn default() -> Self {
        Prop::Value(T::default())
    }
}

impl<T> From<T> for Prop<T> {
    fn from(value: T) -> Self {
        Prop::Value(value)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Prop<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if IntrinsicFunction::of_node(&raw).is_some() {
            return match Value::decode(raw) {
                Value::Intrinsic(intrinsic) => Ok(Prop::Intrinsic(intrinsic)),
                other => Err(de::Error::custom(format!(
                    "expected an intrinsic call, found {}",
                    other
                ))),
            };
        }
        serde_json::from_value(raw)
            .map(Prop::Value)
            .map_err(de::Error::custom)
    }
}
