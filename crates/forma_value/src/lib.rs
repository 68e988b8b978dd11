//! # forma_value
//!
//! Property values for infrastructure templates.
//!
//! A property slot holds either a literal (string, number, bool) or an
//! intrinsic function call such as `Ref` or `Fn::Join` whose result is only
//! known to the deployment engine. This crate decodes generic JSON nodes into
//! that tagged union and encodes them back without losing which variant was
//! present.
//!
//! ## Features
//!
//! - Total decoding: unknown shapes are preserved, never rejected
//! - Exact re-encoding: `Ref` stays bare, other functions keep the `Fn::` prefix
//! - Constructors for every supported intrinsic function
//! - Pseudo parameter constants (`AWS::Region`, `AWS::StackName`, ...)
//! - [`Prop`] slots for nested blocks that may also be an intrinsic call
//!
//! ## Example
//!
//! ```rust
//! use forma_value::{pseudo, Value};
//! use serde_json::json;
//!
//! let raw = json!({"Fn::Join": ["-", ["prefix", {"Ref": "Env"}]]});
//! let value = Value::decode(raw.clone());
//!
//! assert_eq!(value, Value::join("-", vec!["prefix".into(), Value::reference("Env")]));
//! assert_eq!(value.to_json(), raw);
//!
//! let region = Value::reference(pseudo::REGION);
//! assert!(region.as_intrinsic().unwrap().is_pseudo_ref());
//! ```

pub mod error;
pub mod intrinsic;
pub mod prop;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use intrinsic::{pseudo, Intrinsic, IntrinsicFunction};
pub use prop::{Prop, PropList};
pub use value::{Literal, Value};
