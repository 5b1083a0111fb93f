//! @ai:module:intent Canonical JSON shape of an API error as it crosses a boundary
//! @ai:module:layer infrastructure
//! @ai:module:public_api WireError, JsonOptions, kebab_case
//! @ai:module:depends_on key_path, stack
//! @ai:module:stateless true

use crate::key_path::{self, KeyPath};
use crate::stack::StackFrame;
use serde::{Deserialize, Serialize};

/// @ai:intent Transport-ready body of an API error
/// @ai:invariant `stack` is only present when explicitly requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireError {
    /// Missing on input means "use the kind's default name".
    #[serde(default)]
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "key_path::deserialize_optional"
    )]
    pub key_path: Option<KeyPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<StackFrame>>,
}

/// @ai:intent Serialization switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonOptions {
    #[serde(default)]
    pub include_stack: bool,
}

impl JsonOptions {
    pub fn with_stack() -> Self {
        Self {
            include_stack: true,
        }
    }
}

/// @ai:intent Render an internal camel-case name in wire form
/// @ai:example ("notAuthorized") -> "not-authorized"
/// @ai:example ("not-found") -> "not-found"
/// @ai:example ("NotFound") -> "not-found"
/// @ai:effects pure
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (idx, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}
