//! @ai:module:intent Typed HTTP-style API error taxonomy with a canonical JSON wire shape
//! @ai:module:layer domain
//! @ai:module:public_api api_error, cause, error, key_path, kind, options, output, stack, status, wire
//! @ai:module:stateless true
//!
//! # apierr
//!
//! A closed set of API error kinds (not-found, forbidden, bad-request, ...)
//! that share one shape: a name, a message, an optional entity and key path,
//! a status code, an origin marker and an optional underlying cause. Errors
//! serialize to a fixed JSON body and can be rebuilt on the receiving side.
//!
//! ## Example
//!
//! ```rust
//! use apierr::{ApiError, ErrorOptions, JsonOptions, StatusCode};
//!
//! let err = ApiError::not_found((
//!     "Widget missing",
//!     ErrorOptions::new().entity("widget").key_path("items.0.id"),
//! ));
//! assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
//!
//! let body = serde_json::to_string(&err.to_json(&JsonOptions::default())).unwrap();
//! assert_eq!(
//!     body,
//!     r#"{"name":"not-found","message":"Widget missing","entity":"widget","keyPath":"items.0.id"}"#
//! );
//!
//! // On the other side of the wire:
//! let wire = serde_json::from_str(&body).unwrap();
//! let remote = ApiError::parse(wire, StatusCode::NOT_FOUND, "inventory");
//! assert_eq!(remote.origin(), Some("inventory"));
//! ```

pub mod api_error;
pub mod cause;
pub mod error;
pub mod key_path;
pub mod kind;
pub mod options;
pub mod output;
pub mod stack;
pub mod status;
pub mod wire;

pub use api_error::ApiError;
pub use cause::Underlying;
pub use error::{Error, Result};
pub use key_path::KeyPath;
pub use kind::{ErrorKind, KindDefaults};
pub use options::{merge_defaults, Arguments, ErrorOptions};
pub use output::{format_error, format_taxonomy, OutputFormat};
pub use stack::{parse_stack, StackFrame};
pub use status::StatusCode;
pub use wire::{kebab_case, JsonOptions, WireError};
