//! @ai:module:intent Define the closed set of error kinds and their built-in defaults
//! @ai:module:layer domain
//! @ai:module:public_api ErrorKind, KindDefaults
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::status::StatusCode;
use crate::wire::kebab_case;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// @ai:intent Identifies which taxonomy entry an API error was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The base type; has no default message.
    #[serde(rename = "api-error")]
    Base,
    NotAuthorized,
    Forbidden,
    NotFound,
    Conflict,
    MethodNotAllowed,
    BadRequest,
    TooManyRequests,
    PayloadTooLarge,
    InternalError,
    NotImplemented,
    ServiceUnavailable,
}

/// @ai:intent Built-in name, status and message a kind falls back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindDefaults {
    pub name: &'static str,
    pub status_code: StatusCode,
    pub message: Option<&'static str>,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 12] = [
        ErrorKind::Base,
        ErrorKind::NotAuthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::MethodNotAllowed,
        ErrorKind::BadRequest,
        ErrorKind::TooManyRequests,
        ErrorKind::PayloadTooLarge,
        ErrorKind::InternalError,
        ErrorKind::NotImplemented,
        ErrorKind::ServiceUnavailable,
    ];

    /// @ai:intent Look up the defaults table entry for this kind
    /// @ai:effects pure
    pub fn defaults(self) -> KindDefaults {
        let (name, status_code, message) = match self {
            ErrorKind::Base => ("apiError", StatusCode::INTERNAL_ERROR, None),
            ErrorKind::NotAuthorized => {
                ("notAuthorized", StatusCode::NOT_AUTHORIZED, Some("Not authorized."))
            }
            ErrorKind::Forbidden => ("forbidden", StatusCode::FORBIDDEN, Some("Forbidden.")),
            ErrorKind::NotFound => ("notFound", StatusCode::NOT_FOUND, Some("Resource not found.")),
            ErrorKind::Conflict => (
                "alreadyExists",
                StatusCode::CONFLICT,
                Some("Resource already exists."),
            ),
            ErrorKind::MethodNotAllowed => (
                "methodNotAllowed",
                StatusCode::METHOD_NOT_ALLOWED,
                Some("Method is not allowed."),
            ),
            ErrorKind::BadRequest => ("badRequest", StatusCode::BAD_REQUEST, Some("Bad request.")),
            ErrorKind::TooManyRequests => (
                "tooManyRequests",
                StatusCode::TOO_MANY_REQUESTS,
                Some("Too many requests."),
            ),
            ErrorKind::PayloadTooLarge => (
                "payloadTooLarge",
                StatusCode::PAYLOAD_TOO_LARGE,
                Some("Payload too large."),
            ),
            ErrorKind::InternalError => (
                "internalError",
                StatusCode::INTERNAL_ERROR,
                Some("Internal error."),
            ),
            ErrorKind::NotImplemented => (
                "notImplemented",
                StatusCode::NOT_IMPLEMENTED,
                Some("Not implemented."),
            ),
            ErrorKind::ServiceUnavailable => (
                "serviceUnavailable",
                StatusCode::SERVICE_UNAVAILABLE,
                Some("Service unavailable."),
            ),
        };

        KindDefaults {
            name,
            status_code,
            message,
        }
    }

    /// @ai:intent Get the kebab-case identifier used on the command line
    /// @ai:effects pure
    pub fn id(self) -> &'static str {
        match self {
            ErrorKind::Base => "api-error",
            ErrorKind::NotAuthorized => "not-authorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::MethodNotAllowed => "method-not-allowed",
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::TooManyRequests => "too-many-requests",
            ErrorKind::PayloadTooLarge => "payload-too-large",
            ErrorKind::InternalError => "internal-error",
            ErrorKind::NotImplemented => "not-implemented",
            ErrorKind::ServiceUnavailable => "service-unavailable",
        }
    }

    /// @ai:intent Find the kind whose default name matches, in internal or wire form
    /// @ai:example ("notFound") -> Some(NotFound)
    /// @ai:example ("already-exists") -> Some(Conflict)
    /// @ai:example ("teapot") -> None
    /// @ai:effects pure
    pub fn from_name(name: &str) -> Option<ErrorKind> {
        let wire = kebab_case(name);
        Self::ALL
            .into_iter()
            .find(|kind| kebab_case(kind.defaults().name) == wire)
    }

    /// @ai:intent Find the non-base kind whose default status matches
    /// @ai:post 500 maps to InternalError, unknown codes map to None
    /// @ai:effects pure
    pub fn from_status(code: StatusCode) -> Option<ErrorKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| *kind != ErrorKind::Base)
            .find(|kind| kind.defaults().status_code == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ErrorKind {
    type Err = Error;

    /// Accepts the command-line id (`conflict`) or either form of the default name.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .or_else(|| Self::from_name(s))
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
