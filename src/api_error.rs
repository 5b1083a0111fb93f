//! @ai:module:intent Build, rehydrate and serialize API errors of every kind
//! @ai:module:layer domain
//! @ai:module:public_api ApiError
//! @ai:module:depends_on kind, options, cause, wire, stack, error
//! @ai:module:thread_safe true

use crate::cause::Underlying;
use crate::error::{Error, Result};
use crate::key_path::KeyPath;
use crate::kind::ErrorKind;
use crate::options::{merge_defaults, Arguments, ErrorOptions};
use crate::stack::{parse_stack, StackFrame};
use crate::status::StatusCode;
use crate::wire::{kebab_case, JsonOptions, WireError};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// @ai:intent An HTTP-style failure with its metadata, ready to cross a service boundary
/// @ai:invariant message is set and status_code is a valid HTTP status
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ErrorKind,
    name: String,
    message: String,
    entity: Option<String>,
    status_code: StatusCode,
    key_path: Option<KeyPath>,
    origin: Option<String>,
    underlying: Option<Underlying>,
    options: Map<String, Value>,
    stack: Arc<Backtrace>,
}

impl ApiError {
    /// @ai:intent Construct the base type; the caller must supply a message
    /// @ai:pre args resolve to a message
    /// @ai:post status_code defaults to 500 and name to "apiError"
    /// @ai:example ("Disk full") -> Ok(ApiError { status_code: 500, .. })
    /// @ai:example (()) -> Err(InvalidMessage)
    pub fn new(args: impl Into<Arguments>) -> Result<Self> {
        Self::build(ErrorKind::Base, args)
    }

    /// @ai:intent Single factory: merge caller options over the kind's defaults
    /// @ai:post fails only when no message resolves, which only the base kind can hit
    pub fn build(kind: ErrorKind, args: impl Into<Arguments>) -> Result<Self> {
        let mut options = Self::merged(kind, args.into());
        let message = options.message.take().ok_or_else(|| Error::invalid_message(None))?;
        Ok(Self::assemble(kind, options, message))
    }

    /// @ai:intent Construct from untyped (message, options) input
    /// @ai:post non-string messages fail with InvalidMessage
    pub fn build_json(kind: ErrorKind, message: Value, options: Option<Value>) -> Result<Self> {
        Self::build(kind, Arguments::from_json(message, options)?)
    }

    pub fn not_authorized(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::NotAuthorized, args.into())
    }

    pub fn forbidden(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::Forbidden, args.into())
    }

    pub fn not_found(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::NotFound, args.into())
    }

    pub fn conflict(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::Conflict, args.into())
    }

    pub fn method_not_allowed(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::MethodNotAllowed, args.into())
    }

    pub fn bad_request(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::BadRequest, args.into())
    }

    pub fn too_many_requests(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::TooManyRequests, args.into())
    }

    pub fn payload_too_large(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::PayloadTooLarge, args.into())
    }

    pub fn internal_error(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::InternalError, args.into())
    }

    pub fn not_implemented(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::NotImplemented, args.into())
    }

    pub fn service_unavailable(args: impl Into<Arguments>) -> Self {
        Self::of_kind(ErrorKind::ServiceUnavailable, args.into())
    }

    /// @ai:intent Rehydrate an error received across a boundary
    /// @ai:pre data was produced by `to_json` on the other side (or has the same shape)
    /// @ai:post kind comes from the wire name, then the status code, then falls back to Base
    /// @ai:post status_code and origin are taken from the arguments, not the wire
    pub fn parse(data: WireError, status_code: StatusCode, origin: impl Into<String>) -> Self {
        let kind = ErrorKind::from_name(&data.name)
            .or_else(|| ErrorKind::from_status(status_code))
            .unwrap_or(ErrorKind::Base);

        let name = if data.name.is_empty() {
            kind.defaults().name.to_string()
        } else {
            data.name
        };
        let origin = origin.into();

        tracing::debug!(
            %kind,
            name = %name,
            status = %status_code,
            origin = %origin,
            "rehydrating api error"
        );

        let options = ErrorOptions {
            name: Some(name),
            entity: data.entity,
            status_code: Some(status_code),
            key_path: data.key_path,
            origin: Some(origin),
            ..Default::default()
        };

        Self::assemble(kind, options, data.message)
    }

    /// @ai:intent Rehydrate from untyped JSON
    /// @ai:post a missing or non-string `message` fails with InvalidMessage
    pub fn parse_json(
        data: Value,
        status_code: StatusCode,
        origin: impl Into<String>,
    ) -> Result<Self> {
        match data.get("message") {
            Some(Value::String(_)) => {}
            found => return Err(Error::invalid_message(found)),
        }
        let data: WireError = serde_json::from_value(data)?;
        Ok(Self::parse(data, status_code, origin))
    }

    /// @ai:intent Produce the canonical wire shape
    /// @ai:post stack is Some only when options.include_stack is set
    /// @ai:effects pure
    pub fn to_json(&self, options: &JsonOptions) -> WireError {
        WireError {
            name: kebab_case(&self.name),
            message: self.message.clone(),
            entity: self.entity.clone(),
            key_path: self.key_path.clone(),
            stack: options.include_stack.then(|| self.stack_frames()),
        }
    }

    /// @ai:intent Structured frames of the underlying cause if any, else of this error
    /// @ai:edge_cases an underlying cause without stack text yields no frames
    pub fn stack_frames(&self) -> Vec<StackFrame> {
        self.raw_stack()
            .map(|raw| parse_stack(&raw))
            .unwrap_or_default()
    }

    /// @ai:intent Raw stack text that serialization should report
    pub(crate) fn raw_stack(&self) -> Option<String> {
        match &self.underlying {
            Some(cause) => cause.stack().map(str::to_string),
            None if self.stack.status() == BacktraceStatus::Captured => {
                Some(self.stack.to_string())
            }
            None => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Internal form of the name, before kebab-casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn key_path(&self) -> Option<&KeyPath> {
        self.key_path.as_ref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn underlying(&self) -> Option<&Underlying> {
        self.underlying.as_ref()
    }

    /// Extension fields the caller supplied beyond the recognized ones.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// The backtrace captured when this error was constructed.
    pub fn backtrace(&self) -> &Backtrace {
        &self.stack
    }

    fn merged(kind: ErrorKind, args: Arguments) -> ErrorOptions {
        let defaults = kind.defaults();
        let fallback = ErrorOptions {
            name: Some(defaults.name.to_string()),
            message: defaults.message.map(str::to_string),
            status_code: Some(defaults.status_code),
            ..Default::default()
        };
        merge_defaults(args.into_options(), fallback)
    }

    fn of_kind(kind: ErrorKind, args: Arguments) -> Self {
        let mut options = Self::merged(kind, args);
        // Every non-base kind carries a default message.
        let message = options.message.take().unwrap_or_default();
        Self::assemble(kind, options, message)
    }

    fn assemble(kind: ErrorKind, options: ErrorOptions, message: String) -> Self {
        let defaults = kind.defaults();
        let error = Self {
            kind,
            name: options.name.unwrap_or_else(|| defaults.name.to_string()),
            message,
            entity: options.entity,
            status_code: options.status_code.unwrap_or(defaults.status_code),
            key_path: options.key_path,
            origin: options.origin,
            underlying: options.underlying,
            options: options.extra,
            // Walks the stack on every construction; symbols resolve only when rendered.
            stack: Arc::new(Backtrace::force_capture()),
        };

        tracing::trace!(
            %kind,
            status = %error.status_code,
            has_cause = error.underlying.is_some(),
            "constructed api error"
        );

        error
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.underlying
            .as_ref()
            .map(|cause| cause.error() as &(dyn StdError + 'static))
    }
}

impl Serialize for ApiError {
    /// Serializes as `to_json` with default options, so the stack never leaks.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json(&JsonOptions::default()).serialize(serializer)
    }
}
