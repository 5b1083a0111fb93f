//! @ai:module:intent Normalize constructor arguments and merge caller options over kind defaults
//! @ai:module:layer domain
//! @ai:module:public_api ErrorOptions, Arguments, merge_defaults
//! @ai:module:depends_on key_path, status, cause, error
//! @ai:module:stateless true

use crate::cause::Underlying;
use crate::error::{Error, Result};
use crate::key_path::{self, KeyPath};
use crate::status::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

/// @ai:intent Caller-supplied settings for building an API error
/// @ai:invariant unknown JSON fields land in `extra` untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOptions {
    pub name: Option<String>,
    pub message: Option<String>,
    pub entity: Option<String>,
    pub status_code: Option<StatusCode>,
    #[serde(default, deserialize_with = "key_path::deserialize_optional")]
    pub key_path: Option<KeyPath>,
    pub origin: Option<String>,
    #[serde(skip)]
    pub underlying: Option<Underlying>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// @ai:intent Set the key path from a dot-delimited string
    /// @ai:post an empty path leaves key_path unset
    pub fn key_path(mut self, path: &str) -> Self {
        self.key_path = KeyPath::parse(path);
        self
    }

    /// @ai:intent Set the key path from already-split segments
    pub fn key_path_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_path = KeyPath::from_segments(segments);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn underlying(mut self, cause: impl Into<Underlying>) -> Self {
        self.underlying = Some(cause.into());
        self
    }

    /// @ai:intent Attach a caller-defined extension field
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// @ai:intent Decode options from untyped JSON
    /// @ai:pre value is a JSON object
    /// @ai:post a present, non-null, non-string `message` fails with InvalidMessage
    /// @ai:effects pure
    pub fn from_json(value: Value) -> Result<Self> {
        if let Value::Object(map) = &value {
            match map.get("message") {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                found => return Err(Error::invalid_message(found)),
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// @ai:intent Shallow field-by-field merge where set fields of `explicit` win
/// @ai:post extension fields from both sides are kept; explicit wins on key collision
/// @ai:post an empty explicit message counts as unset
/// @ai:effects pure
pub fn merge_defaults(explicit: ErrorOptions, fallback: ErrorOptions) -> ErrorOptions {
    let mut extra = fallback.extra;
    extra.extend(explicit.extra);

    ErrorOptions {
        name: explicit.name.or(fallback.name),
        message: explicit
            .message
            .filter(|message| !message.is_empty())
            .or(fallback.message),
        entity: explicit.entity.or(fallback.entity),
        status_code: explicit.status_code.or(fallback.status_code),
        key_path: explicit.key_path.or(fallback.key_path),
        origin: explicit.origin.or(fallback.origin),
        underlying: explicit.underlying.or(fallback.underlying),
        extra,
    }
}

/// @ai:intent The accepted constructor call shapes: (), (message), (options), (message, options)
#[derive(Debug, Clone, Default)]
pub enum Arguments {
    #[default]
    Empty,
    Message(String),
    Options(ErrorOptions),
    MessageAndOptions(String, ErrorOptions),
}

impl Arguments {
    /// @ai:intent Fold the call shape into a single options value
    /// @ai:post a positional message overrides `options.message`
    /// @ai:effects pure
    pub fn into_options(self) -> ErrorOptions {
        match self {
            Arguments::Empty => ErrorOptions::default(),
            Arguments::Message(message) => ErrorOptions::new().message(message),
            Arguments::Options(options) => options,
            Arguments::MessageAndOptions(message, options) => options.message(message),
        }
    }

    /// @ai:intent Normalize untyped (message, options) input where either slot may hold anything
    /// @ai:example ("oops", None) -> Message("oops")
    /// @ai:example ({"message": "oops"}, None) -> Options
    /// @ai:example (42, None) -> Err(InvalidMessage)
    /// @ai:effects pure
    pub fn from_json(message: Value, options: Option<Value>) -> Result<Self> {
        let options = options
            .filter(|value| !value.is_null())
            .map(ErrorOptions::from_json)
            .transpose()?;

        match (message, options) {
            (Value::String(message), Some(options)) => {
                Ok(Arguments::MessageAndOptions(message, options))
            }
            (Value::String(message), None) => Ok(Arguments::Message(message)),
            (value @ Value::Object(_), None) => {
                Ok(Arguments::Options(ErrorOptions::from_json(value)?))
            }
            (Value::Null, Some(options)) => Ok(Arguments::Options(options)),
            (Value::Null, None) => Ok(Arguments::Empty),
            (other, _) => Err(Error::invalid_message(Some(&other))),
        }
    }
}

impl From<()> for Arguments {
    fn from(_: ()) -> Self {
        Arguments::Empty
    }
}

impl From<&str> for Arguments {
    fn from(message: &str) -> Self {
        Arguments::Message(message.to_string())
    }
}

impl From<String> for Arguments {
    fn from(message: String) -> Self {
        Arguments::Message(message)
    }
}

impl From<ErrorOptions> for Arguments {
    fn from(options: ErrorOptions) -> Self {
        Arguments::Options(options)
    }
}

impl<S: Into<String>> From<(S, ErrorOptions)> for Arguments {
    fn from((message, options): (S, ErrorOptions)) -> Self {
        Arguments::MessageAndOptions(message.into(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_explicit_wins() {
        let explicit = ErrorOptions::new()
            .name("customName")
            .status_code(StatusCode::new(418).unwrap());
        let fallback = ErrorOptions::new()
            .name("notFound")
            .status_code(StatusCode::NOT_FOUND)
            .message("Resource not found.");

        let merged = merge_defaults(explicit, fallback);

        assert_eq!(merged.name.as_deref(), Some("customName"));
        assert_eq!(merged.status_code.unwrap().as_u16(), 418);
        assert_eq!(merged.message.as_deref(), Some("Resource not found."));
    }

    #[test]
    fn test_merge_empty_message_falls_back() {
        let merged = merge_defaults(
            ErrorOptions::new().message(""),
            ErrorOptions::new().message("Too many requests."),
        );
        assert_eq!(merged.message.as_deref(), Some("Too many requests."));

        let merged = merge_defaults(ErrorOptions::new().message(""), ErrorOptions::new());
        assert!(merged.message.is_none());
    }

    #[test]
    fn test_merge_keeps_extension_fields() {
        let explicit = ErrorOptions::new().extra("retryAfter", 30).extra("shared", "mine");
        let fallback = ErrorOptions::new().extra("shared", "theirs").extra("hint", "wait");

        let merged = merge_defaults(explicit, fallback);

        assert_eq!(merged.extra["retryAfter"], json!(30));
        assert_eq!(merged.extra["shared"], json!("mine"));
        assert_eq!(merged.extra["hint"], json!("wait"));
    }

    #[test]
    fn test_merge_leaves_caller_copy_alone() {
        let caller = ErrorOptions::new().entity("widget");
        let _ = merge_defaults(caller.clone(), ErrorOptions::new().name("notFound"));

        assert_eq!(caller.entity.as_deref(), Some("widget"));
        assert!(caller.name.is_none());
    }

    #[test]
    fn test_positional_message_wins() {
        let options = Arguments::from(("positional", ErrorOptions::new().message("inline")))
            .into_options();
        assert_eq!(options.message.as_deref(), Some("positional"));
    }

    #[test]
    fn test_from_json_shapes() {
        assert!(matches!(
            Arguments::from_json(json!("oops"), None).unwrap(),
            Arguments::Message(m) if m == "oops"
        ));
        assert!(matches!(
            Arguments::from_json(json!({"message": "oops", "entity": "w"}), None).unwrap(),
            Arguments::Options(o) if o.entity.as_deref() == Some("w")
        ));
        assert!(matches!(
            Arguments::from_json(json!("oops"), Some(json!({"keyPath": "a.b"}))).unwrap(),
            Arguments::MessageAndOptions(_, o) if o.key_path.is_some()
        ));
        assert!(matches!(
            Arguments::from_json(Value::Null, None).unwrap(),
            Arguments::Empty
        ));
    }

    #[test]
    fn test_from_json_rejects_non_string_message() {
        let err = Arguments::from_json(json!(42), None).unwrap_err();
        assert!(err.is_type_error());

        let err = Arguments::from_json(json!({"message": 42}), None).unwrap_err();
        assert!(err.is_type_error());

        let err = Arguments::from_json(json!("ok"), Some(json!({"message": []}))).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_from_json_keeps_unknown_fields() {
        let options = ErrorOptions::from_json(json!({
            "message": "Slow down",
            "statusCode": 429,
            "retryAfter": 30
        }))
        .unwrap();

        assert_eq!(options.status_code, Some(StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(options.extra.get("retryAfter"), Some(&json!(30)));
        assert!(!options.extra.contains_key("statusCode"));
    }
}
