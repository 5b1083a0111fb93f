//! @ai:module:intent Normalize nested field paths attached to errors
//! @ai:module:layer domain
//! @ai:module:public_api KeyPath
//! @ai:module:stateless true

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// @ai:intent Ordered segments identifying a nested field, e.g. `items.0.id`
/// @ai:invariant at least one segment, and no segment is empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// @ai:intent Split a dot-delimited path into segments
    /// @ai:example ("a.b.c") -> Some(["a", "b", "c"])
    /// @ai:example ("") -> None
    /// @ai:edge_cases empty segments from "a..b" or a trailing dot are dropped
    /// @ai:effects pure
    pub fn parse(path: &str) -> Option<Self> {
        Self::from_segments(path.split('.'))
    }

    /// @ai:intent Build a key path from segments that are already split
    /// @ai:post None when no non-empty segment remains
    /// @ai:effects pure
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Either wire form: a dotted string or an array of segments.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeyPath {
    Dotted(String),
    Segments(Vec<String>),
}

impl RawKeyPath {
    fn normalize(self) -> Option<KeyPath> {
        match self {
            RawKeyPath::Dotted(path) => KeyPath::parse(&path),
            RawKeyPath::Segments(segments) => KeyPath::from_segments(segments),
        }
    }
}

/// @ai:intent Deserialize an optional key path from either wire form
/// @ai:post empty strings and empty arrays become None
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<KeyPath>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawKeyPath>::deserialize(deserializer)?;
    Ok(raw.and_then(RawKeyPath::normalize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let path = KeyPath::parse("a.b.c").unwrap();
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.to_string(), "a.b.c");
    }

    #[test]
    fn test_drops_empty_segments() {
        assert_eq!(KeyPath::parse("a..b.").unwrap().segments(), ["a", "b"]);
        assert_eq!(KeyPath::parse(""), None);
        assert_eq!(KeyPath::parse("..."), None);
        assert_eq!(KeyPath::from_segments(Vec::<String>::new()), None);
    }

    #[test]
    fn test_segments_used_as_is() {
        let path = KeyPath::from_segments(["user", "address.line1"]).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[1], "address.line1");
    }

    #[test]
    fn test_deserialize_either_form() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_optional")]
            path: Option<KeyPath>,
        }

        let dotted: Holder = serde_json::from_str(r#"{"path":"x.y"}"#).unwrap();
        assert_eq!(dotted.path.unwrap().segments(), ["x", "y"]);

        let array: Holder = serde_json::from_str(r#"{"path":["x","y"]}"#).unwrap();
        assert_eq!(array.path.unwrap().to_string(), "x.y");

        let empty: Holder = serde_json::from_str(r#"{"path":""}"#).unwrap();
        assert!(empty.path.is_none());

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.path.is_none());
    }
}
