//! @ai:module:intent Validated HTTP status code carried by every API error
//! @ai:module:layer domain
//! @ai:module:public_api StatusCode
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// @ai:intent An HTTP status code guaranteed to lie in 100..=599
/// @ai:invariant 100 <= self.0 <= 599
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StatusCode(u16);

impl StatusCode {
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_AUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const CONFLICT: StatusCode = StatusCode(409);
    pub const PAYLOAD_TOO_LARGE: StatusCode = StatusCode(413);
    pub const TOO_MANY_REQUESTS: StatusCode = StatusCode(429);
    pub const INTERNAL_ERROR: StatusCode = StatusCode(500);
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);

    /// @ai:intent Validate a raw status code
    /// @ai:example (404) -> Ok(StatusCode::NOT_FOUND)
    /// @ai:example (42) -> Err(InvalidStatusCode(42))
    /// @ai:effects pure
    pub fn new(code: u16) -> Result<Self> {
        if (100..=599).contains(&code) {
            Ok(Self(code))
        } else {
            Err(Error::InvalidStatusCode(code))
        }
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// @ai:intent Check whether the code is in the 4xx range
    pub fn is_client_error(self) -> bool {
        (400..500).contains(&self.0)
    }

    /// @ai:intent Check whether the code is in the 5xx range
    pub fn is_server_error(self) -> bool {
        self.0 >= 500
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::INTERNAL_ERROR
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Self::new(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_range() {
        assert_eq!(StatusCode::new(100).unwrap().as_u16(), 100);
        assert_eq!(StatusCode::new(599).unwrap().as_u16(), 599);
        assert_eq!(StatusCode::new(404).unwrap(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(StatusCode::new(42), Err(Error::InvalidStatusCode(42))));
        assert!(StatusCode::new(600).is_err());
        assert!(StatusCode::new(0).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let code: StatusCode = serde_json::from_str("429").unwrap();
        assert_eq!(code, StatusCode::TOO_MANY_REQUESTS);
        assert!(serde_json::from_str::<StatusCode>("1000").is_err());
        assert_eq!(serde_json::to_string(&StatusCode::CONFLICT).unwrap(), "409");
    }

    #[test]
    fn test_classification() {
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(!StatusCode::NOT_FOUND.is_server_error());
        assert!(StatusCode::SERVICE_UNAVAILABLE.is_server_error());
        assert_eq!(StatusCode::default(), StatusCode::INTERNAL_ERROR);
    }
}
