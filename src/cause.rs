//! @ai:module:intent Hold the causing error behind a classified API error
//! @ai:module:layer domain
//! @ai:module:public_api Underlying
//! @ai:module:thread_safe true

use crate::api_error::ApiError;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// @ai:intent Shared handle to the error that caused an API error, plus its raw stack text
/// @ai:invariant the wrapper never owns the cause exclusively; clones share it
#[derive(Clone)]
pub struct Underlying {
    error: SharedError,
    stack: Option<String>,
}

impl Underlying {
    /// @ai:intent Wrap any error as a cause, without stack text
    /// @ai:effects pure
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_shared(Arc::new(error))
    }

    /// @ai:intent Reuse an error that is already shared elsewhere
    pub fn from_shared(error: SharedError) -> Self {
        Self { error, stack: None }
    }

    /// @ai:intent Attach the raw stack trace text recorded where the cause was raised
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }
}

impl From<ApiError> for Underlying {
    /// Keeps the resolved stack of the wrapped API error, so chains of
    /// wrappers still surface the innermost trace.
    fn from(error: ApiError) -> Self {
        let stack = error.raw_stack();
        Self {
            error: Arc::new(error),
            stack,
        }
    }
}

impl fmt::Debug for Underlying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Underlying")
            .field("error", &self.error)
            .field("has_stack", &self.stack.is_some())
            .finish()
    }
}
