//! Request action endpoints and their uniform result shape.
//!
//! Both actions answer with HTTP 200 and carry success or failure in-band:
//! `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

/// `POST` endpoint for the caption flow. Body: [`crate::CaptionRequest`].
pub const GENERATE_CAPTIONS_PATH: &str = "/api/actions/generate-captions";

/// `POST` endpoint for the post-suggestion flow. Body: [`crate::PostRequest`].
pub const SUGGEST_POST_PATH: &str = "/api/actions/suggest-post";

pub const CAPTIONS_FAILED_MESSAGE: &str = "Failed to generate captions. Please try again.";
pub const POST_FAILED_MESSAGE: &str = "Failed to suggest post prompt. Please try again.";

/// Result of a request action as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }

    /// Transform the carried data, keeping success and error as they are.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        ActionResult { success: self.success, data: self.data.map(f), error: self.error }
    }

    /// Collapse into a `Result`, treating `success: true` without data as a failure.
    ///
    /// # Errors
    ///
    /// Returns the carried error message, or `fallback` when none was sent.
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| fallback.to_owned())),
        }
    }
}
