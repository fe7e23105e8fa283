//! The response envelope returned by every endpoint.

use serde::{Deserialize, Serialize};

/// Uniform `{ success, message?, payload? }` wrapper.
///
/// Failures carry a message and never a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload: Some(payload),
        }
    }

    pub fn ok_with_message(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: None,
        }
    }
}

/// Payload of the single-post endpoints: `{ "post": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPayload<T> {
    pub post: T,
}

/// Payload of tag creation: `{ "tag": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagPayload<T> {
    pub tag: T,
}
