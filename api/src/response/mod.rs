//! The JSON envelope every course and review endpoint answers with.
//!
//! `data` holds the course, review or listing on success, the field-error map
//! on a `400`, and `null` for other failures.

use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Failure without a payload; `data` is `T::default()`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self::error_with(T::default(), message)
    }

    /// Failure that still carries a payload, such as per-field messages.
    pub fn error_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            message: message.into(),
        }
    }
}

/// Payload of responses without data. Serializes as `null`.
#[derive(Serialize, Default, Debug)]
pub struct Empty;
