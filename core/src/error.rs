//! Error types for the recipe API client.
//!
//! # Design
//! `ApiError` describes why a single round-trip failed. `GatewayError` tags
//! that cause with the operation that was attempted; the user only ever sees
//! the operation's fixed status text, while the cause goes to the log.

use thiserror::Error;

/// Errors returned by `RecipeClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested recipe does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failure of one gateway operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("listing recipes failed: {0}")]
    FetchFailed(#[source] ApiError),

    #[error("creating recipe failed: {0}")]
    CreateFailed(#[source] ApiError),

    #[error("updating recipe failed: {0}")]
    UpdateFailed(#[source] ApiError),

    #[error("deleting recipe failed: {0}")]
    DeleteFailed(#[source] ApiError),

    #[error("looking up recipe failed: {0}")]
    LookupFailed(#[source] ApiError),
}

impl GatewayError {
    /// Fixed status text shown to the user for this failure.
    pub fn status_message(&self) -> &'static str {
        match self {
            GatewayError::FetchFailed(_) => "Failed to fetch recipes.",
            GatewayError::CreateFailed(_) => "Error adding recipe.",
            GatewayError::UpdateFailed(_) => "Error updating recipe.",
            GatewayError::DeleteFailed(_) => "Error deleting recipe.",
            GatewayError::LookupFailed(_) => "Recipe not found.",
        }
    }

    pub fn cause(&self) -> &ApiError {
        match self {
            GatewayError::FetchFailed(e)
            | GatewayError::CreateFailed(e)
            | GatewayError::UpdateFailed(e)
            | GatewayError::DeleteFailed(e)
            | GatewayError::LookupFailed(e) => e,
        }
    }
}
