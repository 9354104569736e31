//! Error type shared by the API client and its hosts.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the todo does not exist" from "the server returned an unexpected status."
//! All other non-2xx responses land in `Http` with the raw status code and
//! body for debugging. `Transport` is never produced by the core itself; the
//! host constructs it when the round-trip fails before a status code exists
//! (refused connection, DNS), so the reducer sees network failure through the
//! same type as protocol failure.

use std::fmt;

/// Errors surfaced by `TodoClient` build/parse methods and by hosts
/// executing the requests.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404. The requested todo does not exist, or it
    /// belongs to a different user.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialize(String),

    /// The request payload could not be serialized to JSON.
    Serialize(String),

    /// The HTTP round-trip itself failed; no response was received.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "todo not found"),
            ApiError::Http { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialize(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialize(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Transport(msg) => {
                write!(f, "request failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
