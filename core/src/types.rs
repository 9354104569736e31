//! Domain DTOs for the remote todos API.
//!
//! # Design
//! The wire format uses camelCase names (`userId`), so both types carry a
//! `rename_all` attribute. Responses may include extra fields (timestamps and
//! the like); deserialization ignores them. The types mirror the mock-api
//! schema but are defined independently; integration tests catch drift
//! between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item as stored by the server.
///
/// `id` is server-assigned and unique. A todo never exists on the client
/// without one; creation goes through [`NewTodo`] until the server responds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Draft payload for creating a todo. The server assigns the id and echoes
/// the stored item back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}
