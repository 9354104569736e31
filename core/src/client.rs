//! Stateless HTTP request builder and response parser for the todos API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! host executes the round-trip in between. Every route is scoped to a user
//! through the `userId` query parameter, matching the remote service, and
//! success means any 2xx status since the service is loose about which one
//! it returns per operation.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, Todo};

/// Stateless client for the user-scoped todos API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The host is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`; there is no retry and no
/// caching on top of it.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /todos?userId={user_id}` — every todo owned by the user.
    pub fn build_list_todos(&self, user_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos?userId={user_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST /todos?userId={user_id}` — create a todo from a draft.
    pub fn build_create_todo(&self, user_id: i64, draft: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos?userId={user_id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// `PATCH /todos/{id}?userId={user_id}` — replace a todo's mutable fields.
    ///
    /// The body carries the full patched todo; the server applies the fields
    /// it recognizes and echoes the stored result.
    pub fn build_update_todo(
        &self,
        id: i64,
        user_id: i64,
        todo: &Todo,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(todo).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/todos/{id}?userId={user_id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// `DELETE /todos/{id}?userId={user_id}` — remove a todo.
    pub fn build_delete_todo(&self, user_id: i64, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}?userId={user_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)?;
        Ok(())
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
