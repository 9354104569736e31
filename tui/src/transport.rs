//! ureq-backed execution of the core's API calls.
//!
//! The core describes HTTP exchanges as plain data; this module is the side
//! that actually talks to the network. Transport failures (DNS, refused
//! connections) surface as `ApiError::Transport` so the reducer sees them
//! through the same type as protocol failures.

use tuido_core::{ApiCall, ApiError, ApiEvent, HttpMethod, HttpRequest, HttpResponse, TodoClient};

/// Build the shared agent.
///
/// Disables ureq's status-code-as-error behavior: 4xx/5xx come back as
/// data and status interpretation stays in the core client.
pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Execute one `HttpRequest` over the wire.
pub fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Run one `ApiCall` to completion and wrap the outcome as the `ApiEvent`
/// the reducer expects.
pub fn run_call(
    agent: &ureq::Agent,
    client: &TodoClient,
    user_id: i64,
    call: ApiCall,
) -> ApiEvent {
    match call {
        ApiCall::List { seq } => {
            let req = client.build_list_todos(user_id);
            let result = execute(agent, req).and_then(|resp| client.parse_list_todos(resp));
            ApiEvent::Loaded { seq, result }
        }
        ApiCall::Create { draft } => {
            let result = client
                .build_create_todo(user_id, &draft)
                .and_then(|req| execute(agent, req))
                .and_then(|resp| client.parse_create_todo(resp));
            ApiEvent::Created { result }
        }
        ApiCall::Update { todo } => {
            let id = todo.id;
            let result = client
                .build_update_todo(id, user_id, &todo)
                .and_then(|req| execute(agent, req))
                .and_then(|resp| client.parse_update_todo(resp));
            ApiEvent::Updated { id, result }
        }
        ApiCall::Delete { id } => {
            let req = client.build_delete_todo(user_id, id);
            let result = execute(agent, req).and_then(|resp| client.parse_delete_todo(resp));
            ApiEvent::Deleted { id, result }
        }
    }
}
