//! Deterministic core of the tuido terminal to-do client.
//!
//! # Overview
//! Two pieces live here, neither of which performs I/O. `TodoClient` builds
//! `HttpRequest` values and parses `HttpResponse` values for the four remote
//! operations (list, create, update, delete), all scoped by a numeric user
//! id. `AppState` owns everything the screen shows and is driven as a
//! reducer: `dispatch` turns a user `Command` into the `ApiCall`s to run,
//! `complete` applies the `ApiEvent` a finished call produced. The host
//! (terminal front end, tests) executes the actual HTTP round-trips in
//! between.
//!
//! # Design
//! - Server state is authoritative: local todos change only in completion
//!   handlers, after the server confirmed the operation. The loading flag is
//!   the one exception, set at the moment a list request is issued.
//! - Each list request carries a sequence stamp so a slow response can be
//!   recognized as stale and discarded instead of clobbering newer state.
//! - Types use owned `String` / `Vec` fields; values move freely between the
//!   reducer thread and the host's request workers.
//! - DTOs are defined independently from the mock-api crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{ApiCall, ApiEvent, AppState, Banner, Command, Filter};
pub use types::{NewTodo, Todo};
