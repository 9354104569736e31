//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the host is responsible for executing the
//! actual I/O. This separation keeps the core deterministic and easy to
//! test, and lets the terminal front end run round-trips on worker threads
//! while the reducer stays single-threaded.
//!
//! All fields use owned types (`String`, `Vec`) so values can move across
//! thread boundaries without lifetime concerns.

/// HTTP method for a request.
///
/// Only the methods the remote todos API consumes are represented; updates
/// go over PATCH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoClient::build_*` methods. The host executes this request
/// against the network and hands back the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed
/// to `TodoClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
