//! Request descriptions produced by the request builder.
//!
//! # Design
//! Requests are plain data: a method, the service route (e.g. `sign`), query
//! parameters for reads and a JSON body for writes. Building them never
//! touches the network; a `Transport` turns them into actual HTTP calls.

use serde_json::Value;

/// HTTP method for a request. The CA API only uses reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A CA API request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub route: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(route: &str, query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            route: route.to_string(),
            query,
            body: None,
        }
    }

    pub fn post(route: &str, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            route: route.to_string(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
