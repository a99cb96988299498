//! The transport seam between the client and the network.
//!
//! # Design
//! `Transport` is deliberately narrow: a GET with query parameters and a POST
//! with a JSON body, each returning the raw response body. Everything above
//! it is pure, so tests substitute a recording fake instead of a server.
//! `UreqTransport` is the blocking HTTP implementation used in production and
//! in the integration tests.

use std::fmt;

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest};

/// Path prefix every CA route lives under.
pub const API_PREFIX: &str = "/api/v1/cfssl";

pub trait Transport {
    fn get(&self, route: &str, query: &[(String, String)]) -> Result<String, TransportError>;

    fn post(&self, route: &str, body: &Value) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, route: &str, query: &[(String, String)]) -> Result<String, TransportError> {
        (**self).get(route, query)
    }

    fn post(&self, route: &str, body: &Value) -> Result<String, TransportError> {
        (**self).post(route, body)
    }
}

/// Send a built request through `transport`.
pub fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    request: &HttpRequest,
) -> Result<String, TransportError> {
    tracing::debug!(method = ?request.method, route = %request.route, "dispatching CA request");
    match (request.method, &request.body) {
        (HttpMethod::Get, _) => transport.get(&request.route, &request.query),
        (HttpMethod::Post, Some(body)) => transport.post(&request.route, body),
        (HttpMethod::Post, None) => transport.post(&request.route, &Value::Object(Map::new())),
    }
}

/// Blocking HTTP transport built on ureq.
///
/// Non-2xx statuses are returned as data: the CA wraps its errors in the
/// usual envelope, so the body still has to reach the response processor.
#[derive(Clone)]
pub struct UreqTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{API_PREFIX}/{}", self.base_url, route.trim_start_matches('/'))
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn get(&self, route: &str, query: &[(String, String)]) -> Result<String, TransportError> {
        let mut request = self.agent.get(&self.url(route));
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request.call().map_err(map_error)?;
        read_body(response)
    }

    fn post(&self, route: &str, body: &Value) -> Result<String, TransportError> {
        let body = body.to_string();
        let response = self
            .agent
            .post(&self.url(route))
            .content_type("application/json")
            .send(body.as_bytes())
            .map_err(map_error)?;
        read_body(response)
    }
}

fn read_body(mut response: ureq::http::Response<ureq::Body>) -> Result<String, TransportError> {
    let status = response.status().as_u16();
    match response.body_mut().read_to_string() {
        Ok(body) => Ok(body),
        Err(e) if !(200..300).contains(&status) => Err(TransportError::Status {
            status,
            body: e.to_string(),
        }),
        Err(e) => Err(map_error(e)),
    }
}

fn map_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) => TransportError::Io(e.to_string()),
        ureq::Error::StatusCode(status) => TransportError::Status {
            status,
            body: String::new(),
        },
        other => TransportError::Connection(other.to_string()),
    }
}
