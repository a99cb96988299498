//! Error types for the CA client.
//!
//! # Design
//! Failures fall into four groups: input validation (caught before any
//! request leaves the client), transport failures (passed through unchanged),
//! protocol failures (`EmptyResponse` vs `InvalidResponse`, so callers can
//! tell "the service said nothing" from "the service said something we could
//! not read"), and errors the service itself reported in its envelope.

use thiserror::Error;

/// Errors returned by `CfsslClient` operations and the response processor.
#[derive(Debug, Error)]
pub enum CfsslError {
    /// `bundle` / `certinfo` was called with neither a certificate nor a domain.
    #[error("missing certificate or domain")]
    MissingCertificateOrDomain,

    /// The transport failed before a response body was available.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with an empty body.
    #[error("empty response")]
    EmptyResponse,

    /// The body was not a well-formed response envelope.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The service reported `success: false`; carries the first error.
    #[error("{message}")]
    Service { code: Option<i64>, message: String },

    /// The service reported `success: false` without any error entries.
    #[error("unknown error")]
    GenericError,

    /// A request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Failures raised by a `Transport` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    /// A non-2xx reply whose body could not be read.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while loading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}
