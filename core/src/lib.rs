//! Synchronous client core for a CFSSL-style certificate authority.
//!
//! # Overview
//! Translates CA operations (sign, authsign, newkey, newcert, init_ca,
//! bundle, certinfo, scan, info, revoke, crl, scaninfo) into JSON requests
//! and classifies the service's JSON envelope into `Result` values.
//!
//! # Design
//! - `request` builds `HttpRequest` values without touching the network.
//! - `response` decodes the `{success, result, errors}` envelope.
//! - `transport::Transport` is the only I/O seam; `UreqTransport` implements
//!   it over HTTP and tests substitute fakes.
//! - Optional parameters are typed per operation, so a request can never
//!   carry a field the operation does not accept.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::CfsslClient;
pub use config::ClientConfig;
pub use error::{CfsslError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest};
pub use request::{normalize_aki, BundleTarget, CertInfoTarget, Operation};
pub use transport::{Transport, UreqTransport};
pub use types::{
    AuthSignOptions, BundleOptions, CaConfig, CertInfoOptions, DName, InfoOptions, InitCaOptions,
    KeyConfig, NewCertOptions, NewKeyOptions, ScanOptions, SignOptions, Subject,
};
