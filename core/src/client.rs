//! Client for the CA API.
//!
//! # Design
//! `CfsslClient` holds only its transport and carries no state between calls.
//! Each operation builds an `HttpRequest` with the `request` module, hands it
//! to the transport and classifies the raw reply with the `response` module.
//! Input validation (`bundle` / `certinfo` targets) happens before the
//! transport is touched.

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::CfsslError;
use crate::http::HttpRequest;
use crate::request::{self, BundleTarget, CertInfoTarget};
use crate::response;
use crate::transport::{self, Transport, UreqTransport};
use crate::types::{
    AuthSignOptions, BundleOptions, CertInfoOptions, DName, InfoOptions, InitCaOptions,
    NewCertOptions, NewKeyOptions, ScanOptions, SignOptions,
};

/// Synchronous, stateless client for a CFSSL-style CA.
#[derive(Debug, Clone)]
pub struct CfsslClient<T> {
    transport: T,
}

impl CfsslClient<UreqTransport> {
    /// Client talking HTTP to the CA described by `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(UreqTransport::new(config))
    }
}

impl<T: Transport> CfsslClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(&self, request: &HttpRequest) -> Result<Value, CfsslError> {
        response::process(transport::dispatch(&self.transport, request))
    }

    pub fn sign(&self, csr: &str, opts: &SignOptions) -> Result<Value, CfsslError> {
        self.call(&request::build_sign(csr, opts)?)
    }

    pub fn authsign(
        &self,
        token: &str,
        csr: &str,
        opts: &AuthSignOptions,
    ) -> Result<Value, CfsslError> {
        self.call(&request::build_authsign(token, csr, opts)?)
    }

    pub fn newkey(
        &self,
        hosts: &[String],
        dname: &DName,
        opts: &NewKeyOptions,
    ) -> Result<Value, CfsslError> {
        self.call(&request::build_newkey(hosts, dname, opts)?)
    }

    pub fn newcert(
        &self,
        hosts: &[String],
        dname: &DName,
        opts: &NewCertOptions,
    ) -> Result<Value, CfsslError> {
        self.call(&request::build_newcert(hosts, dname, opts)?)
    }

    pub fn init_ca(
        &self,
        hosts: &[String],
        dname: &DName,
        opts: &InitCaOptions,
    ) -> Result<Value, CfsslError> {
        self.call(&request::build_init_ca(hosts, dname, opts)?)
    }

    /// Bundle a certificate or a remote domain.
    ///
    /// Fails with `MissingCertificateOrDomain`, without sending anything, when
    /// `opts` names neither.
    pub fn bundle(&self, opts: BundleOptions) -> Result<Value, CfsslError> {
        let target = BundleTarget::try_from(opts)?;
        self.bundle_target(&target)
    }

    pub fn bundle_target(&self, target: &BundleTarget) -> Result<Value, CfsslError> {
        self.call(&request::build_bundle(target)?)
    }

    /// Inspect a certificate or a remote domain. Same validation as `bundle`.
    pub fn certinfo(&self, opts: CertInfoOptions) -> Result<Value, CfsslError> {
        let target = CertInfoTarget::try_from(opts)?;
        self.certinfo_target(&target)
    }

    pub fn certinfo_target(&self, target: &CertInfoTarget) -> Result<Value, CfsslError> {
        self.call(&request::build_certinfo(target)?)
    }

    pub fn scan(&self, host: &str, opts: &ScanOptions) -> Result<Value, CfsslError> {
        self.call(&request::build_scan(host, opts))
    }

    pub fn info(&self, label: &str, opts: &InfoOptions) -> Result<Value, CfsslError> {
        self.call(&request::build_info(label, opts)?)
    }

    /// Revoke a certificate. Success carries no payload.
    pub fn revoke(&self, serial: &str, aki: &str, reason: &str) -> Result<(), CfsslError> {
        let request = request::build_revoke(serial, aki, reason)?;
        response::process_ack(transport::dispatch(&self.transport, &request))
    }

    pub fn crl(&self, expiry: Option<&str>) -> Result<Value, CfsslError> {
        self.call(&request::build_crl(expiry))
    }

    pub fn scaninfo(&self) -> Result<Value, CfsslError> {
        self.call(&request::build_scaninfo())
    }

    /// GET an arbitrary route, for endpoints without a dedicated method.
    pub fn raw_get(&self, route: &str, query: &[(String, String)]) -> Result<Value, CfsslError> {
        self.call(&HttpRequest::get(route, query.to_vec()))
    }

    /// POST an arbitrary body to an arbitrary route.
    pub fn raw_post<B: Serialize + ?Sized>(&self, route: &str, body: &B) -> Result<Value, CfsslError> {
        let body =
            serde_json::to_value(body).map_err(|e| CfsslError::Serialization(e.to_string()))?;
        self.call(&HttpRequest::post(route, body))
    }
}
