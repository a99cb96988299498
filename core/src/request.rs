//! Request builder for the CA API.
//!
//! # Design
//! One `build_*` function per operation turns the required arguments and the
//! operation's option struct into an `HttpRequest`. Writes carry a JSON body,
//! reads (`scan`, `crl`, `scaninfo`) carry query parameters. Nothing here
//! performs I/O, so every body can be checked without a server.
//!
//! `bundle` and `certinfo` need exactly one of `certificate` / `domain`. The
//! loose option structs are resolved once into a `BundleTarget` or
//! `CertInfoTarget`; resolution fails with
//! `CfsslError::MissingCertificateOrDomain` before any request exists.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CfsslError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    AuthSignOptions, BundleOptions, CertInfoOptions, DName, InfoOptions, InitCaOptions,
    NewCertOptions, NewKeyOptions, ScanOptions, SignOptions,
};

/// A CA operation: its route, method and the fields its body may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Sign,
    AuthSign,
    NewKey,
    NewCert,
    InitCa,
    Bundle,
    CertInfo,
    Scan,
    Info,
    Revoke,
    Crl,
    ScanInfo,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Sign,
        Operation::AuthSign,
        Operation::NewKey,
        Operation::NewCert,
        Operation::InitCa,
        Operation::Bundle,
        Operation::CertInfo,
        Operation::Scan,
        Operation::Info,
        Operation::Revoke,
        Operation::Crl,
        Operation::ScanInfo,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Operation::Sign => "sign",
            Operation::AuthSign => "authsign",
            Operation::NewKey => "newkey",
            Operation::NewCert => "newcert",
            Operation::InitCa => "init_ca",
            Operation::Bundle => "bundle",
            Operation::CertInfo => "certinfo",
            Operation::Scan => "scan",
            Operation::Info => "info",
            Operation::Revoke => "revoke",
            Operation::Crl => "crl",
            Operation::ScanInfo => "scaninfo",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Operation::Scan | Operation::Crl | Operation::ScanInfo => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Fields always present on the top level of the request.
    ///
    /// For `Bundle` and `CertInfo` exactly one of the two listed fields is sent.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Operation::Sign => &["certificate_request"],
            Operation::AuthSign => &["token", "request"],
            Operation::NewKey | Operation::InitCa => &["hosts", "names"],
            Operation::NewCert => &["request"],
            Operation::Bundle | Operation::CertInfo => &["certificate", "domain"],
            Operation::Scan => &["host"],
            Operation::Info => &["label"],
            Operation::Revoke => &["serial", "authority_key_id", "reason"],
            Operation::Crl | Operation::ScanInfo => &[],
        }
    }

    /// Optional fields accepted on the top level of the request.
    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            Operation::Sign => &[
                "hosts",
                "subject",
                "serial_sequence",
                "label",
                "profile",
                "bundle",
            ],
            Operation::AuthSign => &["timestamp", "remote_address", "bundle"],
            Operation::NewKey => &["CN", "key"],
            Operation::NewCert => &["label", "profile", "bundle"],
            Operation::InitCa => &["CN", "key", "ca"],
            Operation::Bundle => &["private_key", "flavor", "ip"],
            Operation::CertInfo => &[],
            Operation::Scan => &["ip", "timeout", "family", "scanner"],
            Operation::Info => &["profile"],
            Operation::Crl => &["expiry"],
            Operation::Revoke | Operation::ScanInfo => &[],
        }
    }

    /// Whether `field` may appear on the top level of this operation's request.
    pub fn accepts(self, field: &str) -> bool {
        self.required_fields().contains(&field) || self.optional_fields().contains(&field)
    }
}

/// Keep only the entries of `options` whose key is in `whitelist`.
///
/// Unknown keys are dropped silently. Kept values are not touched.
pub fn filter_options(options: &Map<String, Value>, whitelist: &[&str]) -> Map<String, Value> {
    options
        .iter()
        .filter(|(key, _)| whitelist.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Lower-case an authority key identifier and strip its colon separators.
pub fn normalize_aki(aki: &str) -> String {
    aki.chars()
        .filter(|c| *c != ':')
        .flat_map(char::to_lowercase)
        .collect()
}

/// What to bundle: an existing certificate or a remote domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleTarget {
    ByCertificate {
        certificate: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        domain: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        private_key: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        flavor: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ip: Option<String>,
    },
    ByDomain {
        domain: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ip: Option<String>,
    },
}

impl TryFrom<BundleOptions> for BundleTarget {
    type Error = CfsslError;

    /// `certificate` takes precedence when both keys are given.
    fn try_from(opts: BundleOptions) -> Result<Self, Self::Error> {
        match (opts.certificate, opts.domain) {
            (Some(certificate), domain) => Ok(BundleTarget::ByCertificate {
                certificate,
                domain,
                private_key: opts.private_key,
                flavor: opts.flavor,
                ip: opts.ip,
            }),
            (None, Some(domain)) => Ok(BundleTarget::ByDomain { domain, ip: opts.ip }),
            (None, None) => Err(CfsslError::MissingCertificateOrDomain),
        }
    }
}

/// What to inspect: an existing certificate or a remote domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CertInfoTarget {
    ByCertificate { certificate: String },
    ByDomain { domain: String },
}

impl TryFrom<CertInfoOptions> for CertInfoTarget {
    type Error = CfsslError;

    fn try_from(opts: CertInfoOptions) -> Result<Self, Self::Error> {
        match (opts.certificate, opts.domain) {
            (Some(certificate), _) => Ok(CertInfoTarget::ByCertificate { certificate }),
            (None, Some(domain)) => Ok(CertInfoTarget::ByDomain { domain }),
            (None, None) => Err(CfsslError::MissingCertificateOrDomain),
        }
    }
}

#[derive(Serialize)]
struct SignBody<'a> {
    certificate_request: &'a str,
    #[serde(flatten)]
    options: &'a SignOptions,
}

#[derive(Serialize)]
struct AuthSignBody<'a> {
    token: &'a str,
    request: SignBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle: Option<bool>,
}

#[derive(Serialize)]
struct NewKeyBody<'a, O: Serialize> {
    hosts: &'a [String],
    names: &'a DName,
    #[serde(flatten)]
    options: &'a O,
}

#[derive(Serialize)]
struct NewCertBody<'a> {
    request: NewKeyBody<'a, NewKeyOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle: Option<bool>,
}

#[derive(Serialize)]
struct InfoBody<'a> {
    label: &'a str,
    #[serde(flatten)]
    options: &'a InfoOptions,
}

#[derive(Serialize)]
struct RevokeBody<'a> {
    serial: &'a str,
    authority_key_id: String,
    reason: &'a str,
}

/// Serialize a body into a POST request for `op`.
fn post<T: Serialize>(op: Operation, body: &T) -> Result<HttpRequest, CfsslError> {
    let body = serde_json::to_value(body).map_err(|e| CfsslError::Serialization(e.to_string()))?;
    Ok(HttpRequest::post(op.route(), body))
}

pub fn build_sign(csr: &str, opts: &SignOptions) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::Sign,
        &SignBody {
            certificate_request: csr,
            options: opts,
        },
    )
}

pub fn build_authsign(
    token: &str,
    csr: &str,
    opts: &AuthSignOptions,
) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::AuthSign,
        &AuthSignBody {
            token,
            request: SignBody {
                certificate_request: csr,
                options: &opts.sign,
            },
            timestamp: opts.timestamp,
            remote_address: opts.remote_address.as_deref(),
            bundle: opts.sign.bundle,
        },
    )
}

pub fn build_newkey(
    hosts: &[String],
    dname: &DName,
    opts: &NewKeyOptions,
) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::NewKey,
        &NewKeyBody {
            hosts,
            names: dname,
            options: opts,
        },
    )
}

pub fn build_newcert(
    hosts: &[String],
    dname: &DName,
    opts: &NewCertOptions,
) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::NewCert,
        &NewCertBody {
            request: NewKeyBody {
                hosts,
                names: dname,
                options: &opts.key,
            },
            label: opts.label.as_deref(),
            profile: opts.profile.as_deref(),
            bundle: opts.bundle,
        },
    )
}

pub fn build_init_ca(
    hosts: &[String],
    dname: &DName,
    opts: &InitCaOptions,
) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::InitCa,
        &NewKeyBody {
            hosts,
            names: dname,
            options: opts,
        },
    )
}

pub fn build_bundle(target: &BundleTarget) -> Result<HttpRequest, CfsslError> {
    post(Operation::Bundle, target)
}

pub fn build_certinfo(target: &CertInfoTarget) -> Result<HttpRequest, CfsslError> {
    post(Operation::CertInfo, target)
}

pub fn build_scan(host: &str, opts: &ScanOptions) -> HttpRequest {
    let mut query = vec![("host".to_string(), host.to_string())];
    let optional = [
        ("ip", &opts.ip),
        ("timeout", &opts.timeout),
        ("family", &opts.family),
        ("scanner", &opts.scanner),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            query.push((key.to_string(), value.clone()));
        }
    }
    HttpRequest::get(Operation::Scan.route(), query)
}

pub fn build_info(label: &str, opts: &InfoOptions) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::Info,
        &InfoBody {
            label,
            options: opts,
        },
    )
}

pub fn build_revoke(serial: &str, aki: &str, reason: &str) -> Result<HttpRequest, CfsslError> {
    post(
        Operation::Revoke,
        &RevokeBody {
            serial,
            authority_key_id: normalize_aki(aki),
            reason,
        },
    )
}

pub fn build_crl(expiry: Option<&str>) -> HttpRequest {
    let query = expiry
        .map(|expiry| vec![("expiry".to_string(), expiry.to_string())])
        .unwrap_or_default();
    HttpRequest::get(Operation::Crl.route(), query)
}

pub fn build_scaninfo() -> HttpRequest {
    HttpRequest::get(Operation::ScanInfo.route(), Vec::new())
}
