//! Value objects and per-operation option sets for the CA API.
//!
//! # Design
//! Every operation takes its optional parameters as a dedicated struct whose
//! fields are the only options that operation accepts. Absent fields are
//! skipped on the wire, so a request body can only ever carry its required
//! fields plus the options listed here.

use serde::{Deserialize, Serialize};

/// Distinguished name. Key requests send it as the whole `names` value;
/// `Subject` carries a list of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DName {
    #[serde(rename = "C", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "ST", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "L", skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "O", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(rename = "OU", skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<String>,
}

/// Key generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyConfig {
    pub algo: String,
    pub size: u32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            algo: "ecdsa".to_string(),
            size: 256,
        }
    }
}

/// CA constraints for `init_ca`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathlen: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathlenzero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

/// Subject override for `sign`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    #[serde(rename = "CN", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<DName>,
}

/// Options accepted by `sign`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<bool>,
}

/// Options accepted by `authsign`.
///
/// The embedded `sign` options go into the nested `request` object. `bundle`
/// is sent both there and on the outer body, next to `timestamp` and
/// `remote_address`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthSignOptions {
    #[serde(flatten)]
    pub sign: SignOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<String>,
}

/// Options accepted by `newkey`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewKeyOptions {
    #[serde(rename = "CN", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyConfig>,
}

/// Options accepted by `newcert`. The key options go into the nested request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCertOptions {
    #[serde(flatten)]
    pub key: NewKeyOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<bool>,
}

/// Options accepted by `init_ca`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitCaOptions {
    #[serde(rename = "CN", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<CaConfig>,
}

/// Loose input for `bundle`; resolved into a `BundleTarget` before sending.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleOptions {
    pub certificate: Option<String>,
    pub domain: Option<String>,
    pub private_key: Option<String>,
    pub flavor: Option<String>,
    pub ip: Option<String>,
}

/// Loose input for `certinfo`; resolved into a `CertInfoTarget` before sending.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertInfoOptions {
    pub certificate: Option<String>,
    pub domain: Option<String>,
}

/// Options accepted by `scan`. Sent as query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanOptions {
    pub ip: Option<String>,
    pub timeout: Option<String>,
    pub family: Option<String>,
    pub scanner: Option<String>,
}

/// Options accepted by `info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}
