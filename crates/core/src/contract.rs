//! Contract fingerprint shared by server and client.
//!
//! The fingerprint is `sha256("v=<version>|<name>|<name>|...")` rendered as
//! lowercase hex and truncated. It only detects drift between independently
//! deployed producers and consumers; it is not a security property.

use sha2::{Digest, Sha256};

use crate::schema::{ContractInfo, SCHEMA_NAMES};

/// Semantic version of the published schema set.
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Truncation applied to the hex digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashFormat {
    /// 8 hex characters, emitted by early clients and possibly still cached.
    Legacy,
    /// 16 hex characters.
    #[default]
    Current,
}

impl HashFormat {
    pub fn hex_len(self) -> usize {
        match self {
            Self::Legacy => 8,
            Self::Current => 16,
        }
    }

    /// Identify the format of an existing hash by its length.
    pub fn detect(hash: &str) -> Option<Self> {
        match hash.len() {
            8 => Some(Self::Legacy),
            16 => Some(Self::Current),
            _ => None,
        }
    }
}

/// Compute the fingerprint of an arbitrary schema set.
pub fn fingerprint(version: &str, schema_names: &[&str], format: HashFormat) -> String {
    let mut input = format!("v={version}");
    for name in schema_names {
        input.push('|');
        input.push_str(name);
    }
    let mut hex = format!("{:x}", Sha256::digest(input.as_bytes()));
    hex.truncate(format.hex_len());
    hex
}

/// Fingerprint of the schema set compiled into this build.
pub fn contract_hash() -> String {
    fingerprint(CONTRACT_VERSION, SCHEMA_NAMES, HashFormat::Current)
}

/// The local contract, as advertised by the server or bundled in a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFingerprint {
    pub version: String,
    pub hash: String,
}

impl ContractFingerprint {
    pub fn current() -> Self {
        Self {
            version: CONTRACT_VERSION.to_string(),
            hash: contract_hash(),
        }
    }

    /// Whether a peer's hash describes the same schema set.
    ///
    /// A legacy 8-character hash matches when it is the prefix of the current
    /// 16-character hash. Any other length never matches.
    pub fn matches(&self, other_hash: &str) -> bool {
        match HashFormat::detect(other_hash) {
            Some(HashFormat::Current) => self.hash.eq_ignore_ascii_case(other_hash),
            Some(HashFormat::Legacy) => self
                .hash
                .get(..HashFormat::Legacy.hex_len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(other_hash)),
            None => false,
        }
    }

    pub fn to_info(&self) -> ContractInfo {
        ContractInfo {
            version: self.version.clone(),
            hash: self.hash.clone(),
        }
    }
}
