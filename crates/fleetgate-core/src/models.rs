use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use url::Url;

use crate::OracleConfig;

/// A logical upstream addressed by `/oracle/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oracle {
    pub id: String,
    pub name: String,
    pub base_url: Url,
    pub use_pending_mode: bool,
}

impl From<&OracleConfig> for Oracle {
    fn from(config: &OracleConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            base_url: config.url.clone(),
            use_pending_mode: config.use_pending_mode,
        }
    }
}

/// Oracle as listed to the front end, without its upstream url.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOracle {
    pub oracle_id: String,
    pub name: String,
    pub use_pending_mode: bool,
}

impl From<&Oracle> for PublicOracle {
    fn from(oracle: &Oracle) -> Self {
        Self {
            oracle_id: oracle.id.clone(),
            name: oracle.name.clone(),
            use_pending_mode: oracle.use_pending_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VinStatus {
    Approved,
    Other(String),
}

impl VinStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl Display for VinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => f.write_str("APPROVED"),
            Self::Other(status) => f.write_str(status),
        }
    }
}

impl Serialize for VinStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VinEnrollmentStatus {
    pub vin: String,
    pub status: VinStatus,
}

pub const VIN_LENGTH: usize = 17;

pub fn is_valid_vin(vin: &str) -> bool {
    vin.len() == VIN_LENGTH && vin.bytes().all(|b| b.is_ascii_alphanumeric())
}
