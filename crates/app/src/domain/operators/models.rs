//! Operator Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Operator UUID
pub type OperatorUuid = TypedUuid<Operator>;

/// Operator Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub uuid: OperatorUuid,
    pub username: String,
    pub role: OperatorRole,
    pub created_at: Timestamp,

    /// Set once the operator's access has been withdrawn.
    pub revoked_at: Option<Timestamp>,
}

/// New Operator Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOperator {
    pub username: String,
    pub role: OperatorRole,
}

/// An operator together with a freshly issued, one-time visible API token.
#[derive(Debug, Clone)]
pub struct IssuedOperator {
    pub operator: Operator,
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorRole {
    Admin,
    Cashier,
}

#[derive(Debug, Error)]
#[error("unknown operator role `{0}`")]
pub struct UnknownOperatorRole(pub String);

impl OperatorRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorRole {
    type Err = UnknownOperatorRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "cashier" => Ok(Self::Cashier),
            other => Err(UnknownOperatorRole(other.to_string())),
        }
    }
}
