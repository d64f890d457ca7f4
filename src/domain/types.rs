//! Strongly-typed value objects used by domain entities.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A byte blob or string that does not hold a well-formed UUID.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid public id")]
pub struct InvalidPublicId;

/// Public identifier of an event, exposed in URLs instead of the row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicId(Uuid);

impl PublicId {
    /// Generate a new random public ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from raw bytes (DB boundary).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidPublicId> {
        Ok(Self(Uuid::from_slice(bytes).map_err(|_| InvalidPublicId)?))
    }

    /// Convert to raw bytes (DB boundary).
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Display for PublicId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PublicId {
    type Err = InvalidPublicId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s).map_err(|_| InvalidPublicId)?))
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}
