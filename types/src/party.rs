//! Identity of a participant: an airline, an oracle, a passenger or a caller.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of any party known to the system.
///
/// Identities are issued by the external identity collaborator; this crate only
/// requires them to be non-empty and free of surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Wrap a raw identity string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse and validate a raw identity string.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let id = Self(raw.to_string());
        if id.is_valid() {
            Ok(id)
        } else {
            Err(TypesError::InvalidPartyId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty and not padded with whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PartyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
