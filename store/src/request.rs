//! Oracle status request table.

use crate::StoreError;
use flightsure_types::{FlightKey, PartyId, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A status request is addressed to the oracles holding `index`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    pub index: u8,
    pub flight: FlightKey,
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.index, self.flight)
    }
}

/// An open or resolved status request and the responses it has collected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub key: RequestKey,
    pub requester: PartyId,
    /// Responding oracles grouped by the status they reported.
    pub responses: BTreeMap<StatusCode, BTreeSet<PartyId>>,
    /// Set once, when the first group reaches quorum. Never cleared.
    pub resolved: Option<StatusCode>,
}

impl StatusRequest {
    pub fn new(key: RequestKey, requester: PartyId) -> Self {
        Self {
            key,
            requester,
            responses: BTreeMap::new(),
            resolved: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.resolved.is_none()
    }

    pub fn group_size(&self, status: StatusCode) -> u32 {
        self.responses.get(&status).map_or(0, |g| g.len() as u32)
    }
}

pub trait RequestStore {
    fn get_request(&self, key: &RequestKey) -> Result<Option<StatusRequest>, StoreError>;
    fn put_request(&self, request: &StatusRequest) -> Result<(), StoreError>;
}
