//! Oracle registry table.

use crate::StoreError;
use flightsure_types::{Amount, PartyId};
use serde::{Deserialize, Serialize};

/// A registered oracle and the sampling indices it answers for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRecord {
    pub id: PartyId,
    /// Pairwise distinct, in the order they were drawn.
    pub indices: Vec<u8>,
    pub fee_paid: Amount,
}

impl OracleRecord {
    pub fn serves(&self, index: u8) -> bool {
        self.indices.contains(&index)
    }
}

pub trait OracleStore {
    fn get_oracle(&self, id: &PartyId) -> Result<Option<OracleRecord>, StoreError>;
    fn put_oracle(&self, record: &OracleRecord) -> Result<(), StoreError>;
    fn oracle_count(&self) -> Result<u64, StoreError>;
}
