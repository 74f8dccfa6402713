//! Oracle registry: registered reporters and their sampling indices.

use crate::error::OracleError;
use flightsure_random::{IndexSampler, Purpose, RandomnessProvider};
use flightsure_store::{OracleRecord, OracleStore};
use flightsure_types::{Amount, PartyId, ProtocolParams};
use std::sync::Arc;
use tracing::info;

pub struct OracleRegistry<S> {
    store: Arc<S>,
    rng: Arc<dyn RandomnessProvider>,
    sampler: IndexSampler,
    fee: Amount,
    indices_per_oracle: u8,
}

impl<S: OracleStore> OracleRegistry<S> {
    pub fn new(store: Arc<S>, rng: Arc<dyn RandomnessProvider>, params: &ProtocolParams) -> Self {
        Self {
            store,
            rng,
            sampler: IndexSampler::new(params.oracle_index_domain),
            fee: params.oracle_registration_fee,
            indices_per_oracle: params.indices_per_oracle,
        }
    }

    /// Register `oracle` against `fee`, returning its assigned indices.
    pub fn register(&self, oracle: &PartyId, fee: Amount) -> Result<Vec<u8>, OracleError> {
        if fee < self.fee {
            return Err(OracleError::InsufficientFee {
                needed: self.fee,
                provided: fee,
            });
        }
        if self.store.get_oracle(oracle)?.is_some() {
            return Err(OracleError::AlreadyRegistered(oracle.to_string()));
        }

        let indices = self.sampler.draw_distinct(
            self.rng.as_ref(),
            Purpose::OracleAssignment,
            oracle,
            self.indices_per_oracle,
        )?;
        self.store.put_oracle(&OracleRecord {
            id: oracle.clone(),
            indices: indices.clone(),
            fee_paid: fee,
        })?;
        info!(oracle = %oracle, ?indices, rng = self.rng.name(), "oracle registered");
        Ok(indices)
    }

    /// Draw the index a new status request from `requester` is addressed to.
    pub fn draw_request_index(&self, requester: &PartyId) -> Result<u8, OracleError> {
        Ok(self
            .sampler
            .draw_one(self.rng.as_ref(), Purpose::RequestIndex, requester)?)
    }

    pub fn get(&self, oracle: &PartyId) -> Result<Option<OracleRecord>, OracleError> {
        Ok(self.store.get_oracle(oracle)?)
    }

    /// Assigned indices; empty for unregistered oracles.
    pub fn indexes(&self, oracle: &PartyId) -> Result<Vec<u8>, OracleError> {
        Ok(self
            .store
            .get_oracle(oracle)?
            .map(|r| r.indices)
            .unwrap_or_default())
    }

    pub fn count(&self) -> Result<u64, OracleError> {
        Ok(self.store.oracle_count()?)
    }
}
