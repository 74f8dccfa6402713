//! Response aggregator: open status requests, grouped responses, quorum.

use crate::error::OracleError;
use crate::registry::OracleRegistry;
use crate::settlement::{Credit, Settlement};
use flightsure_random::RandomnessProvider;
use flightsure_store::{OracleRecord, OracleStore, RequestKey, RequestStore, StatusRequest};
use flightsure_types::{Amount, FlightKey, PartyId, ProtocolParams, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

/// A request that just reached quorum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub flight: FlightKey,
    pub status: StatusCode,
    /// Passengers credited as a result; empty unless the airline was at fault.
    pub credited: Vec<Credit>,
}

/// Result of one accepted response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseOutcome {
    pub key: RequestKey,
    /// Size of the responder's status group after this response.
    pub group_size: u32,
    /// Set only by the response that resolved the request.
    pub resolution: Option<Resolution>,
}

/// Owns the oracle registry and the status request table.
pub struct ResponseAggregator<S> {
    store: Arc<S>,
    registry: OracleRegistry<S>,
    quorum: u32,
}

impl<S: OracleStore + RequestStore> ResponseAggregator<S> {
    pub fn new(store: Arc<S>, rng: Arc<dyn RandomnessProvider>, params: &ProtocolParams) -> Self {
        Self {
            registry: OracleRegistry::new(Arc::clone(&store), rng, params),
            store,
            quorum: params.response_quorum,
        }
    }

    pub fn register_oracle(&self, oracle: &PartyId, fee: Amount) -> Result<Vec<u8>, OracleError> {
        self.registry.register(oracle, fee)
    }

    /// Open a status request for `flight` under a freshly drawn index.
    pub fn open_request(
        &self,
        flight: &FlightKey,
        requester: &PartyId,
    ) -> Result<RequestKey, OracleError> {
        let index = self.registry.draw_request_index(requester)?;
        let key = RequestKey {
            index,
            flight: flight.clone(),
        };
        if let Some(existing) = self.store.get_request(&key)? {
            return Err(if existing.is_open() {
                OracleError::RequestAlreadyOpen(key.to_string())
            } else {
                OracleError::RequestResolved(key.to_string())
            });
        }

        self.store
            .put_request(&StatusRequest::new(key.clone(), requester.clone()))?;
        info!(request = %key, requester = %requester, "status request opened");
        Ok(key)
    }

    /// Record `oracle`'s report of `status` for the request at `key`.
    ///
    /// The response that brings a status group to the quorum resolves the
    /// request and hands the result to `settlement`. Responses after that are
    /// still recorded but settle nothing.
    pub fn submit_response(
        &self,
        oracle: &PartyId,
        key: &RequestKey,
        status: StatusCode,
        settlement: &dyn Settlement,
    ) -> Result<ResponseOutcome, OracleError> {
        let record = self.assigned_oracle(oracle, key.index)?;
        let mut request = self
            .store
            .get_request(key)?
            .ok_or_else(|| OracleError::RequestNotFound(key.to_string()))?;

        let group = request.responses.entry(status).or_default();
        if group.contains(&record.id) {
            return Err(OracleError::DuplicateResponse {
                oracle: oracle.to_string(),
                status: status.to_string(),
                request: key.to_string(),
            });
        }
        group.insert(record.id);
        let group_size = group.len() as u32;

        let resolves = request.is_open() && group_size == self.quorum;
        if resolves {
            request.resolved = Some(status);
        }
        self.store.put_request(&request)?;
        debug!(request = %key, oracle = %oracle, %status, group_size, "oracle response recorded");

        if !resolves {
            return Ok(ResponseOutcome {
                key: key.clone(),
                group_size,
                resolution: None,
            });
        }

        info!(request = %key, %status, responses = group_size, "flight status resolved");
        settlement.record_status(&key.flight, status)?;
        let credited = if status.is_airline_fault() {
            settlement.credit_insurees(&key.flight)?
        } else {
            Vec::new()
        };

        Ok(ResponseOutcome {
            key: key.clone(),
            group_size,
            resolution: Some(Resolution {
                flight: key.flight.clone(),
                status,
                credited,
            }),
        })
    }

    fn assigned_oracle(&self, oracle: &PartyId, index: u8) -> Result<OracleRecord, OracleError> {
        let record = self
            .registry
            .get(oracle)?
            .ok_or_else(|| OracleError::NotRegistered(oracle.to_string()))?;
        if !record.serves(index) {
            return Err(OracleError::IndexNotAssigned {
                oracle: oracle.to_string(),
                index,
            });
        }
        Ok(record)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn oracle_indexes(&self, oracle: &PartyId) -> Result<Vec<u8>, OracleError> {
        self.registry.indexes(oracle)
    }

    pub fn oracle_count(&self) -> Result<u64, OracleError> {
        self.registry.count()
    }

    pub fn request(&self, key: &RequestKey) -> Result<Option<StatusRequest>, OracleError> {
        Ok(self.store.get_request(key)?)
    }
}
