//! Admission controller: proposal, voting and funding-gated promotion.

use crate::error::AdmissionError;
use crate::registry::AirlineRegistry;
use crate::tally::VotingTally;
use flightsure_store::{AirlineRecord, AirlineStore};
use flightsure_types::{AirlineState, Amount, PartyId, ProtocolParams};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a successful proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// Bootstrap phase: admitted straight to Registered with the proposer's vote.
    Registered,
    /// Waiting for `required` votes.
    Pending { required: u32 },
}

/// Result of a successful vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Vote counted; threshold not reached yet.
    Recorded { votes: u32, required: u32 },
    /// This vote reached the threshold; the airline is now Registered.
    Registered { votes: u32 },
}

/// Result of a successful funding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundingOutcome {
    /// Amount to add to the pooled funds.
    pub contributed: Amount,
}

/// Owns the airline registry and the voting tally.
///
/// Operations validate fully before their first write; callers wrap each call in
/// a store transaction so a backend failure midway is rolled back as well.
pub struct AdmissionController<S> {
    registry: AirlineRegistry<S>,
    tally: VotingTally<S>,
    params: ProtocolParams,
}

impl<S: AirlineStore> AdmissionController<S> {
    pub fn new(store: Arc<S>, params: ProtocolParams) -> Self {
        Self {
            registry: AirlineRegistry::new(Arc::clone(&store)),
            tally: VotingTally::new(store),
            params,
        }
    }

    /// Admit the founding airline as a Participant.
    ///
    /// Only valid on an empty registry. The founder contributes no funding.
    pub fn admit_founder(&self, id: &PartyId, name: &str) -> Result<(), AdmissionError> {
        if self.registry.admitted_count()? > 0 {
            return Err(AdmissionError::AlreadyBootstrapped);
        }
        self.registry.insert(id, name, AirlineState::Registered)?;
        self.tally.seed(id, id)?;
        self.registry
            .advance(id, AirlineState::Participant, Some(Amount::ZERO))?;
        info!(airline = %id, name, "founding airline admitted as participant");
        Ok(())
    }

    /// Propose `new_id` on behalf of the Participant `proposer`.
    pub fn propose_airline(
        &self,
        new_id: &PartyId,
        name: &str,
        proposer: &PartyId,
    ) -> Result<ProposalOutcome, AdmissionError> {
        if !self.registry.state(proposer)?.can_vote() {
            return Err(AdmissionError::ProposerNotParticipant(proposer.to_string()));
        }
        let current = self.registry.state(new_id)?;
        if current != AirlineState::Unknown {
            return Err(AdmissionError::AlreadyProposed {
                airline: new_id.to_string(),
                state: current,
            });
        }

        let registered = self.registry.admitted_count()?;
        if self.params.is_bootstrap(registered) {
            self.registry.insert(new_id, name, AirlineState::Registered)?;
            self.tally.seed(new_id, proposer)?;
            info!(
                airline = %new_id,
                proposer = %proposer,
                registered = registered + 1,
                "airline registered during bootstrap"
            );
            return Ok(ProposalOutcome::Registered);
        }

        self.registry.insert(new_id, name, AirlineState::Pending)?;
        let required = self.params.required_votes(registered);
        info!(airline = %new_id, proposer = %proposer, required, "airline pending votes");
        Ok(ProposalOutcome::Pending { required })
    }

    /// Record `voter`'s vote for the pending `airline`, promoting it on threshold.
    pub fn cast_vote(
        &self,
        airline: &PartyId,
        voter: &PartyId,
    ) -> Result<VoteOutcome, AdmissionError> {
        if !self.registry.state(voter)?.can_vote() {
            return Err(AdmissionError::VoterNotParticipant(voter.to_string()));
        }
        match self.registry.state(airline)? {
            AirlineState::Pending => {}
            AirlineState::Unknown => {
                return Err(AdmissionError::AirlineNotFound(airline.to_string()))
            }
            state => {
                return Err(AdmissionError::NotPending {
                    airline: airline.to_string(),
                    state,
                })
            }
        }

        let votes = self.tally.record(airline, voter)?;
        let required = self.params.required_votes(self.registry.admitted_count()?);
        if votes < required {
            debug!(airline = %airline, voter = %voter, votes, required, "vote recorded");
            return Ok(VoteOutcome::Recorded { votes, required });
        }

        self.registry.advance(airline, AirlineState::Registered, None)?;
        info!(airline = %airline, votes, required, "airline registered by vote");
        Ok(VoteOutcome::Registered { votes })
    }

    /// Promote a Registered airline to Participant against `amount` of funding.
    pub fn fund_airline(
        &self,
        airline: &PartyId,
        amount: Amount,
    ) -> Result<FundingOutcome, AdmissionError> {
        match self.registry.state(airline)? {
            AirlineState::Registered => {}
            AirlineState::Unknown => {
                return Err(AdmissionError::AirlineNotFound(airline.to_string()))
            }
            AirlineState::Participant => {
                return Err(AdmissionError::AlreadyFunded(airline.to_string()))
            }
            state => {
                return Err(AdmissionError::NotRegistered {
                    airline: airline.to_string(),
                    state,
                })
            }
        }
        let needed = self.params.airline_funding_threshold;
        if amount < needed {
            return Err(AdmissionError::InsufficientFunding {
                needed,
                provided: amount,
            });
        }

        self.registry
            .advance(airline, AirlineState::Participant, Some(amount))?;
        info!(airline = %airline, %amount, "airline funded, now participant");
        Ok(FundingOutcome {
            contributed: amount,
        })
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn airline_state(&self, id: &PartyId) -> Result<AirlineState, AdmissionError> {
        self.registry.state(id)
    }

    pub fn airline(&self, id: &PartyId) -> Result<Option<AirlineRecord>, AdmissionError> {
        self.registry.get(id)
    }

    pub fn vote_count(&self, id: &PartyId) -> Result<u32, AdmissionError> {
        self.tally.votes(id)
    }

    pub fn registered_airline_count(&self) -> Result<u32, AdmissionError> {
        self.registry.admitted_count()
    }

    pub fn is_participant(&self, id: &PartyId) -> Result<bool, AdmissionError> {
        Ok(self.registry.state(id)? == AirlineState::Participant)
    }
}
