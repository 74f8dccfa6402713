//! Events delivered to external observers after each committed operation.

use flightsure_types::{Amount, FlightCode, PartyId, StatusCode, Timestamp};
use serde::Serialize;
use std::sync::RwLock;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum SuretyEvent {
    AirlineProposed {
        airline: PartyId,
        proposer: PartyId,
    },
    AirlineVoted {
        airline: PartyId,
        voter: PartyId,
        votes: u32,
    },
    AirlineRegistered {
        airline: PartyId,
        votes: u32,
    },
    AirlineFunded {
        airline: PartyId,
        amount: Amount,
    },
    OracleRegistered {
        oracle: PartyId,
        indexes: Vec<u8>,
    },
    /// Oracles holding `index` should report on this flight.
    OracleRequestOpened {
        index: u8,
        airline: PartyId,
        flight: FlightCode,
        timestamp: Timestamp,
    },
    OracleResponseRecorded {
        oracle: PartyId,
        airline: PartyId,
        flight: FlightCode,
        timestamp: Timestamp,
        status: StatusCode,
    },
    FlightStatusResolved {
        airline: PartyId,
        flight: FlightCode,
        timestamp: Timestamp,
        status: StatusCode,
    },
    FlightRegistered {
        airline: PartyId,
        flight: FlightCode,
        timestamp: Timestamp,
    },
    PolicyPurchased {
        passenger: PartyId,
        airline: PartyId,
        flight: FlightCode,
        timestamp: Timestamp,
        amount: Amount,
    },
    InsureeCredited {
        passenger: PartyId,
        amount: Amount,
    },
    Withdrawn {
        passenger: PartyId,
        amount: Amount,
    },
    OperationalStatusChanged {
        operational: bool,
    },
}

impl SuretyEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

type Listener = Box<dyn Fn(&SuretyEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the emitting thread after the writer lock has been
/// released; keep handlers fast.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Listener) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(listener);
        }
    }

    pub fn emit(&self, event: &SuretyEvent) {
        if let Ok(listeners) = self.listeners.read() {
            for listener in listeners.iter() {
                listener(event);
            }
        }
    }
}
