//! Passenger credit balances and the credited-pair marker table.

use crate::StoreError;
use flightsure_types::{Amount, FlightKey, PartyId};

pub trait CreditStore {
    /// Withdrawable balance; zero for passengers never credited.
    fn get_credit(&self, passenger: &PartyId) -> Result<Amount, StoreError>;
    fn put_credit(&self, passenger: &PartyId, balance: Amount) -> Result<(), StoreError>;

    /// Whether `passenger` has already been paid out for `flight`.
    fn is_credited(&self, flight: &FlightKey, passenger: &PartyId) -> Result<bool, StoreError>;
    fn mark_credited(&self, flight: &FlightKey, passenger: &PartyId) -> Result<(), StoreError>;
}
