//! Flights, flight keys and the status codes oracles report.

use crate::error::TypesError;
use crate::party::PartyId;
use crate::time::Timestamp;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

type Blake2b256 = Blake2b<U32>;

const FLIGHT_KEY_DOMAIN: &[u8] = b"flightsure/flight-key/v1";

/// A carrier-assigned flight designator such as `ND1309`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightCode(String);

impl FlightCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(TypesError::InvalidFlightCode(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FlightCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifies one departure: the operating airline, its flight code and the
/// scheduled departure time.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    pub airline: PartyId,
    pub flight: FlightCode,
    pub timestamp: Timestamp,
}

impl FlightKey {
    pub fn new(airline: PartyId, flight: FlightCode, timestamp: Timestamp) -> Self {
        Self {
            airline,
            flight,
            timestamp,
        }
    }

    /// Stable 32-byte digest of this key.
    ///
    /// Variable-length fields are length-prefixed so `("ab", "c")` and
    /// `("a", "bc")` never collide.
    pub fn id(&self) -> FlightId {
        let airline = self.airline.as_str().as_bytes();
        let flight = self.flight.as_str().as_bytes();
        let mut hasher = Blake2b256::new();
        hasher.update(FLIGHT_KEY_DOMAIN);
        hasher.update((airline.len() as u64).to_be_bytes());
        hasher.update(airline);
        hasher.update((flight.len() as u64).to_be_bytes());
        hasher.update(flight);
        hasher.update(self.timestamp.to_be_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        FlightId(out)
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.airline, self.flight, self.timestamp)
    }
}

/// Digest of a [`FlightKey`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightId([u8; 32]);

impl FlightId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Flight status as reported by oracles.
///
/// Discriminants are the wire codes oracle clients submit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum StatusCode {
    #[default]
    Unknown = 0,
    OnTime = 10,
    /// Late, and the airline is at fault. The only status that pays out.
    LateAirline = 20,
    LateWeather = 30,
    LateTechnical = 40,
    LateOther = 50,
}

impl StatusCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_airline_fault(self) -> bool {
        self == Self::LateAirline
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = TypesError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unknown),
            10 => Ok(Self::OnTime),
            20 => Ok(Self::LateAirline),
            30 => Ok(Self::LateWeather),
            40 => Ok(Self::LateTechnical),
            50 => Ok(Self::LateOther),
            other => Err(TypesError::UnknownStatusCode(other)),
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::OnTime => "on-time",
            Self::LateAirline => "late-airline",
            Self::LateWeather => "late-weather",
            Self::LateTechnical => "late-technical",
            Self::LateOther => "late-other",
        };
        write!(f, "{label}({})", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(airline: &str, flight: &str, ts: u64) -> FlightKey {
        FlightKey::new(airline.into(), flight.into(), Timestamp::new(ts))
    }

    #[test]
    fn flight_id_is_deterministic() {
        assert_eq!(key("A1", "ND1309", 100).id(), key("A1", "ND1309", 100).id());
    }

    #[test]
    fn flight_id_length_prefix_prevents_shifting() {
        assert_ne!(key("ab", "c", 1).id(), key("a", "bc", 1).id());
    }

    #[test]
    fn flight_id_depends_on_timestamp() {
        assert_ne!(key("A1", "ND1309", 1).id(), key("A1", "ND1309", 2).id());
    }

    #[test]
    fn status_code_round_trip_through_wire_code() {
        for status in [
            StatusCode::Unknown,
            StatusCode::OnTime,
            StatusCode::LateAirline,
            StatusCode::LateWeather,
            StatusCode::LateTechnical,
            StatusCode::LateOther,
        ] {
            assert_eq!(StatusCode::try_from(status.code()), Ok(status));
        }
        assert_eq!(
            StatusCode::try_from(21),
            Err(TypesError::UnknownStatusCode(21))
        );
    }

    #[test]
    fn only_late_airline_is_airline_fault() {
        assert!(StatusCode::LateAirline.is_airline_fault());
        assert!(!StatusCode::LateWeather.is_airline_fault());
        assert!(!StatusCode::OnTime.is_airline_fault());
    }

    #[test]
    fn flight_code_parse_rejects_whitespace() {
        assert!(FlightCode::parse("ND 1309").is_err());
        assert!(FlightCode::parse("").is_err());
        assert!(FlightCode::parse("ND1309").is_ok());
    }
}
