//! Airline admission lifecycle.

use serde::{Deserialize, Serialize};

/// Where an airline sits in the admission lifecycle.
///
/// Unknown → Pending → Registered → Participant. Bootstrap admission skips
/// Pending; nothing skips Registered and nothing moves backwards.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AirlineState {
    /// Never proposed.
    #[default]
    Unknown,
    /// Proposed after the bootstrap phase; collecting votes.
    Pending,
    /// Admitted by vote or bootstrap; not yet funded.
    Registered,
    /// Funded. May propose, vote and register flights.
    Participant,
}

impl AirlineState {
    /// Whether the airline counts toward the registered-airline total.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Registered | Self::Participant)
    }

    /// Whether the airline may propose and vote.
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Participant)
    }

    /// Whether `next` is a legal single step from this state.
    pub fn can_transition_to(&self, next: AirlineState) -> bool {
        matches!(
            (self, next),
            (Self::Unknown, Self::Pending)
                | (Self::Unknown, Self::Registered)
                | (Self::Pending, Self::Registered)
                | (Self::Registered, Self::Participant)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_skipping_registered() {
        assert!(!AirlineState::Unknown.can_transition_to(AirlineState::Participant));
        assert!(!AirlineState::Pending.can_transition_to(AirlineState::Participant));
    }

    #[test]
    fn participant_is_terminal() {
        for next in [
            AirlineState::Unknown,
            AirlineState::Pending,
            AirlineState::Registered,
            AirlineState::Participant,
        ] {
            assert!(!AirlineState::Participant.can_transition_to(next));
        }
    }
}
