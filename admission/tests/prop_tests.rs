use proptest::prelude::*;
use std::sync::Arc;

use flightsure_admission::AdmissionController;
use flightsure_nullables::MemoryStore;
use flightsure_types::{AirlineState, Amount, PartyId, ProtocolParams};

#[derive(Clone, Debug)]
enum Op {
    Propose { target: u8, proposer: u8 },
    Vote { target: u8, voter: u8 },
    Fund { target: u8, ether: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, 0u8..12).prop_map(|(target, proposer)| Op::Propose { target, proposer }),
        (0u8..12, 0u8..12).prop_map(|(target, voter)| Op::Vote { target, voter }),
        (0u8..12, 0u64..20).prop_map(|(target, ether)| Op::Fund { target, ether }),
    ]
}

fn airline(n: u8) -> PartyId {
    if n == 0 {
        PartyId::new("O")
    } else {
        PartyId::new(format!("A{n}"))
    }
}

proptest! {
    /// Whatever sequence of operations is applied, every airline only moves
    /// forward and never reaches Participant without passing Registered.
    #[test]
    fn airline_state_only_moves_forward(ops in prop::collection::vec(op(), 1..80)) {
        let ctl = AdmissionController::new(Arc::new(MemoryStore::new()), ProtocolParams::default());
        ctl.admit_founder(&airline(0), "Owner").unwrap();

        let mut seen: Vec<Vec<AirlineState>> = (0..12)
            .map(|n| vec![ctl.airline_state(&airline(n)).unwrap()])
            .collect();

        for op in ops {
            let before = match &op {
                Op::Propose { target, .. } | Op::Vote { target, .. } | Op::Fund { target, .. } => {
                    ctl.airline_state(&airline(*target)).unwrap()
                }
            };
            let _ = match op {
                Op::Propose { target, proposer } => ctl
                    .propose_airline(&airline(target), "x", &airline(proposer))
                    .map(|_| ()),
                Op::Vote { target, voter } => ctl
                    .cast_vote(&airline(target), &airline(voter))
                    .map(|_| ()),
                Op::Fund { target, ether } => {
                    let res = ctl.fund_airline(&airline(target), Amount::from_ether(ether)).map(|_| ());
                    if ether < 10 {
                        prop_assert_eq!(ctl.airline_state(&airline(target)).unwrap(), before);
                    }
                    res
                }
            };

            for n in 0..12u8 {
                let now = ctl.airline_state(&airline(n)).unwrap();
                let last = *seen[n as usize].last().unwrap();
                prop_assert!(now >= last, "airline {} regressed {:?} -> {:?}", n, last, now);
                if now != last {
                    seen[n as usize].push(now);
                }
            }
        }

        for history in &seen {
            if history.contains(&AirlineState::Participant) {
                prop_assert!(history.contains(&AirlineState::Registered) || history[0] == AirlineState::Participant);
            }
        }
    }

    /// A pending airline is registered exactly when its votes reach half the
    /// registered airlines, rounded up.
    #[test]
    fn pending_airline_registers_at_threshold(extra in 0u8..6) {
        let params = ProtocolParams::default();
        let ctl = AdmissionController::new(Arc::new(MemoryStore::new()), params.clone());
        ctl.admit_founder(&airline(0), "Owner").unwrap();

        // Grow to 4 + extra funded participants.
        let mut participants = vec![airline(0)];
        for n in 1..(4 + extra) {
            let id = airline(n);
            let registered = ctl.registered_airline_count().unwrap();
            ctl.propose_airline(&id, "x", &airline(0)).unwrap();
            if ctl.airline_state(&id).unwrap() == AirlineState::Pending {
                let required = params.required_votes(registered);
                for voter in participants.iter().take(required as usize) {
                    ctl.cast_vote(&id, voter).unwrap();
                }
            }
            ctl.fund_airline(&id, params.airline_funding_threshold).unwrap();
            participants.push(id);
        }

        let target = airline(11);
        ctl.propose_airline(&target, "target", &airline(0)).unwrap();
        let registered = ctl.registered_airline_count().unwrap();
        let required = params.required_votes(registered);
        for (i, voter) in participants.iter().enumerate() {
            let votes_before = i as u32;
            prop_assert_eq!(
                ctl.airline_state(&target).unwrap(),
                if votes_before >= required { AirlineState::Registered } else { AirlineState::Pending }
            );
            if votes_before >= required {
                break;
            }
            ctl.cast_vote(&target, voter).unwrap();
        }
        prop_assert_eq!(ctl.airline_state(&target).unwrap(), AirlineState::Registered);
        prop_assert_eq!(ctl.vote_count(&target).unwrap(), required);
    }
}
