//! Caller authorization.

use flightsure_types::PartyId;
use std::collections::BTreeSet;
use std::sync::RwLock;
use tracing::info;

/// Capability check consulted by every mutating entry point.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, caller: &PartyId) -> bool;

    fn is_owner(&self, caller: &PartyId) -> bool;

    /// Grant `caller`. Returns `false` if it already held the grant.
    fn authorize(&self, caller: &PartyId) -> bool;

    /// Revoke `caller`. Returns `false` if it held no grant.
    fn deauthorize(&self, caller: &PartyId) -> bool;
}

/// Owner plus an explicit set of granted callers. The owner is always authorized.
pub struct CallerRegistry {
    owner: PartyId,
    granted: RwLock<BTreeSet<PartyId>>,
}

impl CallerRegistry {
    pub fn new(owner: PartyId) -> Self {
        Self {
            owner,
            granted: RwLock::new(BTreeSet::new()),
        }
    }
}

impl Authorizer for CallerRegistry {
    fn is_authorized(&self, caller: &PartyId) -> bool {
        if *caller == self.owner {
            return true;
        }
        self.granted
            .read()
            .map(|g| g.contains(caller))
            .unwrap_or(false)
    }

    fn is_owner(&self, caller: &PartyId) -> bool {
        *caller == self.owner
    }

    fn authorize(&self, caller: &PartyId) -> bool {
        let Ok(mut granted) = self.granted.write() else {
            return false;
        };
        let added = granted.insert(caller.clone());
        if added {
            info!(caller = %caller, "caller authorized");
        }
        added
    }

    fn deauthorize(&self, caller: &PartyId) -> bool {
        let Ok(mut granted) = self.granted.write() else {
            return false;
        };
        let removed = granted.remove(caller);
        if removed {
            info!(caller = %caller, "caller deauthorized");
        }
        removed
    }
}
