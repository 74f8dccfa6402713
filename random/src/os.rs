//! Operating-system CSPRNG provider.

use crate::{RandomError, RandomnessProvider};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

const OS_SEED_DOMAIN: &[u8] = b"flightsure/os-seed/v1";

/// Seeds from `getrandom`, hashed together with the caller's context.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomnessProvider for OsRandom {
    fn seed(&self, context: &[u8]) -> Result<[u8; 32], RandomError> {
        let mut entropy = [0u8; 32];
        getrandom::getrandom(&mut entropy).map_err(|e| RandomError::Unavailable(e.to_string()))?;

        let mut hasher = Blake2b256::new();
        hasher.update(OS_SEED_DOMAIN);
        hasher.update(entropy);
        hasher.update(context);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Ok(out)
    }

    fn name(&self) -> &str {
        "os-csprng"
    }
}
