//! Uniform, distinct index sampling from a bounded domain.

use crate::{RandomError, RandomnessProvider};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use flightsure_types::PartyId;
use tracing::trace;

type Blake2b256 = Blake2b<U32>;

const SAMPLER_DOMAIN: &[u8] = b"flightsure/oracle-index/v1";

/// Upper bound on expansion steps for one sampling call.
const MAX_DRAWS: u32 = 512;

/// What the indices are drawn for. Part of the seed context, so an oracle's
/// assignment and a request's index never share a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purpose {
    OracleAssignment,
    RequestIndex,
}

impl Purpose {
    fn tag(self) -> &'static [u8] {
        match self {
            Self::OracleAssignment => b"assign",
            Self::RequestIndex => b"request",
        }
    }
}

/// Draws indices in `[0, domain)`.
///
/// One provider seed is expanded with Blake2b in counter mode. Each 64-bit
/// candidate is rejected if it falls in the biased tail, and again if the index
/// was already drawn, so the result is uniform and pairwise distinct.
#[derive(Clone, Copy, Debug)]
pub struct IndexSampler {
    domain: u8,
}

impl IndexSampler {
    pub fn new(domain: u8) -> Self {
        Self { domain }
    }

    /// Draw `count` pairwise distinct indices for `party`.
    pub fn draw_distinct(
        &self,
        provider: &dyn RandomnessProvider,
        purpose: Purpose,
        party: &PartyId,
        count: u8,
    ) -> Result<Vec<u8>, RandomError> {
        if count > self.domain || self.domain == 0 {
            return Err(RandomError::DomainTooSmall {
                wanted: count,
                domain: self.domain,
            });
        }

        let seed = provider.seed(&context(purpose, party))?;
        let domain = u64::from(self.domain);
        let zone = u64::MAX - (u64::MAX % domain);

        let mut drawn: Vec<u8> = Vec::with_capacity(count as usize);
        let mut counter: u32 = 0;
        while drawn.len() < count as usize {
            if counter >= MAX_DRAWS {
                return Err(RandomError::Exhausted(counter));
            }
            let candidate = expand(&seed, counter);
            counter += 1;
            if candidate >= zone {
                continue;
            }
            let index = (candidate % domain) as u8;
            if drawn.contains(&index) {
                trace!(party = %party, index, "index collision, resampling");
                continue;
            }
            drawn.push(index);
        }
        Ok(drawn)
    }

    /// Draw a single index for `party`.
    pub fn draw_one(
        &self,
        provider: &dyn RandomnessProvider,
        purpose: Purpose,
        party: &PartyId,
    ) -> Result<u8, RandomError> {
        let drawn = self.draw_distinct(provider, purpose, party, 1)?;
        Ok(drawn[0])
    }
}

fn context(purpose: Purpose, party: &PartyId) -> Vec<u8> {
    let id = party.as_str().as_bytes();
    let mut ctx = Vec::with_capacity(SAMPLER_DOMAIN.len() + 16 + id.len());
    ctx.extend_from_slice(SAMPLER_DOMAIN);
    ctx.extend_from_slice(purpose.tag());
    ctx.extend_from_slice(&(id.len() as u64).to_be_bytes());
    ctx.extend_from_slice(id);
    ctx
}

fn expand(seed: &[u8; 32], counter: u32) -> u64 {
    let mut hasher = Blake2b256::new();
    hasher.update(seed);
    hasher.update(counter.to_be_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}
