//! Currency amounts.
//!
//! Amounts are whole gwei held in a `u64`; no floating point anywhere. Ten ether,
//! the airline funding threshold, is 10^10 gwei and fits with plenty of headroom.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Gwei per ether.
pub const GWEI_PER_ETHER: u64 = 1_000_000_000;

/// An amount of currency in gwei.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(gwei: u64) -> Self {
        Self(gwei)
    }

    pub const fn from_ether(ether: u64) -> Self {
        Self(ether * GWEI_PER_ETHER)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Scale by a ratio in basis points (15000 = 150%), rounding down.
    ///
    /// Returns `None` if the result does not fit in a `u64`.
    pub fn checked_mul_bps(self, bps: u32) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(bps) / 10_000;
        u64::try_from(scaled).ok().map(Self)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gwei", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_multiple_of_one_ether() {
        let premium = Amount::from_ether(1);
        assert_eq!(
            premium.checked_mul_bps(15_000),
            Some(Amount::new(1_500_000_000))
        );
    }

    #[test]
    fn mul_bps_rounds_down() {
        assert_eq!(Amount::new(3).checked_mul_bps(15_000), Some(Amount::new(4)));
    }

    #[test]
    fn mul_bps_overflow_is_none() {
        assert_eq!(Amount::new(u64::MAX).checked_mul_bps(20_000), None);
    }
}
