//! Integer naira prices.
//!
//! The catalog quotes every variant in whole naira, so prices are plain
//! unsigned integers. Display uses the `₦` symbol with English-locale
//! thousands grouping and no decimal places, which is also the format the
//! order messages send over WhatsApp.

use core::fmt;
use core::iter::Sum;

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// A non-negative amount in whole naira.
///
/// ```
/// use isha_core::Price;
///
/// assert_eq!(Price::new(30_000).to_string(), "₦30,000");
/// assert_eq!(Price::new(15_000).times(2), Price::new(30_000));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Currency symbol prefixed to every formatted amount.
    pub const SYMBOL: &'static str = "₦";

    /// Zero naira.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Line price for `quantity` units. Saturates instead of wrapping.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// The amount with thousands separators but no symbol (`30,000`).
    #[must_use]
    pub fn grouped(self) -> String {
        self.0.to_formatted_string(&Locale::en)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.grouped())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new(0).to_string(), "₦0");
        assert_eq!(Price::new(950).to_string(), "₦950");
        assert_eq!(Price::new(30_000).to_string(), "₦30,000");
        assert_eq!(Price::new(1_250_000).to_string(), "₦1,250,000");
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
        assert_eq!(Price::new(18_000).times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(10_000), Price::new(20_000)].into_iter().sum();
        assert_eq!(total, Price::new(30_000));
    }
}
