use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Money type holding an integer amount of minor currency units (cents, pence, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// create from minor units (cents, pence, etc)
    pub fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// get underlying minor units
    pub fn as_minor(&self) -> i64 {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// divide into equal parts, returning the per-part base and the leftover
    pub fn split_even(&self, parts: u32) -> (Money, Money) {
        let base = self.0 / parts as i64;
        let remainder = self.0 % parts as i64;
        (Money(base), Money(remainder))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Money {
    fn from(i: i64) -> Self {
        Money::from_minor(i)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_minor(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_unit_arithmetic() {
        let a = Money::from_minor(1_000);
        let b = Money::from_minor(250);

        assert_eq!(a + b, Money::from_minor(1_250));
        assert_eq!(a - b, Money::from_minor(750));

        let mut c = a;
        c -= b;
        assert_eq!(c, Money::from_minor(750));
        c += b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_predicates() {
        assert!(Money::ZERO.is_zero());
        assert!(Money::from_minor(1).is_positive());
        assert!(Money::from_minor(-1).is_negative());
        assert!(!Money::from_minor(-1).is_positive());
    }

    #[test]
    fn test_split_even() {
        let (base, remainder) = Money::from_minor(1_000).split_even(3);
        assert_eq!(base, Money::from_minor(333));
        assert_eq!(remainder, Money::from_minor(1));

        let (base, remainder) = Money::from_minor(900).split_even(3);
        assert_eq!(base, Money::from_minor(300));
        assert_eq!(remainder, Money::ZERO);
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_minor(100) < Money::from_minor(200));
        assert_eq!(
            Money::from_minor(100).max(Money::from_minor(200)),
            Money::from_minor(200)
        );
        assert_eq!(
            Money::from_minor(100).min(Money::from_minor(200)),
            Money::from_minor(100)
        );
    }
}
