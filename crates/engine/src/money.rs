use std::{fmt, ops::Neg};

/// Signed money amount represented as **integer minor units** (centavos).
///
/// Use this type for **all** monetary values in the engine (sale and expense
/// amounts, transfers, totals, settlement figures) so sums stay exact no
/// matter how many small records are accumulated.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(20_000_00);
/// assert_eq!(amount.minor(), 2_000_000);
/// assert_eq!(amount.to_string(), "20000.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Checked doubling (returns `None` on overflow).
    #[must_use]
    pub fn checked_double(self) -> Option<Money> {
        self.0.checked_mul(2).map(Money)
    }

    /// Half of the amount, truncated toward zero.
    ///
    /// Truncation is symmetric: `(-x).half() == -(x.half())`.
    #[must_use]
    pub const fn half(self) -> Money {
        Money(self.0 / 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let minor = abs % 100;
        write!(f, "{sign}{units}.{minor:02}")
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}
