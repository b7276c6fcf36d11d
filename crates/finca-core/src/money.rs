//! # Money Module
//!
//! Provides the `Money` type for presenting monetary values.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COMPUTE WITH DECIMAL, DISPLAY WITH MONEY                               │
//! │                                                                         │
//! │  In the browser client (binary floats):                                 │
//! │    10000 * 0.81 = 8100.000000000001  ❌ WRONG!                          │
//! │                                                                         │
//! │  Rules (purchase.rs, sale.rs, ration.rs):                               │
//! │    Decimal keeps every digit: 2337350.4 * 0.81 = 1893253.824            │
//! │                                                                         │
//! │  Display (this file):                                                   │
//! │    Money::from_decimal rounds ONCE to cents: 189325382 cents           │
//! │    Money::format renders "COP$1.893.253,82"                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use finca_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let total = Money::from_decimal(dec!(8100.005)).unwrap();
//! assert_eq!(total.cents(), 810000); // half-to-even
//!
//! let fee = Money::from_cents(1500);
//! assert_eq!((total + fee).cents(), 811500);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::rules::CurrencyFormat;

/// Minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections
/// - **Display only**: Rules compute in `Decimal`; Money is what gets shown
///   and persisted after rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a decimal amount to cents using Bankers Rounding.
    ///
    /// ## Bankers Rounding
    /// Half-cent values go to the nearest EVEN cent, so repeated display
    /// rounding does not drift in one direction.
    ///
    /// ## Example
    /// ```rust
    /// use finca_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_decimal(dec!(0.125)).unwrap().cents(), 12);
    /// assert_eq!(Money::from_decimal(dec!(0.135)).unwrap().cents(), 14);
    /// ```
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` when the value does not fit in i64 cents.
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| CoreError::AmountOverflow {
                amount: amount.to_string(),
            })
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Renders the amount for the client with grouping and the configured
    /// number of decimals.
    ///
    /// ## Example
    /// ```rust
    /// use finca_core::money::Money;
    /// use finca_core::rules::CurrencyFormat;
    ///
    /// let fmt = CurrencyFormat::default(); // COP$, "." groups, "," decimals
    /// assert_eq!(Money::from_cents(233735040).format(&fmt), "COP$2.337.350,40");
    /// ```
    ///
    /// Fewer than two decimals round the cents half-to-even again, which is
    /// how whole-peso sale figures are shown.
    pub fn format(&self, currency: &CurrencyFormat) -> String {
        let decimals = u32::from(currency.decimals.min(2));
        let divisor = 10_i64.pow(2 - decimals);
        let scaled = div_round_half_even(self.0.unsigned_abs(), divisor.unsigned_abs());

        let unit = 10_u64.pow(decimals);
        let whole = group_digits(scaled / unit, currency.group_separator);

        let sign = if self.is_negative() { "-" } else { "" };
        if decimals == 0 {
            format!("{}{}{}", sign, currency.symbol, whole)
        } else {
            format!(
                "{}{}{}{}{:0width$}",
                sign,
                currency.symbol,
                whole,
                currency.decimal_separator,
                scaled % unit,
                width = decimals as usize
            )
        }
    }
}

/// Integer division rounding half to even.
fn div_round_half_even(n: u64, d: u64) -> u64 {
    let q = n / d;
    let r = n % d;
    if r * 2 > d || (r * 2 == d && q % 2 == 1) {
        q + 1
    } else {
        q
    }
}

/// Inserts `sep` every three digits from the right.
fn group_digits(value: u64, sep: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Checked Decimal Helpers
// =============================================================================

/// Multiplies all factors, failing instead of panicking on overflow.
pub(crate) fn checked_product(factors: &[Decimal]) -> CoreResult<Decimal> {
    factors.iter().try_fold(Decimal::ONE, |acc, f| {
        acc.checked_mul(*f).ok_or_else(|| CoreError::AmountOverflow {
            amount: format!("{} * {}", acc, f),
        })
    })
}

/// Sums all values, failing instead of panicking on overflow.
pub(crate) fn checked_sum<'a, I>(values: I) -> CoreResult<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v).ok_or_else(|| CoreError::AmountOverflow {
            amount: format!("{} + {}", acc, v),
        })
    })
}

/// `a - b`, failing instead of panicking on overflow.
pub(crate) fn checked_difference(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| CoreError::AmountOverflow {
        amount: format!("{} - {}", a, b),
    })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering. Use [`Money::format`] for the client.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
