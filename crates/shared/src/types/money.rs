//! Money amounts and their minor-unit representation.
//!
//! CRITICAL: Never use floating-point for money.
//! Amounts are `rust_decimal::Decimal` in the domain and are persisted as an
//! integer count of hundredths (satang for THB) so every backend stores them
//! exactly.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Number of decimal places carried by a stored amount.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Why an amount cannot be represented in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAmount {
    /// More decimal places than the currency has.
    #[error("amount has {scale} decimal places, at most 2 are allowed")]
    TooPrecise {
        /// Scale of the normalized input.
        scale: u32,
    },

    /// The amount does not fit in a 64-bit minor-unit count.
    #[error("amount is out of range")]
    OutOfRange,
}

/// Converts a decimal amount into minor units.
///
/// Trailing zeros do not count towards precision, so `1500.500` is accepted as
/// `150050` while `10.005` is rejected.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use villa_shared::types::to_minor_units;
///
/// assert_eq!(to_minor_units(Decimal::new(150_000, 2)), Ok(150_000));
/// assert!(to_minor_units(Decimal::new(10_005, 3)).is_err());
/// ```
pub fn to_minor_units(amount: Decimal) -> Result<i64, InvalidAmount> {
    let normalized = amount.normalize();
    if normalized.scale() > MINOR_UNIT_SCALE {
        return Err(InvalidAmount::TooPrecise {
            scale: normalized.scale(),
        });
    }

    normalized
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(InvalidAmount::OutOfRange)
}

/// Converts a stored minor-unit count back into a decimal amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}
