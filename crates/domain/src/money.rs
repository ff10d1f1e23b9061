// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Integer money arithmetic.
//!
//! Amounts are carried as whole cents and fee rates as basis points
//! (hundredths of a percent), so no floating point ever touches a
//! monetary value. The paid amount for a ticket purchase is always
//! derived on the server; client-supplied totals are ignored.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum grant for an approved assistance application, in cents.
pub const GRANT_MIN_CENTS: i64 = 50_000;

/// Maximum grant for an approved assistance application, in cents.
pub const GRANT_MAX_CENTS: i64 = 100_000;

/// A processing fee rate in basis points.
///
/// One basis point is one hundredth of a percent, so a 5% fee is
/// `FeeRate::from_basis_points(500)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRate {
    basis_points: i64,
}

impl FeeRate {
    /// Creates a fee rate from basis points.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFeeRate` if the rate is negative.
    pub const fn from_basis_points(basis_points: i64) -> Result<Self, DomainError> {
        if basis_points < 0 {
            return Err(DomainError::InvalidFeeRate { basis_points });
        }
        Ok(Self { basis_points })
    }

    /// Creates a fee rate from a whole-or-fractional percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFeeRate` if the percentage is negative
    /// or not finite.
    pub fn from_percent(percent: f64) -> Result<Self, DomainError> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(DomainError::InvalidFeeRate { basis_points: -1 });
        }
        #[allow(clippy::cast_possible_truncation)]
        let basis_points: i64 = (percent * 100.0).round() as i64;
        Self::from_basis_points(basis_points)
    }

    /// Returns the rate in basis points.
    #[must_use]
    pub const fn basis_points(&self) -> i64 {
        self.basis_points
    }

    /// Returns the rate as a percentage for display.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        self.basis_points as f64 / 100.0
    }
}

/// Computes the amount owed for a ticket purchase.
///
/// The result is `unit_price * quantity` plus the processing fee, with the
/// fee computed in integer basis-point arithmetic and rounded half up. The
/// result is never less than the subtotal.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` when `quantity < 1`,
/// `DomainError::InvalidAmount` when the unit price is negative, and
/// `DomainError::AmountOverflow` when the arithmetic cannot be represented.
pub fn paid_amount(
    unit_price_cents: i64,
    quantity: i64,
    fee: FeeRate,
) -> Result<i64, DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidQuantity(quantity));
    }
    if unit_price_cents < 0 {
        return Err(DomainError::InvalidAmount {
            field: "unit_price",
            cents: unit_price_cents,
        });
    }

    let subtotal: i64 =
        unit_price_cents
            .checked_mul(quantity)
            .ok_or(DomainError::AmountOverflow {
                operation: "multiplying unit price by quantity",
            })?;

    // Round half up: (subtotal * bps + 5000) / 10000.
    let scaled: i64 = subtotal
        .checked_mul(fee.basis_points())
        .ok_or(DomainError::AmountOverflow {
            operation: "applying the processing fee",
        })?;
    let fee_cents: i64 = scaled
        .checked_add(5_000)
        .ok_or(DomainError::AmountOverflow {
            operation: "rounding the processing fee",
        })?
        / 10_000;

    subtotal
        .checked_add(fee_cents)
        .ok_or(DomainError::AmountOverflow {
            operation: "adding the processing fee to the subtotal",
        })
}

/// Validates a grant amount against the permitted band.
///
/// # Errors
///
/// Returns `DomainError::GrantAmountOutOfRange` when the amount falls
/// outside 500.00 through 1000.00.
pub const fn validate_grant_amount(cents: i64) -> Result<(), DomainError> {
    if cents < GRANT_MIN_CENTS || cents > GRANT_MAX_CENTS {
        return Err(DomainError::GrantAmountOutOfRange { cents });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(basis_points: i64) -> FeeRate {
        match FeeRate::from_basis_points(basis_points) {
            Ok(rate) => rate,
            Err(e) => panic!("fee rate construction failed: {e}"),
        }
    }

    #[test]
    fn test_paid_amount_with_five_percent_fee() {
        // 50.00 x 2 at 5% comes to 105.00.
        assert_eq!(paid_amount(5_000, 2, rate(500)), Ok(10_500));
    }

    #[test]
    fn test_paid_amount_zero_fee_passes_subtotal_through() {
        assert_eq!(paid_amount(5_000, 3, rate(0)), Ok(15_000));
    }

    #[test]
    fn test_paid_amount_never_below_subtotal() {
        for quantity in 1..=9 {
            for basis_points in [0, 1, 250, 500, 999] {
                let result = paid_amount(3_333, quantity, rate(basis_points));
                match result {
                    Ok(total) => assert!(total >= 3_333 * quantity),
                    Err(e) => panic!("paid_amount failed: {e}"),
                }
            }
        }
    }

    #[test]
    fn test_paid_amount_rounds_half_up() {
        // 1 cent at 5% is 0.05 cents of fee, which rounds to 0.
        assert_eq!(paid_amount(1, 1, rate(500)), Ok(1));
        // 10 cents at 5% is 0.5 cents of fee, which rounds to 1.
        assert_eq!(paid_amount(10, 1, rate(500)), Ok(11));
    }

    #[test]
    fn test_paid_amount_rejects_zero_quantity() {
        assert_eq!(
            paid_amount(5_000, 0, rate(500)),
            Err(DomainError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_paid_amount_rejects_negative_price() {
        assert!(paid_amount(-1, 1, rate(500)).is_err());
    }

    #[test]
    fn test_paid_amount_overflow() {
        assert_eq!(
            paid_amount(i64::MAX, 2, rate(500)),
            Err(DomainError::AmountOverflow {
                operation: "multiplying unit price by quantity",
            })
        );
    }

    #[test]
    fn test_fee_rate_from_percent() {
        match FeeRate::from_percent(5.0) {
            Ok(rate) => assert_eq!(rate.basis_points(), 500),
            Err(e) => panic!("fee rate construction failed: {e}"),
        }
        match FeeRate::from_percent(2.5) {
            Ok(rate) => assert_eq!(rate.basis_points(), 250),
            Err(e) => panic!("fee rate construction failed: {e}"),
        }
        assert!(FeeRate::from_percent(-0.5).is_err());
        assert!(FeeRate::from_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_grant_amount_band() {
        assert!(validate_grant_amount(50_000).is_ok());
        assert!(validate_grant_amount(75_000).is_ok());
        assert!(validate_grant_amount(100_000).is_ok());
        assert!(validate_grant_amount(49_999).is_err());
        assert!(validate_grant_amount(100_001).is_err());
    }
}
