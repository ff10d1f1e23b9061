// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket purchase pricing.
//!
//! The amount a buyer owes is derived entirely on the server from the
//! event or ticket-type price, the quantity, and the payment method's
//! processing fee. Client-supplied totals never participate.

use crate::error::CoreError;
use harborlight_domain::{
    DomainError, Event, FeeRate, PaymentMethod, TicketType, paid_amount,
};

/// Derives the amount owed for a ticket purchase, in cents.
///
/// The ticket type's price wins when one is chosen; otherwise the event's
/// base price applies. The payment method must be active and its fee rate
/// is applied on top of the subtotal.
///
/// # Arguments
///
/// * `event` - The event tickets are being purchased for
/// * `ticket_type` - The chosen admission tier, if any
/// * `payment_method` - The payment method settling the purchase
/// * `quantity` - Number of admissions
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` when the payment method is
/// inactive, the quantity is below one, or the arithmetic overflows.
pub fn price_ticket_purchase(
    event: &Event,
    ticket_type: Option<&TicketType>,
    payment_method: &PaymentMethod,
    quantity: i64,
) -> Result<i64, CoreError> {
    if !payment_method.is_active {
        return Err(CoreError::DomainViolation(
            DomainError::InactivePaymentMethod(payment_method.id.unwrap_or_default()),
        ));
    }

    let unit_price_cents: i64 =
        ticket_type.map_or(event.base_price_cents, |tier| tier.price_cents);
    let fee: FeeRate = FeeRate::from_basis_points(payment_method.fee_bps)?;

    Ok(paid_amount(unit_price_cents, quantity, fee)?)
}
