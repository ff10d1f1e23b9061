// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment method queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::PaymentMethodRow;
use crate::diesel_schema::payment_methods;
use crate::error::PersistenceError;
use harborlight_domain::PaymentMethod;

/// Retrieves a payment method by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the method is not found.
pub fn get_payment_method(
    conn: &mut SqliteConnection,
    payment_method_id: i64,
) -> Result<Option<PaymentMethod>, PersistenceError> {
    let row: Option<PaymentMethodRow> = payment_methods::table
        .filter(payment_methods::payment_method_id.eq(payment_method_id))
        .first(conn)
        .optional()?;

    row.map(PaymentMethod::try_from).transpose()
}

/// Retrieves the default payment method, if one is set.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
pub fn get_default_payment_method(
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentMethod>, PersistenceError> {
    let row: Option<PaymentMethodRow> = payment_methods::table
        .filter(payment_methods::is_default.eq(1))
        .first(conn)
        .optional()?;

    row.map(PaymentMethod::try_from).transpose()
}

/// Lists payment methods, optionally filtered by method type. When
/// `active_only` is set, disabled methods are excluded; the public
/// surface always sets it.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_payment_methods(
    conn: &mut SqliteConnection,
    method_type: Option<&str>,
    active_only: bool,
) -> Result<Vec<PaymentMethod>, PersistenceError> {
    let mut query = payment_methods::table.into_boxed();
    if let Some(method_type) = method_type {
        query = query.filter(payment_methods::method_type.eq(method_type.to_string()));
    }
    if active_only {
        query = query.filter(payment_methods::is_active.eq(1));
    }

    let rows: Vec<PaymentMethodRow> = query
        .order(payment_methods::payment_method_id.asc())
        .load(conn)?;

    rows.into_iter().map(PaymentMethod::try_from).collect()
}
