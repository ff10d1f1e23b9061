// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment method mutation operations.
//!
//! At most one method is the default at any time; `set_default` clears the
//! flag on every other row in the same transaction.

use crate::data_models::NewPaymentMethod;
use crate::diesel_schema::payment_methods;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;

/// Insert a payment method. Returns the new method id.
///
/// When the record is flagged as default, the flag is cleared on all other
/// methods in the same transaction.
///
/// # Errors
///
/// Returns an error if the database writes fail.
pub fn create_payment_method(
    conn: &mut SqliteConnection,
    method: &NewPaymentMethod,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(payment_methods::table)
            .values(method)
            .execute(conn)?;
        let payment_method_id: i64 = get_last_insert_rowid(conn)?;

        if method.is_default != 0 {
            diesel::update(
                payment_methods::table
                    .filter(payment_methods::payment_method_id.ne(payment_method_id)),
            )
            .set(payment_methods::is_default.eq(0))
            .execute(conn)?;
        }
        Ok(payment_method_id)
    })
}

/// Update a payment method's editable fields.
///
/// # Errors
///
/// Returns `NotFound` if no method has the given id, or a database error
/// if the update fails.
pub fn update_payment_method(
    conn: &mut SqliteConnection,
    payment_method_id: i64,
    label: &str,
    instructions: &str,
    fee_bps: i64,
    is_active: bool,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        payment_methods::table.filter(payment_methods::payment_method_id.eq(payment_method_id)),
    )
    .set((
        payment_methods::label.eq(label),
        payment_methods::instructions.eq(instructions),
        payment_methods::fee_bps.eq(fee_bps),
        payment_methods::is_active.eq(i32::from(is_active)),
        payment_methods::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Flips a payment method's active flag. Returns the new state.
///
/// # Errors
///
/// Returns `NotFound` if no method has the given id, or a database error
/// if the writes fail.
pub fn toggle_payment_method_active(
    conn: &mut SqliteConnection,
    payment_method_id: i64,
    updated_at: &str,
) -> Result<bool, PersistenceError> {
    conn.transaction(|conn| {
        let current: Option<i32> = payment_methods::table
            .filter(payment_methods::payment_method_id.eq(payment_method_id))
            .select(payment_methods::is_active)
            .first(conn)
            .optional()?;

        let Some(current) = current else {
            return Err(PersistenceError::NotFound);
        };
        let next: i32 = i32::from(current == 0);

        diesel::update(
            payment_methods::table
                .filter(payment_methods::payment_method_id.eq(payment_method_id)),
        )
        .set((
            payment_methods::is_active.eq(next),
            payment_methods::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
        Ok(next != 0)
    })
}

/// Deletes a payment method.
///
/// Fails with a foreign-key error when donations or tickets still
/// reference the method; callers surface that as a rule violation.
///
/// # Errors
///
/// Returns `NotFound` if no method has the given id, or a database error
/// if the delete fails.
pub fn delete_payment_method(
    conn: &mut SqliteConnection,
    payment_method_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        payment_methods::table.filter(payment_methods::payment_method_id.eq(payment_method_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Make one payment method the default, clearing the flag everywhere else.
///
/// # Errors
///
/// Returns `NotFound` if no method has the given id, or a database error
/// if the writes fail.
pub fn set_default_payment_method(
    conn: &mut SqliteConnection,
    payment_method_id: i64,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let updated: usize = diesel::update(
            payment_methods::table
                .filter(payment_methods::payment_method_id.eq(payment_method_id)),
        )
        .set((
            payment_methods::is_default.eq(1),
            payment_methods::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::NotFound);
        }

        diesel::update(
            payment_methods::table
                .filter(payment_methods::payment_method_id.ne(payment_method_id)),
        )
        .set(payment_methods::is_default.eq(0))
        .execute(conn)?;
        Ok(())
    })
}
