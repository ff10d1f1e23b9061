// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revision-checked status updates.
//!
//! Each table with a mutable status gets one function, generated by
//! `status_update_fn!`. The update, its audit record, and any outbox
//! notification commit in a single transaction. A missing row fails with
//! `NotFound` and a stale revision fails with `RevisionConflict`; neither
//! leaves an audit entry behind.

use crate::data_models::NewNotification;
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use diesel::prelude::*;
use harborlight::{Status, Transition};
use harborlight_domain::{DeliveryStatus, DonationStatus, TicketStatus, VolunteerStatus};

macro_rules! status_update_fn {
    ($(#[$docs:meta])* $fn_name:ident, $table:ident, $id_column:ident, $status:ty) => {
        $(#[$docs])*
        ///
        /// # Errors
        ///
        /// Returns `NotFound` if no row has the transition's id,
        /// `RevisionConflict` if the stored revision no longer matches, or
        /// a database error if the write fails.
        pub fn $fn_name(
            conn: &mut SqliteConnection,
            transition: &Transition<$status>,
            updated_at: &str,
            notifications: &[NewNotification],
        ) -> Result<(), PersistenceError> {
            use crate::diesel_schema::$table;

            conn.transaction(|conn| {
                let updated: usize = diesel::update(
                    $table::table
                        .filter($table::$id_column.eq(transition.resource_id))
                        .filter($table::revision.eq(transition.expected_revision)),
                )
                .set((
                    $table::status.eq(transition.new.as_str()),
                    $table::updated_at.eq(updated_at),
                    $table::revision.eq(transition.expected_revision + 1),
                ))
                .execute(conn)?;

                if updated == 0 {
                    let actual: Option<i64> = $table::table
                        .filter($table::$id_column.eq(transition.resource_id))
                        .select($table::revision)
                        .first(conn)
                        .optional()?;

                    return match actual {
                        Some(actual) => Err(PersistenceError::RevisionConflict {
                            resource: <$status as Status>::RESOURCE,
                            resource_id: transition.resource_id,
                            expected: transition.expected_revision,
                            actual,
                        }),
                        None => Err(PersistenceError::NotFound),
                    };
                }

                audit::insert_audit_record(conn, &transition.audit, updated_at)?;
                for notification in notifications {
                    outbox::enqueue(conn, notification)?;
                }
                Ok(())
            })
        }
    };
}

status_update_fn!(
    /// Apply a status transition to a donation.
    update_donation_status,
    donations,
    donation_id,
    DonationStatus
);

status_update_fn!(
    /// Apply a status transition to a volunteer.
    update_volunteer_status,
    volunteers,
    volunteer_id,
    VolunteerStatus
);

status_update_fn!(
    /// Apply a status transition to a delivery request.
    update_delivery_request_status,
    delivery_requests,
    delivery_request_id,
    DeliveryStatus
);

status_update_fn!(
    /// Apply a status transition to a ticket.
    update_ticket_status,
    tickets,
    ticket_id,
    TicketStatus
);
