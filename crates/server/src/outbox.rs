// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification outbox drain task.
//!
//! Mutations enqueue outbox rows inside their own transactions; this
//! task is the only thing that talks to the mail transport. It runs on
//! an interval, picks up PENDING rows oldest first, and marks each SENT
//! or records the failed attempt. Delivery is at-least-once: a crash
//! between send and mark leaves the row PENDING and it is retried.

use chrono::{SecondsFormat, Utc};
use harborlight_notify::{Notifier, OutboundMessage};
use harborlight_persistence::{NotificationData, PersistenceError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// How often the outbox is drained.
const DRAIN_INTERVAL_SECS: u64 = 30;

/// How many rows one drain pass picks up.
const DRAIN_BATCH_SIZE: i64 = 20;

/// How often expired sessions are swept out.
const SESSION_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Spawns the periodic outbox drain task.
pub fn spawn_outbox_drain(state: AppState, notifier: Arc<dyn Notifier>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(DRAIN_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            if let Err(e) = drain_once(&state, notifier.as_ref()).await {
                error!(error = %e, "Outbox drain pass failed");
            }
        }
    });
}

/// Spawns the periodic expired-session sweep.
pub fn spawn_session_sweep(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            let now: String = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
            let mut db = state.persistence.lock().await;
            match db.delete_expired_sessions(&now) {
                Ok(0) => {}
                Ok(removed) => info!(removed, "Swept expired sessions"),
                Err(e) => error!(error = %e, "Session sweep failed"),
            }
        }
    });
}

/// Drains one batch of pending notifications.
///
/// Send failures are recorded against the row and never abort the pass;
/// the remaining rows in the batch are still attempted.
pub async fn drain_once(
    state: &AppState,
    notifier: &dyn Notifier,
) -> Result<usize, PersistenceError> {
    let batch: Vec<NotificationData> = {
        let mut db = state.persistence.lock().await;
        db.claim_pending_notifications(DRAIN_BATCH_SIZE)?
    };
    if batch.is_empty() {
        return Ok(0);
    }
    debug!(count = batch.len(), "Draining notification outbox");

    let mut sent: usize = 0;
    for notification in batch {
        let message: OutboundMessage = OutboundMessage {
            recipient: notification.recipient.clone(),
            subject: notification.subject.clone(),
            body: notification.body.clone(),
        };
        match notifier.send(&message).await {
            Ok(()) => {
                let now: String = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
                let mut db = state.persistence.lock().await;
                db.mark_notification_sent(notification.notification_id, &now)?;
                sent += 1;
            }
            Err(e) => {
                warn!(
                    notification_id = notification.notification_id,
                    recipient = %notification.recipient,
                    error = %e,
                    "Notification send failed"
                );
                let mut db = state.persistence.lock().await;
                db.mark_notification_failed(notification.notification_id, &e.to_string())?;
            }
        }
    }
    Ok(sent)
}
