// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod application_tests;
mod auth_tests;

use crate::auth::{AuthenticatedActor, Role};
use crate::notifications::NotificationSettings;
use chrono::{DateTime, Utc};
use harborlight_domain::SubmissionWindow;
use harborlight_persistence::{NewPaymentMethod, Persistence};

const NOW: &str = "2026-01-15T12:00:00Z";

fn open_db() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(db) => db,
        Err(e) => panic!("Failed to open in-memory database: {e}"),
    }
}

fn fixed_time(raw: &str) -> DateTime<Utc> {
    match raw.parse() {
        Ok(time) => time,
        Err(e) => panic!("Failed to parse test time {raw}: {e}"),
    }
}

/// Mid-month: outside the day-1-to-7 submission window.
fn mid_month() -> DateTime<Utc> {
    fixed_time(NOW)
}

/// Day 5: inside the submission window.
fn window_open() -> DateTime<Utc> {
    fixed_time("2026-01-05T12:00:00Z")
}

fn utc_window() -> SubmissionWindow {
    match SubmissionWindow::from_tz_name("UTC") {
        Ok(window) => window,
        Err(e) => panic!("Failed to build UTC window: {e}"),
    }
}

fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new("root".to_string(), Role::Admin)
}

fn no_notifications() -> NotificationSettings {
    NotificationSettings::disabled()
}

fn ops_settings() -> NotificationSettings {
    NotificationSettings::from_env_values("ops@example.org", "https://admin.example.org")
}

fn seed_method(db: &mut Persistence, fee_bps: i64, is_active: bool, is_default: bool) -> i64 {
    let method: NewPaymentMethod = NewPaymentMethod {
        method_type: "BANK_ACCOUNT".to_string(),
        label: "Main account".to_string(),
        instructions: "Wire to IBAN XX00".to_string(),
        fee_bps,
        is_active: i32::from(is_active),
        is_default: i32::from(is_default),
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
    };
    match db.create_payment_method(&method) {
        Ok(id) => id,
        Err(e) => panic!("Failed to seed payment method: {e}"),
    }
}
