// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The monthly assistance submission window.
//!
//! Applications are accepted only during the first seven calendar days of
//! each month, evaluated in an explicitly configured timezone. The server's
//! local clock never participates in the decision.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// First day of month on which applications are accepted.
pub const WINDOW_OPENS_ON: u32 = 1;

/// Last day of month on which applications are accepted.
pub const WINDOW_CLOSES_AFTER: u32 = 7;

/// Calendar gate for assistance application intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionWindow {
    tz: Tz,
}

impl SubmissionWindow {
    /// Creates a window evaluated in the given timezone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a window from an IANA timezone name such as
    /// `America/New_York`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not a known
    /// IANA zone.
    pub fn from_tz_name(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    /// Returns the timezone the window is evaluated in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Checks whether the window is open at the given instant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WindowClosed` with the observed zoned day of
    /// month when the instant falls outside days 1 through 7.
    pub fn check(&self, now_utc: DateTime<Utc>) -> Result<(), DomainError> {
        let day: u32 = now_utc.with_timezone(&self.tz).day();
        if (WINDOW_OPENS_ON..=WINDOW_CLOSES_AFTER).contains(&day) {
            Ok(())
        } else {
            Err(DomainError::WindowClosed {
                day,
                opens_on: WINDOW_OPENS_ON,
                closes_after: WINDOW_CLOSES_AFTER,
            })
        }
    }

    /// Returns the `YYYY-MM` tag of the month the instant falls in,
    /// evaluated in the window's timezone.
    #[must_use]
    pub fn submission_month(&self, now_utc: DateTime<Utc>) -> String {
        let zoned = now_utc.with_timezone(&self.tz);
        format!("{:04}-{:02}", zoned.year(), zoned.month())
    }
}

impl Default for SubmissionWindow {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(y, mo, d, h, 0, 0) {
            chrono::LocalResult::Single(dt) => dt,
            _ => panic!("invalid test timestamp"),
        }
    }

    #[test]
    fn test_window_open_on_first_and_seventh() {
        let window = SubmissionWindow::default();
        assert!(window.check(utc(2026, 3, 1, 0)).is_ok());
        assert!(window.check(utc(2026, 3, 7, 23)).is_ok());
    }

    #[test]
    fn test_window_closed_on_day_eight() {
        let window = SubmissionWindow::default();
        match window.check(utc(2026, 3, 8, 0)) {
            Err(DomainError::WindowClosed { day, .. }) => assert_eq!(day, 8),
            other => panic!("expected WindowClosed, got {other:?}"),
        }
    }

    #[test]
    fn test_window_closed_at_month_end() {
        let window = SubmissionWindow::default();
        assert!(window.check(utc(2026, 3, 31, 12)).is_err());
    }

    #[test]
    fn test_timezone_shifts_the_boundary() {
        // 2026-03-08 03:00 UTC is still March 7 in Chicago.
        let window = SubmissionWindow::new(chrono_tz::America::Chicago);
        assert!(window.check(utc(2026, 3, 8, 3)).is_ok());
        // But 2026-02-28 20:00 in Auckland is already March 1.
        let auckland = SubmissionWindow::new(chrono_tz::Pacific::Auckland);
        assert!(auckland.check(utc(2026, 2, 28, 20)).is_ok());
    }

    #[test]
    fn test_submission_month_is_zoned() {
        let window = SubmissionWindow::new(chrono_tz::Pacific::Auckland);
        assert_eq!(window.submission_month(utc(2026, 2, 28, 20)), "2026-03");

        let utc_window = SubmissionWindow::default();
        assert_eq!(utc_window.submission_month(utc(2026, 2, 28, 20)), "2026-02");
    }

    #[test]
    fn test_from_tz_name() {
        assert!(SubmissionWindow::from_tz_name("America/New_York").is_ok());
        match SubmissionWindow::from_tz_name("Mars/Olympus_Mons") {
            Err(DomainError::InvalidTimezone(name)) => {
                assert_eq!(name, "Mars/Olympus_Mons");
            }
            other => panic!("expected InvalidTimezone, got {other:?}"),
        }
    }
}
