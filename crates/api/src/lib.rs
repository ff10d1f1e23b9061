// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Harborlight charity backend.
//!
//! Everything here is transport-agnostic: handlers are plain functions
//! over `&mut Persistence`, the request DTOs, and an explicit clock
//! value, and they return `ApiError` values the HTTP layer maps onto
//! status codes. Session authentication lives here too, so the HTTP
//! layer only shuttles bearer tokens.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod notifications;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, FieldErrorInfo};
pub use notifications::NotificationSettings;
