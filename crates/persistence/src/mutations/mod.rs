// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Every mutation that changes domain state appends its audit record in
//! the same transaction, and enqueues outbox notifications there too, so
//! a crash can never separate a change from its trail.

pub mod applications;
pub mod audit;
pub mod deliveries;
pub mod donations;
pub mod operators;
pub mod outbox;
pub mod payment_methods;
pub mod status;
pub mod tickets;
pub mod volunteers;
