// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use harborlight_domain::DomainError;

/// Errors produced by core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An operation violated a domain rule.
    DomainViolation(DomainError),
    /// A record was modified between read and write.
    RevisionConflict {
        /// The resource kind.
        resource: &'static str,
        /// The id of the record.
        resource_id: i64,
        /// The revision the caller expected.
        expected: i64,
        /// The revision actually found.
        actual: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(e) => write!(f, "Domain rule violation: {e}"),
            Self::RevisionConflict {
                resource,
                resource_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{resource} {resource_id} was modified concurrently: expected revision {expected}, found {actual}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> Self {
        Self::DomainViolation(e)
    }
}
