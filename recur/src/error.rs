// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised by the recurrence rule engine.
///
/// Non-conformant rule data is never an error: it is reported through
/// [`crate::ValidationIssue`] instead.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurError {
    /// The input shape is neither text nor a part mapping
    #[error("Invalid argument: expected {expected}, got {found}")]
    InvalidArgument {
        /// The accepted input shapes
        expected: &'static str,
        /// The shape that was supplied
        found: &'static str,
    },

    /// The time zone identifier could not be resolved
    #[error("Unknown time zone '{tzid}'")]
    UnknownTimeZone {
        /// The unresolved identifier
        tzid: String,
    },

    /// The date-time cannot be placed on the timeline
    #[error("Invalid date-time '{value}'")]
    InvalidDateTime {
        /// The offending date-time in its text form
        value: String,
    },
}
