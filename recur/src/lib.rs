// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, validate, repair and serialize iCalendar recurrence rules (`RRULE`).
//!
//! ```
//! use aimcal_recur::{Recur, ValidateOptions};
//!
//! let mut rrule = Recur::parse("FREQ=YEARLY;COUNT=6;BYMONTHDAY=24;BYMONTH=0,1,2,3,4,14", None);
//! let result = rrule.validate(&ValidateOptions::repair());
//! assert_eq!(result.issues.len(), 2);
//! assert_eq!(rrule.value(), "FREQ=YEARLY;COUNT=6;BYMONTHDAY=24;BYMONTH=1,2,3,4,12");
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::single_match_else, clippy::match_bool)]

pub mod catalog;
mod error;
pub mod input;
pub mod json;
pub mod keyword;
mod options;
pub mod part;
mod property;
pub mod rule;
pub mod until;
pub mod validate;
pub mod value;

pub use crate::catalog::{Bounds, Constraint, PartSpec, ValueKind};
pub use crate::error::RecurError;
pub use crate::input::{PartInput, RecurInput, ScalarInput};
pub use crate::json::{to_json, to_json_with};
pub use crate::options::ValidateOptions;
pub use crate::part::PartName;
pub use crate::property::{PropertyValidation, Recur};
pub use crate::rule::Rule;
pub use crate::until::{OffsetResolver, TzdbResolver, Until, UntilZone, UtcFallback};
pub use crate::validate::{Outcome, Severity, Validation, ValidationIssue, validate};
pub use crate::value::{Frequency, PartValue, Scalar, Weekday, WeekdayNum};
