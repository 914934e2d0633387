// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Static constraint table for recurrence rule parts, RFC 5545 Section 3.3.10.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::part::PartName;

/// How a raw token of a part is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Base-10 integer, falling back to a token when it does not parse
    Integer,
    /// Uppercase token string
    Token,
    /// `UNTIL` date or date-time, falling back to a token when it does not parse
    DateTime,
}

/// Inclusive range for a bounded-integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// `[min, max]`
    Range {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },

    /// `[-max, -1] ∪ [1, max]`
    Signed {
        /// Largest magnitude
        max: i64,
    },
}

impl Bounds {
    /// Lowest accepted value
    #[must_use]
    pub const fn min(self) -> i64 {
        match self {
            Bounds::Range { min, .. } => min,
            Bounds::Signed { max } => -max,
        }
    }

    /// Highest accepted value
    #[must_use]
    pub const fn max(self) -> i64 {
        match self {
            Bounds::Range { max, .. } | Bounds::Signed { max } => max,
        }
    }

    /// Whether `n` is an accepted value
    #[must_use]
    pub const fn contains(self, n: i64) -> bool {
        match self {
            Bounds::Range { min, max } => min <= n && n <= max,
            Bounds::Signed { max } => n != 0 && -max <= n && n <= max,
        }
    }

    /// Move `n` to the nearest accepted value. Zero in a signed range becomes 1.
    #[must_use]
    pub const fn clamp(self, n: i64) -> i64 {
        match self {
            Bounds::Signed { .. } if n == 0 => 1,
            _ if n < self.min() => self.min(),
            _ if n > self.max() => self.max(),
            _ => n,
        }
    }
}

/// Constraint on the values of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// No constraint, used for vendor extensions
    FreeForm,
    /// Any integer
    Integer,
    /// Integers within [`Bounds`]
    Bounded(Bounds),
    /// One of the [`crate::Frequency`] tokens
    Frequency,
    /// One [`crate::Weekday`] token
    Weekday,
    /// [`crate::WeekdayNum`] tokens
    WeekdayList,
    /// A date or date-time
    DateTime,
}

impl Constraint {
    /// How raw tokens for this constraint are decoded
    #[must_use]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Constraint::Integer | Constraint::Bounded(_) => ValueKind::Integer,
            Constraint::DateTime => ValueKind::DateTime,
            Constraint::FreeForm
            | Constraint::Frequency
            | Constraint::Weekday
            | Constraint::WeekdayList => ValueKind::Token,
        }
    }
}

/// Catalog entry of a part.
#[derive(Debug, Clone, Copy)]
pub struct PartSpec {
    /// Canonical name, empty for the extension entry
    pub name: &'static str,
    /// Constraint on the values
    pub constraint: Constraint,
    /// Whether the part holds a comma-separated list
    pub multiple_valued: bool,
}

/// Catalog of the parts defined by RFC 5545.
pub static PART_SPECS: &[PartSpec] = &[
    PartSpec {
        name: KW_RRULE_FREQ,
        constraint: Constraint::Frequency,
        multiple_valued: false,
    },
    PartSpec {
        name: KW_RRULE_UNTIL,
        constraint: Constraint::DateTime,
        multiple_valued: false,
    },
    PartSpec {
        name: KW_RRULE_COUNT,
        constraint: Constraint::Integer,
        multiple_valued: false,
    },
    PartSpec {
        name: KW_RRULE_INTERVAL,
        constraint: Constraint::Integer,
        multiple_valued: false,
    },
    PartSpec {
        name: KW_RRULE_BYSECOND,
        constraint: Constraint::Bounded(Bounds::Range { min: 0, max: 60 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYMINUTE,
        constraint: Constraint::Bounded(Bounds::Range { min: 0, max: 59 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYHOUR,
        constraint: Constraint::Bounded(Bounds::Range { min: 0, max: 23 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYDAY,
        constraint: Constraint::WeekdayList,
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYMONTHDAY,
        constraint: Constraint::Bounded(Bounds::Signed { max: 31 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYYEARDAY,
        constraint: Constraint::Bounded(Bounds::Signed { max: 366 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYWEEKNO,
        constraint: Constraint::Bounded(Bounds::Signed { max: 53 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYMONTH,
        constraint: Constraint::Bounded(Bounds::Range { min: 1, max: 12 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_BYSETPOS,
        constraint: Constraint::Bounded(Bounds::Signed { max: 366 }),
        multiple_valued: true,
    },
    PartSpec {
        name: KW_RRULE_WKST,
        constraint: Constraint::Weekday,
        multiple_valued: false,
    },
];

static EXTENSION_SPEC: PartSpec = PartSpec {
    name: "",
    constraint: Constraint::FreeForm,
    multiple_valued: true,
};

static PART_TABLE: LazyLock<HashMap<&'static str, &'static PartSpec>> =
    LazyLock::new(|| PART_SPECS.iter().map(|spec| (spec.name, spec)).collect());

/// Look up the catalog entry of a part. Extensions map to a free-form list.
#[must_use]
pub fn part_spec(part: &PartName) -> &'static PartSpec {
    PART_TABLE
        .get(part.name())
        .copied()
        .unwrap_or(&EXTENSION_SPEC)
}
