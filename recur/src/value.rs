// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed values of recurrence rule parts and their wire encoding.
//!
//! Decoding is lenient: a token that does not fit the expected kind is kept
//! as an uppercase string so that validation can report it later.

pub(crate) mod datetime;
mod token;

use std::fmt::{self, Display};

pub use datetime::{EndDate, ValueDate, ValueDateTime, ValueTime};
pub use token::{Frequency, Weekday, WeekdayNum};

use crate::catalog::{PartSpec, ValueKind};
use crate::until::Until;

/// A single value within a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Integer, e.g. `COUNT=3`
    Integer(i64),
    /// Uppercase token, e.g. `FREQ=DAILY`, or any value that failed to decode
    Token(String),
    /// Date or date-time of `UNTIL`
    DateTime(Until),
}

impl Scalar {
    /// Returns the integer, if this is one
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the token, if this is one
    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Scalar::Token(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Token(s.to_uppercase())
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Token(s) => f.write_str(s),
            Scalar::DateTime(until) => until.fmt(f),
        }
    }
}

/// Value of a part: a single scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    /// Single value
    Scalar(Scalar),
    /// Comma-separated values, in input order
    List(Vec<Scalar>),
}

impl PartValue {
    /// Single uppercase token
    #[must_use]
    pub fn token(s: &str) -> Self {
        PartValue::Scalar(s.into())
    }

    /// List of uppercase tokens
    #[must_use]
    pub fn tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        PartValue::List(tokens.into_iter().map(Scalar::from).collect())
    }

    /// List of integers
    #[must_use]
    pub fn integers(integers: impl IntoIterator<Item = i64>) -> Self {
        PartValue::List(integers.into_iter().map(Scalar::Integer).collect())
    }

    /// An empty list or an empty token
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PartValue::Scalar(Scalar::Token(s)) => s.is_empty(),
            PartValue::Scalar(_) => false,
            PartValue::List(list) => list.is_empty(),
        }
    }

    /// Values as a slice, a scalar being a one-element slice
    #[must_use]
    pub fn elements(&self) -> &[Scalar] {
        match self {
            PartValue::Scalar(scalar) => std::slice::from_ref(scalar),
            PartValue::List(list) => list,
        }
    }

    /// Returns the scalar, if this is not a list
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PartValue::Scalar(scalar) => Some(scalar),
            PartValue::List(_) => None,
        }
    }
}

impl From<Scalar> for PartValue {
    fn from(scalar: Scalar) -> Self {
        PartValue::Scalar(scalar)
    }
}

impl From<i64> for PartValue {
    fn from(n: i64) -> Self {
        PartValue::Scalar(Scalar::Integer(n))
    }
}

impl Display for PartValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartValue::Scalar(scalar) => scalar.fmt(f),
            PartValue::List(list) => {
                for (i, scalar) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    scalar.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

/// Decode one raw token.
///
/// Integers are parsed when `kind` expects them, `UNTIL` values when `kind` is
/// a date-time; everything else, including tokens that fail to parse, is
/// uppercased.
#[must_use]
pub fn decode(raw: &str, kind: ValueKind, tzid: Option<&str>) -> Scalar {
    match kind {
        ValueKind::Integer => {
            if let Ok(n) = lexical::parse::<i64, _>(raw) {
                return Scalar::Integer(n);
            }
        }
        ValueKind::DateTime => {
            if let Some(until) = Until::parse(raw, tzid) {
                return Scalar::DateTime(until);
            }
        }
        ValueKind::Token => {}
    }
    Scalar::Token(raw.to_uppercase())
}

/// Split a raw value on `,` and decode each element.
#[must_use]
pub fn decode_list(raw: &str, kind: ValueKind, tzid: Option<&str>) -> Vec<Scalar> {
    raw.split(',').map(|s| decode(s, kind, tzid)).collect()
}

/// Decode the raw value of a part according to its catalog entry.
///
/// List parts always yield a list, empty for an empty value. Scalar parts
/// yield a list only when the value contains a comma.
#[must_use]
pub fn decode_value(raw: &str, spec: &PartSpec, tzid: Option<&str>) -> PartValue {
    let kind = spec.constraint.value_kind();
    if spec.multiple_valued {
        if raw.is_empty() {
            PartValue::List(Vec::new())
        } else {
            PartValue::List(decode_list(raw, kind, tzid))
        }
    } else if raw.contains(',') {
        PartValue::List(decode_list(raw, kind, tzid))
    } else {
        PartValue::Scalar(decode(raw, kind, tzid))
    }
}

/// Encode a value in its wire form.
#[must_use]
pub fn encode(value: &PartValue) -> String {
    value.to_string()
}
