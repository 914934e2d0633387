// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structured inputs accepted by the rule setters.

use serde_json::Value;

use crate::catalog::{ValueKind, part_spec};
use crate::error::RecurError;
use crate::part::PartName;
use crate::value::{PartValue, Scalar, decode, decode_value};

const EXPECTED_RECUR: &str = "a recurrence rule string or a mapping of rule parts";
const EXPECTED_PART: &str = "a string, an integer or an array of those";

/// Input of the unifying setter: rule text or a mapping of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurInput {
    /// Wire form, replaces the whole rule
    Text(String),
    /// Parts to set, in order, leaving other parts alone
    Parts(Vec<(String, PartInput)>),
}

impl From<&str> for RecurInput {
    fn from(text: &str) -> Self {
        RecurInput::Text(text.to_owned())
    }
}

impl From<String> for RecurInput {
    fn from(text: String) -> Self {
        RecurInput::Text(text)
    }
}

impl<K: Into<String>> FromIterator<(K, PartInput)> for RecurInput {
    fn from_iter<T: IntoIterator<Item = (K, PartInput)>>(iter: T) -> Self {
        RecurInput::Parts(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl TryFrom<Value> for RecurInput {
    type Error = RecurError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(RecurInput::Text(text)),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, PartInput::try_from(value)?)))
                .collect::<Result<Vec<_>, RecurError>>()
                .map(RecurInput::Parts),
            other => Err(RecurError::InvalidArgument {
                expected: EXPECTED_RECUR,
                found: json_kind(&other),
            }),
        }
    }
}

/// Single element of a structured part value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarInput {
    /// Text, decoded like the wire form
    Text(String),
    /// Native integer, kept as an integer
    Integer(i64),
}

/// Structured value of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartInput {
    /// Text, which may hold a comma-separated list
    Text(String),
    /// Native integer, kept as an integer
    Integer(i64),
    /// List of elements
    List(Vec<ScalarInput>),
}

impl PartInput {
    /// Decode into the typed value stored for `name`.
    #[must_use]
    pub fn into_value(self, name: &PartName, tzid: Option<&str>) -> PartValue {
        let spec = part_spec(name);
        let kind = spec.constraint.value_kind();
        match self {
            PartInput::Text(text) => decode_value(&normalize(&text, kind), spec, tzid),
            PartInput::Integer(n) if spec.multiple_valued => {
                PartValue::List(vec![Scalar::Integer(n)])
            }
            PartInput::Integer(n) => PartValue::Scalar(Scalar::Integer(n)),
            PartInput::List(list) => PartValue::List(
                list.into_iter()
                    .map(|element| match element {
                        ScalarInput::Text(text) => decode(&normalize(&text, kind), kind, tzid),
                        ScalarInput::Integer(n) => Scalar::Integer(n),
                    })
                    .collect(),
            ),
        }
    }
}

/// Accept the extended ISO 8601 form of `UNTIL`, as produced by the JSON
/// serializer, by dropping its separators.
fn normalize(text: &str, kind: ValueKind) -> String {
    match kind {
        ValueKind::DateTime => text.replace(['-', ':'], ""),
        ValueKind::Integer | ValueKind::Token => text.to_owned(),
    }
}

impl From<&str> for PartInput {
    fn from(text: &str) -> Self {
        PartInput::Text(text.to_owned())
    }
}

impl From<String> for PartInput {
    fn from(text: String) -> Self {
        PartInput::Text(text)
    }
}

impl From<i64> for PartInput {
    fn from(n: i64) -> Self {
        PartInput::Integer(n)
    }
}

impl From<Vec<i64>> for PartInput {
    fn from(list: Vec<i64>) -> Self {
        PartInput::List(list.into_iter().map(ScalarInput::Integer).collect())
    }
}

impl From<Vec<&str>> for PartInput {
    fn from(list: Vec<&str>) -> Self {
        PartInput::List(
            list.into_iter()
                .map(|s| ScalarInput::Text(s.to_owned()))
                .collect(),
        )
    }
}

impl TryFrom<Value> for PartInput {
    type Error = RecurError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(list) => list
                .into_iter()
                .map(|element| match element {
                    Value::String(text) => Ok(ScalarInput::Text(text)),
                    Value::Number(n) => Ok(match n.as_i64() {
                        Some(n) => ScalarInput::Integer(n),
                        None => ScalarInput::Text(n.to_string()),
                    }),
                    other => Err(RecurError::InvalidArgument {
                        expected: EXPECTED_PART,
                        found: json_kind(&other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PartInput::List),
            Value::String(text) => Ok(PartInput::Text(text)),
            Value::Number(n) => Ok(match n.as_i64() {
                Some(n) => PartInput::Integer(n),
                None => PartInput::Text(n.to_string()),
            }),
            other => Err(RecurError::InvalidArgument {
                expected: EXPECTED_PART,
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
