// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! JSON form of recurrence rules.
//!
//! Keys are the lowercase part names. Integers stay integers, list parts are
//! always arrays, and `UNTIL` is written in UTC as `YYYY-MM-DDTHH:MM:SSZ`.

use std::convert::Infallible;

use serde_json::{Map, Value};

use crate::catalog::part_spec;
use crate::error::RecurError;
use crate::rule::Rule;
use crate::until::{OffsetResolver, TzdbResolver, Until, UtcFallback};
use crate::value::{PartValue, Scalar};

/// Serialize `rule` to JSON, resolving `UNTIL` zones with the bundled time
/// zone database.
///
/// Unknown zones are treated as UTC, and an `UNTIL` that cannot be placed on
/// the timeline is written as it appears in the rule text.
#[must_use]
pub fn to_json(rule: &Rule) -> Value {
    let resolver = UtcFallback(TzdbResolver);
    let Ok(value) = build::<Infallible>(rule, |until| {
        Ok(match until.to_utc_string(&resolver) {
            Ok(utc) => utc,
            Err(err) => {
                tracing::warn!(until = %until, %err, "cannot convert UNTIL to UTC");
                until.to_string()
            }
        })
    });
    value
}

/// Serialize `rule` to JSON, resolving `UNTIL` zones with `resolver`.
///
/// # Errors
///
/// Fails when `UNTIL` names a zone the resolver does not know, or cannot be
/// placed on the timeline.
pub fn to_json_with(rule: &Rule, resolver: &dyn OffsetResolver) -> Result<Value, RecurError> {
    build(rule, |until| until.to_utc_string(resolver))
}

fn build<E>(
    rule: &Rule,
    mut until: impl FnMut(&Until) -> Result<String, E>,
) -> Result<Value, E> {
    let mut encode = |scalar: &Scalar| -> Result<Value, E> {
        Ok(match scalar {
            Scalar::Integer(n) => Value::from(*n),
            Scalar::Token(s) => Value::from(s.as_str()),
            Scalar::DateTime(u) => Value::from(until(u)?),
        })
    };

    let mut map = Map::with_capacity(rule.len());
    for (name, value) in rule {
        let json = match value {
            PartValue::Scalar(s) if !part_spec(name).multiple_valued => encode(s)?,
            _ => Value::Array(
                value
                    .elements()
                    .iter()
                    .map(&mut encode)
                    .collect::<Result<_, _>>()?,
            ),
        };
        map.insert(name.name().to_lowercase(), json);
    }
    Ok(Value::Object(map))
}
