// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::RecurError;
use crate::input::{PartInput, RecurInput};
use crate::json::to_json;
use crate::options::ValidateOptions;
use crate::part::PartName;
use crate::rule::Rule;
use crate::validate::{Outcome, ValidationIssue, validate};
use crate::value::PartValue;

/// An `RRULE` property value together with the property's `TZID` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recur {
    rule: Rule,
    tzid: Option<String>,
}

/// Result of [`Recur::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValidation {
    /// Issues in discovery order
    pub issues: Vec<ValidationIssue>,
    /// The property cannot be repaired and must be removed from its component
    pub remove: bool,
}

impl Recur {
    /// Create an empty value for a property with the given `TZID`.
    #[must_use]
    pub fn new(tzid: Option<&str>) -> Self {
        Self {
            rule: Rule::new(),
            tzid: tzid.map(str::to_owned),
        }
    }

    /// Parse the wire form of the value.
    #[must_use]
    pub fn parse(text: &str, tzid: Option<&str>) -> Self {
        Self {
            rule: Rule::parse(text, tzid),
            tzid: tzid.map(str::to_owned),
        }
    }

    /// The `TZID` parameter, if any
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.tzid.as_deref()
    }

    /// The rule
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Set the value: text replaces the whole rule, parts are merged into it.
    pub fn set_value(&mut self, input: impl Into<RecurInput>) {
        match input.into() {
            RecurInput::Text(text) => self.rule = Rule::parse(&text, self.tzid.as_deref()),
            RecurInput::Parts(parts) => self.set_parts(parts),
        }
    }

    /// Set the value from a JSON string or object.
    ///
    /// # Errors
    ///
    /// Returns [`RecurError::InvalidArgument`] for any other shape.
    pub fn set_json_value(&mut self, value: Value) -> Result<(), RecurError> {
        let input = RecurInput::try_from(value)?;
        self.set_value(input);
        Ok(())
    }

    /// Set parts by name, leaving the other parts alone.
    pub fn set_parts<K, I>(&mut self, parts: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, PartInput)>,
    {
        self.rule.set_parts(parts, self.tzid.as_deref());
    }

    /// Snapshot of the parts
    #[must_use]
    pub fn get_parts(&self) -> IndexMap<PartName, PartValue> {
        self.rule.get_parts()
    }

    /// Wire form of the value
    #[must_use]
    pub fn value(&self) -> String {
        self.rule.to_text()
    }

    /// JSON form of the value, an array holding the rule object.
    #[must_use]
    pub fn json_value(&self) -> Value {
        Value::Array(vec![to_json(&self.rule)])
    }

    /// Validate the rule, replacing it with the repaired one when repair is
    /// requested.
    ///
    /// When the rule cannot be repaired it is cleared and `remove` is set.
    pub fn validate(&mut self, options: &ValidateOptions) -> PropertyValidation {
        let validation = validate(std::mem::take(&mut self.rule), options);
        let remove = match validation.outcome {
            Outcome::Rule(rule) => {
                self.rule = rule;
                false
            }
            Outcome::Invalid => true,
        };
        PropertyValidation {
            issues: validation.issues,
            remove,
        }
    }
}

impl From<Rule> for Recur {
    fn from(rule: Rule) -> Self {
        Self { rule, tzid: None }
    }
}
