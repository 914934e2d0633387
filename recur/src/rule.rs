// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered store of recurrence rule parts, with the text codec.

use std::fmt::{self, Display};

use indexmap::IndexMap;

use crate::catalog::part_spec;
use crate::input::PartInput;
use crate::part::PartName;
use crate::value::{PartValue, decode_value};

/// A recurrence rule: parts keyed by name, in first-seen order.
///
/// Each name appears at most once; setting a name again replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    parts: IndexMap<PartName, PartValue>,
}

impl Rule {
    /// Create an empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the wire form `KEY=VALUE;KEY=VALUE...`.
    ///
    /// Parsing is lenient: segments without `=` are dropped, unknown keys are
    /// kept as extensions, and values that do not decode are kept as tokens.
    /// A later segment for the same key replaces the earlier value.
    #[must_use]
    pub fn parse(text: &str, tzid: Option<&str>) -> Self {
        let mut rule = Self::new();
        for segment in text.split(';') {
            let Some((key, raw)) = segment.split_once('=') else {
                if !segment.is_empty() {
                    tracing::debug!(segment, "dropping rule segment without '='");
                }
                continue;
            };
            let name = PartName::parse(key);
            let value = decode_value(raw, part_spec(&name), tzid);
            rule.set_part(name, value);
        }
        rule
    }

    /// Set a part, replacing any value it had.
    pub fn set_part(&mut self, name: impl Into<PartName>, value: PartValue) {
        self.parts.insert(name.into(), value);
    }

    /// Set every part of `parts` in iteration order; later entries win.
    ///
    /// String values are decoded like the wire form, integers are kept as
    /// integers. `UNTIL` also accepts the extended form `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn set_parts<K, I>(&mut self, parts: I, tzid: Option<&str>)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, PartInput)>,
    {
        for (key, input) in parts {
            let name = PartName::parse(key.as_ref());
            let value = input.into_value(&name, tzid);
            self.set_part(name, value);
        }
    }

    /// Snapshot of the parts, suitable for display and for [`Self::set_part`].
    #[must_use]
    pub fn get_parts(&self) -> IndexMap<PartName, PartValue> {
        self.parts.clone()
    }

    /// Value of a part
    #[must_use]
    pub fn get(&self, name: &PartName) -> Option<&PartValue> {
        self.parts.get(name)
    }

    /// Whether the part is present
    #[must_use]
    pub fn contains(&self, name: &PartName) -> bool {
        self.parts.contains_key(name)
    }

    /// Remove a part, keeping the order of the others
    pub fn remove(&mut self, name: &PartName) -> Option<PartValue> {
        self.parts.shift_remove(name)
    }

    /// Iterate over the parts in order
    pub fn iter(&self) -> impl Iterator<Item = (&PartName, &PartValue)> {
        self.parts.iter()
    }

    /// Number of parts
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the rule has no parts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serialize to the wire form.
    ///
    /// Empty values are still written as `NAME=`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Rule {
    type Item = (&'a PartName, &'a PartValue);
    type IntoIter = indexmap::map::Iter<'a, PartName, PartValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
