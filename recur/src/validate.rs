// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Validation and repair of recurrence rules.
//!
//! [`validate`] is pure: it takes the rule by value and hands back the rule to
//! keep, repaired when repair was requested, together with the issues found.
//! Issues come in discovery order: `FREQ` first, then empty parts, then the
//! per-part checks in part order and element order.

use std::str::FromStr;

use crate::catalog::{Bounds, Constraint, part_spec};
use crate::keyword::{KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_FREQ, KW_RRULE_WKST};
use crate::options::ValidateOptions;
use crate::part::PartName;
use crate::rule::Rule;
use crate::value::{Frequency, PartValue, Scalar, Weekday, WeekdayNum};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// The data was non-conformant and has been repaired
    Repaired = 1,
    /// The data is non-conformant and was left as is
    Error = 3,
}

impl Severity {
    /// Numeric level, 1 or 3
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    const fn for_mode(repair: bool) -> Self {
        match repair {
            true => Severity::Repaired,
            false => Severity::Error,
        }
    }
}

/// A finding of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable description
    pub message: String,
    /// Severity
    pub level: Severity,
    /// The part concerned, `None` for issues about the whole rule
    pub part: Option<PartName>,
}

impl ValidationIssue {
    fn new(message: String, level: Severity, part: Option<PartName>) -> Self {
        Self {
            message,
            level,
            part,
        }
    }
}

/// What remains of the rule after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rule to keep
    Rule(Rule),
    /// The rule cannot be repaired and its property must be dropped
    Invalid,
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// The rule to keep, or the invalid marker
    pub outcome: Outcome,
    /// Issues in discovery order
    pub issues: Vec<ValidationIssue>,
}

impl Validation {
    /// The rule to keep, if any
    #[must_use]
    pub const fn rule(&self) -> Option<&Rule> {
        match &self.outcome {
            Outcome::Rule(rule) => Some(rule),
            Outcome::Invalid => None,
        }
    }

    /// Consume into the rule to keep, if any
    #[must_use]
    pub fn into_rule(self) -> Option<Rule> {
        match self.outcome {
            Outcome::Rule(rule) => Some(rule),
            Outcome::Invalid => None,
        }
    }

    /// Whether the rule has to be dropped
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.outcome, Outcome::Invalid)
    }
}

/// Validate `rule`, repairing it when `options.repair` is set.
///
/// Without repair the rule is returned untouched and every issue has level 3.
/// With repair, fixed issues have level 1; a rule without a valid `FREQ` is
/// turned into [`Outcome::Invalid`].
///
/// A rule holding both `COUNT` and `UNTIL` is reported at level 3 on every
/// pass, repaired or not, unless
/// [`ValidateOptions::report_count_until_conflict`] is cleared, so repairing
/// such a rule twice still yields that issue.
#[tracing::instrument(skip_all, fields(repair = options.repair))]
#[must_use]
pub fn validate(rule: Rule, options: &ValidateOptions) -> Validation {
    let mut validator = Validator {
        rule,
        repair: options.repair,
        issues: Vec::new(),
    };

    if !validator.check_freq() {
        let outcome = match options.repair {
            true => {
                tracing::debug!("dropping rule without a valid FREQ");
                Outcome::Invalid
            }
            false => Outcome::Rule(validator.rule),
        };
        return Validation {
            outcome,
            issues: validator.issues,
        };
    }

    let empty = validator.check_empty_parts();
    let names: Vec<PartName> = validator
        .rule
        .iter()
        .map(|(name, _)| name.clone())
        .filter(|name| !empty.contains(name))
        .collect();
    for name in names {
        match part_spec(&name).constraint {
            Constraint::Bounded(bounds) => validator.check_bounded(&name, bounds),
            Constraint::Weekday => validator.check_weekday(&name),
            Constraint::WeekdayList => validator.check_weekday_list(&name),
            Constraint::FreeForm
            | Constraint::Integer
            | Constraint::Frequency
            | Constraint::DateTime => {}
        }
    }

    if options.report_count_until_conflict {
        validator.check_count_until();
    }

    Validation {
        outcome: Outcome::Rule(validator.rule),
        issues: validator.issues,
    }
}

struct Validator {
    rule: Rule,
    repair: bool,
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn report(&mut self, message: String, part: Option<PartName>) {
        let level = Severity::for_mode(self.repair);
        self.issues.push(ValidationIssue::new(message, level, part));
    }

    /// Returns `false` when the rule has no usable `FREQ`.
    fn check_freq(&mut self) -> bool {
        let freq = self.rule.get(&PartName::Freq).filter(|value| !value.is_empty());
        let message = match freq {
            None => format!("{KW_RRULE_FREQ} is required in {KW_RRULE}"),
            Some(PartValue::Scalar(Scalar::Token(token)))
                if Frequency::from_str(token).is_ok() =>
            {
                return true;
            }
            Some(_) => format!(
                "{KW_RRULE_FREQ} in {KW_RRULE} must be one of SECONDLY, MINUTELY, HOURLY, DAILY, WEEKLY, MONTHLY, YEARLY!"
            ),
        };
        self.report(message, Some(PartName::Freq));
        false
    }

    /// Flag parts without a value, removing them on repair.
    fn check_empty_parts(&mut self) -> Vec<PartName> {
        let empty: Vec<PartName> = self
            .rule
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name.clone())
            .collect();

        for name in &empty {
            self.report(
                format!("Invalid value for {name} in {KW_RRULE}"),
                Some(name.clone()),
            );
            if self.repair {
                tracing::debug!(part = %name, "removing empty part");
                self.rule.remove(name);
            }
        }
        empty
    }

    fn check_bounded(&mut self, name: &PartName, bounds: Bounds) {
        let Some(value) = self.rule.get(name) else {
            return;
        };

        let mut kept = Vec::new();
        let mut invalid = 0;
        for element in value.elements() {
            match element.as_integer() {
                Some(n) if bounds.contains(n) => kept.push(Scalar::Integer(n)),
                Some(n) => {
                    invalid += 1;
                    let clamped = bounds.clamp(n);
                    if self.repair {
                        tracing::debug!(part = %name, from = n, to = clamped, "clamping value");
                    }
                    kept.push(Scalar::Integer(clamped));
                }
                None => {
                    invalid += 1;
                    if self.repair {
                        tracing::debug!(part = %name, value = %element, "stripping non-numeric value");
                    }
                }
            }
        }

        let message = format!(
            "{name} in {KW_RRULE} must have value(s) between {} and {}!",
            bounds.min(),
            bounds.max()
        );
        for _ in 0..invalid {
            self.report(message.clone(), Some(name.clone()));
        }

        if self.repair && invalid > 0 {
            self.replace_elements(name, kept);
        }
    }

    fn check_weekday(&mut self, name: &PartName) {
        let valid = match self.rule.get(name) {
            None => return,
            Some(value) => value
                .as_scalar()
                .and_then(Scalar::as_token)
                .is_some_and(|token| Weekday::from_str(token).is_ok()),
        };
        if valid {
            return;
        }

        self.report(
            format!("{KW_RRULE_WKST} in {KW_RRULE} must be one of SU, MO, TU, WE, TH, FR, SA!"),
            Some(name.clone()),
        );
        if self.repair {
            tracing::debug!(part = %name, "removing invalid weekday");
            self.rule.remove(name);
        }
    }

    fn check_weekday_list(&mut self, name: &PartName) {
        let Some(value) = self.rule.get(name) else {
            return;
        };

        let mut kept = Vec::new();
        let mut stripped = Vec::new();
        for element in value.elements() {
            match element.as_token().map(WeekdayNum::from_str) {
                Some(Ok(_)) => kept.push(element.clone()),
                _ => stripped.push(element.to_string()),
            }
        }
        if stripped.is_empty() {
            return;
        }

        let message = format!(
            "{KW_RRULE_BYDAY} in {KW_RRULE} must contain weekdays with an optional ordinal between -53 and 53!"
        );
        for element in stripped {
            if self.repair {
                tracing::debug!(part = %name, value = %element, "stripping invalid weekday");
            }
            self.report(message.clone(), Some(name.clone()));
        }

        if self.repair {
            self.replace_elements(name, kept);
        }
    }

    /// Store the repaired elements of a list part, deduplicated, or remove the
    /// part when nothing is left.
    fn replace_elements(&mut self, name: &PartName, elements: Vec<Scalar>) {
        let mut deduped: Vec<Scalar> = Vec::with_capacity(elements.len());
        for element in elements {
            if !deduped.contains(&element) {
                deduped.push(element);
            }
        }

        if deduped.is_empty() {
            tracing::debug!(part = %name, "removing part left empty by repair");
            self.rule.remove(name);
        } else {
            self.rule.set_part(name.clone(), PartValue::List(deduped));
        }
    }

    fn check_count_until(&mut self) {
        if self.rule.contains(&PartName::Count) && self.rule.contains(&PartName::Until) {
            self.issues.push(ValidationIssue::new(
                format!("COUNT and UNTIL must not both be present in {KW_RRULE}"),
                Severity::Error,
                None,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair(text: &str) -> Validation {
        validate(Rule::parse(text, None), &ValidateOptions::repair())
    }

    fn report(text: &str) -> Validation {
        validate(Rule::parse(text, None), &ValidateOptions::report())
    }

    fn messages(validation: &Validation) -> Vec<&str> {
        validation
            .issues
            .iter()
            .map(|issue| issue.message.as_str())
            .collect()
    }

    fn text(validation: &Validation) -> String {
        validation.rule().map(Rule::to_text).unwrap_or_default()
    }

    #[test]
    fn accepts_valid_rule() {
        let validation = repair("FREQ=YEARLY;COUNT=6;BYMONTHDAY=24;BYMONTH=2,3");
        assert!(validation.issues.is_empty());
        assert_eq!(text(&validation), "FREQ=YEARLY;COUNT=6;BYMONTHDAY=24;BYMONTH=2,3");
    }

    #[test]
    fn missing_freq_yields_one_issue() {
        let validation = report("COUNT=3;BYMONTH=14");
        assert_eq!(messages(&validation), ["FREQ is required in RRULE"]);
        assert_eq!(validation.issues[0].level, Severity::Error);
        assert_eq!(text(&validation), "COUNT=3;BYMONTH=14");

        let validation = repair("COUNT=3;BYMONTH=14");
        assert_eq!(messages(&validation), ["FREQ is required in RRULE"]);
        assert_eq!(validation.issues[0].level, Severity::Repaired);
        assert!(validation.is_invalid());
    }

    #[test]
    fn empty_freq_counts_as_missing() {
        for validation in [report("FREQ=;COUNT=3"), repair("FREQ=;COUNT=3")] {
            assert_eq!(messages(&validation), ["FREQ is required in RRULE"]);
        }
        assert!(repair("FREQ=").is_invalid());
    }

    #[test]
    fn unknown_freq_invalidates_rule() {
        let validation = repair("FREQ=FORTNIGHTLY;COUNT=3");
        assert_eq!(validation.issues.len(), 1);
        assert!(validation.issues[0].message.starts_with("FREQ in RRULE must be one of"));
        assert!(validation.is_invalid());
    }

    #[test]
    fn clamps_then_deduplicates() {
        let validation = repair("FREQ=YEARLY;BYMONTH=0,1,2,3,4,14");
        assert_eq!(
            messages(&validation),
            [
                "BYMONTH in RRULE must have value(s) between 1 and 12!",
                "BYMONTH in RRULE must have value(s) between 1 and 12!",
            ]
        );
        assert!(validation.issues.iter().all(|i| i.level == Severity::Repaired));
        assert_eq!(text(&validation), "FREQ=YEARLY;BYMONTH=1,2,3,4,12");
    }

    #[test]
    fn strips_non_numeric_elements() {
        let validation = repair("FREQ=YEARLY;BYMONTH=bla,3,foo");
        assert_eq!(validation.issues.len(), 2);
        assert_eq!(text(&validation), "FREQ=YEARLY;BYMONTH=3");

        let validation = repair("FREQ=YEARLY;BYMONTH=bla");
        assert_eq!(validation.issues.len(), 1);
        assert_eq!(text(&validation), "FREQ=YEARLY");
    }

    #[test]
    fn reports_without_modifying() {
        let validation = report("FREQ=YEARLY;BYMONTH=bla,3,14");
        assert_eq!(validation.issues.len(), 2);
        assert!(validation.issues.iter().all(|i| i.level == Severity::Error));
        assert_eq!(text(&validation), "FREQ=YEARLY;BYMONTH=BLA,3,14");
    }

    #[test]
    fn signed_bounds_exclude_zero() {
        let validation = repair("FREQ=MONTHLY;BYMONTHDAY=0,-1,-40,40");
        assert_eq!(
            messages(&validation),
            [
                "BYMONTHDAY in RRULE must have value(s) between -31 and 31!",
                "BYMONTHDAY in RRULE must have value(s) between -31 and 31!",
                "BYMONTHDAY in RRULE must have value(s) between -31 and 31!",
            ]
        );
        assert_eq!(text(&validation), "FREQ=MONTHLY;BYMONTHDAY=1,-1,-31,31");
    }

    #[test]
    fn removes_empty_parts() {
        let validation = repair("FREQ=DAILY;BYMONTH=;BYDAY=");
        assert_eq!(
            messages(&validation),
            ["Invalid value for BYMONTH in RRULE", "Invalid value for BYDAY in RRULE"]
        );
        assert_eq!(text(&validation), "FREQ=DAILY");

        let validation = report("FREQ=DAILY;WKST=");
        assert_eq!(messages(&validation), ["Invalid value for WKST in RRULE"]);
        assert_eq!(text(&validation), "FREQ=DAILY;WKST=");
    }

    #[test]
    fn checks_wkst() {
        let validation = repair("FREQ=WEEKLY;WKST=XX;COUNT=2");
        assert_eq!(
            messages(&validation),
            ["WKST in RRULE must be one of SU, MO, TU, WE, TH, FR, SA!"]
        );
        assert_eq!(text(&validation), "FREQ=WEEKLY;COUNT=2");

        assert!(repair("FREQ=WEEKLY;WKST=mo").issues.is_empty());
    }

    #[test]
    fn checks_byday_elements() {
        let validation = repair("FREQ=MONTHLY;BYDAY=1MO,XX,-1FR,60TU,1MO");
        assert_eq!(validation.issues.len(), 2);
        assert_eq!(validation.issues[0].part, Some(PartName::ByDay));
        assert_eq!(text(&validation), "FREQ=MONTHLY;BYDAY=1MO,-1FR");
    }

    #[test]
    fn reports_count_until_conflict_last() {
        let validation = repair("FREQ=DAILY;COUNT=3;UNTIL=20160305T230000Z;BYMONTH=0");
        assert_eq!(
            messages(&validation),
            [
                "BYMONTH in RRULE must have value(s) between 1 and 12!",
                "COUNT and UNTIL must not both be present in RRULE",
            ]
        );
        let last = validation.issues.last().unwrap();
        assert_eq!(last.level, Severity::Error);
        assert_eq!(last.part, None);
        assert_eq!(
            text(&validation),
            "FREQ=DAILY;COUNT=3;UNTIL=20160305T230000Z;BYMONTH=1"
        );

        let options = ValidateOptions {
            report_count_until_conflict: false,
            ..ValidateOptions::repair()
        };
        let rule = Rule::parse("FREQ=DAILY;COUNT=3;UNTIL=20160305T230000Z", None);
        assert!(validate(rule, &options).issues.is_empty());
    }

    #[test]
    fn ignores_extensions() {
        let validation = repair("FREQ=DAILY;X-NAME=anything,goes");
        assert!(validation.issues.is_empty());
    }

    #[test]
    fn severity_levels() {
        assert_eq!(Severity::Repaired.level(), 1);
        assert_eq!(Severity::Error.level(), 3);
        assert!(Severity::Repaired < Severity::Error);
    }
}
