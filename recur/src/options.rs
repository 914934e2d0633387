// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Options of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Repair non-conformant data instead of only reporting it.
    pub repair: bool,

    /// Report a rule that carries both `COUNT` and `UNTIL`.
    pub report_count_until_conflict: bool,
}

impl ValidateOptions {
    /// Report issues, never modify the rule.
    #[must_use]
    pub const fn report() -> Self {
        Self {
            repair: false,
            report_count_until_conflict: true,
        }
    }

    /// Report issues and repair what can be repaired.
    #[must_use]
    pub const fn repair() -> Self {
        Self {
            repair: true,
            report_count_until_conflict: true,
        }
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let options: ValidateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ValidateOptions::report());

        let options: ValidateOptions = serde_json::from_str(r#"{ "repair": true }"#).unwrap();
        assert_eq!(options, ValidateOptions::repair());

        let options: ValidateOptions =
            serde_json::from_str(r#"{ "report_count_until_conflict": false }"#).unwrap();
        assert!(!options.repair);
        assert!(!options.report_count_until_conflict);
    }
}
