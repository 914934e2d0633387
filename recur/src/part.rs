// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Names of the parts of a recurrence rule.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};

macro_rules! impl_part_name_mapping {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $variant,
            )+

            /// Any part outside RFC 5545, such as a vendor extension.
            /// The name is stored uppercase.
            Extension(String),
        }

        impl $ty {
            /// Returns the canonical (uppercase) name of the part
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                    Self::Extension(name) => name,
                }
            }

            /// Resolve a part name case-insensitively.
            ///
            /// Names outside RFC 5545 become [`Self::Extension`].
            #[must_use]
            pub fn parse(name: &str) -> Self {
                let upper = name.to_ascii_uppercase();
                match upper.as_str() {
                    $(
                        $kw => Self::$variant,
                    )+
                    _ => Self::Extension(upper),
                }
            }
        }
    };
}

impl_part_name_mapping! {
    /// Part of a recurrence rule, e.g. `FREQ` or `BYMONTH`
    #[expect(missing_docs)]
    enum PartName {
        Freq        => KW_RRULE_FREQ,
        Until       => KW_RRULE_UNTIL,
        Count       => KW_RRULE_COUNT,
        Interval    => KW_RRULE_INTERVAL,
        BySecond    => KW_RRULE_BYSECOND,
        ByMinute    => KW_RRULE_BYMINUTE,
        ByHour      => KW_RRULE_BYHOUR,
        ByDay       => KW_RRULE_BYDAY,
        ByMonthDay  => KW_RRULE_BYMONTHDAY,
        ByYearDay   => KW_RRULE_BYYEARDAY,
        ByWeekNo    => KW_RRULE_BYWEEKNO,
        ByMonth     => KW_RRULE_BYMONTH,
        BySetPos    => KW_RRULE_BYSETPOS,
        Wkst        => KW_RRULE_WKST,
    }
}

impl PartName {
    /// Returns true for parts not defined by RFC 5545
    #[must_use]
    pub const fn is_extension(&self) -> bool {
        matches!(self, Self::Extension(_))
    }
}

impl FromStr for PartName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for PartName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(PartName::parse("freq"), PartName::Freq);
        assert_eq!(PartName::parse("ByMonthDay"), PartName::ByMonthDay);
        assert_eq!(PartName::parse("WKST"), PartName::Wkst);
    }

    #[test]
    fn keeps_unknown_names_as_extensions() {
        let name = PartName::parse("x-name");
        assert_eq!(name, PartName::Extension("X-NAME".to_string()));
        assert!(name.is_extension());
        assert_eq!(name.to_string(), "X-NAME");
    }

    #[test]
    fn displays_canonical_name() {
        assert_eq!(PartName::BySetPos.to_string(), "BYSETPOS");
        assert_eq!(PartName::from("until").name(), "UNTIL");
    }
}
