// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Enumerated tokens of the recurrence rule grammar.

use std::fmt::{self, Display};
use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Recurrence frequency
///
/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
///
/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter, EnumString, IntoStaticStr,
)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

/// Day of week with optional occurrence, as used by `BYDAY`
///
/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence within the month or year, 1 to 53 or -53 to -1
    pub occurrence: Option<i8>,

    /// Day of the week
    pub day: Weekday,
}

impl FromStr for WeekdayNum {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s.len().checked_sub(2).ok_or(())?;
        let (prefix, day) = (s.get(..split).ok_or(())?, s.get(split..).ok_or(())?);
        let day = day.parse::<Weekday>().map_err(|_| ())?;
        if prefix.is_empty() {
            return Ok(Self {
                occurrence: None,
                day,
            });
        }

        let digits = prefix.strip_prefix(['+', '-']).unwrap_or(prefix);
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        let n = lexical::parse::<i8, _>(digits).map_err(|_| ())?;
        if !(1..=53).contains(&n) {
            return Err(());
        }
        let occurrence = if prefix.starts_with('-') { -n } else { n };
        Ok(Self {
            occurrence: Some(occurrence),
            day,
        })
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        self.day.fmt(f)
    }
}
