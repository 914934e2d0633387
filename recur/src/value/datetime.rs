// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time grammar of the `UNTIL` rule part, RFC 5545 Section 3.3.4 and 3.3.5.

use std::borrow::Cow;
use std::fmt::{self, Display};

use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Stream;
use chumsky::label::LabelError;
use chumsky::prelude::*;

/// Failure reasons when a date value was expected but not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A calendar date was expected
    Date,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
        }
    }
}

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,
}

impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// Value of the `UNTIL` rule part: either a date or a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    /// Date only, e.g. `19971224`
    Date(ValueDate),

    /// Date with time, e.g. `19971224T000000Z`
    DateTime(ValueDateTime),
}

impl EndDate {
    /// Whether the value carries the UTC designator `Z`.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        match self {
            EndDate::Date(_) => false,
            EndDate::DateTime(dt) => dt.time.utc,
        }
    }

    /// Convert to `jiff::civil::DateTime`, a date-only value becomes midnight.
    ///
    /// Leap second 60 is contracted to 59.
    ///
    /// # Errors
    ///
    /// Fails when the components do not form a valid civil date-time.
    #[expect(clippy::cast_possible_wrap)]
    pub fn civil_date_time(&self) -> Result<jiff::civil::DateTime, jiff::Error> {
        match self {
            EndDate::Date(d) => jiff::civil::DateTime::new(d.year, d.month, d.day, 0, 0, 0, 0),
            EndDate::DateTime(dt) => jiff::civil::DateTime::new(
                dt.date.year,
                dt.date.month,
                dt.date.day,
                dt.time.hour as i8,
                dt.time.minute as i8,
                dt.time.second.min(59) as i8,
                0,
            ),
        }
    }
}

impl Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndDate::Date(d) => d.fmt(f),
            EndDate::DateTime(dt) => dt.fmt(f),
        }
    }
}

/// Parse a complete `UNTIL` value, returning `None` if any input is left over
/// or the value is malformed.
pub(crate) fn parse_enddate(src: &str) -> Option<EndDate> {
    let stream = Stream::from_iter(src.chars());
    enddate::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(stream)
        .into_result()
        .ok()
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src, I, E>() -> impl Parser<'src, I, EndDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    // Try date-time first, then fall back to date
    choice((
        value_date_time().map(EndDate::DateTime),
        value_date().map(EndDate::Date),
    ))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            if jiff::civil::Date::new(year, month, day).is_err() {
                Err(E::Error::expected_found([ValueExpected::Date], None, span))
            } else {
                Ok(ValueDate { year, month, day })
            }
        })
}

/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime { date, time })
}

/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| ValueTime {
            hour,
            minute,
            second,
            utc: utc.is_some(),
        })
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').ignored().to(60)), // leap second
    ))
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_until_date_time() {
        #[rustfmt::skip]
        let success_cases = [
            ("19971224T000000Z", ValueDate { year: 1997, month: 12, day: 24 }, (0, 0, 0, true)),
            ("20160305T230000Z", ValueDate { year: 2016, month: 3, day: 5 }, (23, 0, 0, true)),
            ("19980118T230000",  ValueDate { year: 1998, month: 1, day: 18 }, (23, 0, 0, false)),
            ("19970630T235960Z", ValueDate { year: 1997, month: 6, day: 30 }, (23, 59, 60, true)),
        ];

        for (src, date, (hour, minute, second, utc)) in success_cases {
            let expected = EndDate::DateTime(ValueDateTime {
                date,
                time: ValueTime { hour, minute, second, utc },
            });
            assert_eq!(parse_enddate(src), Some(expected), "Parse {src} should succeed");
        }
    }

    #[test]
    fn parses_until_date() {
        assert_eq!(
            parse_enddate("19971224"),
            Some(EndDate::Date(ValueDate { year: 1997, month: 12, day: 24 }))
        );
        assert_eq!(
            parse_enddate("20000229"),
            Some(EndDate::Date(ValueDate { year: 2000, month: 2, day: 29 }))
        );
    }

    #[test]
    fn rejects_malformed_until() {
        let fail_cases = [
            "",
            "20241301",          // invalid month
            "20240230",          // invalid date
            "abcd1234",          // invalid characters
            "2024011",           // invalid length
            "20240101T",         // missing time
            "20240101T2400000",  // invalid hour
            "20240101T000000ZZ", // trailing input
            "2016-03-05T23:00:00Z",
        ];
        for src in fail_cases {
            assert!(parse_enddate(src).is_none(), "Parse {src} should fail");
        }
    }

    #[test]
    fn displays_in_wire_form() {
        for src in ["19971224T000000Z", "19980118T230000", "19971224"] {
            assert_eq!(parse_enddate(src).unwrap().to_string(), src);
        }
    }

    #[test]
    fn converts_to_civil() {
        let date = parse_enddate("19971224").unwrap();
        assert_eq!(
            date.civil_date_time().unwrap(),
            jiff::civil::date(1997, 12, 24).at(0, 0, 0, 0)
        );
        let leap = parse_enddate("19970630T235960Z").unwrap();
        assert!(leap.is_utc());
        assert_eq!(
            leap.civil_date_time().unwrap(),
            jiff::civil::date(1997, 6, 30).at(23, 59, 59, 0)
        );
    }
}
