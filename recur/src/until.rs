// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `UNTIL` rule part and its conversion to UTC.

use std::fmt::{self, Display};

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::{AmbiguousOffset, Offset, TimeZone};

use crate::error::RecurError;
use crate::value::EndDate;
use crate::value::datetime::parse_enddate;

/// Zone an `UNTIL` value was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntilZone {
    /// Written with the trailing `Z`
    Utc,
    /// No zone designator and no `TZID` on the property
    Floating,
    /// Local time in the zone named by the property's `TZID` parameter
    Tzid(String),
}

/// Value of the `UNTIL` part, paired with the zone it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Until {
    /// Date or date-time as written
    pub end: EndDate,
    /// Zone of [`Self::end`]
    pub zone: UntilZone,
}

impl Until {
    /// Parse the wire form `YYYYMMDD`, `YYYYMMDDTHHMMSS` or `YYYYMMDDTHHMMSSZ`.
    ///
    /// A value without `Z` is local to `tzid` when one is given.
    #[must_use]
    pub fn parse(raw: &str, tzid: Option<&str>) -> Option<Self> {
        let end = parse_enddate(raw)?;
        let zone = match tzid {
            _ if end.is_utc() => UntilZone::Utc,
            Some(tzid) => UntilZone::Tzid(tzid.to_owned()),
            None => UntilZone::Floating,
        };
        Some(Self { end, zone })
    }

    /// Place the value on the timeline. Floating values are taken as UTC.
    ///
    /// # Errors
    ///
    /// Fails when the zone cannot be resolved or the date-time is out of range.
    pub fn to_timestamp(&self, resolver: &dyn OffsetResolver) -> Result<Timestamp, RecurError> {
        let invalid = || RecurError::InvalidDateTime {
            value: self.to_string(),
        };
        let civil = self.end.civil_date_time().map_err(|_| invalid())?;
        let offset = match &self.zone {
            UntilZone::Utc | UntilZone::Floating => Offset::UTC,
            UntilZone::Tzid(tzid) => resolver.offset(tzid, civil)?,
        };
        offset.to_timestamp(civil).map_err(|_| invalid())
    }

    /// Format as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    ///
    /// # Errors
    ///
    /// See [`Self::to_timestamp`].
    pub fn to_utc_string(&self, resolver: &dyn OffsetResolver) -> Result<String, RecurError> {
        let ts = self.to_timestamp(resolver)?;
        Ok(ts.strftime("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}

impl Display for Until {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.end.fmt(f)
    }
}

/// Supplies the UTC offset of a time zone at a local instant.
pub trait OffsetResolver {
    /// Offset of `tzid` in effect at the local date-time `civil`.
    ///
    /// # Errors
    ///
    /// Returns [`RecurError::UnknownTimeZone`] when `tzid` is not known.
    fn offset(&self, tzid: &str, civil: DateTime) -> Result<Offset, RecurError>;
}

/// Resolver backed by the IANA time zone database bundled with jiff.
///
/// Both in a gap and in a fold the offset in effect before the transition is
/// used, so gap times are shifted forward and folds pick the earlier instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbResolver;

impl OffsetResolver for TzdbResolver {
    fn offset(&self, tzid: &str, civil: DateTime) -> Result<Offset, RecurError> {
        let tz = TimeZone::get(tzid).map_err(|_| RecurError::UnknownTimeZone {
            tzid: tzid.to_owned(),
        })?;
        let offset = match tz.to_ambiguous_timestamp(civil).offset() {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Gap { before, .. } | AmbiguousOffset::Fold { before, .. } => before,
        };
        Ok(offset)
    }
}

/// Wraps a resolver, treating unknown zones as UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcFallback<R>(pub R);

impl<R: OffsetResolver> OffsetResolver for UtcFallback<R> {
    fn offset(&self, tzid: &str, civil: DateTime) -> Result<Offset, RecurError> {
        match self.0.offset(tzid, civil) {
            Err(RecurError::UnknownTimeZone { .. }) => {
                tracing::warn!(tzid, "unknown timezone, treating UNTIL as UTC");
                Ok(Offset::UTC)
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zone_from_designator_and_tzid() {
        let utc = Until::parse("20160305T230000Z", Some("Europe/Berlin")).unwrap();
        assert_eq!(utc.zone, UntilZone::Utc);

        let local = Until::parse("20160305T230000", Some("Europe/Berlin")).unwrap();
        assert_eq!(local.zone, UntilZone::Tzid("Europe/Berlin".to_string()));

        let floating = Until::parse("20160305T230000", None).unwrap();
        assert_eq!(floating.zone, UntilZone::Floating);

        assert!(Until::parse("tomorrow", None).is_none());
    }

    #[test]
    fn converts_utc_as_is() {
        let until = Until::parse("20160305T230000Z", None).unwrap();
        assert_eq!(
            until.to_utc_string(&TzdbResolver).unwrap(),
            "2016-03-05T23:00:00Z"
        );
    }

    #[test]
    fn converts_local_time_with_zone_offset() {
        // CET is UTC+1 in March
        let winter = Until::parse("20160305T230000", Some("Europe/Berlin")).unwrap();
        assert_eq!(
            winter.to_utc_string(&TzdbResolver).unwrap(),
            "2016-03-05T22:00:00Z"
        );

        // CEST is UTC+2 in July
        let summer = Until::parse("20160705T230000", Some("Europe/Berlin")).unwrap();
        assert_eq!(
            summer.to_utc_string(&TzdbResolver).unwrap(),
            "2016-07-05T21:00:00Z"
        );
    }

    #[test]
    fn converts_local_time_around_transitions() {
        // 02:30 does not exist on 2016-03-27, it becomes 03:30 CEST
        let gap = Until::parse("20160327T023000", Some("Europe/Berlin")).unwrap();
        assert_eq!(
            gap.to_utc_string(&TzdbResolver).unwrap(),
            "2016-03-27T01:30:00Z"
        );

        // 02:30 happens twice on 2016-10-30, the first one is in CEST
        let fold = Until::parse("20161030T023000", Some("Europe/Berlin")).unwrap();
        assert_eq!(
            fold.to_utc_string(&TzdbResolver).unwrap(),
            "2016-10-30T00:30:00Z"
        );
    }

    #[test]
    fn converts_date_to_midnight() {
        let until = Until::parse("19971224", Some("America/New_York")).unwrap();
        assert_eq!(
            until.to_utc_string(&TzdbResolver).unwrap(),
            "1997-12-24T05:00:00Z"
        );
    }

    #[test]
    fn reports_unknown_zone() {
        let until = Until::parse("20160305T230000", Some("Mars/Olympus_Mons")).unwrap();
        assert_eq!(
            until.to_utc_string(&TzdbResolver),
            Err(RecurError::UnknownTimeZone {
                tzid: "Mars/Olympus_Mons".to_string()
            })
        );
        assert_eq!(
            until.to_utc_string(&UtcFallback(TzdbResolver)).unwrap(),
            "2016-03-05T23:00:00Z"
        );
    }

    #[test]
    fn displays_wire_form() {
        for src in ["20160305T230000Z", "20160305T230000", "20160305"] {
            assert_eq!(Until::parse(src, Some("Europe/Berlin")).unwrap().to_string(), src);
        }
    }
}
