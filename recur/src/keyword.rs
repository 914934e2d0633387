// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords of the recurrence rule grammar, RFC 5545 Section 3.3.10.

pub const KW_RRULE: &str = "RRULE";

// Section 3.3.10 - Recurrence Rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";
