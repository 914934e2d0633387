// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the JSON form.

use aimcal_recur::{Recur, RecurError, Rule, TzdbResolver, to_json, to_json_with};
use serde_json::json;

#[test]
fn test_json_with_count() {
    let recur = Recur::parse("FREQ=DAILY;COUNT=3", Some("Europe/Berlin"));
    let json = recur.json_value();
    let count = &json[0]["count"];
    assert!(count.is_i64());
    assert_eq!(count, &json!(3));
}

#[test]
fn test_json_with_until() {
    let recur = Recur::parse("FREQ=DAILY;UNTIL=20160305T230000Z", Some("Europe/Berlin"));
    assert_eq!(recur.json_value()[0]["until"], json!("2016-03-05T23:00:00Z"));
}

#[test]
fn test_json_with_local_until() {
    let rule = Rule::parse("FREQ=DAILY;UNTIL=20160705T230000", Some("Europe/Berlin"));
    assert_eq!(
        to_json_with(&rule, &TzdbResolver).unwrap()["until"],
        json!("2016-07-05T21:00:00Z")
    );

    let rule = Rule::parse("FREQ=DAILY;UNTIL=20160705T230000", Some("Nowhere/Special"));
    assert!(matches!(
        to_json_with(&rule, &TzdbResolver),
        Err(RecurError::UnknownTimeZone { .. })
    ));
}

#[test]
fn test_json_types_follow_schema() {
    let rule = Rule::parse(
        "FREQ=MONTHLY;INTERVAL=2;BYMONTHDAY=1;BYDAY=-1FR;BYSETPOS=-1;WKST=MO",
        None,
    );
    assert_eq!(
        to_json(&rule),
        json!({
            "freq": "MONTHLY",
            "interval": 2,
            "bymonthday": [1],
            "byday": ["-1FR"],
            "bysetpos": [-1],
            "wkst": "MO",
        })
    );
}

#[test]
fn test_json_round_trips_through_set_value() {
    let original = Recur::parse(
        "FREQ=WEEKLY;UNTIL=20160305T230000Z;BYDAY=MO,TU;BYHOUR=9",
        None,
    );
    let json = original.json_value();

    let mut copy = Recur::new(None);
    copy.set_json_value(json[0].clone()).unwrap();
    assert_eq!(copy.value(), original.value());
    assert_eq!(copy.json_value(), json);
}

#[test]
fn test_json_with_until_in_dst_gap() {
    let rule = Rule::parse("FREQ=DAILY;UNTIL=20160327T023000", Some("Europe/Berlin"));
    assert_eq!(to_json(&rule)["until"], json!("2016-03-27T01:30:00Z"));
}
