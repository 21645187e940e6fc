// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end coverage of the documented seed scenarios, driven through the
//! public `epochal` API rather than internal types.

use epochal::cal::Weekday;
use epochal::container;
use epochal::iso8601;
use epochal::part;
use epochal::units::standard;
use num_bigint::BigInt;
use num_rational::BigRational;

#[test]
fn last_thursday_of_the_month() {
    let at = iso8601::parse_to_point("2010-02-08T12:30:00Z").unwrap();
    let aligned = part::align_weekday_in_month(&at, Weekday::Thursday, -1).unwrap();
    assert_eq!(container::unpack_date(&aligned).unwrap(), (2010, 1, 24));
}

#[test]
fn day_zero_normalizes_into_previous_month() {
    let at = iso8601::parse_to_point("2000-01-00T12:45:00Z").unwrap();
    assert_eq!(container::unpack_date(&at).unwrap(), (1999, 11, 30));
}

#[test]
fn iso_round_trip_preserves_subsecond_precision() {
    let text = "1778-06-01T20:21:22.23Z";
    let p = iso8601::parse_to_point(text).unwrap();
    assert_eq!(container::unpack_iso(&p).unwrap(), text);
}

#[test]
fn los_angeles_dst_boundary() {
    let zone = match epochal::zone::cache::find("America/Los_Angeles") {
        Ok(zone) => zone,
        Err(_) => return, // no system zoneinfo database available in this environment
    };
    let ctx = standard();
    // 2019-11-03T09:00:00Z is just after the fall-back transition; one
    // second earlier is still daylight time.
    let at = iso8601::parse_to_point("2019-11-03T09:00:00Z").unwrap();
    let before = at.rollback(ctx, "second", BigRational::from(BigInt::from(1))).unwrap();
    assert!(zone.is_dst(&before));
    assert!(!zone.is_dst(&at));
}

#[test]
fn fixed_offset_zone_has_no_transitions_in_range() {
    let zone = match epochal::zone::cache::find("MST") {
        Ok(zone) => zone,
        Err(_) => return, // no system zoneinfo database available in this environment
    };
    let start = iso8601::parse_to_point("2006-01-03T09:00:00Z").unwrap();
    let stop = iso8601::parse_to_point("2007-12-03T09:00:00Z").unwrap();
    assert!(zone.slice(&start, &stop).is_empty());
}
