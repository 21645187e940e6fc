// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named containers: whole-value packers/unpackers for the composite shapes
//! a `second`-term Point is commonly taken apart into or built up from --
//! `date`, `timeofday`, `datetime`, `unix`, `subsecond`, `iso` -- mirroring
//! the `pack_*`/`unpack_*` helpers of the original unit table.

use crate::error::Result;
use crate::iso8601;
use crate::part::DateTime;
use crate::value::Point;
use num_rational::BigRational;

/// `unpack_date`: the Gregorian (year, month, day) triple, 0-based.
pub fn unpack_date(p: &Point) -> Result<(i32, i32, i32)> {
    let dt = DateTime::from_point(p)?;
    Ok((dt.date.year, dt.date.month, dt.date.day))
}

/// `pack_date`: build a Point at midnight from a (year, month, day) triple,
/// normalizing an out-of-range day or month exactly as [`crate::part::update`]
/// does.
pub fn pack_date(year: i32, month: i32, day: i32) -> Point {
    let date = crate::cal::gregorian::normalize(crate::cal::gregorian::CommonDate::new(year, month, day));
    DateTime { date, hour: 0, minute: 0, second: 0, nanos: 0 }.to_point("second")
}

/// `unpack_timeofday`: the (hour, minute, second, nanosecond) tuple.
pub fn unpack_timeofday(p: &Point) -> Result<(i64, i64, i64, i64)> {
    let dt = DateTime::from_point(p)?;
    Ok((dt.hour, dt.minute, dt.second, dt.nanos))
}

/// `pack_timeofday`: replace the time-of-day components of `p`, keeping its
/// date. An hour outside `0..24` (or a negative one) still resolves to the
/// correct instant; see the note on [`crate::part::update`].
pub fn pack_timeofday(p: &Point, hour: i64, minute: i64, second: i64, nanos: i64) -> Result<Point> {
    let date = DateTime::from_point(p)?.date;
    Ok(DateTime { date, hour, minute, second, nanos }.to_point(p.unit()))
}

/// `unpack_datetime`: the full (year, month, day, hour, minute, second,
/// nanosecond) septuple.
pub fn unpack_datetime(p: &Point) -> Result<(i32, i32, i32, i64, i64, i64, i64)> {
    let dt = DateTime::from_point(p)?;
    Ok((dt.date.year, dt.date.month, dt.date.day, dt.hour, dt.minute, dt.second, dt.nanos))
}

/// `pack_datetime`: the inverse of [`unpack_datetime`].
pub fn pack_datetime(year: i32, month: i32, day: i32, hour: i64, minute: i64, second: i64, nanos: i64) -> Point {
    let date = crate::cal::gregorian::normalize(crate::cal::gregorian::CommonDate::new(year, month, day));
    DateTime { date, hour, minute, second, nanos }.to_point("second")
}

/// `unpack_unix`: whole seconds since 1970-01-01T00:00:00Z, truncating
/// toward negative infinity (matching [`crate::part`]'s day-count split).
pub fn unpack_unix(p: &Point) -> i64 {
    use num_integer::Integer;
    let (q, _) = p.canonical().div_mod_floor(&num_bigint::BigInt::from(1_000_000_000i64));
    q.to_string().parse().unwrap_or(i64::MIN)
}

/// `pack_unix`: build a Point from a whole-second Unix timestamp.
pub fn pack_unix(seconds: i64) -> Point {
    Point::from_canonical_raw(
        crate::units::Term::Second,
        "second",
        num_bigint::BigInt::from(seconds) * 1_000_000_000i64,
    )
}

/// `unpack_subsecond`: the exact fractional second, in `[0, 1)`.
pub fn unpack_subsecond(p: &Point) -> Result<BigRational> {
    crate::part::select_subsecond(p)
}

/// `unpack_iso`: render as ISO 8601 text (always with a trailing `Z`; this
/// container treats every Point as already expressed in UTC).
pub fn unpack_iso(p: &Point) -> Result<String> {
    iso8601::format(p)
}

/// `pack_iso`: the inverse of [`unpack_iso`].
pub fn pack_iso(text: &str) -> Result<Point> {
    iso8601::parse_to_point(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    #[test]
    fn date_roundtrips() {
        let p = pack_date(2024, 5, 14);
        assert_eq!(unpack_date(&p).unwrap(), (2024, 5, 14));
    }

    #[test]
    fn unix_container_matches_epoch() {
        let p = pack_unix(0);
        assert_eq!(unpack_date(&p).unwrap(), (1970, 0, 0));
        assert_eq!(unpack_unix(&p), 0);
    }

    #[test]
    fn iso_container_roundtrips() {
        let p = pack_iso("2024-06-15T09:30:05Z").unwrap();
        assert_eq!(unpack_iso(&p).unwrap(), "2024-06-15T09:30:05Z");
    }

    proptest! {
        #[test]
        fn datetime_container_roundtrip(
            year in -5000_i32..5000,
            month in 0_i32..12,
            day in 0_i32..28,
            hour in 0_i64..24,
            minute in 0_i64..60,
            second in 0_i64..60,
        ) {
            let p = pack_datetime(year, month, day, hour, minute, second, 0);
            let (y, mo, d, h, mi, s, ns) = unpack_datetime(&p).unwrap();
            assert_eq!((y, mo, d, h, mi, s, ns), (year, month, day, hour, minute, second, 0));
        }
    }
}
