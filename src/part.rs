// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Part selection, update, truncation and alignment over `second`-term
//! Points: the Gregorian-calendar-aware machinery sitting on top of the
//! plain canonical-integer arithmetic in [`crate::value`].

use crate::cal::gregorian::{self, CommonDate};
use crate::cal::iso_week;
use crate::cal::weekday::Weekday;
use crate::error::{Result, TimeError};
use crate::units::Term;
use crate::value::Point;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::ToPrimitive;

const NS_PER_SECOND: i64 = 1_000_000_000;
const NS_PER_MINUTE: i64 = 60 * NS_PER_SECOND;
const NS_PER_HOUR: i64 = 60 * NS_PER_MINUTE;
const NS_PER_DAY: i64 = 24 * NS_PER_HOUR;

fn require_second_term(p: &Point) -> Result<()> {
    if p.term() != Term::Second {
        return Err(TimeError::IncommensurableUnits {
            a: p.unit().to_string(),
            b: "day".to_string(),
        });
    }
    Ok(())
}

/// Split a `second`-term canonical integer into a whole day count since
/// 1970-01-01 and the nanosecond-of-day remainder (always in `0..NS_PER_DAY`,
/// even for negative instants).
fn split_day(canonical: &BigInt) -> (i64, i64) {
    let ns_per_day = BigInt::from(NS_PER_DAY);
    let (days, ns) = canonical.div_mod_floor(&ns_per_day);
    (days.to_i64().expect("day count fits in i64 for any representable date"), ns.to_i64().unwrap())
}

fn join_day(days: i64, ns_of_day: i64) -> BigInt {
    BigInt::from(days) * NS_PER_DAY + ns_of_day
}

/// The calendar-decoded view of a `second`-term Point: Gregorian date plus
/// time of day, all in whole nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: CommonDate,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub nanos: i64,
}

impl DateTime {
    pub fn from_point(p: &Point) -> Result<DateTime> {
        require_second_term(p)?;
        let (days, ns_of_day) = split_day(p.canonical());
        let date = gregorian::from_day_count(days);
        let hour = ns_of_day.div_euclid(NS_PER_HOUR);
        let rem = ns_of_day.rem_euclid(NS_PER_HOUR);
        let minute = rem.div_euclid(NS_PER_MINUTE);
        let rem = rem.rem_euclid(NS_PER_MINUTE);
        let second = rem.div_euclid(NS_PER_SECOND);
        let nanos = rem.rem_euclid(NS_PER_SECOND);
        Ok(DateTime { date, hour, minute, second, nanos })
    }

    pub fn to_point(self, unit: &str) -> Point {
        let days = gregorian::to_day_count(self.date);
        let ns_of_day =
            self.hour * NS_PER_HOUR + self.minute * NS_PER_MINUTE + self.second * NS_PER_SECOND + self.nanos;
        Point::from_canonical_raw(Term::Second, unit, join_day(days, ns_of_day))
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from_day_count(gregorian::to_day_count(self.date))
    }
}

/// `select(part, of)` over the well-known calendar/time parts.
pub fn select(p: &Point, part: &str, of: Option<&str>) -> Result<i64> {
    let dt = DateTime::from_point(p)?;
    match (part, of) {
        ("hour", Some("day")) | ("hour", None) => Ok(dt.hour),
        ("minute", Some("hour")) => Ok(dt.minute),
        ("second", Some("minute")) => Ok(dt.second),
        ("day", Some("month")) => Ok(dt.date.day as i64),
        ("day", Some("week")) => Ok(dt.weekday().index()),
        ("month", Some("year")) => Ok(dt.date.month as i64),
        ("year", None) => Ok(dt.date.year as i64),
        ("year", Some("century")) => Ok((dt.date.year as i64).rem_euclid(100)),
        ("year", Some("decade")) => Ok((dt.date.year as i64).rem_euclid(10)),
        ("week", None) | ("week", Some("year")) => {
            let day = gregorian::to_day_count(dt.date);
            Ok(iso_week::to_iso_week(day).1 as i64)
        }
        _ => Err(TimeError::MissingContainer(part.to_string())),
    }
}

/// `select('subsecond')`: exact rational fraction of a second, in `[0, 1)`.
pub fn select_subsecond(p: &Point) -> Result<BigRational> {
    require_second_term(p)?;
    let (_, ns_of_day) = split_day(p.canonical());
    let nanos_into_second = ns_of_day.rem_euclid(NS_PER_SECOND);
    Ok(BigRational::new(BigInt::from(nanos_into_second), BigInt::from(NS_PER_SECOND)))
}

/// `update(part, value, of)`: replace one calendar/time component and
/// renormalize, carrying overflow/underflow into coarser fields exactly as
/// [`gregorian::normalize`] does for the date half.
pub fn update(p: &Point, part: &str, value: i64, of: Option<&str>) -> Result<Point> {
    let mut dt = DateTime::from_point(p)?;
    match (part, of) {
        ("year", None) => dt.date.year = value as i32,
        ("month", Some("year")) => dt.date.month = value as i32,
        ("day", Some("month")) => dt.date.day = value as i32,
        ("hour", Some("day")) | ("hour", None) => dt.hour = value,
        ("minute", Some("hour")) => dt.minute = value,
        ("second", Some("minute")) => dt.second = value,
        _ => return Err(TimeError::MissingContainer(part.to_string())),
    }
    dt.date = gregorian::normalize(dt.date);
    // `to_point` sums hour/minute/second/nanos as a plain nanosecond offset
    // from midnight of `dt.date`; an out-of-range or negative hour here
    // still encodes the correct absolute instant, since decoding later goes
    // back through a div/mod by day length (see `split_day`).
    Ok(dt.to_point(p.unit()))
}

/// `truncate(unit)`: zero every part finer than `unit`.
pub fn truncate(p: &Point, unit: &str) -> Result<Point> {
    let dt = DateTime::from_point(p)?;
    let truncated = match unit {
        "day" => DateTime { date: dt.date, hour: 0, minute: 0, second: 0, nanos: 0 },
        "hour" => DateTime { date: dt.date, hour: dt.hour, minute: 0, second: 0, nanos: 0 },
        "minute" => DateTime { date: dt.date, hour: dt.hour, minute: dt.minute, second: 0, nanos: 0 },
        "second" => {
            DateTime { date: dt.date, hour: dt.hour, minute: dt.minute, second: dt.second, nanos: 0 }
        }
        "month" => DateTime {
            date: CommonDate::new(dt.date.year, dt.date.month, 0),
            hour: 0,
            minute: 0,
            second: 0,
            nanos: 0,
        },
        "year" => DateTime {
            date: CommonDate::new(dt.date.year, 0, 0),
            hour: 0,
            minute: 0,
            second: 0,
            nanos: 0,
        },
        "week" => {
            let day = gregorian::to_day_count(dt.date);
            let monday = Weekday::Monday.on_or_before(day);
            DateTime { date: gregorian::from_day_count(monday), hour: 0, minute: 0, second: 0, nanos: 0 }
        }
        _ => return Err(TimeError::MissingContainer(unit.to_string())),
    };
    Ok(truncated.to_point(p.unit()))
}

/// The nth occurrence (0-based from the start, negative from the end, so
/// `-1` is the last) of `weekday` within the Gregorian month containing
/// `p`. Implements the documented "last Thursday of this month" alignment
/// contract.
pub fn align_weekday_in_month(p: &Point, weekday: Weekday, index: i64) -> Result<Point> {
    let dt = DateTime::from_point(p)?;
    let year = dt.date.year;
    let month = dt.date.month;
    let start = gregorian::to_day_count(CommonDate::new(year, month, 0));
    let len = gregorian::month_length(year, month) as i64;
    let end = start + len;
    let day = if index >= 0 {
        let first = weekday.on_or_after(start);
        first + index * 7
    } else {
        let last = weekday.on_or_before(end - 1);
        last + (index + 1) * 7
    };
    if day < start || day >= end {
        return Err(TimeError::InvalidDay(day as i32));
    }
    let new_date = gregorian::from_day_count(day);
    Ok(DateTime { date: new_date, ..dt }.to_point(p.unit()))
}

/// Add `n` whole months to a `second`-term Point, clamping the day to the
/// target month's length (e.g. 31 Jan + 1 month -> 28 or 29 Feb, never
/// rolling into March).
pub fn elapse_months(p: &Point, n: i64) -> Result<Point> {
    let dt = DateTime::from_point(p)?;
    let total_months = dt.date.year as i64 * 12 + dt.date.month as i64 + n;
    let year = total_months.div_euclid(12) as i32;
    let month = total_months.rem_euclid(12) as i32;
    let max_day = gregorian::month_length(year, month) as i32 - 1;
    let day = dt.date.day.min(max_day);
    let date = CommonDate::new(year, month, day);
    Ok(DateTime { date, ..dt }.to_point(p.unit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cal::gregorian::CommonDate;
    use crate::value::Point;
    use proptest::proptest;

    fn point_at(y: i32, m: i32, d: i32, h: i64, mi: i64, s: i64) -> Point {
        DateTime { date: CommonDate::new(y, m, d), hour: h, minute: mi, second: s, nanos: 0 }
            .to_point("second")
    }

    #[test]
    fn select_day_of_month_is_zero_based() {
        let p = point_at(2000, 0, 0, 12, 45, 0);
        assert_eq!(select(&p, "day", Some("month")).unwrap(), 0);
    }

    #[test]
    fn update_to_last_thursday_of_month() {
        // 2010-02-08T12:30:00 -> last Thursday of February 2010 is the 25th.
        let p = point_at(2010, 1, 7, 12, 30, 0);
        let aligned = align_weekday_in_month(&p, Weekday::Thursday, -1).unwrap();
        let dt = DateTime::from_point(&aligned).unwrap();
        assert_eq!(dt.date, CommonDate::new(2010, 1, 24));
    }

    #[test]
    fn select_date_normalizes_day_zero() {
        // Timestamp.of(iso="2000-01-00T12:45:00").select('date') == (1999, 12, 31)
        let p = DateTime {
            date: gregorian::normalize(CommonDate::new(2000, 0, -1)),
            hour: 12,
            minute: 45,
            second: 0,
            nanos: 0,
        }
        .to_point("second");
        let dt = DateTime::from_point(&p).unwrap();
        assert_eq!(dt.date, CommonDate::new(1999, 11, 30));
    }

    #[test]
    fn truncate_to_week_snaps_to_monday() {
        let p = point_at(2024, 5, 14, 9, 0, 0); // a Friday
        let t = truncate(&p, "week").unwrap();
        let dt = DateTime::from_point(&t).unwrap();
        assert_eq!(dt.weekday(), Weekday::Monday);
        assert!(DateTime::from_point(&p).unwrap().date >= dt.date);
    }

    #[test]
    fn elapse_months_clamps_to_shorter_month() {
        let p = point_at(2021, 0, 30, 0, 0, 0); // 31 Jan 2021
        let next = elapse_months(&p, 1).unwrap();
        let dt = DateTime::from_point(&next).unwrap();
        assert_eq!(dt.date, CommonDate::new(2021, 1, 27)); // 28 Feb 2021
    }

    #[test]
    fn select_week_matches_iso_week_calendar() {
        let p = point_at(2016, 0, 3, 0, 0, 0); // 2016-01-04, ISO week 1
        assert_eq!(select(&p, "week", Some("year")).unwrap(), 1);
    }

    proptest! {
        #[test]
        fn truncate_idempotent(days in -100_000_i64..100_000_i64, ns in 0_i64..NS_PER_DAY) {
            let p = Point::from_canonical_raw(Term::Second, "second", join_day(days, ns));
            for unit in ["day", "hour", "minute", "second", "month", "year", "week"] {
                let once = truncate(&p, unit).unwrap();
                let twice = truncate(&once, unit).unwrap();
                assert_eq!(once, twice);
                assert!(once <= p);
            }
        }

        #[test]
        fn select_update_fixed_point(days in -100_000_i64..100_000_i64) {
            let p = Point::from_canonical_raw(Term::Second, "second", join_day(days, 0));
            let v = select(&p, "day", Some("month")).unwrap();
            let back = update(&p, "day", v, Some("month")).unwrap();
            assert_eq!(p, back);
        }
    }
}
