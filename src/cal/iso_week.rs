// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The ISO week-date calendar: (year, week, weekday), distinct from the
//! Gregorian (year, month, day) triple. Week 1 is the week containing the
//! first Thursday of the Gregorian year (equivalently, containing 4
//! January). A year has 53 ISO weeks iff its 1 January or 31 December falls
//! on a Thursday (Reingold & Dershowitz, Listings 5.1-5.3).

use crate::cal::gregorian::{to_day_count, CommonDate};
use crate::cal::weekday::Weekday;
use crate::error::{Result, TimeError};

fn week1_monday(iso_year: i32) -> i64 {
    let jan4 = to_day_count(CommonDate::new(iso_year, 0, 3));
    Weekday::Monday.on_or_before(jan4)
}

/// `true` if 1 January or 31 December of `year` falls on a Thursday, i.e.
/// the year has a 53rd ISO week.
pub fn is_long_iso_year(year: i32) -> bool {
    let jan1 = to_day_count(CommonDate::new(year, 0, 0));
    let dec31 = to_day_count(CommonDate::new(year, 11, 30));
    Weekday::from_day_count(jan1) == Weekday::Thursday
        || Weekday::from_day_count(dec31) == Weekday::Thursday
}

pub fn weeks_in_iso_year(year: i32) -> u8 {
    if is_long_iso_year(year) { 53 } else { 52 }
}

/// Decompose a day count into its ISO (year, week, weekday).
pub fn to_iso_week(day: i64) -> (i32, u8, Weekday) {
    let wd = Weekday::from_day_count(day);
    let thursday_day = day - wd.index() + 3;
    let iso_year = crate::cal::gregorian::from_day_count(thursday_day).year;
    let week = (day - week1_monday(iso_year)).div_euclid(7) + 1;
    (iso_year, week as u8, wd)
}

/// Inverse of [`to_iso_week`]. `week` must be `1..=weeks_in_iso_year(year)`.
pub fn from_iso_week(year: i32, week: u8, weekday: Weekday) -> Result<i64> {
    if week == 0 || week > weeks_in_iso_year(year) {
        return Err(TimeError::InvalidWeek(week as i32));
    }
    Ok(week1_monday(year) + ((week as i64 - 1) * 7) + weekday.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    #[test]
    fn week1_of_2016_starts_jan4() {
        // 2016-01-04 was a Monday.
        let day = to_day_count(CommonDate::new(2016, 0, 3));
        let (y, w, wd) = to_iso_week(day);
        assert_eq!((y, w, wd), (2016, 1, Weekday::Monday));
    }

    #[test]
    fn year_2020_has_53_weeks() {
        // 2020-12-31 was a Thursday.
        assert!(is_long_iso_year(2020));
        assert_eq!(weeks_in_iso_year(2020), 53);
    }

    proptest! {
        #[test]
        fn roundtrip(day in -200_000_i64..200_000_i64) {
            let (y, w, wd) = to_iso_week(day);
            let back = from_iso_week(y, w, wd).unwrap();
            assert_eq!(back, day);
        }
    }
}
