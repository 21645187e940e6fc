// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proleptic Gregorian day<->(year, month, day) conversion.
//!
//! Adapted from the classic 400/100/4/1-year cycle decomposition (Reingold &
//! Dershowitz, *Calendrical Calculations*, Listings 2.16-2.23), re-anchored
//! to day 0 = 1970-01-01 instead of the Rata Die epoch, and re-indexed so
//! month and day are 0-based internally (see the origin-0 design note).

/// Rata Die (days since 0001-01-01) of 1970-01-01.
const UNIX_EPOCH_RD: i64 = 719163;
/// Rata Die of the Gregorian epoch, 0001-01-01.
const GREGORIAN_EPOCH_RD: i64 = 1;

/// A year/month/day triple, not specific to any wire format. Month and day
/// are 0-based: month 0 is January, day 0 is the first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CommonDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl CommonDate {
    pub fn new(year: i32, month: i32, day: i32) -> CommonDate {
        CommonDate { year, month, day }
    }
}

pub fn is_leap(year: i32) -> bool {
    let y = year as i64;
    y.rem_euclid(4) == 0 && (y.rem_euclid(100) != 0 || y.rem_euclid(400) == 0)
}

pub fn month_length(year: i32, month0: i32) -> i32 {
    match month0 {
        0 => 31,
        1 => if is_leap(year) { 29 } else { 28 },
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => unreachable!("month0 normalized into 0..12"),
    }
}

/// Resolve an out-of-range month/day component by carrying into the next
/// coarser field: a month outside 0..12 carries into the year; a day
/// outside the month's length carries into the month (and transitively the
/// year). `day = 0` means "first day"; `day = -1` means "last day of the
/// previous month".
pub fn normalize(date: CommonDate) -> CommonDate {
    let mut year = date.year as i64;
    let mut month = date.month as i64;
    year += month.div_euclid(12);
    month = month.rem_euclid(12);

    let mut day = date.day as i64;
    loop {
        if day < 0 {
            month -= 1;
            if month < 0 {
                month = 11;
                year -= 1;
            }
            day += month_length(year as i32, month as i32) as i64;
        } else {
            let len = month_length(year as i32, month as i32) as i64;
            if day >= len {
                day -= len;
                month += 1;
                if month > 11 {
                    month = 0;
                    year += 1;
                }
            } else {
                break;
            }
        }
    }
    CommonDate { year: year as i32, month: month as i32, day: day as i32 }
}

fn prior_elapsed_days(year: i32) -> i64 {
    let year = year as i64;
    let offset_y = 365 * (year - 1);
    let offset_leap =
        (year - 1).div_euclid(4) - (year - 1).div_euclid(100) + (year - 1).div_euclid(400);
    offset_y + offset_leap
}

// month0/day0 must already be in range.
fn ordinal_1based(year: i32, month0: i32, day0: i32) -> i64 {
    let month1 = (month0 + 1) as i64;
    let day1 = (day0 + 1) as i64;
    let offset_m = ((367 * month1) - 362).div_euclid(12);
    let offset_x = if month1 <= 2 {
        0
    } else if is_leap(year) {
        -1
    } else {
        -2
    };
    offset_m + offset_x + day1
}

fn common_from_ordinal_1based(year: i32, ordinal1: i64) -> (i32, i32) {
    let prior_days = ordinal1 - 1;
    let ord_march1 = ordinal_1based(year, 2, 0);
    let correction = if ordinal1 < ord_march1 {
        0
    } else if is_leap(year) {
        1
    } else {
        2
    };
    let month1 = (12 * (prior_days + correction) + 373).div_euclid(367);
    let ord_month1 = ordinal_1based(year, (month1 - 1) as i32, 0);
    let day1 = (ordinal1 - ord_month1) + 1;
    ((month1 - 1) as i32, (day1 - 1) as i32)
}

/// Day of year, 0-based (0 = 1 January).
pub fn day_of_year(date: CommonDate) -> i32 {
    let d = normalize(date);
    (ordinal_1based(d.year, d.month, d.day) - 1) as i32
}

/// Days elapsed since 1970-01-01 (negative for earlier dates). Normalizes
/// out-of-range month/day components first.
pub fn to_day_count(date: CommonDate) -> i64 {
    let d = normalize(date);
    let rd = prior_elapsed_days(d.year) + ordinal_1based(d.year, d.month, d.day);
    rd - UNIX_EPOCH_RD
}

/// Inverse of [`to_day_count`].
pub fn from_day_count(day: i64) -> CommonDate {
    let rd = day + UNIX_EPOCH_RD;
    let d0 = rd - GREGORIAN_EPOCH_RD;
    let n400 = d0.div_euclid(146097);
    let d1 = d0.rem_euclid(146097);
    let n100 = d1.div_euclid(36524);
    let d2 = d1.rem_euclid(36524);
    let n4 = d2.div_euclid(1461);
    let d3 = d2.rem_euclid(1461);
    let n1 = d3.div_euclid(365);
    let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
    let (year, ordinal1) = if n100 == 4 || n1 == 4 {
        (year, 366)
    } else {
        (year + 1, d3.rem_euclid(365) + 1)
    };
    let (month, day) = common_from_ordinal_1based(year as i32, ordinal1);
    CommonDate { year: year as i32, month, day }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    #[test]
    fn epoch_roundtrips() {
        assert_eq!(to_day_count(CommonDate::new(1970, 0, 0)), 0);
        assert_eq!(from_day_count(0), CommonDate::new(1970, 0, 0));
    }

    #[test]
    fn known_days() {
        // RD 1 = 0001-01-01 -> day count = 1 - 719163
        assert_eq!(to_day_count(CommonDate::new(1, 0, 0)), 1 - 719163);
        // RD 146097 = 0400-12-31
        assert_eq!(to_day_count(CommonDate::new(400, 11, 30)), 146097 - 719163);
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap(2000));
        assert!(!is_leap(1900));
        assert!(is_leap(2004));
        assert!(!is_leap(2001));
    }

    #[test]
    fn gregorian_normalization_seed() {
        // Date.of(year=Y, month=0, day=-1) == Date.of(year=Y-1, month=11, day=30)
        let a = normalize(CommonDate::new(2000, 0, -1));
        let b = normalize(CommonDate::new(1999, 11, 30));
        assert_eq!(a, b);
    }

    #[test]
    fn overflowing_day_rolls_into_next_month() {
        // 2000-01-00 is the first of January; day=-1 is 31 Dec 1999.
        let d = normalize(CommonDate::new(2000, 0, -1));
        assert_eq!(d, CommonDate::new(1999, 11, 30));
    }

    proptest! {
        #[test]
        fn roundtrip(day in -1_000_000_i64..1_000_000_i64) {
            let d = from_day_count(day);
            assert_eq!(to_day_count(d), day);
        }

        #[test]
        fn normalize_idempotent(y in -5000_i32..5000, m in -50_i32..50, dd in -50_i32..80) {
            let once = normalize(CommonDate::new(y, m, dd));
            let twice = normalize(once);
            assert_eq!(once, twice);
        }
    }
}
