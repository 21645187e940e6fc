// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! POSIX TZ rule strings (the `tzfile(5)` version 2+ footer, and the `TZ`
//! environment variable's non-path form): `std offset[dst offset[,rule,rule]]`.
//! A transition rule is one of the three POSIX forms: `Mm.w.d` (month, week,
//! weekday), `Jn` (Julian day 1..365, Feb 29 never counted, even in leap
//! years), or bare `n` (day-of-year 0..365, Feb 29 counted in leap years).

use crate::cal::gregorian::{self, CommonDate};
use crate::cal::weekday::Weekday;
use crate::error::{Result, TimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWeekDay {
    pub month: u8,
    pub week: u8,
    pub weekday: u8,
}

impl MonthWeekDay {
    /// The day count of this rule's occurrence in the given Gregorian year.
    fn day_in(self, year: i32) -> i64 {
        let wd = [
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ][self.weekday as usize];
        let month0 = self.month as i32 - 1;
        if self.week == 5 {
            let start = gregorian::to_day_count(CommonDate::new(year, month0, 0));
            let len = gregorian::month_length(year, month0) as i64;
            wd.on_or_before(start + len - 1)
        } else {
            let start = gregorian::to_day_count(CommonDate::new(year, month0, 0));
            let first = wd.on_or_after(start);
            first + (self.week as i64 - 1) * 7
        }
    }
}

/// A parsed POSIX transition-date rule, in any of the three forms the
/// grammar allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `Jn`: Julian day `1..=365`. Feb 29 is never counted, even in a leap
    /// year, so day 60 always lands on March 1st.
    Julian(u16),
    /// `n`: day-of-year `0..=365`, zero-based. Feb 29 is counted in leap
    /// years, so this form can reach 365 only in a leap year.
    DayOfYear(u16),
    /// `Mm.w.d`: month/week/weekday.
    MonthWeekDay(MonthWeekDay),
}

impl Rule {
    /// The day count of this rule's occurrence in the given Gregorian year.
    fn day_in(self, year: i32) -> i64 {
        let jan1 = gregorian::to_day_count(CommonDate::new(year, 0, 0));
        match self {
            Rule::Julian(n) => {
                let n = n as i64;
                let skip_leap_day = gregorian::is_leap(year) && n >= 60;
                jan1 + n - 1 + if skip_leap_day { 1 } else { 0 }
            }
            Rule::DayOfYear(n) => jan1 + n as i64,
            Rule::MonthWeekDay(mwd) => mwd.day_in(year),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRule {
    pub offset_seconds: i32,
    pub start: Rule,
    pub start_time_seconds: i32,
    pub end: Rule,
    pub end_time_seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosixTz {
    pub std_name: String,
    pub std_offset_seconds: i32,
    pub dst: Option<(String, DstRule)>,
}

struct P<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> P<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn take_name(&mut self) -> Result<String> {
        let start = self.pos;
        if self.peek() == Some(b'<') {
            self.pos += 1;
            while self.peek().is_some() && self.peek() != Some(b'>') {
                self.pos += 1;
            }
            let name = String::from_utf8_lossy(&self.bytes[start + 1..self.pos]).into_owned();
            self.pos += 1;
            Ok(name)
        } else {
            while self.peek().map(|b| b.is_ascii_alphabetic()).unwrap_or(false) {
                self.pos += 1;
            }
            if self.pos == start {
                return Err(self.fail("expected a zone abbreviation"));
            }
            Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
        }
    }

    fn fail(&self, reason: &str) -> TimeError {
        TimeError::ParseError { offset: self.pos, reason: reason.to_string() }
    }

    fn take_signed_offset(&mut self) -> Result<i32> {
        let negative = self.peek() == Some(b'-');
        if negative || self.peek() == Some(b'+') {
            self.pos += 1;
        }
        let hour = self.take_int()?;
        let mut total = hour * 3600;
        if self.peek() == Some(b':') {
            self.pos += 1;
            total += self.take_int()? * 60;
            if self.peek() == Some(b':') {
                self.pos += 1;
                total += self.take_int()?;
            }
        }
        Ok(if negative { -(total as i32) } else { total as i32 })
    }

    fn take_int(&mut self) -> Result<i64> {
        let start = self.pos;
        while self.peek().map(|b| b.is_ascii_digit()).unwrap_or(false) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.fail("expected digits"));
        }
        Ok(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap().parse().unwrap())
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        if self.peek() != Some(b) {
            return Err(self.fail(&format!("expected `{}`", b as char)));
        }
        self.pos += 1;
        Ok(())
    }

    fn take_rule(&mut self) -> Result<Rule> {
        match self.peek() {
            Some(b'M') => {
                self.pos += 1;
                let month = self.take_int()? as u8;
                self.expect(b'.')?;
                let week = self.take_int()? as u8;
                self.expect(b'.')?;
                let weekday = self.take_int()? as u8;
                Ok(Rule::MonthWeekDay(MonthWeekDay { month, week, weekday }))
            }
            Some(b'J') => {
                self.pos += 1;
                Ok(Rule::Julian(self.take_int()? as u16))
            }
            Some(b) if b.is_ascii_digit() => Ok(Rule::DayOfYear(self.take_int()? as u16)),
            _ => Err(self.fail("expected a transition rule (`M`, `J`, or a digit)")),
        }
    }

    fn take_transition_time(&mut self) -> Result<i32> {
        if self.peek() != Some(b'/') {
            return Ok(2 * 3600);
        }
        self.pos += 1;
        self.take_signed_offset()
    }
}

/// Parse a POSIX TZ rule string such as `EST5EDT,M3.2.0,M11.1.0` or the
/// fixed-offset-only `UTC0`.
pub fn parse(text: &str) -> Result<PosixTz> {
    let mut p = P { bytes: text.as_bytes(), pos: 0 };
    let std_name = p.take_name()?;
    let std_offset_seconds = if p.peek().is_some() && p.peek() != Some(b',') {
        -p.take_signed_offset()?
    } else {
        0
    };
    if p.pos >= p.bytes.len() {
        return Ok(PosixTz { std_name, std_offset_seconds, dst: None });
    }
    let dst_name = p.take_name()?;
    let dst_offset_seconds = if p.peek().is_some() && p.peek() != Some(b',') {
        -p.take_signed_offset()?
    } else {
        std_offset_seconds + 3600
    };
    p.expect(b',')?;
    let start = p.take_rule()?;
    let start_time_seconds = p.take_transition_time()?;
    p.expect(b',')?;
    let end = p.take_rule()?;
    let end_time_seconds = p.take_transition_time()?;
    Ok(PosixTz {
        std_name,
        std_offset_seconds,
        dst: Some((
            dst_name,
            DstRule { offset_seconds: dst_offset_seconds, start, start_time_seconds, end, end_time_seconds },
        )),
    })
}

impl PosixTz {
    /// UTC offset, in seconds east, applying at `unix_seconds`.
    pub fn offset_at(&self, unix_seconds: i64) -> i32 {
        let Some((_, rule)) = &self.dst else {
            return self.std_offset_seconds;
        };
        let day = unix_seconds.div_euclid(86400);
        let date = gregorian::from_day_count(day);
        let year = date.year;
        let start = rule.start.day_in(year) * 86400 + rule.start_time_seconds as i64 - self.std_offset_seconds as i64;
        let end = rule.end.day_in(year) * 86400 + rule.end_time_seconds as i64 - rule.offset_seconds as i64;
        let in_dst = if start < end { unix_seconds >= start && unix_seconds < end } else { unix_seconds >= start || unix_seconds < end };
        if in_dst {
            rule.offset_seconds
        } else {
            self.std_offset_seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_offset() {
        let tz = parse("UTC0").unwrap();
        assert_eq!(tz.std_offset_seconds, 0);
        assert!(tz.dst.is_none());
    }

    #[test]
    fn parses_us_eastern() {
        let tz = parse("EST5EDT,M3.2.0,M11.1.0").unwrap();
        assert_eq!(tz.std_offset_seconds, -5 * 3600);
        let dst = tz.dst.as_ref().unwrap();
        assert_eq!(dst.1.offset_seconds, -4 * 3600);
    }

    #[test]
    fn offset_switches_across_dst_boundary() {
        let tz = parse("EST5EDT,M3.2.0,M11.1.0").unwrap();
        // 2024-01-15 is standard time.
        let jan = gregorian::to_day_count(CommonDate::new(2024, 0, 14)) * 86400 + 12 * 3600;
        assert_eq!(tz.offset_at(jan), -5 * 3600);
        // 2024-07-15 is daylight time.
        let jul = gregorian::to_day_count(CommonDate::new(2024, 6, 14)) * 86400 + 12 * 3600;
        assert_eq!(tz.offset_at(jul), -4 * 3600);
    }

    #[test]
    fn julian_rule_never_counts_feb29() {
        // J60 is always March 1st, leap year or not.
        assert_eq!(Rule::Julian(60).day_in(2024), gregorian::to_day_count(CommonDate::new(2024, 2, 0)));
        assert_eq!(Rule::Julian(60).day_in(2023), gregorian::to_day_count(CommonDate::new(2023, 2, 0)));
    }

    #[test]
    fn day_of_year_rule_counts_feb29_in_leap_years() {
        // Day 59 (0-based) is Feb 29 in a leap year, March 1st otherwise.
        assert_eq!(Rule::DayOfYear(59).day_in(2024), gregorian::to_day_count(CommonDate::new(2024, 1, 28)));
        assert_eq!(Rule::DayOfYear(59).day_in(2023), gregorian::to_day_count(CommonDate::new(2023, 2, 0)));
    }

    #[test]
    fn parses_julian_and_day_of_year_rules() {
        let tz = parse("AEST-10AEDT,J60,J304").unwrap();
        let dst = tz.dst.as_ref().unwrap();
        assert_eq!(dst.1.start, Rule::Julian(60));
        assert_eq!(dst.1.end, Rule::Julian(304));

        let tz = parse("NZST-12NZDT,60,303").unwrap();
        let dst = tz.dst.as_ref().unwrap();
        assert_eq!(dst.1.start, Rule::DayOfYear(60));
        assert_eq!(dst.1.end, Rule::DayOfYear(303));
    }
}
