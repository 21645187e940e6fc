// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ISO 8601 text codec: a fixed-width, hand-scanned parser (no regex --
//! the grammar's field widths are known in advance, so a byte cursor is
//! both simpler and cheaper than a general pattern matcher) plus a
//! corresponding formatter.
//!
//! Accepted grammar: `YYYY-MM-DDTHH:MM:SS[.fraction][Z|+HH:MM|-HH:MM]`. The
//! date and time separator may be `T` or a single space. A missing
//! time-of-day defaults to midnight; a missing offset leaves the value
//! naive (caller-supplied, not assumed UTC).

use crate::cal::gregorian::{self, CommonDate};
use crate::error::{Result, TimeError};
use crate::part::DateTime;
use crate::units::Term;
use crate::value::Point;
use num_bigint::BigInt;

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Cursor { bytes: s.as_bytes(), pos: 0 }
    }

    fn fail(&self, reason: &str) -> TimeError {
        TimeError::ParseError { offset: self.pos, reason: reason.to_string() }
    }

    fn take_digits(&mut self, n: usize) -> Result<i64> {
        if self.pos + n > self.bytes.len() {
            return Err(self.fail("unexpected end of input"));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        if !slice.iter().all(u8::is_ascii_digit) {
            return Err(self.fail("expected digits"));
        }
        self.pos += n;
        Ok(std::str::from_utf8(slice).unwrap().parse().unwrap())
    }

    fn take_signed_year(&mut self) -> Result<i64> {
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        let magnitude = self.take_digits(4)?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() != Some(byte) {
            return Err(self.fail(&format!("expected `{}`", byte as char)));
        }
        self.pos += 1;
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// An offset from UTC in seconds east, or a marker that the text carried no
/// offset at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    Utc,
    FixedSeconds(i32),
    Naive,
}

/// The decoded result of parsing an ISO 8601 string: the calendar
/// components plus whatever offset annotation (if any) followed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
    pub date: CommonDate,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub nanos: i64,
    pub offset: Offset,
}

fn parse_offset(c: &mut Cursor) -> Result<Offset> {
    match c.peek() {
        None => Ok(Offset::Naive),
        Some(b'Z') => {
            c.pos += 1;
            Ok(Offset::Utc)
        }
        Some(sign @ (b'+' | b'-')) => {
            c.pos += 1;
            let hour = c.take_digits(2)?;
            let minute = if c.peek() == Some(b':') {
                c.pos += 1;
                c.take_digits(2)?
            } else if !c.at_end() {
                c.take_digits(2)?
            } else {
                0
            };
            let total = (hour * 3600 + minute * 60) as i32;
            Ok(Offset::FixedSeconds(if sign == b'-' { -total } else { total }))
        }
        Some(_) => Err(c.fail("expected `Z` or a numeric offset")),
    }
}

/// Parse an ISO 8601 date-time. The calendar components are returned as
/// written (not normalized); call [`crate::cal::gregorian::normalize`] to
/// resolve an out-of-range day such as `2000-01-00`.
pub fn parse(text: &str) -> Result<Parsed> {
    let mut c = Cursor::new(text);
    let year = c.take_signed_year()?;
    c.expect(b'-')?;
    let month1 = c.take_digits(2)?;
    c.expect(b'-')?;
    let day1 = c.take_digits(2)?;

    if c.at_end() {
        return Ok(Parsed {
            date: CommonDate::new(year as i32, (month1 - 1) as i32, (day1 - 1) as i32),
            hour: 0,
            minute: 0,
            second: 0,
            nanos: 0,
            offset: Offset::Naive,
        });
    }

    match c.peek() {
        Some(b'T') | Some(b' ') => c.pos += 1,
        _ => return Err(c.fail("expected `T` or ` ` before time of day")),
    }

    let hour = c.take_digits(2)?;
    c.expect(b':')?;
    let minute = c.take_digits(2)?;
    c.expect(b':')?;
    let second = c.take_digits(2)?;

    let nanos = if c.peek() == Some(b'.') {
        c.pos += 1;
        let start = c.pos;
        while c.peek().map(|b| b.is_ascii_digit()).unwrap_or(false) {
            c.pos += 1;
        }
        let digits = std::str::from_utf8(&c.bytes[start..c.pos]).unwrap();
        if digits.is_empty() {
            return Err(c.fail("expected a fractional-second digit"));
        }
        let mut padded = digits.to_string();
        padded.truncate(9);
        while padded.len() < 9 {
            padded.push('0');
        }
        padded.parse::<i64>().unwrap()
    } else {
        0
    };

    let offset = parse_offset(&mut c)?;
    if !c.at_end() {
        return Err(c.fail("trailing characters after offset"));
    }

    Ok(Parsed {
        date: CommonDate::new(year as i32, (month1 - 1) as i32, (day1 - 1) as i32),
        hour,
        minute,
        second,
        nanos,
        offset,
    })
}

/// Parse and normalize directly into a `second`-term Point. Any `Offset`
/// other than `Utc` is applied as a shift back to UTC; `Naive` is treated
/// as already UTC (callers needing a different convention should inspect
/// [`parse`]'s `Parsed::offset` themselves).
pub fn parse_to_point(text: &str) -> Result<Point> {
    let parsed = parse(text)?;
    let date = gregorian::normalize(parsed.date);
    let point = DateTime {
        date,
        hour: parsed.hour,
        minute: parsed.minute,
        second: parsed.second,
        nanos: parsed.nanos,
    }
    .to_point("second");
    let shift = match parsed.offset {
        Offset::Utc | Offset::Naive => 0,
        Offset::FixedSeconds(s) => s,
    };
    if shift == 0 {
        Ok(point)
    } else {
        let shifted = point.canonical() - BigInt::from(shift) * BigInt::from(1_000_000_000i64);
        Ok(Point::from_canonical_raw(Term::Second, "second", shifted))
    }
}

/// Format a `second`-term Point as `YYYY-MM-DDTHH:MM:SS[.fraction]Z`,
/// including a fractional part only when the instant carries sub-second
/// precision.
pub fn format(p: &Point) -> Result<String> {
    let dt = DateTime::from_point(p)?;
    let CommonDate { year, month, day } = dt.date;
    let mut out = if (0..10000).contains(&year) {
        format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}", year, month + 1, day + 1, dt.hour, dt.minute, dt.second)
    } else {
        format!("{:05}-{:02}-{:02}T{:02}:{:02}:{:02}", year, month + 1, day + 1, dt.hour, dt.minute, dt.second)
    };
    if dt.nanos != 0 {
        let mut frac = format!("{:09}", dt.nanos);
        while frac.ends_with('0') {
            frac.pop();
        }
        out.push('.');
        out.push_str(&frac);
    }
    out.push('Z');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_datetime() {
        let parsed = parse("2010-02-08T12:30:00Z").unwrap();
        assert_eq!(parsed.date, CommonDate::new(2010, 1, 7));
        assert_eq!(parsed.hour, 12);
        assert_eq!(parsed.minute, 30);
        assert_eq!(parsed.offset, Offset::Utc);
    }

    #[test]
    fn date_only_defaults_to_midnight() {
        let parsed = parse("2000-01-01").unwrap();
        assert_eq!(parsed.hour, 0);
        assert_eq!(parsed.offset, Offset::Naive);
    }

    #[test]
    fn normalizes_out_of_range_day() {
        // 2000-01-00T12:45:00 -> 1999-12-31T12:45:00
        let p = parse_to_point("2000-01-00T12:45:00Z").unwrap();
        let dt = DateTime::from_point(&p).unwrap();
        assert_eq!(dt.date, CommonDate::new(1999, 11, 30));
        assert_eq!(dt.hour, 12);
        assert_eq!(dt.minute, 45);
    }

    #[test]
    fn roundtrips_through_format() {
        let p = parse_to_point("2024-06-15T09:30:05.250Z").unwrap();
        let text = format(&p).unwrap();
        assert_eq!(text, "2024-06-15T09:30:05.25Z");
        let back = parse_to_point(&text).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn applies_numeric_offset() {
        let utc = parse_to_point("2024-01-01T00:00:00Z").unwrap();
        let plus_one = parse_to_point("2024-01-01T01:00:00+01:00").unwrap();
        assert_eq!(utc, plus_one);
    }

    #[test]
    fn rejects_malformed_separator() {
        assert!(parse("2024/01/01").is_err());
    }
}
