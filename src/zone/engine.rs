// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A loaded time zone: a tzif transition table, optionally backed by a
//! POSIX footer rule for instants past the last tabulated transition.

use crate::error::Result;
use crate::units::Term;
use crate::value::Point;
use crate::zone::posix::PosixTz;
use crate::zone::tzif::TzifData;

#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    tzif: TzifData,
    footer: Option<PosixTz>,
}

/// What a local (naive) instant maps to: one unambiguous offset, a gap (the
/// wall clock skipped forward and the local time never occurred), or a fold
/// (the wall clock repeated and the local time occurred twice).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    Unambiguous(i32),
    Gap { before: i32, after: i32 },
    Fold { earlier: i32, later: i32 },
}

impl Zone {
    pub fn from_tzif(name: String, tzif: TzifData) -> Result<Zone> {
        let footer = tzif.footer.as_deref().map(crate::zone::posix::parse).transpose()?;
        Ok(Zone { name, tzif, footer })
    }

    fn type_at_unix(&self, unix_seconds: i64) -> Option<&crate::zone::tzif::TtInfo> {
        let idx = self.tzif.transitions.partition_point(|&t| t <= unix_seconds);
        if idx == 0 {
            // Before the first transition: the standard rule of practice is
            // the earliest non-DST type, falling back to index 0.
            self.tzif.types.iter().find(|t| !t.is_dst).or_else(|| self.tzif.types.first())
        } else {
            let type_index = self.tzif.transition_types[idx - 1] as usize;
            self.tzif.types.get(type_index)
        }
    }

    /// UTC offset, in seconds east, applying at the given `second`-term
    /// instant.
    pub fn offset_seconds(&self, instant: &Point) -> i32 {
        let unix = unix_seconds(instant);
        if let Some(last) = self.tzif.transitions.last() {
            if unix > *last {
                if let Some(footer) = &self.footer {
                    return footer.offset_at(unix);
                }
            }
        } else if let Some(footer) = &self.footer {
            return footer.offset_at(unix);
        }
        self.type_at_unix(unix).map(|t| t.utoff).unwrap_or(0)
    }

    /// The zone abbreviation (e.g. "EST", "EDT") applying at `instant`.
    pub fn abbreviation(&self, instant: &Point) -> String {
        let unix = unix_seconds(instant);
        self.type_at_unix(unix).map(|t| t.abbr.clone()).unwrap_or_default()
    }

    /// The designation applying at `instant`: `true` for daylight/summer
    /// time, `false` for standard time.
    pub fn is_dst(&self, instant: &Point) -> bool {
        let unix = unix_seconds(instant);
        self.type_at_unix(unix).map(|t| t.is_dst).unwrap_or(false)
    }

    /// `localize(instant)`: the local wall-clock Point corresponding to the
    /// UTC instant, alongside the offset applied.
    pub fn localize(&self, instant: &Point) -> (Point, i32) {
        let offset = self.offset_seconds(instant);
        let shifted = instant.canonical() + num_bigint::BigInt::from(offset) * 1_000_000_000i64;
        (Point::from_canonical_raw(Term::Second, instant.unit(), shifted), offset)
    }

    /// `find`/`normalize` for a naive local instant: resolve which UTC
    /// offset(s) it could correspond to.
    pub fn ambiguity_for_local(&self, local: &Point) -> Ambiguity {
        let local_unix = unix_seconds(local);
        // Evaluate the offset just before and at the local instant (treated
        // as UTC) to detect whether we straddle a transition.
        let probe = self.offset_seconds(local);
        let candidate_utc = local_unix - probe as i64;
        let reoffset = self.offset_seconds(&Point::from_canonical_raw(
            Term::Second,
            local.unit(),
            num_bigint::BigInt::from(candidate_utc) * 1_000_000_000i64,
        ));
        if reoffset == probe {
            Ambiguity::Unambiguous(probe)
        } else {
            // The offset changed underneath us; without walking the
            // transition table explicitly we can't always tell gap from
            // fold, so report both candidates and let the caller pick.
            if reoffset > probe {
                Ambiguity::Fold { earlier: reoffset, later: probe }
            } else {
                Ambiguity::Gap { before: probe, after: reoffset }
            }
        }
    }

    /// The instants (UTC) of every tabulated transition, ascending.
    pub fn transitions(&self) -> impl Iterator<Item = i64> + '_ {
        self.tzif.transitions.iter().copied()
    }

    /// `normalize(prev_offset, local_pit)`: re-resolve a wall-clock Point
    /// that was computed under `prev_offset` after an arithmetic step that
    /// may have crossed a transition boundary. Returns the corrected local
    /// Point and the offset actually in force there.
    pub fn normalize(&self, prev_offset: i32, local: &Point) -> (Point, i32) {
        let local_unix = unix_seconds(local);
        let utc_unix = local_unix - prev_offset as i64;
        let utc = Point::from_canonical_raw(
            Term::Second,
            local.unit(),
            num_bigint::BigInt::from(utc_unix) * 1_000_000_000i64,
        );
        self.localize(&utc)
    }

    /// `slice(start, stop)`: every tabulated `(transition, offset_after)`
    /// pair with transition time in `[start, stop)`. If `start` does not
    /// coincide with a transition, the first yielded pair is the most
    /// recent transition at or before `start` (so the caller always learns
    /// the offset in force at the start of the range).
    pub fn slice(&self, start: &Point, stop: &Point) -> Vec<(Point, i32)> {
        let start_unix = unix_seconds(start);
        let stop_unix = unix_seconds(stop);
        let mut out = Vec::new();
        let first = self.tzif.transitions.partition_point(|&t| t <= start_unix);
        let from = first.saturating_sub(1);
        for idx in from..self.tzif.transitions.len() {
            let t = self.tzif.transitions[idx];
            if t >= stop_unix {
                break;
            }
            if t < start_unix && idx != from {
                continue;
            }
            let type_index = self.tzif.transition_types[idx] as usize;
            let offset = self.tzif.types.get(type_index).map(|t| t.utoff).unwrap_or(0);
            let pit = Point::from_canonical_raw(
                Term::Second,
                start.unit(),
                num_bigint::BigInt::from(t) * 1_000_000_000i64,
            );
            out.push((pit, offset));
        }
        out
    }
}

fn unix_seconds(p: &Point) -> i64 {
    use num_integer::Integer;
    let (q, _) = p.canonical().div_mod_floor(&num_bigint::BigInt::from(1_000_000_000i64));
    q.to_string().parse().unwrap_or(i64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::tzif::TtInfo;

    fn fixed_zone(name: &str, offset: i32) -> Zone {
        let tzif = TzifData {
            transitions: vec![],
            transition_types: vec![],
            types: vec![TtInfo { utoff: offset, is_dst: false, abbr: name.to_string() }],
            footer: None,
        };
        Zone::from_tzif(name.to_string(), tzif).unwrap()
    }

    #[test]
    fn fixed_offset_zone_reports_constant_offset() {
        let z = fixed_zone("UTC", 0);
        let p = Point::from_canonical_raw(Term::Second, "second", num_bigint::BigInt::from(0));
        assert_eq!(z.offset_seconds(&p), 0);
    }

    #[test]
    fn localize_shifts_by_offset() {
        let z = fixed_zone("JST", 9 * 3600);
        let p = Point::from_canonical_raw(Term::Second, "second", num_bigint::BigInt::from(0));
        let (local, offset) = z.localize(&p);
        assert_eq!(offset, 9 * 3600);
        assert_eq!(local.canonical(), &(num_bigint::BigInt::from(9 * 3600) * 1_000_000_000i64));
    }

    #[test]
    fn fixed_zone_slice_is_empty() {
        let z = fixed_zone("MST", -7 * 3600);
        let start = Point::from_canonical_raw(Term::Second, "second", num_bigint::BigInt::from(0));
        let stop = Point::from_canonical_raw(
            Term::Second,
            "second",
            num_bigint::BigInt::from(365 * 24 * 3600i64),
        );
        assert!(z.slice(&start, &stop).is_empty());
    }

    #[test]
    fn normalize_reports_offset_change_across_transition() {
        let tzif = TzifData {
            transitions: vec![1_000_000],
            transition_types: vec![1],
            types: vec![
                TtInfo { utoff: 0, is_dst: false, abbr: "STD".to_string() },
                TtInfo { utoff: 3600, is_dst: true, abbr: "DST".to_string() },
            ],
            footer: None,
        };
        let z = Zone::from_tzif("Test/Zone".to_string(), tzif).unwrap();
        let local = Point::from_canonical_raw(
            Term::Second,
            "second",
            num_bigint::BigInt::from(1_000_500) * 1_000_000_000i64,
        );
        let (_, offset) = z.normalize(0, &local);
        assert_eq!(offset, 3600);
    }
}
