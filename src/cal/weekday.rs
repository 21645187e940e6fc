// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_derive::{FromPrimitive, ToPrimitive};

/// ISO day of the week, Monday first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Weekday {
    Monday = 0,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

// 1970-01-01 (day 0 of the internal day-count epoch) was a Thursday.
const EPOCH_WEEKDAY_OFFSET: i64 = 3;

impl Weekday {
    pub fn from_day_count(day: i64) -> Weekday {
        let idx = (day + EPOCH_WEEKDAY_OFFSET).rem_euclid(7);
        match idx {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }

    /// Day count of the latest occurrence of this weekday on or before `day`.
    pub fn on_or_before(self, day: i64) -> i64 {
        let k = self.index();
        day - (Weekday::from_day_count(day).index() - k).rem_euclid(7)
    }

    pub fn on_or_after(self, day: i64) -> i64 {
        self.on_or_before(day + 6)
    }

    pub fn before(self, day: i64) -> i64 {
        self.on_or_before(day - 1)
    }

    pub fn after(self, day: i64) -> i64 {
        self.on_or_after(day + 1)
    }

    pub fn nearest(self, day: i64) -> i64 {
        self.on_or_before(day + 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_thursday() {
        assert_eq!(Weekday::from_day_count(0), Weekday::Thursday);
    }

    #[test]
    fn on_or_before_self_is_identity() {
        assert_eq!(Weekday::Thursday.on_or_before(0), 0);
    }

    #[test]
    fn before_moves_back_a_full_week_at_most() {
        let d = Weekday::Monday.before(0);
        assert!(d < 0 && d >= -7);
        assert_eq!(Weekday::from_day_count(d), Weekday::Monday);
    }
}
