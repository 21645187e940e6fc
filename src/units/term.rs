// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// The canonical base a family of units is exactly convertible to by a
/// rational factor.
///
/// Every [`crate::value::Measure`] and [`crate::value::Point`] carries one of
/// these, fixing which arbitrary-precision epoch-relative counter its raw
/// integer indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Nanoseconds since 1970-01-01T00:00:00 UTC.
    Second,
    /// Whole months since 2000-01 (month 0 of year 2000).
    Month,
    /// One of the three eternal values; see [`crate::value::Eternal`].
    Eternal,
}

impl Term {
    pub fn name(self) -> &'static str {
        match self {
            Term::Second => "second",
            Term::Month => "month",
            Term::Eternal => "eternal",
        }
    }
}
