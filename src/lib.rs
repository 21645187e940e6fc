// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A time arithmetic and calendar engine: exact-rational units, a
//! Gregorian/ISO-week calendar, ISO 8601 parsing and formatting, a clock
//! facade, and a zoneinfo-driven time zone engine.

#[macro_use]
extern crate num_derive;

pub mod cal;
pub mod container;
pub mod error;
pub mod iso8601;
pub mod part;
pub mod units;
pub mod value;
pub mod zone;

pub use error::{Result, TimeError};

pub mod clock {
    //! Wall-clock and monotonic readings, a stopwatch, and a disturbable
    //! sleeper, all expressed as [`crate::value::Point`]/[`crate::value::Measure`].
    mod facade;

    pub use facade::{
        demotic, meter, monotonic, periods, sleep, sleeper, ClockSource, Periods, Sleeper,
        Stopwatch, SystemClock,
    };
}
