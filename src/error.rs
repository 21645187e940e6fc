// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Every way an operation in this crate can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeError {
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("units `{a}` and `{b}` do not share a term")]
    IncommensurableUnits { a: String, b: String },

    #[error("arithmetic on unit `{0}` overflowed to an eternal value")]
    OverflowToEternal(String),

    #[error("could not parse ISO 8601 text at byte offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    #[error("zone `{0}` not found")]
    ZoneNotFound(String),

    #[error("zone `{name}` has invalid zoneinfo bytes: {reason}")]
    ZoneFormatError { name: String, reason: String },

    #[error("sleep or sleeper cancelled")]
    CancelRequested,

    #[error("unit `{unit}` already defined")]
    UnitAlreadyDefined { unit: String },

    #[error("referent unit `{0}` is not defined")]
    UnknownReferent(String),

    #[error("invalid year {0}")]
    InvalidYear(i32),

    #[error("invalid month {0}")]
    InvalidMonth(i32),

    #[error("invalid day {0}")]
    InvalidDay(i32),

    #[error("invalid hour {0}")]
    InvalidHour(i32),

    #[error("invalid minute {0}")]
    InvalidMinute(i32),

    #[error("invalid second {0}")]
    InvalidSecond(i32),

    #[error("invalid ISO week {0}")]
    InvalidWeek(i32),

    #[error("part `{0}` has no containing unit and none was given")]
    MissingContainer(String),
}

pub type Result<T> = std::result::Result<T, TimeError>;
