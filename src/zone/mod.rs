// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The zoneinfo-driven time zone engine: a binary tzfile reader, a POSIX TZ
//! rule evaluator for the footer/fallback case, the `Zone` type itself, a
//! process-wide load cache, and system-zone resolution.

pub mod cache;
pub mod engine;
pub mod locator;
pub mod posix;
pub mod tzif;

pub use engine::{Ambiguity, Zone};
pub use locator::{system_zone, system_zone_name};
