// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod context;
pub mod term;
pub mod unit;

pub use context::{standard, Context};
pub use term::Term;
pub use unit::Unit;
