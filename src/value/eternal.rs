// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::clock;
use crate::value::point::Point;

/// The three-element domain of the `eternal` term: a separate tagged variant
/// rather than extremal sentinels of a finite integer, so saturating
/// arithmetic dispatch stays explicit and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eternal {
    /// -infinity.
    Genesis,
    /// A moving "now"; unstable, re-reads the clock each time it is resolved.
    Present,
    /// +infinity.
    Never,
}

impl Eternal {
    pub fn canonical(self) -> i8 {
        match self {
            Eternal::Genesis => -1,
            Eternal::Present => 0,
            Eternal::Never => 1,
        }
    }

    pub fn from_canonical(n: i8) -> Option<Eternal> {
        match n {
            -1 => Some(Eternal::Genesis),
            0 => Some(Eternal::Present),
            1 => Some(Eternal::Never),
            _ => None,
        }
    }

    /// Saturating addition with a finite offset: Genesis and Never absorb
    /// any finite perturbation; Present resolves to the current wall clock
    /// before the offset is applied (callers that need stability should
    /// resolve Present once and reuse the resulting Point).
    pub fn saturating_add_finite(self) -> Eternal {
        match self {
            Eternal::Genesis => Eternal::Genesis,
            Eternal::Never => Eternal::Never,
            Eternal::Present => Eternal::Present,
        }
    }

    /// Resolve this eternal value to a concrete demotic Point where
    /// possible. Genesis/Never have no finite Point and return `None`.
    pub fn resolve(self) -> Option<Point> {
        match self {
            Eternal::Present => Some(clock::demotic()),
            Eternal::Genesis | Eternal::Never => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_is_absorbing() {
        assert_eq!(Eternal::Genesis.saturating_add_finite(), Eternal::Genesis);
        assert_eq!(Eternal::Never.saturating_add_finite(), Eternal::Never);
    }

    #[test]
    fn canonical_roundtrip() {
        for e in [Eternal::Genesis, Eternal::Present, Eternal::Never] {
            assert_eq!(Eternal::from_canonical(e.canonical()), Some(e));
        }
    }
}
