// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::units::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;

/// A named unit: which term it belongs to, and the exact rational factor
/// mapping one of this unit to `factor` of that term.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub(crate) name: String,
    pub(crate) term: Term,
    pub(crate) factor: BigRational,
}

impl Unit {
    pub fn new(name: impl Into<String>, term: Term, factor: BigRational) -> Self {
        Unit { name: name.into(), term, factor }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn term(&self) -> Term {
        self.term
    }

    pub fn factor(&self) -> &BigRational {
        &self.factor
    }
}

pub(crate) fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}
