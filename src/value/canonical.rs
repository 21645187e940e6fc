// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::Result;
use crate::units::{Context, Term};
use num_bigint::BigInt;
use num_rational::BigRational;

/// The unit each term's raw integer is counted in. Chosen to be the finest
/// precision the term needs to represent exactly: nanoseconds for `second`,
/// whole months for `month` (already uniform), the eternal tag itself for
/// `eternal`.
pub(crate) fn canonical_unit_name(term: Term) -> &'static str {
    match term {
        Term::Second => "nanosecond",
        Term::Month => "month",
        Term::Eternal => "eternal",
    }
}

/// Fold an exact rational amount of `unit` into the term's canonical
/// integer, rounding toward zero where sub-canonical precision would
/// otherwise be lost.
pub(crate) fn to_canonical(
    ctx: &Context,
    unit: &str,
    term: Term,
    amount: &BigRational,
) -> Result<BigInt> {
    let factor = ctx.compose(unit, canonical_unit_name(term))?;
    Ok((amount * factor).to_integer())
}

/// Expand a term's canonical integer into an exact rational amount of `unit`.
pub(crate) fn from_canonical(
    ctx: &Context,
    unit: &str,
    term: Term,
    canonical: &BigInt,
) -> Result<BigRational> {
    let factor = ctx.compose(canonical_unit_name(term), unit)?;
    Ok(BigRational::from(canonical.clone()) * factor)
}
