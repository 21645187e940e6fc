// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Result, TimeError};
use crate::units::{Context, Term};
use crate::value::canonical::{from_canonical, to_canonical};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::hash::{Hash, Hasher};

/// A duration in a specific unit: an additive group element wrapping a
/// term-canonical arbitrary-precision integer.
///
/// `unit` only affects how [`Measure::value`] reports its own amount back;
/// comparisons and arithmetic act on the canonical integer. See
/// [`Measure::eq`] for the deliberate cross-unit hash/equality collision.
#[derive(Debug, Clone)]
pub struct Measure {
    term: Term,
    unit: String,
    canonical: BigInt,
}

impl Measure {
    pub fn zero(unit: impl Into<String>, term: Term) -> Self {
        Measure { term, unit: unit.into(), canonical: BigInt::zero() }
    }

    /// Build a Measure directly from a canonical integer, tagging it with
    /// `unit` for later display/selection. Used internally by builders and
    /// by the part-update machinery.
    pub fn from_canonical_raw(term: Term, unit: impl Into<String>, canonical: BigInt) -> Self {
        Measure { term, unit: unit.into(), canonical }
    }

    /// `Measure.of(**bag)`: sum the exact rational amounts of each named
    /// unit in `bag`. Every unit must share one term.
    pub fn of(ctx: &Context, display_unit: &str, bag: &[(&str, BigRational)]) -> Result<Self> {
        let term = ctx.unit(display_unit)?.term();
        let mut total = BigInt::zero();
        for (unit, amount) in bag {
            total += to_canonical(ctx, unit, term, amount)?;
        }
        Ok(Measure { term, unit: display_unit.to_string(), canonical: total })
    }

    pub fn from_unit_amount(ctx: &Context, unit: &str, amount: BigRational) -> Result<Self> {
        let term = ctx.unit(unit)?.term();
        let canonical = to_canonical(ctx, unit, term, &amount)?;
        Ok(Measure { term, unit: unit.to_string(), canonical })
    }

    pub fn term(&self) -> Term {
        self.term
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn canonical(&self) -> &BigInt {
        &self.canonical
    }

    /// `int(m)`: the amount expressed in this Measure's own unit.
    pub fn value(&self, ctx: &Context) -> Result<BigRational> {
        from_canonical(ctx, &self.unit, self.term, &self.canonical)
    }

    /// The amount expressed in an arbitrary unit sharing this term.
    pub fn as_unit(&self, ctx: &Context, unit: &str) -> Result<BigRational> {
        if ctx.unit(unit)?.term() != self.term {
            return Err(TimeError::IncommensurableUnits {
                a: self.unit.clone(),
                b: unit.to_string(),
            });
        }
        from_canonical(ctx, unit, self.term, &self.canonical)
    }

    fn require_same_term(&self, other: &Measure) -> Result<()> {
        if self.term != other.term {
            return Err(TimeError::IncommensurableUnits {
                a: self.unit.clone(),
                b: other.unit.clone(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Measure) -> Result<Measure> {
        self.require_same_term(other)?;
        Ok(Measure {
            term: self.term,
            unit: self.unit.clone(),
            canonical: &self.canonical + &other.canonical,
        })
    }

    pub fn checked_sub(&self, other: &Measure) -> Result<Measure> {
        self.require_same_term(other)?;
        Ok(Measure {
            term: self.term,
            unit: self.unit.clone(),
            canonical: &self.canonical - &other.canonical,
        })
    }

    pub fn negate(&self) -> Measure {
        Measure { term: self.term, unit: self.unit.clone(), canonical: -&self.canonical }
    }

    pub fn scale(&self, n: &BigInt) -> Measure {
        Measure { term: self.term, unit: self.unit.clone(), canonical: &self.canonical * n }
    }

    pub fn is_zero(&self) -> bool {
        self.canonical.is_zero()
    }
}

// Equality, ordering, and hashing deliberately ignore `unit` and `term`: the
// source test suite asserts that Measure(0), Timestamp(0), Days(0), Date(0),
// Months(0) and GregorianMonth(0) all collide to one hash key. Preserved
// here as equality/hashing over the canonical integer alone.
impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}
impl Eq for Measure {}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.canonical.cmp(&other.canonical))
    }
}

impl Hash for Measure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::standard;
    use num_bigint::BigInt as BI;

    #[test]
    fn bag_additivity() {
        let ctx = standard();
        let bag = Measure::of(ctx, "second", &[
            ("hour", BigRational::from(BI::from(1))),
            ("minute", BigRational::from(BI::from(30))),
        ]).unwrap();
        let sum = Measure::from_unit_amount(ctx, "hour", BigRational::from(BI::from(1))).unwrap()
            .checked_add(&Measure::from_unit_amount(ctx, "minute", BigRational::from(BI::from(30))).unwrap())
            .unwrap();
        assert_eq!(bag, sum);
    }

    #[test]
    fn second_and_centisecond_agree() {
        let ctx = standard();
        // Measure.of(second=1, centisecond=50) == Measure.of(centisecond=150)
        let a = Measure::of(ctx, "second", &[
            ("second", BigRational::from(BI::from(1))),
            ("centisecond", BigRational::from(BI::from(50))),
        ]).unwrap();
        let b = Measure::from_unit_amount(ctx, "centisecond", BigRational::from(BI::from(150))).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.as_unit(ctx, "millisecond").unwrap(), BigRational::from(BI::from(1500)));
    }

    #[test]
    fn zero_collision_across_units() {
        let z1 = Measure::zero("second", Term::Second);
        let z2 = Measure::zero("month", Term::Month);
        assert_eq!(z1, z2);
    }
}
