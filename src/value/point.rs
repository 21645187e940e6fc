// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Result, TimeError};
use crate::units::{Context, Term};
use crate::value::canonical::{from_canonical, to_canonical};
use crate::value::measure::Measure;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::hash::{Hash, Hasher};

/// An instant in a specific unit: structurally a [`Measure`] but semantically
/// a Point on the term's affine timeline rather than a duration.
///
/// `Point - Point = Measure`; `Point + Measure = Point`; `Point + Point` has
/// no meaning and is not provided.
#[derive(Debug, Clone)]
pub struct Point {
    term: Term,
    unit: String,
    canonical: BigInt,
}

impl Point {
    pub fn from_canonical_raw(term: Term, unit: impl Into<String>, canonical: BigInt) -> Self {
        Point { term, unit: unit.into(), canonical }
    }

    pub fn epoch(unit: impl Into<String>, term: Term) -> Self {
        Point { term, unit: unit.into(), canonical: BigInt::zero() }
    }

    pub fn of(ctx: &Context, display_unit: &str, bag: &[(&str, BigRational)]) -> Result<Self> {
        let term = ctx.unit(display_unit)?.term();
        let mut total = BigInt::zero();
        for (unit, amount) in bag {
            total += to_canonical(ctx, unit, term, amount)?;
        }
        Ok(Point { term, unit: display_unit.to_string(), canonical: total })
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

    pub fn value(&self, ctx: &Context) -> Result<BigRational> {
        from_canonical(ctx, &self.unit, self.term, &self.canonical)
    }

    pub fn as_unit(&self, ctx: &Context, unit: &str) -> Result<BigRational> {
        if ctx.unit(unit)?.term() != self.term {
            return Err(TimeError::IncommensurableUnits {
                a: self.unit.clone(),
                b: unit.to_string(),
            });
        }
        from_canonical(ctx, unit, self.term, &self.canonical)
    }

    fn require_same_term(&self, term: Term, other_unit: &str) -> Result<()> {
        if self.term != term {
            return Err(TimeError::IncommensurableUnits {
                a: self.unit.clone(),
                b: other_unit.to_string(),
            });
        }
        Ok(())
    }

    pub fn checked_add_measure(&self, m: &Measure) -> Result<Point> {
        self.require_same_term(m.term(), m.unit())?;
        Ok(Point { term: self.term, unit: self.unit.clone(), canonical: &self.canonical + m.canonical() })
    }

    pub fn checked_sub_measure(&self, m: &Measure) -> Result<Point> {
        self.require_same_term(m.term(), m.unit())?;
        Ok(Point { term: self.term, unit: self.unit.clone(), canonical: &self.canonical - m.canonical() })
    }

    pub fn diff(&self, other: &Point) -> Result<Measure> {
        self.require_same_term(other.term, &other.unit)?;
        Ok(Measure::from_canonical_raw(self.term, self.unit.clone(), &self.canonical - &other.canonical))
    }

    /// `at.rollback(second=1)`: subtract a Measure built from a single
    /// (unit, amount) pair, at the Point's own term.
    pub fn rollback(&self, ctx: &Context, unit: &str, amount: BigRational) -> Result<Point> {
        let m = Measure::from_unit_amount(ctx, unit, amount)?;
        self.checked_sub_measure(&m)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}
impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.canonical.cmp(&other.canonical))
    }
}

impl Hash for Point {
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
    fn point_minus_point_is_measure() {
        let ctx = standard();
        let a = Point::of(ctx, "second", &[("hour", BigRational::from(BI::from(2)))]).unwrap();
        let b = Point::of(ctx, "second", &[("hour", BigRational::from(BI::from(1)))]).unwrap();
        let d = a.diff(&b).unwrap();
        assert_eq!(d.as_unit(ctx, "hour").unwrap(), BigRational::from(BI::from(1)));
    }

    #[test]
    fn hash_collides_across_units_at_zero() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher as _;
        let a = Point::epoch("second", Term::Second);
        let b = Point::epoch("month", Term::Month);
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
        assert_eq!(a, b);
    }
}
