// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Result, TimeError};
use crate::value::measure::Measure;
use crate::value::point::Point;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// An ordered pair of Points sharing a term, optionally iterable by a
/// Measure step.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point,
    stop: Point,
}

impl Segment {
    pub fn new(start: Point, stop: Point) -> Result<Self> {
        if start.term() != stop.term() {
            return Err(TimeError::IncommensurableUnits {
                a: start.unit().to_string(),
                b: stop.unit().to_string(),
            });
        }
        Ok(Segment { start, stop })
    }

    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn stop(&self) -> &Point {
        &self.stop
    }

    /// Iterate Points from `start` to `stop` (exclusive) by `step`. A
    /// negative step walks backward from `start` toward `stop`.
    pub fn range(&self, step: &Measure) -> Result<Vec<Point>> {
        if step.term() != self.start.term() {
            return Err(TimeError::IncommensurableUnits {
                a: self.start.unit().to_string(),
                b: step.unit().to_string(),
            });
        }
        if step.canonical().is_zero() {
            return Ok(Vec::new());
        }
        let forward = step.canonical().is_positive();
        let mut out = Vec::new();
        let mut cur = self.start.clone();
        loop {
            let past_end = if forward { cur >= self.stop } else { cur <= self.stop };
            if past_end {
                break;
            }
            out.push(cur.clone());
            cur = cur.checked_add_measure(step)?;
        }
        Ok(out)
    }
}

/// Count the signed number of whole `part` units between two Points of the
/// same term, distinct from raw canonical subtraction because calendar
/// units like month and year are non-uniform.
pub fn field_delta(canonical_part_size: &BigInt, start: &Point, stop: &Point) -> Result<BigInt> {
    let diff = stop.diff(start)?;
    if canonical_part_size.is_zero() {
        return Ok(BigInt::zero());
    }
    Ok(diff.canonical().div_floor(canonical_part_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::standard;
    use num_bigint::BigInt as BI;
    use num_rational::BigRational;

    #[test]
    fn range_walks_forward() {
        let ctx = standard();
        let start = Point::of(ctx, "second", &[("hour", BigRational::from(BI::from(0)))]).unwrap();
        let stop = Point::of(ctx, "second", &[("hour", BigRational::from(BI::from(3)))]).unwrap();
        let step = Measure::from_unit_amount(ctx, "hour", BigRational::from(BI::from(1))).unwrap();
        let seg = Segment::new(start, stop).unwrap();
        let points = seg.range(&step).unwrap();
        assert_eq!(points.len(), 3);
    }
}
