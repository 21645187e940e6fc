// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Result, TimeError};
use crate::units::term::Term;
use crate::units::unit::{ratio, Unit};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::OnceLock;

/// The unit registry: every defined [`Unit`], keyed by name, plus a cache of
/// composed ratios between unit pairs.
///
/// Mirrors the "standard context" built once at process start and shared
/// thereafter; see [`standard`] for the default instance.
pub struct Context {
    units: HashMap<String, Unit>,
    compose_cache: RefCell<HashMap<(String, String), BigRational>>,
}

impl Context {
    pub fn new() -> Self {
        Context { units: HashMap::new(), compose_cache: RefCell::new(HashMap::new()) }
    }

    /// Register a base unit for `term` with factor 1 (the term's own unit).
    pub fn define_base(&mut self, name: impl Into<String>, term: Term) -> Result<()> {
        let name = name.into();
        if self.units.contains_key(&name) {
            return Err(TimeError::UnitAlreadyDefined { unit: name });
        }
        self.units.insert(name.clone(), Unit::new(name, term, BigRational::one()));
        Ok(())
    }

    /// Declare `unit` such that `n` of `unit` equals `factor * ref_unit`.
    pub fn define(
        &mut self,
        unit: impl Into<String>,
        ref_unit: &str,
        n: i64,
        factor: BigRational,
    ) -> Result<()> {
        let unit = unit.into();
        if self.units.contains_key(&unit) {
            return Err(TimeError::UnitAlreadyDefined { unit });
        }
        let reference =
            self.units.get(ref_unit).ok_or_else(|| TimeError::UnknownReferent(ref_unit.to_string()))?;
        let cumulative = (factor * reference.factor.clone()) / BigRational::from(BigInt::from(n));
        let term = reference.term;
        self.units.insert(unit.clone(), Unit::new(unit, term, cumulative));
        self.compose_cache.borrow_mut().clear();
        Ok(())
    }

    pub fn unit(&self, name: &str) -> Result<&Unit> {
        self.units.get(name).ok_or_else(|| TimeError::UnknownUnit(name.to_string()))
    }

    /// `compose(a, b) = factor(a) / factor(b)`, exact, requires a shared term.
    pub fn compose(&self, a: &str, b: &str) -> Result<BigRational> {
        let key = (a.to_string(), b.to_string());
        if let Some(r) = self.compose_cache.borrow().get(&key) {
            return Ok(r.clone());
        }
        let ua = self.unit(a)?;
        let ub = self.unit(b)?;
        if ua.term != ub.term {
            return Err(TimeError::IncommensurableUnits {
                a: a.to_string(),
                b: b.to_string(),
            });
        }
        let r = ua.factor.clone() / ub.factor.clone();
        self.compose_cache.borrow_mut().insert(key, r.clone());
        Ok(r)
    }

    /// `n * compose(a, b)`, exact.
    pub fn convert(&self, a: &str, b: &str, n: &BigRational) -> Result<BigRational> {
        Ok(n * self.compose(a, b)?)
    }

    pub fn units_of(&self, term: Term) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.term == term)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

fn ten_pow(exp: i32) -> BigRational {
    if exp >= 0 {
        BigRational::from(BigInt::from(10u32).pow(exp as u32))
    } else {
        BigRational::new(BigInt::one(), BigInt::from(10u32).pow((-exp) as u32))
    }
}

/// Build the standard context: second-term decimal prefixes from yocto- to
/// yotta-, the earth-day hour/minute/second/annum chain, and the month-term
/// calendar multiples, grounded in the original `earth` unit definitions.
pub fn build_standard() -> Context {
    let mut ctx = Context::new();
    ctx.define_base("second", Term::Second).expect("base unit");
    ctx.define_base("month", Term::Month).expect("base unit");
    ctx.define_base("eternal", Term::Eternal).expect("base unit");

    const PREFIXES: &[(&str, i32)] = &[
        ("yotta", 24), ("zetta", 21), ("exa", 18), ("peta", 15),
        ("tera", 12), ("giga", 9), ("mega", 6), ("kilo", 3),
        ("hecto", 2), ("deca", 1), ("deci", -1), ("centi", -2),
        ("milli", -3), ("micro", -6), ("nano", -9), ("pico", -12),
        ("femto", -15), ("atto", -18), ("zepto", -21), ("yocto", -24),
    ];
    for (prefix, exp) in PREFIXES {
        let name = format!("{prefix}second");
        ctx.define(name, "second", 1, ten_pow(*exp)).expect("prefix unit");
    }

    // earth.py: hour/day, minute/hour, second/minute, annum/day.
    ctx.define("hour", "second", 1, ratio(60 * 60, 1)).expect("hour");
    ctx.define("minute", "second", 1, ratio(60, 1)).expect("minute");
    ctx.define("day", "second", 1, ratio(24 * 60 * 60, 1)).expect("day");
    ctx.define("annum", "second", 4, ratio(1461 * 24 * 60 * 60, 1)).expect("annum");

    ctx.define("year", "month", 1, ratio(12, 1)).expect("year");
    ctx.define("decade", "month", 1, ratio(120, 1)).expect("decade");
    ctx.define("century", "month", 1, ratio(1200, 1)).expect("century");
    ctx.define("millennium", "month", 1, ratio(12000, 1)).expect("millennium");

    ctx
}

/// The process-wide default context, built once and memoized.
pub fn standard() -> &'static Context {
    static CTX: OnceLock<Context> = OnceLock::new();
    CTX.get_or_init(build_standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_symmetry() {
        let ctx = standard();
        let a = ctx.compose("hour", "minute").unwrap();
        let b = ctx.compose("minute", "hour").unwrap();
        assert_eq!(a * b, BigRational::one());
    }

    #[test]
    fn hour_is_60_minutes() {
        let ctx = standard();
        assert_eq!(ctx.compose("hour", "minute").unwrap(), BigRational::from(BigInt::from(60)));
    }

    #[test]
    fn incommensurable() {
        let ctx = standard();
        assert!(ctx.compose("hour", "month").is_err());
    }

    #[test]
    fn zero_subsecond_is_exact() {
        // second=1, subsecond=0.5 == centisecond=150
        let ctx = standard();
        let centi_per_second = ctx.compose("second", "centisecond").unwrap();
        assert_eq!(centi_per_second, BigRational::from(BigInt::from(100)));
        let half_second_in_centi = BigRational::new(BigInt::from(1), BigInt::from(2)) * centi_per_second;
        assert_eq!(half_second_in_centi, BigRational::from(BigInt::from(50)));
    }
}
