// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The clock facade: demotic (wall) time, monotonic time, sleeping, and the
//! stopwatch/periodic-tick helpers built on top of them.
//!
//! `demotic` time can jump (NTP step, a test double rewinding it); `monotonic`
//! time never does. Keeping them as distinct return types (`Point` vs.
//! `Measure`) means a caller can't accidentally diff two demotic readings to
//! measure an interval when a clock step occurred in between.

use crate::units::Term;
use crate::value::{Measure, Point};
use num_bigint::BigInt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

fn monotonic_origin() -> &'static Instant {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now)
}

/// A source of time, abstracted so tests can supply a fixed or stepped
/// double instead of the real system clock.
pub trait ClockSource {
    fn demotic(&self) -> Point;
    fn monotonic(&self) -> Measure;
}

/// The real system clock: [`SystemTime::now`] for demotic time,
/// [`Instant::now`] (relative to a process-wide origin) for monotonic time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn demotic(&self) -> Point {
        demotic()
    }

    fn monotonic(&self) -> Measure {
        monotonic()
    }
}

/// The current wall-clock instant, as a `second`-term Point (nanoseconds
/// since 1970-01-01, possibly negative for instants before it on platforms
/// that support such `SystemTime` values).
pub fn demotic() -> Point {
    let now = SystemTime::now();
    let nanos = match now.duration_since(UNIX_EPOCH) {
        Ok(d) => BigInt::from(d.as_nanos()),
        Err(e) => -BigInt::from(e.duration().as_nanos()),
    };
    Point::from_canonical_raw(Term::Second, "second", nanos)
}

/// Nanoseconds elapsed since an arbitrary, process-wide, monotonically
/// advancing origin. Not comparable across processes and not meaningful as
/// a Point; only differences (via [`Measure`] arithmetic) are meaningful.
pub fn monotonic() -> Measure {
    let elapsed = monotonic_origin().elapsed();
    Measure::from_canonical_raw(Term::Second, "second", BigInt::from(elapsed.as_nanos()))
}

/// Block the calling thread for the real-time duration named by `amount`
/// (interpreted at `second` term).
pub fn sleep(amount: &Measure) -> crate::error::Result<()> {
    let nanos = amount.as_unit(crate::units::standard(), "nanosecond")?;
    let nanos = nanos
        .to_integer()
        .to_string()
        .parse::<u64>()
        .unwrap_or(0);
    std::thread::sleep(Duration::from_nanos(nanos));
    Ok(())
}

/// A running stopwatch: `delta()` reports elapsed monotonic time since the
/// stopwatch was created or last reset, without stopping it.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn delta(&self) -> Measure {
        Measure::from_canonical_raw(Term::Second, "second", BigInt::from(self.start.elapsed().as_nanos()))
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

/// Start a new stopwatch running from now.
pub fn meter() -> Stopwatch {
    Stopwatch { start: Instant::now() }
}

/// An infinite sequence of demotic-time ticks spaced `interval` apart,
/// starting at the instant [`periods`] was called. Each call to `next`
/// blocks (via [`sleep`]) until its tick is due.
pub struct Periods {
    interval: Measure,
    next_tick: Point,
}

impl Iterator for Periods {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let now = demotic();
        if now < self.next_tick {
            let remaining = self.next_tick.diff(&now).ok()?;
            sleep(&remaining).ok()?;
        }
        let tick = self.next_tick.clone();
        self.next_tick = self.next_tick.checked_add_measure(&self.interval).ok()?;
        Some(tick)
    }
}

pub fn periods(interval: Measure) -> Periods {
    Periods { interval, next_tick: demotic() }
}

/// A sleep that can be woken early by an external "disturb" signal, queued
/// FIFO so that disturbances sent before a sleep begins are not lost.
pub struct Sleeper {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Sleeper {
    /// Queue a wake-up. If nothing is currently sleeping, the next call to
    /// `sleep_for` returns immediately instead of blocking.
    pub fn disturb(&self) {
        let _ = self.tx.send(());
    }

    /// Block for at most `amount`, or until the next queued disturbance,
    /// whichever comes first. Returns `true` if woken by a disturbance.
    pub fn sleep_for(&self, amount: &Measure) -> crate::error::Result<bool> {
        let nanos = amount.as_unit(crate::units::standard(), "nanosecond")?;
        let nanos = nanos.to_integer().to_string().parse::<u64>().unwrap_or(0);
        match self.rx.recv_timeout(Duration::from_nanos(nanos)) {
            Ok(()) => Ok(true),
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Ok(false),
        }
    }
}

pub fn sleeper() -> Sleeper {
    let (tx, rx) = mpsc::channel();
    Sleeper { tx, rx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demotic_is_after_unix_epoch() {
        let now = demotic();
        assert!(now.canonical() > &BigInt::from(0));
    }

    #[test]
    fn stopwatch_delta_is_nonnegative_and_monotone() {
        let sw = meter();
        let a = sw.delta();
        let b = sw.delta();
        assert!(b.canonical() >= a.canonical());
    }

    #[test]
    fn sleeper_disturb_wakes_before_timeout() {
        let s = sleeper();
        s.disturb();
        let woke_early = s
            .sleep_for(&Measure::from_canonical_raw(Term::Second, "second", BigInt::from(60_000_000_000i64)))
            .unwrap();
        assert!(woke_early);
    }

    #[test]
    fn sleeper_times_out_without_disturb() {
        let s = sleeper();
        let woke_early = s
            .sleep_for(&Measure::from_canonical_raw(Term::Second, "second", BigInt::from(1_000_000i64)))
            .unwrap();
        assert!(!woke_early);
    }

    #[test]
    fn monotonic_never_decreases() {
        let a = monotonic();
        let b = monotonic();
        assert!(b.canonical() >= a.canonical());
    }
}
