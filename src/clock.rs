//! Millisecond clock injected into the session
//!
//! Every cooldown is stored as an "available at" timestamp compared against
//! one of these, so tests can drive time by hand.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock (milliseconds since construction)
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Wall clock backed by `performance`-style `Date.now()`
#[cfg(target_arch = "wasm32")]
pub struct SystemClock {
    start: f64,
}

#[cfg(target_arch = "wasm32")]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: js_sys::Date::now(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        (js_sys::Date::now() - self.start).max(0.0) as u64
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(50);
        assert_eq!(clock.now_ms(), 150);
        clock.set(10);
        assert_eq!(handle.now_ms(), 10);
    }
}
