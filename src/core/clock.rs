use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Milliseconds since an arbitrary monotonic origin.
pub type Millis = u64;

/// Monotonic time source for sound motion. Sounds record absolute
/// timestamps at registration and transition time, so progress tracks
/// elapsed real time rather than tick counts.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall-clock backed by `Instant`, origin at construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-stepped clock. Clones share the same underlying time, so a test
/// can keep one handle and advance the field's copy.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: Millis) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: Millis) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn manual_clock_shared_across_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.set(100);
        assert_eq!(clock.now_ms(), 100);
        handle.advance(50);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn system_clock_does_not_go_backward() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
