use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

const UNSET: i64 = 0;

/// Result of trying to claim the right to probe a disabled oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeClaim {
    /// No disablement timestamp existed; it has now been set and the
    /// cooldown starts from here.
    Armed,
    /// Cooldown not elapsed, or another task won the claim.
    CoolingDown,
    /// This caller owns the probe; the timestamp was advanced to `now`.
    Claimed,
}

/// Process-wide breaker flags: "disabled" plus the unix-millisecond
/// timestamp of the last disablement (0 when unset).
///
/// Every transition is a single atomic store, swap or compare-and-swap.
#[derive(Debug, Default)]
pub struct BreakerState {
    disabled: AtomicBool,
    disabled_since_ms: AtomicI64,
}

impl BreakerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// OPEN means real oracle calls are suppressed.
    pub fn is_open(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub fn disabled_since_ms(&self) -> Option<i64> {
        match self.disabled_since_ms.load(Ordering::Acquire) {
            UNSET => None,
            ts => Some(ts),
        }
    }

    /// CLOSED → OPEN. The timestamp is published before the flag so any
    /// reader that sees the flag also sees a cooldown start.
    pub fn trip(&self, now_ms: i64) {
        self.disabled_since_ms.store(now_ms, Ordering::Release);
        self.disabled.store(true, Ordering::Release);
    }

    /// Probe succeeded. Returns whether the breaker was open.
    pub fn close(&self) -> bool {
        self.disabled.swap(false, Ordering::AcqRel)
    }

    /// Probe failed; restart the cooldown.
    pub fn refresh(&self, now_ms: i64) {
        self.disabled_since_ms.store(now_ms, Ordering::Release);
    }

    pub fn claim_probe(&self, now_ms: i64, cooldown_ms: i64) -> ProbeClaim {
        let since = self.disabled_since_ms.load(Ordering::Acquire);

        if since == UNSET {
            return match self.disabled_since_ms.compare_exchange(
                UNSET,
                now_ms,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => ProbeClaim::Armed,
                Err(_) => ProbeClaim::CoolingDown,
            };
        }

        if now_ms.saturating_sub(since) < cooldown_ms {
            return ProbeClaim::CoolingDown;
        }

        match self.disabled_since_ms.compare_exchange(
            since,
            now_ms,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => ProbeClaim::Claimed,
            Err(_) => ProbeClaim::CoolingDown,
        }
    }
}

/// Wall-clock unix milliseconds; never returns the unset sentinel.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis().max(1)
}
