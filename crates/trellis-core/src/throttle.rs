//! Rate-limited dispatch gate.
//!
//! Pointer-move streams dispatch expand-window changes far faster than
//! the pipeline wants to consume them. `ThrottleGate` caps dispatch to
//! a fixed cadence and supports delaying the next emission once, which
//! the jump gesture uses so a jump is not immediately overridden by a
//! continuous stream of slide recalculations.
//!
//! The gate is a plain state machine driven by caller-supplied
//! timestamps; it owns no timer and can run under any scheduler.

/// Throttle/debounce state machine over payloads of type `T`.
#[derive(Debug)]
pub struct ThrottleGate<T> {
    rate_ms: u64,
    last_fire: Option<u64>,
    pending: Option<T>,
    debounce_until: Option<u64>,
}

impl<T> ThrottleGate<T> {
    /// Create a gate that emits at most once per `rate_ms`.
    pub fn new(rate_ms: u64) -> Self {
        Self {
            rate_ms,
            last_fire: None,
            pending: None,
            debounce_until: None,
        }
    }

    pub fn rate_ms(&self) -> u64 {
        self.rate_ms
    }

    /// Offer a payload. Returns it back if it may fire now, otherwise
    /// stores it as pending (replacing any older pending payload).
    pub fn submit(&mut self, payload: T, now_ms: u64) -> Option<T> {
        if self.ready(now_ms) {
            self.mark_fired(now_ms);
            Some(payload)
        } else {
            self.pending = Some(payload);
            None
        }
    }

    /// Flush the pending payload once its time has come.
    pub fn tick(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_some() && self.ready(now_ms) {
            self.mark_fired(now_ms);
            self.pending.take()
        } else {
            None
        }
    }

    /// Delay the next emission until at least `now_ms + delay_ms`.
    pub fn debounce_next(&mut self, delay_ms: u64, now_ms: u64) {
        self.debounce_until = Some(now_ms + delay_ms);
    }

    /// Drop pending state, e.g. on gesture end or disposal.
    pub fn clear(&mut self) {
        self.pending = None;
        self.debounce_until = None;
    }

    fn ready(&self, now_ms: u64) -> bool {
        let debounce_ok = self.debounce_until.map_or(true, |until| now_ms >= until);
        let rate_ok = self
            .last_fire
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.rate_ms);
        debounce_ok && rate_ok
    }

    fn mark_fired(&mut self, now_ms: u64) {
        self.last_fire = Some(now_ms);
        self.debounce_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_submit_fires_immediately() {
        let mut gate = ThrottleGate::new(17);
        assert_eq!(gate.submit(1, 0), Some(1));
    }

    #[test]
    fn test_rate_limits_within_window() {
        let mut gate = ThrottleGate::new(17);
        assert_eq!(gate.submit(1, 0), Some(1));
        assert_eq!(gate.submit(2, 5), None);
        assert_eq!(gate.submit(3, 10), None);
        // Latest pending payload wins.
        assert_eq!(gate.tick(12), None);
        assert_eq!(gate.tick(17), Some(3));
        assert_eq!(gate.tick(18), None);
    }

    #[test]
    fn test_debounce_delays_next_emission() {
        let mut gate = ThrottleGate::new(17);
        assert_eq!(gate.submit(1, 0), Some(1));
        gate.debounce_next(50, 20);
        assert_eq!(gate.submit(2, 30), None);
        assert_eq!(gate.tick(60), None);
        assert_eq!(gate.tick(70), Some(2));
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut gate = ThrottleGate::new(17);
        assert_eq!(gate.submit(1, 0), Some(1));
        assert_eq!(gate.submit(2, 1), None);
        gate.clear();
        assert_eq!(gate.tick(100), None);
    }
}
