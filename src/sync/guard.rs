//! # Stale-Response Guard
//!
//! Responses may arrive in any order relative to dispatch order. The guard
//! tags every dispatched request with a monotonically increasing token and
//! accepts a completion only if its token still equals the current one, so
//! a slow response to an old query can never overwrite the result of a
//! newer one. This is the principal correctness property of the whole
//! subsystem: last dispatched wins.
//!
//! The state machine per manager instance is
//! `Idle → Pending(token) → {Accepted, Stale} → Idle`, reused for the
//! manager's whole lifetime. Teardown simply advances the token so that
//! every in-flight response becomes provably inert.

/// Generation marker minted once per dispatched fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verdict for a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The completion belongs to the newest dispatch and may mutate state.
    Accepted,
    /// A newer request was dispatched meanwhile; the completion is a no-op.
    Stale,
}

/// Per-instance token counter and pending marker.
#[derive(Debug, Default)]
pub struct StaleGuard {
    current: u64,
    pending: bool,
}

impl StaleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh token, strictly greater than all previously minted
    /// ones, and moves the machine to `Pending`. Any response still in
    /// flight for an earlier token is superseded from this point on.
    pub fn begin(&mut self) -> RequestToken {
        self.current += 1;
        self.pending = true;
        RequestToken(self.current)
    }

    /// Settles a completion against the current token.
    ///
    /// Only an `Accepted` verdict clears the pending marker; a stale
    /// completion belongs to a superseded cycle whose loading lifetime is
    /// owned by the newer request.
    pub fn settle(&mut self, token: RequestToken) -> Verdict {
        if token.0 == self.current && self.pending {
            self.pending = false;
            Verdict::Accepted
        } else {
            Verdict::Stale
        }
    }

    /// Whether a dispatch cycle is currently awaiting its completion.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Invalidates every in-flight request without starting a new cycle.
    ///
    /// Used on disable and teardown: the token advances, so no response
    /// minted earlier can ever settle as `Accepted` again.
    pub fn invalidate(&mut self) {
        self.current += 1;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_strictly() {
        let mut guard = StaleGuard::new();
        let a = guard.begin();
        let b = guard.begin();
        assert!(b > a);
    }

    #[test]
    fn current_completion_is_accepted_once() {
        let mut guard = StaleGuard::new();
        let t = guard.begin();
        assert_eq!(guard.settle(t), Verdict::Accepted);
        // A duplicate completion for the same cycle no longer matches.
        assert_eq!(guard.settle(t), Verdict::Stale);
        assert!(!guard.pending());
    }

    #[test]
    fn superseded_completion_is_stale() {
        let mut guard = StaleGuard::new();
        let old = guard.begin();
        let new = guard.begin();
        assert_eq!(guard.settle(old), Verdict::Stale);
        // The stale settle must not consume the newer cycle.
        assert!(guard.pending());
        assert_eq!(guard.settle(new), Verdict::Accepted);
    }

    #[test]
    fn invalidate_orphans_in_flight_tokens() {
        let mut guard = StaleGuard::new();
        let t = guard.begin();
        guard.invalidate();
        assert_eq!(guard.settle(t), Verdict::Stale);
        assert!(!guard.pending());
    }
}
