//! # Request Deduper
//!
//! UI frameworks rebuild filter objects on every re-render, so a manager
//! sees a stream of candidate keys that are mostly reference-different but
//! value-identical. The deduper compares candidates structurally against
//! the last dispatched key and suppresses the fetch when a result for that
//! key already exists or is still in flight, which is what keeps a
//! re-render loop from turning into a request loop.
//!
//! The state is generic over the comparison key: collection managers key by
//! [`Descriptor`](crate::sync::Descriptor), detail managers by entity id.

/// What the manager should do with a candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A fetch is warranted.
    Dispatch,
    /// Same key, result present or in flight: do nothing.
    Skip,
    /// The sentinel "disabled" key: never fetch, clear existing data.
    Disable,
}

/// Tracks the last dispatched key and whether its result is settled.
#[derive(Debug)]
pub struct DedupeState<K> {
    last: Option<K>,
    in_flight: bool,
    settled: bool,
    force_next: bool,
}

impl<K> Default for DedupeState<K> {
    fn default() -> Self {
        Self {
            last: None,
            in_flight: false,
            settled: false,
            force_next: false,
        }
    }
}

impl<K: PartialEq + Clone> DedupeState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether a candidate key warrants a fetch.
    ///
    /// Re-entrant by construction: while a fetch is in flight, an identical
    /// candidate is `Skip`, so concurrent callers cannot spawn a second
    /// fetch for the same effective key.
    pub fn decide(&self, candidate: Option<&K>) -> Decision {
        let Some(key) = candidate else {
            return Decision::Disable;
        };
        if self.force_next {
            return Decision::Dispatch;
        }
        let same = self.last.as_ref() == Some(key);
        if same && (self.in_flight || self.settled) {
            Decision::Skip
        } else {
            Decision::Dispatch
        }
    }

    /// Records a dispatch for `key`, consuming any pending force latch.
    pub fn note_dispatch(&mut self, key: K) {
        self.last = Some(key);
        self.in_flight = true;
        self.settled = false;
        self.force_next = false;
    }

    /// Records that the current key's result was accepted (data or error).
    pub fn note_settled(&mut self) {
        self.in_flight = false;
        self.settled = true;
    }

    /// Records the disabled sentinel: the key history resets, so
    /// re-enabling with the previous key fetches again.
    pub fn note_disabled(&mut self) {
        self.last = None;
        self.in_flight = false;
        self.settled = false;
    }

    /// Forces the next decision to `Dispatch` regardless of key equality.
    /// Used by `refetch` after some other part of the app invalidated the
    /// cached data. Idempotent: setting the latch twice is one latch.
    pub fn force(&mut self) {
        self.force_next = true;
    }

    /// The last dispatched key, if any.
    pub fn last(&self) -> Option<&K> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_dispatches() {
        let state: DedupeState<u32> = DedupeState::new();
        assert_eq!(state.decide(Some(&7)), Decision::Dispatch);
    }

    #[test]
    fn identical_key_in_flight_skips() {
        let mut state = DedupeState::new();
        state.note_dispatch(7u32);
        assert_eq!(state.decide(Some(&7)), Decision::Skip);
    }

    #[test]
    fn identical_key_after_settle_skips() {
        let mut state = DedupeState::new();
        state.note_dispatch(7u32);
        state.note_settled();
        assert_eq!(state.decide(Some(&7)), Decision::Skip);
    }

    #[test]
    fn changed_key_dispatches_even_in_flight() {
        let mut state = DedupeState::new();
        state.note_dispatch(7u32);
        assert_eq!(state.decide(Some(&8)), Decision::Dispatch);
    }

    #[test]
    fn force_latch_overrides_equality_once() {
        let mut state = DedupeState::new();
        state.note_dispatch(7u32);
        state.note_settled();
        state.force();
        assert_eq!(state.decide(Some(&7)), Decision::Dispatch);
        state.note_dispatch(7u32);
        state.note_settled();
        // Latch consumed by the dispatch.
        assert_eq!(state.decide(Some(&7)), Decision::Skip);
    }

    #[test]
    fn none_candidate_disables() {
        let mut state = DedupeState::new();
        state.note_dispatch(7u32);
        assert_eq!(state.decide(None), Decision::Disable);
        state.note_disabled();
        // Re-enabling with the old key fetches again.
        assert_eq!(state.decide(Some(&7)), Decision::Dispatch);
    }
}
