//! Debounced free-text search with stale-response suppression.
//!
//! Every keystroke bumps a generation counter. The UI sleeps for the debounce
//! interval and only fires the search if its generation is still the latest
//! ([`SearchState::is_current`]). Each fired search gets a sequence number;
//! a response older than the one on display is dropped by
//! [`SearchState::accept`]. Clearing the query goes through
//! [`SearchState::cancel`], which retires the pending debounce and every
//! search still in flight.

use std::collections::BTreeSet;

use crate::models::Product;

/// Default pause after the last keystroke before searching.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// A search that was fired and whose response is pending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    generation: u64,
    next_seq: u64,
    /// Sequence number of the results on display.
    shown_seq: Option<u64>,
    /// Tickets at or below this were cancelled.
    cancelled_upto: u64,
    in_flight: BTreeSet<u64>,
    results: Option<Vec<Product>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke and return its generation.
    pub fn keystroke(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether no keystroke happened since `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Fire a search for `text` if it is not blank.
    pub fn begin(&mut self, text: &str) -> Option<SearchTicket> {
        if text.trim().is_empty() {
            return None;
        }
        self.next_seq += 1;
        self.in_flight.insert(self.next_seq);
        Some(SearchTicket {
            seq: self.next_seq,
            text: text.to_string(),
        })
    }

    /// Store the response of `ticket`. Returns `false` if a newer response is
    /// already on display, or the ticket was cancelled, and this one was
    /// discarded.
    pub fn accept(&mut self, ticket: &SearchTicket, results: Vec<Product>) -> bool {
        self.in_flight.remove(&ticket.seq);
        if ticket.seq <= self.cancelled_upto
            || self.shown_seq.is_some_and(|shown| shown > ticket.seq)
        {
            tracing::debug!(
                "Discarding stale search #{} for {:?}",
                ticket.seq,
                ticket.text
            );
            return false;
        }
        self.shown_seq = Some(ticket.seq);
        self.results = Some(results);
        true
    }

    /// Mark `ticket` as finished without results (the request failed).
    pub fn fail(&mut self, ticket: &SearchTicket) {
        self.in_flight.remove(&ticket.seq);
        tracing::debug!("Search #{} for {:?} failed", ticket.seq, ticket.text);
    }

    /// The query was cleared: no pending debounce fires, responses of
    /// searches already sent are dropped, and the last results are forgotten.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.cancelled_upto = self.next_seq;
        self.in_flight.clear();
        self.results = None;
    }

    pub fn is_searching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn results(&self) -> Option<&[Product]> {
        self.results.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;

    #[test]
    fn test_only_latest_keystroke_is_current() {
        let mut state = SearchState::new();
        let first = state.keystroke();
        let second = state.keystroke();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_blank_text_does_not_search() {
        let mut state = SearchState::new();
        assert!(state.begin("  ").is_none());
        assert!(!state.is_searching());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SearchState::new();
        let early = state.begin("sh").unwrap();
        let late = state.begin("shoe").unwrap();
        assert!(state.is_searching());

        assert!(state.accept(&late, vec![product("new", "Shoe", 1.0, "c1", 0)]));
        assert!(!state.accept(&early, vec![product("old", "Shirt", 1.0, "c1", 0)]));
        assert!(!state.is_searching());

        let shown = state.results().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "new");
    }

    #[test]
    fn test_in_order_responses_replace_each_other() {
        let mut state = SearchState::new();
        let a = state.begin("a").unwrap();
        assert!(state.accept(&a, vec![]));
        let b = state.begin("ab").unwrap();
        assert!(state.accept(&b, vec![product("p", "Ab", 1.0, "c1", 0)]));
        assert_eq!(state.results().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_search_clears_in_flight() {
        let mut state = SearchState::new();
        let ticket = state.begin("x").unwrap();
        state.fail(&ticket);
        assert!(!state.is_searching());
        assert!(state.results().is_none());
    }

    #[test]
    fn test_clear_after_keystroke_does_not_fire() {
        let mut state = SearchState::new();
        let generation = state.keystroke();
        state.cancel();
        // the debounce timer wakes up after the clear
        assert!(!state.is_current(generation));
        assert!(!state.is_searching());
    }

    #[test]
    fn test_cancel_drops_in_flight_search() {
        let mut state = SearchState::new();
        let ticket = state.begin("abc").unwrap();
        state.cancel();
        assert!(!state.is_searching());
        assert!(!state.accept(&ticket, vec![product("p", "Abc", 1.0, "c1", 0)]));
        assert!(state.results().is_none());

        let next = state.begin("abd").unwrap();
        assert!(state.is_searching());
        assert!(state.accept(&next, vec![]));
        assert_eq!(state.results().map(<[Product]>::len), Some(0));
    }
}
