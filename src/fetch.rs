// Stale-response guard for collection loads
//
// A list view refetches whenever its date filter changes. A slow response
// arriving after a newer request was issued must not overwrite the newer
// data, so every request takes a ticket and only the latest ticket may
// apply its result.

use crate::record::Record;
use crate::view::ListView;
use tracing::debug;

/// Marker for one in-flight collection load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Issues tickets and decides which response wins
///
/// Tickets are ordered by issue time; `try_accept` admits only the ticket
/// from the most recent `begin` call. Anything older is stale and dropped.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    issued: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request, invalidating every earlier ticket
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Whether the response holding this ticket may be applied
    pub fn try_accept(&mut self, ticket: FetchTicket) -> bool {
        let accepted = ticket.0 == self.issued;
        if !accepted {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale response");
        }
        accepted
    }
}

/// Presentation-facing load state of a list view
///
/// A failed load is recoverable: the view keeps its previous records and the
/// user may trigger another fetch. Nothing retries automatically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// Apply a completed load to a view, unless a newer request superseded it
///
/// Returns `None` when the ticket is stale and the response was dropped.
/// On failure the view keeps whatever records it had.
pub fn apply_load<T: Record>(
    view: &mut ListView<T>,
    sequencer: &mut FetchSequencer,
    ticket: FetchTicket,
    result: eyre::Result<Vec<T>>,
) -> Option<LoadState> {
    if !sequencer.try_accept(ticket) {
        return None;
    }
    Some(match result {
        Ok(records) => {
            view.load(records);
            LoadState::Loaded
        }
        Err(err) => LoadState::Failed(err.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_is_accepted() {
        let mut seq = FetchSequencer::new();
        let ticket = seq.begin();
        assert!(seq.try_accept(ticket));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut seq = FetchSequencer::new();
        let slow = seq.begin();
        let fast = seq.begin();
        // The newer request resolves first; the older one must be dropped
        assert!(seq.try_accept(fast));
        assert!(!seq.try_accept(slow));
    }

    #[test]
    fn test_latest_wins_regardless_of_arrival_order() {
        let mut seq = FetchSequencer::new();
        let first = seq.begin();
        let second = seq.begin();
        let third = seq.begin();
        assert!(!seq.try_accept(first));
        assert!(!seq.try_accept(second));
        assert!(seq.try_accept(third));
    }

    #[test]
    fn test_accept_does_not_consume_the_ticket() {
        let mut seq = FetchSequencer::new();
        let ticket = seq.begin();
        assert!(seq.try_accept(ticket));
        // No newer request was issued, so the same ticket still wins
        assert!(seq.try_accept(ticket));
    }

    #[test]
    fn test_load_state() {
        assert_eq!(LoadState::default(), LoadState::Loading);
        assert!(LoadState::Failed("connection refused".to_string()).is_failed());
        assert!(!LoadState::Loaded.is_failed());
    }

    mod apply {
        use super::super::*;
        use crate::collection::Collection;
        use eyre::eyre;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Item {
            id: u64,
            name: String,
        }

        impl Record for Item {
            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn collection_name() -> &'static str {
                "items"
            }

            fn search_text(&self) -> Vec<&str> {
                vec![&self.name]
            }
        }

        fn item(id: u64, name: &str) -> Item {
            Item {
                id,
                name: name.to_string(),
            }
        }

        #[test]
        fn test_successful_load_installs_records() {
            let mut view: ListView<Item> = ListView::new(Collection::new());
            let mut seq = FetchSequencer::new();
            let ticket = seq.begin();

            let state = apply_load(&mut view, &mut seq, ticket, Ok(vec![item(1, "a")]));
            assert_eq!(state, Some(LoadState::Loaded));
            assert_eq!(view.records().len(), 1);
        }

        #[test]
        fn test_stale_load_does_not_overwrite_newer_data() {
            let mut view: ListView<Item> = ListView::new(Collection::new());
            let mut seq = FetchSequencer::new();

            let slow = seq.begin();
            let fast = seq.begin();

            let state = apply_load(&mut view, &mut seq, fast, Ok(vec![item(1, "newer")]));
            assert_eq!(state, Some(LoadState::Loaded));

            // The older request finally resolves and must be ignored
            let state = apply_load(&mut view, &mut seq, slow, Ok(vec![item(2, "older")]));
            assert_eq!(state, None);
            assert_eq!(view.records()[0].name, "newer");
        }

        #[test]
        fn test_failed_load_keeps_previous_records() {
            let mut view = ListView::new(Collection::from_records(vec![item(1, "kept")]));
            let mut seq = FetchSequencer::new();
            let ticket = seq.begin();

            let state = apply_load(&mut view, &mut seq, ticket, Err(eyre!("connection refused")));
            assert_eq!(
                state,
                Some(LoadState::Failed("connection refused".to_string()))
            );
            assert_eq!(view.records().len(), 1);
        }
    }
}
