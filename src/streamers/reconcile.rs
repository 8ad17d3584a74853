//! Active list reconciliation.
//!
//! The candidate list either replaces the engine's list wholesale or is
//! discarded. There is no add/remove diffing; what happens to state held for
//! removed streamers is up to the engine.

use std::sync::Arc;

use crate::engine::MinerEngine;
use crate::observability::metrics;
use crate::streamers::identifier::StreamerList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The engine has no active list yet.
    EngineUnavailable,
    /// Candidate matches the active list element for element.
    Unchanged,
    /// The active list was replaced.
    Swapped {
        previous: Arc<StreamerList>,
        current: Arc<StreamerList>,
    },
}

impl ReconcileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileOutcome::EngineUnavailable => "engine_unavailable",
            ReconcileOutcome::Unchanged => "unchanged",
            ReconcileOutcome::Swapped { .. } => "swapped",
        }
    }
}

pub fn reconcile<E>(engine: &E, candidate: StreamerList) -> ReconcileOutcome
where
    E: MinerEngine + ?Sized,
{
    let outcome = match engine.streamers() {
        None => {
            tracing::warn!("Engine streamer list is not available, skipping update");
            ReconcileOutcome::EngineUnavailable
        }
        Some(previous) if *previous == candidate => {
            tracing::info!(streamers = %previous, "Streamer list unchanged");
            ReconcileOutcome::Unchanged
        }
        Some(previous) => {
            let current = Arc::new(candidate);
            tracing::info!(from = %previous, to = %current, "Updating streamer list");
            engine.set_streamer_list(current.clone());
            ReconcileOutcome::Swapped { previous, current }
        }
    };

    metrics::record_reconciliation(outcome.label());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActiveStreamers;
    use crate::streamers::StreamerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingEngine {
        active: ActiveStreamers,
        swaps: AtomicUsize,
    }

    impl MinerEngine for CountingEngine {
        fn streamers(&self) -> Option<Arc<StreamerList>> {
            self.active.load()
        }

        fn set_streamer_list(&self, list: Arc<StreamerList>) {
            self.swaps.fetch_add(1, Ordering::SeqCst);
            self.active.store(list);
        }
    }

    fn list(names: &[&str]) -> StreamerList {
        names.iter().map(|n| StreamerId::parse(n).unwrap()).collect()
    }

    #[test]
    fn test_not_started_engine_is_left_alone() {
        let engine = CountingEngine::default();
        let outcome = reconcile(&engine, list(&["a"]));

        assert_eq!(outcome, ReconcileOutcome::EngineUnavailable);
        assert_eq!(engine.swaps.load(Ordering::SeqCst), 0);
        assert!(engine.streamers().is_none());
    }

    #[test]
    fn test_second_identical_call_is_noop() {
        let engine = CountingEngine::default();
        engine.active.store(Arc::new(list(&["a", "b"])));

        let first = reconcile(&engine, list(&["a", "c"]));
        let second = reconcile(&engine, list(&["a", "c"]));

        assert!(matches!(first, ReconcileOutcome::Swapped { .. }));
        assert_eq!(second, ReconcileOutcome::Unchanged);
        assert_eq!(engine.swaps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reorder_triggers_swap() {
        let engine = CountingEngine::default();
        engine.active.store(Arc::new(list(&["a", "b"])));

        match reconcile(&engine, list(&["b", "a"])) {
            ReconcileOutcome::Swapped { previous, current } => {
                assert_eq!(previous.names(), vec!["a", "b"]);
                assert_eq!(current.names(), vec!["b", "a"]);
            }
            other => panic!("expected swap, got {:?}", other),
        }
        assert_eq!(engine.streamers().unwrap().names(), vec!["b", "a"]);
    }

    #[test]
    fn test_swap_replaces_reference_not_contents() {
        let engine = CountingEngine::default();
        let original = Arc::new(list(&["a"]));
        engine.active.store(original.clone());

        reconcile(&engine, list(&["a", "b"]));

        assert_eq!(original.names(), vec!["a"]);
        assert!(!Arc::ptr_eq(&original, &engine.streamers().unwrap()));
    }
}
