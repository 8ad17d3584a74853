//! The engine's active streamer list.

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::observability::metrics;
use crate::streamers::StreamerList;

/// Lock-free slot for the list the engine is currently working through.
///
/// Readers get a whole `Arc<StreamerList>` and never see a half-updated
/// sequence. Writers replace the reference; the list itself is immutable.
#[derive(Default)]
pub struct ActiveStreamers {
    list: ArcSwapOption<StreamerList>,
    changed: Notify,
}

impl ActiveStreamers {
    pub fn load(&self) -> Option<Arc<StreamerList>> {
        self.list.load_full()
    }

    /// Replace the list and wake whoever waits in `changed`. A store with
    /// no waiter leaves a permit, so the next `changed` returns at once.
    pub fn store(&self, list: Arc<StreamerList>) {
        metrics::set_active_streamers(list.len());
        self.list.store(Some(list));
        self.changed.notify_one();
    }

    /// Install the list the engine starts with. Does not notify.
    pub fn activate(&self, list: Arc<StreamerList>) {
        metrics::set_active_streamers(list.len());
        self.list.store(Some(list));
    }

    /// Mark the engine as not running. Does not notify.
    pub fn clear(&self) {
        metrics::set_active_streamers(0);
        self.list.store(None);
    }

    pub async fn changed(&self) {
        self.changed.notified().await;
    }
}
