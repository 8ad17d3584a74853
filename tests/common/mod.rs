//! Shared utilities for integration testing.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use points_watcher::engine::{ActiveStreamers, MinerEngine};
use points_watcher::streamers::{StreamerId, StreamerList};

/// Engine stand-in that records swaps instead of running a miner.
#[derive(Default)]
pub struct RecordingEngine {
    active: ActiveStreamers,
    swaps: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingEngine {
    pub fn running(names: &[&str]) -> Arc<Self> {
        let engine = Self::default();
        engine.active.activate(Arc::new(list(names)));
        Arc::new(engine)
    }

    pub fn not_started() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn swaps(&self) -> usize {
        self.swaps.load(Ordering::SeqCst)
    }
}

impl MinerEngine for RecordingEngine {
    fn streamers(&self) -> Option<Arc<StreamerList>> {
        self.active.load()
    }

    fn set_streamer_list(&self, list: Arc<StreamerList>) {
        self.swaps.fetch_add(1, Ordering::SeqCst);
        self.active.store(list);
    }
}

pub fn list(names: &[&str]) -> StreamerList {
    names.iter().map(|n| StreamerId::parse(n).unwrap()).collect()
}

/// Write `content` and stamp the file `secs` after the epoch, so tests do
/// not depend on filesystem timestamp granularity.
#[allow(dead_code)]
pub fn write_with_mtime(path: &Path, content: &str, secs: u64) {
    fs::write(path, content).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}
