use crate::{
    event::{Snapshot, Subscribers},
    history::History,
    store::Store,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::Receiver;

struct Inner {
    history: History,
    store: Store,
    subscribers: Subscribers,
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.history.entries())
    }

    /// Persist, then push the new snapshot. Both happen under the engine lock.
    fn commit(&mut self) {
        if let Err(err) = self.store.save(self.history.entries()) {
            log::error!("[store] failed to persist history, keeping it in memory: {err:?}");
        }
        let snapshot = self.snapshot();
        self.subscribers.notify(&snapshot);
    }
}

/// Owner of the clipboard history. Cloning shares the same history.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Mutex<Inner>>,
}

impl Engine {
    /// Hydrates the history from `store`; unreadable data starts empty.
    pub fn open(store: Store, max_items: usize) -> Self {
        let history = History::hydrate(max_items, store.load());
        log::info!(
            "[engine] loaded {} entries from {}",
            history.entries().len(),
            store.path().display()
        );
        Self {
            inner: Arc::new(Mutex::new(Inner {
                history,
                store,
                subscribers: Subscribers::default(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("lock is poisoned")
    }

    pub fn record_copy(&self, text: &str) {
        let mut inner = self.lock();
        if inner.history.record(text) {
            log::debug!("[engine] recorded {} bytes", text.len());
            inner.commit();
        }
    }

    /// Unknown ids are ignored: the UI may race a refresh.
    pub fn delete(&self, id: &str) {
        let mut inner = self.lock();
        if inner.history.delete(id) {
            inner.commit();
        } else {
            log::debug!("[engine] delete of unknown id {id:?} ignored");
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.history.clear();
        inner.commit();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// The receiver yields the current snapshot, then one per mutation.
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        let mut inner = self.lock();
        let current = inner.snapshot();
        let rx = inner.subscribers.subscribe(current);
        log::debug!("[engine] {} subscribers", inner.subscribers.len());
        rx
    }

    /// Writes the current list once more; used at shutdown.
    pub fn flush(&self) {
        let inner = self.lock();
        if let Err(err) = inner.store.save(inner.history.entries()) {
            log::error!("[store] failed to flush history: {err:?}");
        }
    }
}
