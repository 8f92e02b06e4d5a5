use crate::entry::HistoryEntry;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender, channel, error::TrySendError};

/// How many snapshots a subscriber may fall behind before it is dropped.
pub(crate) const SUBSCRIBER_BACKLOG: usize = 256;

/// Immutable, most-recent-first view of the history.
pub type Snapshot = Arc<[HistoryEntry]>;

/// Push channel to the presentation layer: one full snapshot per mutation.
#[derive(Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<Snapshot>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, current: Snapshot) -> Receiver<Snapshot> {
        let (tx, rx) = channel(SUBSCRIBER_BACKLOG);
        // fresh channel with a live receiver, can't fail
        let _ = tx.try_send(current);
        self.senders.push(tx);
        rx
    }

    /// Never blocks: a subscriber whose backlog is full is dropped, its
    /// receiver drains what was queued and then sees the channel closed.
    pub(crate) fn notify(&mut self, snapshot: &Snapshot) {
        self.senders
            .retain(|tx| match tx.try_send(Arc::clone(snapshot)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    log::warn!("[subscribers] dropping subscriber that stopped reading");
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            });
    }

    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
