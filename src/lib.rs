pub use capability::{Clipboard, Desktop, Picker};
pub use config::{Config, ConfigReadOption};
pub use engine::Engine;
pub use entry::HistoryEntry;
pub use event::Snapshot;
pub use handle::Handle;
pub use logger::Logger;
pub use paste::{PasteOrchestrator, PasteOutcome};
pub use store::Store;
pub use system::{SystemClipboard, Xdotool};
pub use watcher::{ClipSource, PollingSource};

mod capability;
mod command;
mod config;
mod engine;
mod entry;
mod event;
#[cfg(test)]
mod fakes;
mod handle;
mod history;
mod logger;
mod main_loop;
mod paste;
mod store;
mod system;
mod thread;
mod watcher;
