use crate::{
    capability::{Clipboard, Desktop, Picker},
    command::Command,
    config::Config,
    engine::Engine,
    event::Snapshot,
    main_loop::MainLoop,
    paste::PasteOrchestrator,
    store::Store,
    system::{SystemClipboard, Xdotool},
    thread::Thread,
    watcher::{ClipSource, PollingSource, Watcher},
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, UnboundedSender, unbounded_channel};

/// The running service, as seen by the presentation layer.
pub struct Handle {
    engine: Engine,
    paste: Arc<PasteOrchestrator>,
    commands: UnboundedSender<Command>,
    thread: Thread,
}

impl Handle {
    /// Starts the service against the real clipboard, `xdotool` and the
    /// default data directory.
    pub fn start_system(config: &Config, picker: Arc<dyn Picker>) -> Result<Self> {
        let store = Store::new(Store::default_dir()?);
        let clipboard = Arc::new(SystemClipboard::new()?);
        Self::start(config, store, clipboard, Arc::new(Xdotool), picker)
    }

    /// Starts the service with a polling watcher over `clipboard`.
    pub fn start(
        config: &Config,
        store: Store,
        clipboard: Arc<dyn Clipboard>,
        desktop: Arc<dyn Desktop>,
        picker: Arc<dyn Picker>,
    ) -> Result<Self> {
        let source = PollingSource::new(Arc::clone(&clipboard));
        Self::start_with_source(config, store, Box::new(source), clipboard, desktop, picker)
    }

    /// Starts the service with any source of clipboard changes.
    pub fn start_with_source(
        config: &Config,
        store: Store,
        source: Box<dyn ClipSource>,
        clipboard: Arc<dyn Clipboard>,
        desktop: Arc<dyn Desktop>,
        picker: Arc<dyn Picker>,
    ) -> Result<Self> {
        config.validate()?;
        log::info!("starting with {config:?}");

        let engine = Engine::open(store, config.max_items);
        let paste = Arc::new(PasteOrchestrator::new(
            clipboard,
            desktop,
            picker,
            config.paste_delay(),
        ));
        let (commands, commands_rx) = unbounded_channel();

        let thread = {
            let watcher = Watcher::new(source, engine.clone());
            let paste = Arc::clone(&paste);
            let poll_interval = config.poll_interval();
            Thread::spawn(move |token| {
                MainLoop::new(watcher, paste, commands_rx, poll_interval, token)
            })?
        };

        Ok(Self {
            engine,
            paste,
            commands,
            thread,
        })
    }

    pub fn get_snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Receives the current snapshot right away, then one per change.
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        self.engine.subscribe()
    }

    pub fn request_delete(&self, id: &str) {
        self.engine.delete(id);
    }

    pub fn request_clear(&self) {
        self.engine.clear();
    }

    /// Call when the picker is about to be shown.
    pub fn capture_focus(&self) {
        self.paste.capture_focus();
    }

    /// Pastes `text` into the window captured by [`Handle::capture_focus`].
    /// Returns immediately; the paste happens on the service thread.
    pub fn request_activate(&self, text: impl Into<String>) {
        if self.commands.send(Command::Activate(text.into())).is_err() {
            log::error!("failed to send command: service thread is gone");
        }
    }

    /// Stops polling, waits for the service thread and flushes the history.
    pub fn stop(self) -> Result<()> {
        let result = self.thread.stop();
        self.engine.flush();
        result
    }
}
