use crate::{command::Command, paste::PasteOrchestrator, watcher::Watcher};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::UnboundedReceiver,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

pub(crate) struct MainLoop {
    watcher: Watcher,
    paste: Arc<PasteOrchestrator>,
    commands: UnboundedReceiver<Command>,
    poll_interval: Duration,
    token: CancellationToken,
}

impl MainLoop {
    pub(crate) fn new(
        watcher: Watcher,
        paste: Arc<PasteOrchestrator>,
        commands: UnboundedReceiver<Command>,
        poll_interval: Duration,
        token: CancellationToken,
    ) -> Self {
        Self {
            watcher,
            paste,
            commands,
            poll_interval,
            token,
        }
    }

    pub(crate) async fn start(self) {
        let Self {
            mut watcher,
            paste,
            mut commands,
            poll_interval,
            token,
        } = self;

        let mut ticks = interval(poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    log::info!("received exit signal, stopping...");
                    break;
                }

                _ = ticks.tick() => watcher.tick(),

                command = commands.recv() => {
                    let Some(command) = command else {
                        log::info!("all handles are gone, stopping...");
                        break;
                    };
                    match command {
                        Command::Activate(text) => {
                            // runs beside the poll loop so ticks continue during the settle delay
                            let paste = Arc::clone(&paste);
                            tokio::spawn(async move {
                                let outcome = paste.activate(&text).await;
                                log::info!("[paste] {outcome:?}");
                            });
                        }
                    }
                }
            }
        }
    }
}
