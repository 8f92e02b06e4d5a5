use crate::main_loop::MainLoop;
use anyhow::{Context as _, Result, anyhow};
use std::{thread::JoinHandle, time::Duration};
use tokio_util::sync::CancellationToken;

/// How long shutdown waits for a desktop call still running on the
/// blocking pool.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Dedicated OS thread running the service's tokio runtime.
pub(crate) struct Thread {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Thread {
    pub(crate) fn spawn(make_loop: impl FnOnce(CancellationToken) -> MainLoop) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start tokio")?;

        let token = CancellationToken::new();
        let main_loop = make_loop(token.clone());

        let handle = std::thread::Builder::new()
            .name("clipkeep".to_string())
            .spawn(move || {
                rt.block_on(main_loop.start());
                rt.shutdown_timeout(SHUTDOWN_GRACE);
                log::info!("tokio has finished");
            })
            .context("failed to spawn service thread")?;

        Ok(Self { token, handle })
    }

    pub(crate) fn stop(self) -> Result<()> {
        self.token.cancel();
        self.handle
            .join()
            .map_err(|_| anyhow!("failed to join thread (bug?)"))?;
        Ok(())
    }
}
