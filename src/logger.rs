/// Logging backend for the service.
/// Filtering is controlled by `RUST_LOG`, e.g. `RUST_LOG=clipkeep=debug`.
pub struct Logger;

impl Logger {
    /// Initializes the logger. Safe to call more than once.
    pub fn init() {
        if let Err(err) = pretty_env_logger::try_init() {
            log::debug!("logger is already initialized: {err}");
        }
    }
}
