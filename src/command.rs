/// Requests from the presentation layer that need the service runtime.
#[derive(Debug)]
pub(crate) enum Command {
    /// Paste this text into the window that was focused before the picker.
    Activate(String),
}
