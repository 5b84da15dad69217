//! Page navigation side effects.

/// What the wizard can ask of the hosting page
pub trait Navigator: Send + Sync {
    /// Scroll the page back to the top, requested on every step change
    fn scroll_to_top(&self);
}

/// Navigator for headless hosts: records the request in the logs
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn scroll_to_top(&self) {
        tracing::debug!("Scroll to top requested");
    }
}
