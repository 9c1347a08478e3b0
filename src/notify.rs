//! Transient user-visible message surface.
//!
//! The pipeline reports session expiry and request failures through this
//! seam; how a message is rendered (toast, status line, stderr) is the
//! embedding application's concern.

/// Sink for transient error messages shown to the user.
pub trait Notifier: Send + Sync {
    /// Surface a transient error message.
    fn error(&self, message: &str);
}

/// Default notifier that writes messages to the application log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::warn!("{}", message);
    }
}
