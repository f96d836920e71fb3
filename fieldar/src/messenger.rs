//! Notification channel from the engine to the embedding surface.

/// Receives redraw requests whenever a recomputation produced a new HUD
/// frame or scene bundle.
pub trait Messenger: Send + Sync {
    /// Requests the embedding surface to redraw the overlay.
    fn request_redraw(&self);
}

/// Messenger that does nothing. Useful for tests and headless runs.
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
