//! Notification sink contract and the alert sound handle

use std::sync::Arc;

/// Notice surfaced to the user when a countdown completes
pub const TIMES_UP: &str = "Time's up!";

/// Receives the engine's "finished" signal
pub trait NotificationSink: Send {
    /// Play the alert and raise the time's-up notice
    fn notify(&self);
}

impl<T: NotificationSink + Sync + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self) {
        (**self).notify()
    }
}

/// Playable audio bytes with a label.
///
/// Cloning is cheap and shares the bytes, so a playback that already holds a
/// clone keeps its sound even after the sink's sound is replaced.
#[derive(Debug, Clone)]
pub struct AlertSound {
    name: String,
    data: Arc<[u8]>,
}

impl AlertSound {
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Placeholder used when no sound could be loaded
    pub fn silent() -> Self {
        Self::new("silent", Vec::<u8>::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether both handles share the same bytes
    pub fn same_bytes(&self, other: &AlertSound) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
