//! Controller hot-plug queue
//!
//! Platform joystick callbacks may run on a thread other than the one that
//! owns the [`InputManager`](super::InputManager). They never touch the live
//! controller map; they push removals here and the manager drains the queue
//! at the start of its next `update()`.

use super::ControllerId;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A queued controller removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Removal {
    pub controller: ControllerId,
    /// Listeners were already told about the disconnect
    pub announced: bool,
}

/// Cloneable, `Send` handle onto the removed-controller queue
#[derive(Debug, Clone, Default)]
pub struct ControllerHotplug {
    removed: Arc<Mutex<VecDeque<Removal>>>,
}

impl ControllerHotplug {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a disconnected controller from any thread
    pub fn disconnect(&self, controller: ControllerId) {
        self.push(Removal {
            controller,
            announced: false,
        });
    }

    /// Number of removals waiting for the next input update
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn push(&self, removal: Removal) {
        self.lock().push_back(removal);
    }

    pub(crate) fn drain(&self) -> Vec<Removal> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Removal>> {
        // A panicking producer cannot leave the queue half-written.
        match self.removed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_is_send_and_shared() {
        fn assert_send<T: Send + Sync>() {}
        assert_send::<ControllerHotplug>();

        let hotplug = ControllerHotplug::new();
        let remote = hotplug.clone();
        std::thread::spawn(move || remote.disconnect(ControllerId(3)))
            .join()
            .unwrap();

        assert_eq!(hotplug.pending(), 1);
        let drained = hotplug.drain();
        assert_eq!(drained[0].controller, ControllerId(3));
        assert!(!drained[0].announced);
        assert_eq!(hotplug.pending(), 0);
    }
}
