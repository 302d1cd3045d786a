//! Compass event listeners and weak fan-out

use std::sync::{Arc, Weak};

use crate::types::Coordinate;

/// Receiver for compass events
///
/// All methods default to no-ops. Callbacks run synchronously on the thread
/// that fed the tracker; a listener must not call `start` or `stop` on the
/// tracker that is notifying it. Listeners are `Send + Sync` so a tracker can
/// be moved to, or locked from, another thread.
pub trait CompassListener: Send + Sync {
    /// New emitted heading in degrees (negated smoothed azimuth)
    fn on_heading(&self, _degrees: f32) {}

    /// New phone location
    fn on_location(&self, _coordinate: Coordinate) {}

    fn on_started(&self) {}

    fn on_stopped(&self) {}
}

/// Set of weakly held listeners
///
/// Callers own their listeners; dropping the last `Arc` unsubscribes
/// implicitly and the dead entry is pruned on the next notification.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Weak<dyn CompassListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener`; adding the same listener twice has no effect
    pub fn add<T: CompassListener + 'static>(&mut self, listener: &Arc<T>) {
        if self.contains(listener) {
            return;
        }
        let listener: Arc<dyn CompassListener> = listener.clone();
        self.listeners.push(Arc::downgrade(&listener));
    }

    /// Unsubscribe `listener`, returning whether it was present
    pub fn remove<T: CompassListener + 'static>(&mut self, listener: &Arc<T>) -> bool {
        let before = self.listeners.len();
        let target = Arc::as_ptr(listener);
        self.listeners
            .retain(|weak| !std::ptr::addr_eq(weak.as_ptr(), target));
        self.listeners.len() != before
    }

    pub fn contains<T: CompassListener + 'static>(&self, listener: &Arc<T>) -> bool {
        let target = Arc::as_ptr(listener);
        self.listeners
            .iter()
            .any(|weak| std::ptr::addr_eq(weak.as_ptr(), target))
    }

    /// Number of listeners still alive
    pub fn len(&self) -> usize {
        self.listeners.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `event` on every live listener, pruning dropped ones
    pub fn notify(&mut self, mut event: impl FnMut(&dyn CompassListener)) {
        self.listeners.retain(|weak| weak.strong_count() > 0);

        // Upgrade first so a listener dropped mid-notification stays valid
        let live: Vec<Arc<dyn CompassListener>> =
            self.listeners.iter().filter_map(Weak::upgrade).collect();
        for listener in &live {
            event(listener.as_ref());
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.len())
            .finish()
    }
}
