use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// Queue bridging browser callbacks into the ECS world.
///
/// Callbacks run on the browser event loop outside any system, so they push
/// into a shared queue through a [`SignalSender`]. [`forward_signals`] drains
/// the queue once per frame and re-emits each entry as a Bevy event.
#[derive(Resource)]
pub struct SignalQueue<T: Send + 'static> {
    pending: Arc<Mutex<Vec<T>>>,
}

impl<T: Send + 'static> Default for SignalQueue<T> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Send + 'static> SignalQueue<T> {
    pub fn sender(&self) -> SignalSender<T> {
        SignalSender {
            pending: self.pending.clone(),
        }
    }

    /// Take every queued signal in arrival order.
    pub fn drain(&self) -> Vec<T> {
        if let Ok(mut pending) = self.pending.lock() {
            std::mem::take(&mut *pending)
        } else {
            Vec::new()
        }
    }
}

/// Cloneable handle given to callbacks and async tasks.
pub struct SignalSender<T> {
    pending: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for SignalSender<T> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<T> SignalSender<T> {
    pub fn send(&self, signal: T) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(signal);
        }
    }
}

/// Re-emit queued signals as events for this frame's `Update` systems.
pub fn forward_signals<T: Event>(queue: Res<SignalQueue<T>>, mut events: EventWriter<T>) {
    for signal in queue.drain() {
        events.write(signal);
    }
}
