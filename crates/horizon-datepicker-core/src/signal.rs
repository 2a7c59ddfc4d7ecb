//! Signal/slot system for Horizon Datepicker.
//!
//! Signals are how a widget reports state changes to its host. A signal owns
//! a set of connected slots (closures); emitting the signal invokes every
//! slot, in connection order, with a reference to the emitted value.
//!
//! The date picker runs on a single cooperative event loop, so every slot is
//! invoked directly on the emitting thread. Slots are cloned out of the
//! connection table before they run, which lets a slot connect or disconnect
//! other slots (or itself) without deadlocking.
//!
//! # Example
//!
//! ```
//! use horizon_datepicker_core::Signal;
//!
//! let value_changed = Signal::<String>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit("2022-02-05".to_string());
//! value_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, passed back to [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A notification channel carrying values of type `Args` to any number of
/// connected closures. `Signal<()>` carries no payload.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// While set, `emit` is a no-op.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with nothing connected.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect `slot`; it runs on every later `emit` until disconnected.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot and return a guard that disconnects it when dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Remove one connection. Returns `false` if `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Remove every connection.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppress or resume emission. Emits while suppressed are dropped,
    /// not queued.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    #[tracing::instrument(skip_all, target = "horizon_datepicker_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard returned by [`Signal::connect_scoped`].
///
/// The connection is removed when the guard goes out of scope.
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The connection this guard owns.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
