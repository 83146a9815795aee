//! Favorites change notification.
//!
//! Observers are plain closures registered with [`ChangeNotifier::observe`].
//! Registration hands back an [`ObservationTicket`]; the observer stays
//! registered exactly as long as the ticket is alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: Vec<(u64, Callback)>,
}

/// Synchronous observer list for one change channel.
#[derive(Default)]
pub struct ChangeNotifier {
    registry: Rc<RefCell<Registry>>,
}

impl ChangeNotifier {
    /// Registers `callback` and returns the ticket that keeps it registered.
    pub fn observe(&self, callback: impl Fn() + 'static) -> ObservationTicket {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Rc::new(callback)));

        tracing::trace!(observer = id, "observer registered");
        ObservationTicket {
            registry: Rc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Invokes every registered observer.
    ///
    /// The observer list is snapshotted first, so callbacks may register new
    /// observers or drop tickets (their own included) without invalidating the
    /// dispatch in progress. Observers added during dispatch are first called on
    /// the next notification.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .registry
            .borrow()
            .observers
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        tracing::trace!(observers = snapshot.len(), "dispatching change notification");
        for callback in snapshot {
            callback();
        }
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Scoped registration handle returned by [`ChangeNotifier::observe`].
///
/// Dropping the ticket unregisters its observer. [`ObservationTicket::dispose`]
/// does the same eagerly; calling it again, or dropping afterwards, is a no-op.
/// A ticket that outlives its notifier is inert.
#[must_use = "dropping the ticket immediately unregisters the observer"]
pub struct ObservationTicket {
    registry: Weak<RefCell<Registry>>,
    id: Option<u64>,
}

impl ObservationTicket {
    /// Unregisters the observer now.
    pub fn dispose(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };

        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .observers
                .retain(|(observer, _)| *observer != id);
            tracing::trace!(observer = id, "observer unregistered");
        }
    }

    /// Whether the ticket still holds a live registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.registry.strong_count() > 0
    }
}

impl Drop for ObservationTicket {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ObservationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationTicket")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
