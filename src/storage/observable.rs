//! Subscriber registry for observable stores
//!
//! A store owns one `Subscribers<T>` per observable value. Every listener
//! receives the current value once on registration and then one value per
//! committed mutation. Listeners are held by the registry; the caller keeps a
//! `Subscription` handle whose drop (or `unsubscribe`) stops delivery.
//!
//! A listener that panics is deactivated; the panic never reaches the store
//! that is publishing.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LedgerError;

/// Callback invoked with each delivered value
pub type Listener<T> = Box<dyn FnMut(&T) + Send + 'static>;

struct Registration<T> {
    active: Arc<AtomicBool>,
    listener: Listener<T>,
}

/// Registry of listeners for one observable value
pub struct Subscribers<T> {
    registrations: Mutex<Vec<Registration<T>>>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// Register `listener`, delivering `current` to it before returning.
    ///
    /// The owning store must hold its write gate so no mutation is published
    /// between reading `current` and the registration.
    pub fn register(
        &self,
        current: &T,
        mut listener: Listener<T>,
    ) -> Result<Subscription, LedgerError> {
        let mut registrations = self.lock();

        if panic::catch_unwind(AssertUnwindSafe(|| listener(current))).is_err() {
            return Err(LedgerError::Storage(
                "Listener panicked on its initial delivery".into(),
            ));
        }

        let active = Arc::new(AtomicBool::new(true));
        registrations.push(Registration {
            active: Arc::clone(&active),
            listener,
        });

        Ok(Subscription { active })
    }

    /// Deliver `value` to every active listener in registration order and
    /// prune the ones whose handle was dropped.
    pub fn publish(&self, value: &T) {
        let mut registrations = self.lock();

        registrations.retain(|r| r.active.load(Ordering::Acquire));
        for registration in registrations.iter_mut() {
            // A listener may have been cancelled by an earlier one in this round
            if !registration.active.load(Ordering::Acquire) {
                continue;
            }
            let listener = &mut registration.listener;
            if panic::catch_unwind(AssertUnwindSafe(|| listener(value))).is_err() {
                registration.active.store(false, Ordering::Release);
            }
        }
    }

    /// Number of listeners still active
    pub fn active_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|r| r.active.load(Ordering::Acquire))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Registration<T>>> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered listener
///
/// Dropping the handle stops delivery. It never affects writes that were
/// already accepted by the store.
#[must_use = "dropping a Subscription immediately stops delivery"]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Stop delivery to this listener
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
