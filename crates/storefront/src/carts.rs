//! Server-side cart storage.
//!
//! A visitor's session holds only a [`CartKey`]. The carts themselves live in
//! a [`CartStore`] on the application state, and every change to a cart runs
//! under the store lock. Two requests from the same visitor that arrive at
//! once therefore apply one after the other instead of racing on a copy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use isha_core::Cart;
use serde::{Deserialize, Serialize};

/// Handle to one visitor's cart, stored in their session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(u64);

struct Slot {
    cart: Cart,
    touched: Instant,
}

/// In-memory carts keyed by [`CartKey`].
///
/// Carts untouched for longer than `max_idle` are dropped the next time a
/// key is handed out, matching the session expiry so abandoned carts do not
/// pile up.
pub struct CartStore {
    carts: Mutex<HashMap<CartKey, Slot>>,
    next_key: AtomicU64,
    max_idle: Duration,
}

impl CartStore {
    #[must_use]
    pub fn new(max_idle: Duration) -> Self {
        Self {
            carts: Mutex::new(HashMap::new()),
            next_key: AtomicU64::new(1),
            max_idle,
        }
    }

    /// Reserve a key for a new visitor and sweep idle carts.
    #[must_use]
    pub fn allocate(&self) -> CartKey {
        let key = CartKey(self.next_key.fetch_add(1, Ordering::Relaxed));

        let mut carts = self.lock();
        let before = carts.len();
        carts.retain(|_, slot| slot.touched.elapsed() < self.max_idle);
        let swept = before - carts.len();
        drop(carts);

        if swept > 0 {
            tracing::debug!(swept, "dropped idle carts");
        }
        key
    }

    /// Apply `change` to the cart for `key` while holding the store lock.
    ///
    /// A key with no cart yet starts from an empty one.
    pub fn update<R>(&self, key: CartKey, change: impl FnOnce(&mut Cart) -> R) -> R {
        let mut carts = self.lock();
        let slot = carts.entry(key).or_insert_with(|| Slot {
            cart: Cart::new(),
            touched: Instant::now(),
        });
        slot.touched = Instant::now();
        change(&mut slot.cart)
    }

    /// Copy of the cart for `key`, or an empty cart.
    #[must_use]
    pub fn snapshot(&self, key: CartKey) -> Cart {
        self.lock()
            .get(&key)
            .map(|slot| slot.cart.clone())
            .unwrap_or_default()
    }

    // A panic inside `update` leaves the cart it was changing as it was at
    // the panic, which is still a valid cart.
    fn lock(&self) -> MutexGuard<'_, HashMap<CartKey, Slot>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("carts", &self.lock().len())
            .field("max_idle", &self.max_idle)
            .finish_non_exhaustive()
    }
}
