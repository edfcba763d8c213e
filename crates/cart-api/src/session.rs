//! # Session Carts
//!
//! One `Cart` per session id. The map lock is held only long enough to
//! look a session up; each cart has its own lock, so a slow checkout in
//! one session never stalls another. Sessions idle past the configured
//! timeout are dropped by `sweep_idle`.

use cart_core::{Cart, CartError, CartResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A session cart and when it was last used
#[derive(Debug)]
struct SessionCart {
    cart: Cart,
    last_seen: Instant,
}

type SessionHandle = Arc<Mutex<SessionCart>>;

/// Shared map of session carts
#[derive(Clone, Default)]
pub struct CartStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionHandle>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new empty cart and return its session id
    pub fn create(&self) -> CartResult<Uuid> {
        let id = Uuid::new_v4();
        let session = SessionCart {
            cart: Cart::new(),
            last_seen: Instant::now(),
        };
        self.sessions()?.insert(id, Arc::new(Mutex::new(session)));
        Ok(id)
    }

    /// Run `f` against the cart for `id`; `None` if the session is unknown.
    ///
    /// Only this session's cart is locked while `f` runs.
    pub fn with_cart<R>(&self, id: Uuid, f: impl FnOnce(&mut Cart) -> R) -> CartResult<Option<R>> {
        let Some(handle) = self.sessions()?.get(&id).cloned() else {
            return Ok(None);
        };

        let mut session = handle
            .lock()
            .map_err(|_| CartError::Internal(format!("cart {} lock poisoned", id)))?;
        session.last_seen = Instant::now();
        Ok(Some(f(&mut session.cart)))
    }

    /// Drop a session cart, returning whether it existed
    pub fn remove(&self, id: Uuid) -> CartResult<bool> {
        Ok(self.sessions()?.remove(&id).is_some())
    }

    /// Drop sessions unused for at least `max_idle`, returning how many
    /// were removed. Carts in use by a request are kept.
    pub fn sweep_idle(&self, max_idle: Duration) -> CartResult<usize> {
        let mut sessions = self.sessions()?;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_seen.elapsed() < max_idle,
            Err(_) => true,
        });
        Ok(before - sessions.len())
    }

    fn sessions(&self) -> CartResult<MutexGuard<'_, HashMap<Uuid, SessionHandle>>> {
        self.sessions
            .lock()
            .map_err(|_| CartError::Internal("cart store lock poisoned".to_string()))
    }
}
