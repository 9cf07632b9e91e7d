//! Session carts held between requests.

use std::{sync::Arc, time::Duration};

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::info;

use till_app::carts::models::{Cart, CartUuid};

/// Carts untouched for this long are discarded.
pub(crate) const DEFAULT_IDLE_TIMEOUT: SignedDuration = SignedDuration::from_mins(30);

/// A cart shared between the requests of one session.
pub(crate) type SessionCart = Arc<Mutex<Cart>>;

#[derive(Debug)]
struct OpenCart {
    cart: SessionCart,
    last_touched: Timestamp,
}

impl OpenCart {
    fn new(cart: Cart, now: Timestamp) -> Self {
        Self {
            cart: Arc::new(Mutex::new(cart)),
            last_touched: now,
        }
    }
}

/// Open carts keyed by session cart UUID.
///
/// The map lock is held only to look a cart up; each cart has its own lock,
/// so requests against one cart run one at a time without blocking others.
/// A cart nobody has looked up within the idle timeout ends its session.
#[derive(Debug)]
pub(crate) struct CartSessions {
    carts: Mutex<FxHashMap<CartUuid, OpenCart>>,
    idle_timeout: SignedDuration,
}

impl Default for CartSessions {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl CartSessions {
    pub(crate) fn new(idle_timeout: SignedDuration) -> Self {
        Self {
            carts: Mutex::new(FxHashMap::default()),
            idle_timeout,
        }
    }

    /// Open an empty cart, discarding idle ones first.
    pub(crate) async fn open(&self) -> CartUuid {
        self.open_at(Timestamp::now()).await
    }

    async fn open_at(&self, now: Timestamp) -> CartUuid {
        let uuid = CartUuid::new();
        let mut carts = self.carts.lock().await;

        self.retain_active(&mut carts, now);
        carts.insert(uuid, OpenCart::new(Cart::new(), now));

        uuid
    }

    pub(crate) async fn get(&self, cart: CartUuid) -> Option<SessionCart> {
        self.get_at(cart, Timestamp::now()).await
    }

    async fn get_at(&self, cart: CartUuid, now: Timestamp) -> Option<SessionCart> {
        let mut carts = self.carts.lock().await;
        let open = carts.get_mut(&cart)?;

        if self.is_idle(open, now) {
            carts.remove(&cart);

            return None;
        }

        open.last_touched = now;

        Some(Arc::clone(&open.cart))
    }

    /// Discard a cart, returning whether it was open.
    pub(crate) async fn close(&self, cart: CartUuid) -> bool {
        self.carts.lock().await.remove(&cart).is_some()
    }

    pub(crate) async fn open_count(&self) -> usize {
        self.carts.lock().await.len()
    }

    /// Discard every idle cart, returning how many went.
    pub(crate) async fn expire_idle(&self) -> usize {
        self.expire_idle_at(Timestamp::now()).await
    }

    async fn expire_idle_at(&self, now: Timestamp) -> usize {
        let mut carts = self.carts.lock().await;

        self.retain_active(&mut carts, now)
    }

    fn retain_active(&self, carts: &mut FxHashMap<CartUuid, OpenCart>, now: Timestamp) -> usize {
        let before = carts.len();

        carts.retain(|_, open| !self.is_idle(open, now));

        before - carts.len()
    }

    fn is_idle(&self, open: &OpenCart, now: Timestamp) -> bool {
        now.duration_since(open.last_touched) > self.idle_timeout
    }

    #[cfg(test)]
    pub(crate) async fn insert(&self, cart: Cart) -> CartUuid {
        let uuid = CartUuid::new();

        self.carts
            .lock()
            .await
            .insert(uuid, OpenCart::new(cart, Timestamp::now()));

        uuid
    }
}

/// Sweep idle carts every `period` for the life of the process.
pub(crate) async fn expire_idle_carts(sessions: Arc<CartSessions>, period: Duration) {
    let mut ticks = tokio::time::interval(period);

    loop {
        ticks.tick().await;

        let expired = sessions.expire_idle().await;

        if expired > 0 {
            info!(expired, "expired idle carts");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn opened_cart_starts_empty() {
        let sessions = CartSessions::default();

        let uuid = sessions.open().await;
        let cart = sessions.get(uuid).await;

        assert!(cart.is_some(), "expected cart to be open");

        if let Some(cart) = cart {
            assert!(cart.lock().await.is_empty(), "expected empty cart");
        }
    }

    #[tokio::test]
    async fn closed_cart_is_gone() {
        let sessions = CartSessions::default();

        let uuid = sessions.open().await;

        assert!(sessions.close(uuid).await, "expected open cart to close");
        assert!(sessions.get(uuid).await.is_none(), "expected cart to be gone");
        assert!(!sessions.close(uuid).await, "expected second close to miss");
    }

    #[tokio::test]
    async fn idle_carts_expire_and_touched_carts_survive() -> TestResult {
        let sessions = CartSessions::new(SignedDuration::from_mins(10));
        let start = Timestamp::UNIX_EPOCH;

        let abandoned = sessions.open_at(start).await;
        let active = sessions.open_at(start).await;

        let later = start.checked_add(SignedDuration::from_mins(8))?;

        assert!(sessions.get_at(active, later).await.is_some(), "expected active cart");

        let expiry = start.checked_add(SignedDuration::from_mins(11))?;

        assert_eq!(sessions.expire_idle_at(expiry).await, 1);
        assert!(sessions.get_at(abandoned, expiry).await.is_none(), "expected expiry");
        assert!(sessions.get_at(active, expiry).await.is_some(), "expected survival");
        assert_eq!(sessions.open_count().await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn opening_a_cart_sweeps_idle_ones() -> TestResult {
        let sessions = CartSessions::new(SignedDuration::from_mins(10));
        let start = Timestamp::UNIX_EPOCH;

        for _ in 0..3 {
            sessions.open_at(start).await;
        }

        let expiry = start.checked_add(SignedDuration::from_hours(1))?;
        let fresh = sessions.open_at(expiry).await;

        assert_eq!(sessions.open_count().await, 1);
        assert!(sessions.get_at(fresh, expiry).await.is_some(), "expected fresh cart");

        Ok(())
    }

    #[tokio::test]
    async fn looking_up_an_idle_cart_ends_its_session() -> TestResult {
        let sessions = CartSessions::new(SignedDuration::from_mins(10));
        let start = Timestamp::UNIX_EPOCH;

        let uuid = sessions.open_at(start).await;
        let expiry = start.checked_add(SignedDuration::from_mins(11))?;

        assert!(sessions.get_at(uuid, expiry).await.is_none(), "expected expiry");
        assert_eq!(sessions.open_count().await, 0);

        Ok(())
    }
}
