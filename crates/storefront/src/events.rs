//! Cart update notifications.
//!
//! Every cart mutation publishes the full new snapshot to any number of
//! in-process subscribers. There are no cancellation semantics, and a
//! publish with no subscribers is not an error. Page elements get the
//! same notification over the wire via the `HX-Trigger: cart-updated`
//! response header attached by the mutating routes.

use cartside_core::LineItem;
use tokio::sync::broadcast;

/// The full ordered list of line items at a point in time.
pub type CartSnapshot = Vec<LineItem>;

/// Name of the update event as seen by the page (HTMX trigger).
pub const CART_UPDATED_EVENT: &str = "cart-updated";

const CHANNEL_CAPACITY: usize = 16;

/// Process-wide publish/subscribe channel for cart updates.
#[derive(Debug, Clone)]
pub struct CartEvents {
    tx: broadcast::Sender<CartSnapshot>,
}

impl CartEvents {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to cart snapshots. A slow subscriber that lags behind
    /// simply misses intermediate snapshots; each snapshot is total.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartSnapshot> {
        self.tx.subscribe()
    }

    /// Publish a new snapshot to all subscribers.
    pub fn publish(&self, snapshot: CartSnapshot) {
        // Send only fails when there are no subscribers.
        let _ = self.tx.send(snapshot);
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}
