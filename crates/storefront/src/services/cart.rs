//! Cart service: the injected store object behind every cart route.
//!
//! Each operation performs a full load-mutate-save cycle against the
//! store; there is no cached in-memory copy across calls. Every mutation
//! that persists also publishes the new snapshot to subscribers. Storage
//! failures are swallowed by the store layer, so no operation here can
//! fail.

use std::sync::Arc;

use cartside_core::{ItemId, LineItem, cart};
use tokio::sync::broadcast;

use crate::events::{CartEvents, CartSnapshot};
use crate::store::CartStore;

/// Cart operations over an injected store with publish/subscribe.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
    events: CartEvents,
}

impl CartService {
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            store,
            events: CartEvents::new(),
        }
    }

    /// Add an item: merge by id or append, persist, publish.
    /// Returns the new snapshot.
    pub fn add(&self, item: LineItem) -> CartSnapshot {
        let mut items = self.store.load();
        cart::add(&mut items, item);
        self.persist_and_publish(items)
    }

    /// Remove the entry with the given id, persist, publish.
    ///
    /// Always persists and publishes, even when nothing matched; a remove
    /// on an empty cart still emits an empty snapshot.
    pub fn remove(&self, id: &ItemId) -> CartSnapshot {
        let mut items = self.store.load();
        cart::remove(&mut items, id);
        self.persist_and_publish(items)
    }

    /// Set the quantity of an entry (floor, minimum 0; 0 deletes).
    ///
    /// A complete no-op for an unknown id: no persist, no publish. The
    /// returned flag is `false` in that case so callers can skip their
    /// own update notifications too.
    pub fn set_qty(&self, id: &ItemId, qty: f64) -> (CartSnapshot, bool) {
        let mut items = self.store.load();
        if !cart::set_qty(&mut items, id, qty) {
            return (items, false);
        }
        (self.persist_and_publish(items), true)
    }

    /// Persist an empty cart and publish the empty snapshot.
    pub fn clear(&self) -> CartSnapshot {
        self.persist_and_publish(Vec::new())
    }

    /// Current snapshot, loaded fresh from the store.
    #[must_use]
    pub fn items(&self) -> CartSnapshot {
        self.store.load()
    }

    /// Sum of `price * qty` over the stored cart. Unformatted.
    #[must_use]
    pub fn total(&self) -> f64 {
        cart::total(&self.store.load())
    }

    /// Total number of units in the stored cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        cart::item_count(&self.store.load())
    }

    /// Subscribe to snapshots published after each mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartSnapshot> {
        self.events.subscribe()
    }

    fn persist_and_publish(&self, items: Vec<LineItem>) -> CartSnapshot {
        self.store.save(&items);
        self.events.publish(items.clone());
        items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use tokio::sync::broadcast::error::TryRecvError;

    fn service() -> CartService {
        CartService::new(Arc::new(MemoryStore::default()))
    }

    fn item(id: &str, price: f64, qty: u32) -> LineItem {
        let mut item = LineItem::new(id, id.to_uppercase(), price);
        item.qty = qty;
        item
    }

    #[test]
    fn add_merges_by_id_and_publishes() {
        let svc = service();
        let mut rx = svc.subscribe();

        svc.add(item("a", 5.0, 1));
        svc.add(item("a", 5.0, 1));

        let items = svc.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().qty, 2);
        assert_eq!(svc.total(), 10.0);

        assert_eq!(rx.try_recv().unwrap().first().unwrap().qty, 1);
        assert_eq!(rx.try_recv().unwrap().first().unwrap().qty, 2);
    }

    #[test]
    fn set_qty_zero_deletes_entry() {
        let svc = service();
        svc.add(item("a", 5.0, 2));

        let (snapshot, changed) = svc.set_qty(&ItemId::from("a"), 0.0);
        assert!(changed);
        assert!(snapshot.is_empty());
        assert!(svc.items().is_empty());
    }

    #[test]
    fn set_qty_unknown_id_does_not_publish() {
        let svc = service();
        svc.add(item("a", 5.0, 1));
        let mut rx = svc.subscribe();

        let (snapshot, changed) = svc.set_qty(&ItemId::from("nope"), 3.0);

        assert!(!changed);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(svc.items().first().unwrap().qty, 1);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn remove_on_empty_cart_still_publishes_empty_snapshot() {
        let svc = service();
        let mut rx = svc.subscribe();

        let snapshot = svc.remove(&ItemId::from("ghost"));

        assert!(snapshot.is_empty());
        assert!(rx.try_recv().unwrap().is_empty());
    }

    #[test]
    fn clear_persists_empty_list_and_publishes() {
        let svc = service();
        svc.add(item("a", 5.0, 1));
        svc.add(item("b", 2.0, 3));
        let mut rx = svc.subscribe();

        svc.clear();

        assert!(svc.items().is_empty());
        assert_eq!(svc.item_count(), 0);
        assert!(rx.try_recv().unwrap().is_empty());
    }

    #[test]
    fn item_count_sums_quantities() {
        let svc = service();
        svc.add(item("a", 5.0, 2));
        svc.add(item("b", 1.0, 1));
        assert_eq!(svc.item_count(), 3);
    }
}
