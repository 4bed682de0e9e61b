//! Pure cart operations.
//!
//! A cart is an ordered `Vec<LineItem>`, unique by id, insertion order
//! preserved. These functions mutate or inspect a snapshot the caller
//! has already loaded; persistence and update notification live in the
//! storefront crate.

use crate::types::{ItemId, LineItem};

/// Add an item to the cart.
///
/// If an entry with the same id exists, its quantity is incremented by
/// the incoming quantity (a zero quantity counts as 1). Otherwise the
/// item is appended, with quantity defaulted to 1 when zero.
pub fn add(items: &mut Vec<LineItem>, mut incoming: LineItem) {
    let increment = incoming.qty.max(1);
    if let Some(existing) = items.iter_mut().find(|i| i.id == incoming.id) {
        existing.qty = existing.qty.max(1).saturating_add(increment);
    } else {
        incoming.qty = increment;
        items.push(incoming);
    }
}

/// Remove the entry with the given id. No-op when absent.
pub fn remove(items: &mut Vec<LineItem>, id: &ItemId) {
    items.retain(|i| &i.id != id);
}

/// Set the quantity of an entry, clamped to a non-negative integer
/// (floor, minimum 0). A quantity of 0 deletes the entry.
///
/// Returns `false` when no entry matches the id, in which case the cart
/// is left untouched and the caller must not persist or publish.
pub fn set_qty(items: &mut Vec<LineItem>, id: &ItemId, qty: f64) -> bool {
    let Some(index) = items.iter().position(|i| &i.id == id) else {
        return false;
    };
    let clamped = crate::types::clamp_qty(qty);
    if clamped == 0 {
        items.remove(index);
    } else if let Some(item) = items.get_mut(index) {
        item.qty = clamped;
    }
    true
}

/// Sum of `price * qty` over all entries, with a zero quantity counted
/// as 1. Unrounded; display sites format to 2 decimals.
#[must_use]
pub fn total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::subtotal).sum()
}

/// Total number of units in the cart (for the count badge).
#[must_use]
pub fn item_count(items: &[LineItem]) -> u64 {
    items.iter().map(|i| u64::from(i.qty)).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, qty: u32) -> LineItem {
        let mut item = LineItem::new(id, id.to_uppercase(), price);
        item.qty = qty;
        item
    }

    #[test]
    fn adding_same_id_twice_accumulates_qty() {
        let mut cart = Vec::new();
        add(&mut cart, item("a", 5.0, 1));
        add(&mut cart, item("a", 5.0, 1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().unwrap().qty, 2);
        assert_eq!(total(&cart), 10.0);
    }

    #[test]
    fn add_defaults_zero_qty_to_one() {
        let mut cart = Vec::new();
        add(&mut cart, item("a", 5.0, 0));
        assert_eq!(cart.first().unwrap().qty, 1);

        add(&mut cart, item("a", 5.0, 0));
        assert_eq!(cart.first().unwrap().qty, 2);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut cart = Vec::new();
        add(&mut cart, item("a", 1.0, 1));
        add(&mut cart, item("b", 2.0, 1));
        add(&mut cart, item("a", 1.0, 3));
        let ids: Vec<&str> = cart.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cart.first().unwrap().qty, 4);
    }

    #[test]
    fn set_qty_zero_removes_entry() {
        let mut cart = vec![item("a", 5.0, 2), item("b", 3.0, 1)];
        assert!(set_qty(&mut cart, &ItemId::from("a"), 0.0));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().unwrap().id.as_str(), "b");
    }

    #[test]
    fn set_qty_floors_fractional_input() {
        let mut cart = vec![item("a", 5.0, 2)];
        assert!(set_qty(&mut cart, &ItemId::from("a"), 3.9));
        assert_eq!(cart.first().unwrap().qty, 3);
    }

    #[test]
    fn set_qty_clamps_negative_to_removal() {
        let mut cart = vec![item("a", 5.0, 2)];
        assert!(set_qty(&mut cart, &ItemId::from("a"), -4.0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_qty_unknown_id_leaves_cart_unchanged() {
        let mut cart = vec![item("a", 5.0, 2)];
        let before = cart.clone();
        assert!(!set_qty(&mut cart, &ItemId::from("nope"), 7.0));
        assert_eq!(cart, before);
    }

    #[test]
    fn remove_filters_by_id() {
        let mut cart = vec![item("a", 5.0, 2), item("b", 3.0, 1)];
        remove(&mut cart, &ItemId::from("a"));
        assert_eq!(cart.len(), 1);
        remove(&mut cart, &ItemId::from("missing"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn total_matches_mixed_price_sources() {
        // Prices decoded from string and number inputs.
        let cart: Vec<LineItem> = serde_json::from_str(
            r#"[{"id":"a","price":"2.50","qty":2},{"id":"b","price":3,"qty":1}]"#,
        )
        .unwrap();
        assert_eq!(total(&cart), 8.0);
    }

    #[test]
    fn item_count_sums_quantities() {
        let cart = vec![item("a", 5.0, 2), item("b", 3.0, 1)];
        assert_eq!(item_count(&cart), 3);
        assert_eq!(item_count(&[]), 0);
    }
}
