//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. Every mutation that publishes a snapshot also attaches an
//! `HX-Trigger: cart-updated` header so other page elements (the count
//! badge) can re-fetch themselves.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use cartside_core::{ItemId, LineItem, clamp_qty};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use tracing::instrument;

use crate::events::CART_UPDATED_EVENT;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub qty: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    fn from_items(items: &[LineItem]) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            total: format_price(cartside_core::cart::total(items)),
            item_count: cartside_core::cart::item_count(items),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            qty: item.qty,
            price: format_price(item.price),
            line_price: format_price(item.subtotal()),
            image: item.image.clone(),
        }
    }
}

/// Format an amount as a price string, rounded to 2 decimals with ties
/// away from zero. `{:.2}` alone rounds ties to even, which would turn
/// 0.125 into "$0.12" instead of "$0.13".
fn format_price(amount: f64) -> String {
    format!("${:.2}", (amount * 100.0).round() / 100.0)
}

// =============================================================================
// Form Input
// =============================================================================

/// Add to cart form data. Every field is optional; add-to-cart triggers
/// may carry partial metadata, so missing values fall back:
/// id -> title -> random token, price -> 0, qty -> 1.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub qty: Option<String>,
}

/// Update cart form data. `qty` stays a string so that an emptied input
/// coerces to 0 (which deletes the entry) instead of failing.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub qty: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

impl AddToCartForm {
    fn into_line_item(self) -> LineItem {
        let title = self
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());
        let id = self
            .id
            .map(|i| i.trim().to_owned())
            .filter(|i| !i.is_empty())
            .or_else(|| title.clone())
            .unwrap_or_else(random_token);

        LineItem {
            id: ItemId::new(id),
            title: title.unwrap_or_else(|| "Untitled item".to_owned()),
            price: coerce_price(self.price.as_deref()),
            image: self.image.filter(|i| !i.is_empty()),
            qty: coerce_qty(self.qty.as_deref()),
        }
    }
}

fn coerce_price(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

fn coerce_qty(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .map(clamp_qty)
        .filter(|&q| q > 0)
        .unwrap_or(1)
}

/// Random id for add-to-cart triggers that carry neither id nor title.
fn random_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(12)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from_items(&state.cart().items()),
    }
}

/// Add item to cart (HTMX).
///
/// Merges by id or appends a new entry. Returns the count badge with an
/// HTMX trigger so the rest of the page updates itself.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let snapshot = state.cart().add(form.into_line_item());

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            count: cartside_core::cart::item_count(&snapshot),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX).
///
/// Quantity 0 removes the entry. An unknown id changes nothing and
/// triggers no update.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let qty = form
        .qty
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let (snapshot, changed) = state.cart().set_qty(&ItemId::new(form.id), qty);
    let template = CartItemsTemplate {
        cart: CartView::from_items(&snapshot),
    };

    if changed {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            template,
        )
            .into_response()
    } else {
        template.into_response()
    }
}

/// Remove item from cart (HTMX).
///
/// Always persists and triggers an update, even when nothing matched.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveFromCartForm>) -> Response {
    let snapshot = state.cart().remove(&ItemId::new(form.id));

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            cart: CartView::from_items(&snapshot),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    let snapshot = state.cart().clear();

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            cart: CartView::from_items(&snapshot),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().item_count(),
    }
}

/// Current cart snapshot as JSON, for any other script on the page.
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> Json<Vec<LineItem>> {
    Json(state.cart().items())
}

/// Cart total as an unformatted number.
#[instrument(skip(state))]
pub async fn total(State(state): State<AppState>) -> Json<f64> {
    Json(state.cart().total())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn form(
        id: Option<&str>,
        title: Option<&str>,
        price: Option<&str>,
        qty: Option<&str>,
    ) -> AddToCartForm {
        AddToCartForm {
            id: id.map(str::to_owned),
            title: title.map(str::to_owned),
            price: price.map(str::to_owned),
            image: None,
            qty: qty.map(str::to_owned),
        }
    }

    #[test]
    fn add_form_id_falls_back_to_title() {
        let item = form(None, Some("Enamel Mug"), Some("12.50"), None).into_line_item();
        assert_eq!(item.id.as_str(), "Enamel Mug");
        assert_eq!(item.price, 12.5);
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn add_form_without_id_or_title_gets_random_token() {
        let item = form(None, None, None, None).into_line_item();
        assert_eq!(item.id.as_str().len(), 12);
        assert_eq!(item.title, "Untitled item");
    }

    #[test]
    fn add_form_coerces_malformed_numbers() {
        let item = form(Some("a"), Some("A"), Some("not-a-price"), Some("zero")).into_line_item();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn add_form_zero_qty_defaults_to_one() {
        let item = form(Some("a"), Some("A"), Some("1"), Some("0")).into_line_item();
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn format_price_rounds_to_two_decimals() {
        assert_eq!(format_price(8.0), "$8.00");
        assert_eq!(format_price(2.5 * 2.0 + 3.0), "$8.00");
    }

    #[test]
    fn format_price_rounds_ties_away_from_zero() {
        // 0.125 and 0.625 are exact in binary, so these hit true ties.
        assert_eq!(format_price(0.125), "$0.13");
        assert_eq!(format_price(0.625), "$0.63");
    }
}
