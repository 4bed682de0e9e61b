//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Home page (demo products with add-to-cart)
//! GET  /health          - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart            - Cart page
//! POST /cart/add        - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update     - Update quantity (returns cart_items fragment)
//! POST /cart/remove     - Remove item (returns cart_items fragment)
//! POST /cart/clear      - Empty the cart (returns cart_items fragment)
//! GET  /cart/count      - Cart count badge (fragment)
//! GET  /cart/items      - Cart snapshot (JSON, for other scripts)
//! GET  /cart/total      - Cart total (JSON number)
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/items", get(cart::items))
        .route("/total", get(cart::total))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
}
