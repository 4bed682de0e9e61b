//! Home page: the demo product grid whose add-to-cart buttons feed the
//! cart routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::catalog::Product;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    /// Raw price, carried into the add-to-cart form.
    pub price: f64,
    /// Formatted price for display.
    pub price_display: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            price_display: format!("${:.2}", product.price),
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        products: state.catalog().products().iter().map(ProductView::from).collect(),
    }
}
