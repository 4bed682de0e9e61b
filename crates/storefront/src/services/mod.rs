//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart operations over an injected store, publishing an
//!   update event after every mutation

pub mod cart;

pub use cart::CartService;
