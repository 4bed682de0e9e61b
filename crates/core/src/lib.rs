//! Cartside Core - Shared cart types and operations.
//!
//! This crate provides the line item model and the pure cart operations
//! used by the storefront binary.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage, no HTTP. Every operation takes the cart as an explicit
//! `Vec<LineItem>`; loading and persisting the cart is the caller's job.
//!
//! # Modules
//!
//! - [`types`] - `ItemId` and `LineItem`, with lenient decoding of
//!   stored carts
//! - [`cart`] - add / remove / set quantity / total over a cart snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
