//! Core types for Cartside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;

pub use id::ItemId;
pub use line_item::{LineItem, clamp_qty};
