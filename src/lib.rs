//! Lattice Checkout
//!
//! A checkout pricing engine: scan product codes into a basket and price it against a set of
//! order threshold and item bundle promotions.

pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
