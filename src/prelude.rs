//! Lattice Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    checkout::{Checkout, CheckoutError},
    fixtures::{Fixture, FixtureError},
    items::CheckoutItem,
    products::{Product, ProductCatalog, ProductKey},
    promotions::{
        Promotion, PromotionKey, PromotionMeta,
        item_bundle::ItemPromotion,
        order_threshold::{OrderDiscount, OrderPromotion},
    },
    receipt::{Receipt, ReceiptError},
};
