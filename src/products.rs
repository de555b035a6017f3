//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product code, unique within a catalog
    pub code: String,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}

/// Lookup of products by code.
///
/// The checkout only ever reads from a catalog, so any key-value store of products can back it.
pub trait ProductCatalog<'a> {
    /// Find the product with the given code.
    fn find(&self, code: &str) -> Option<&Product<'a>>;

    /// Currency every product in the catalog is priced in.
    fn currency(&self) -> &'static Currency;
}
