//! Catalog
//!
//! An in-memory [`ProductCatalog`] keyed by product code.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductCatalog, ProductKey};

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product with this code is already in the catalog.
    #[error("Duplicate product code: {0}")]
    DuplicateCode(String),

    /// A product is priced in a different currency to the catalog
    /// (code, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    codes: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: SlotMap::with_key(),
            codes: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a code is repeated or a product uses another currency.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateCode`]: the code is already taken.
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.codes.contains_key(&product.code) {
            return Err(CatalogError::DuplicateCode(product.code));
        }

        let product_currency = product.price.currency();
        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.code,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let code = product.code.clone();
        let key = self.products.insert(product);

        self.codes.insert(code, key);

        Ok(key)
    }

    /// Get a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get the key for a product code.
    #[must_use]
    pub fn key(&self, code: &str) -> Option<ProductKey> {
        self.codes.get(code).copied()
    }

    /// Iterate over every product.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> ProductCatalog<'a> for Catalog<'a> {
    fn find(&self, code: &str) -> Option<&Product<'a>> {
        self.key(code).and_then(|key| self.products.get(key))
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }
}
