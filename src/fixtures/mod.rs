//! Fixtures
//!
//! Loads catalogs and promotion sets from YAML files laid out as
//! `<base>/products/<name>.yml` and `<base>/promotions/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{products::ProductsFixture, promotions::PromotionsFixture},
    products::{Product, ProductCatalog},
    promotions::{Promotion, PromotionKey, PromotionMeta},
};

pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Promotion not found
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Promotion key used more than once
    #[error("Duplicate promotion key: {0}")]
    DuplicatePromotion(String),

    /// Promotion values out of range
    #[error("Invalid promotion {0}: {1}")]
    InvalidPromotion(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected a product
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, created when the first product is loaded
    catalog: Option<Catalog<'a>>,

    /// Promotion names keyed by promotion
    promotion_meta: SlotMap<PromotionKey, PromotionMeta>,

    /// Fixture key -> promotion key
    promotion_keys: FxHashMap<String, PromotionKey>,

    /// Promotions in rule order
    promotions: Vec<Promotion<'a>>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            promotion_meta: SlotMap::with_key(),
            promotion_keys: FxHashMap::default(),
            promotions: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the catalog rejects a
    /// product (duplicate code or currency mismatch).
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let mut codes: Vec<String> = fixture.products.keys().cloned().collect();
        codes.sort();

        let mut fixture_products = fixture.products;

        for code in codes {
            let Some(product_fixture) = fixture_products.remove(&code) else {
                continue;
            };

            let product = product_fixture.try_into_product(code)?;
            let currency: &'static Currency = product.price.currency();

            let catalog = self.catalog.get_or_insert_with(|| Catalog::new(currency));

            catalog.insert(product)?;
        }

        debug!(
            fixture = name,
            products = self.catalog.as_ref().map_or(0, Catalog::len),
            "loaded products"
        );

        Ok(self)
    }

    /// Load promotions from a YAML fixture file, appending them in file order
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a promotion is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        for entry in fixture.promotions {
            if self.promotion_keys.contains_key(&entry.key) {
                return Err(FixtureError::DuplicatePromotion(entry.key));
            }

            let fixture_key = entry.key.clone();
            let promotions = &mut self.promotions;

            let promotion_key = self.promotion_meta.try_insert_with_key(|key| {
                let (meta, promotion) = entry.try_into_promotion(key)?;

                promotions.push(promotion);

                Ok::<_, FixtureError>(meta)
            })?;

            self.promotion_keys.insert(fixture_key, promotion_key);
        }

        debug!(fixture = name, promotions = self.promotions.len(), "loaded promotions");

        Ok(self)
    }

    /// Load a complete fixture set (products and promotions with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_promotions(name)?;

        Ok(fixture)
    }

    /// Get the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        Ok(self.catalog()?.currency())
    }

    /// Get a product by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, code: &str) -> Result<&Product<'a>, FixtureError> {
        let catalog = self.catalog()?;

        catalog
            .key(code)
            .and_then(|key| catalog.get(key))
            .ok_or_else(|| FixtureError::ProductNotFound(code.to_string()))
    }

    /// Get a promotion by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion(&self, key: &str) -> Result<&Promotion<'a>, FixtureError> {
        let promotion_key = self.promotion_key(key)?;

        self.promotions
            .iter()
            .find(|p| p.key() == promotion_key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get a promotion key by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion_key(&self, key: &str) -> Result<PromotionKey, FixtureError> {
        self.promotion_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get all promotions in rule order
    #[must_use]
    pub fn promotions(&self) -> &[Promotion<'a>] {
        &self.promotions
    }

    /// Get the promotion metadata `SlotMap`
    #[must_use]
    pub fn promotion_meta_map(&self) -> &SlotMap<PromotionKey, PromotionMeta> {
        &self.promotion_meta
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_from_set_loads_products_and_promotions() -> TestResult {
        let fixture = Fixture::from_set("default")?;

        assert_eq!(fixture.catalog()?.len(), 3);
        assert_eq!(fixture.currency()?, GBP);
        assert_eq!(fixture.product("001")?.price, Money::from_minor(925, GBP));
        assert_eq!(fixture.promotions().len(), 2);

        let key = fixture.promotion_key("spend-sixty")?;

        assert_eq!(fixture.promotion("spend-sixty")?.key(), key);
        assert!(fixture.promotion_meta_map().get(key).is_some());

        Ok(())
    }

    #[test]
    fn promotions_keep_file_order() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "promotions",
            "ordered",
            r#"
promotions:
  - key: second-by-name
    name: Z
    type: item_bundle
    product: "001"
    minimum_quantity: 2
    price: "8.50 GBP"
  - key: first-by-name
    name: A
    type: order_threshold
    minimum_total: "60.00 GBP"
    percent: "10%"
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_promotions("ordered")?;

        let kinds: Vec<bool> = fixture
            .promotions()
            .iter()
            .map(|p| matches!(p, Promotion::Item(_)))
            .collect();

        assert_eq!(kinds, vec![true, false]);

        Ok(())
    }

    #[test]
    fn load_products_rejects_mixed_currencies() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "mixed",
            r#"
products:
  "001":
    name: Lavender heart
    price: "9.25 GBP"
  "002":
    name: Personalised cufflinks
    price: "45.00 USD"
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_products("mixed");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(..)))
        ));

        Ok(())
    }

    #[test]
    fn failed_promotion_leaves_no_trace() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "promotions",
            "broken",
            r#"
promotions:
  - key: spend-sixty
    name: 10% off
    type: order_threshold
    minimum_total: "60.00 GBP"
    percent: "10%"
  - key: hearts
    name: Broken hearts
    type: item_bundle
    product: "001"
    minimum_quantity: 2
    price: "cheap"
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_promotions("broken");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
        assert_eq!(fixture.promotions().len(), 1);
        assert_eq!(fixture.promotion_meta_map().len(), 1);
        assert!(matches!(
            fixture.promotion_key("hearts"),
            Err(FixtureError::PromotionNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn duplicate_promotion_key_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "promotions",
            "twice",
            r#"
promotions:
  - key: hearts
    name: First
    type: item_bundle
    product: "001"
    minimum_quantity: 2
    price: "8.50 GBP"
  - key: hearts
    name: Second
    type: item_bundle
    product: "001"
    minimum_quantity: 3
    price: "8.00 GBP"
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_promotions("twice");

        assert!(matches!(result, Err(FixtureError::DuplicatePromotion(key)) if key == "hearts"));
        assert_eq!(fixture.promotions().len(), 1);
        assert_eq!(fixture.promotion_meta_map().len(), 1);

        let first = fixture.promotion("hearts")?;

        assert!(matches!(first, Promotion::Item(item) if item.minimum_quantity() == 2));

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(
            fixture.load_products("nothing"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn lookups_before_loading_fail() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCurrency)));
        assert!(matches!(
            fixture.promotion("spend-sixty"),
            Err(FixtureError::PromotionNotFound(_))
        ));
    }
}
