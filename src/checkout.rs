//! Checkout
//!
//! Scans product codes into a basket and prices it against a set of promotions.
//!
//! Every evaluation starts from undiscounted copies of the scanned items, so repeated calls
//! to [`Checkout::total`] on the same basket always agree.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    items::CheckoutItem,
    pricing::{max_money, round_to_currency, subtotal, total_discount},
    products::ProductCatalog,
    promotions::{Promotion, PromotionKey, item_promotions, order_promotions},
    receipt::Receipt,
};

/// Errors raised by a checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The scanned code is not in the catalog.
    #[error("Unknown product code: {0}")]
    UnknownProduct(String),

    /// A promotion uses a different currency to the catalog.
    #[error("Promotion {promotion:?} uses currency {actual}, but catalog has currency {expected}")]
    CurrencyMismatch {
        /// The offending promotion
        promotion: PromotionKey,
        /// Catalog currency
        expected: &'static str,
        /// Promotion currency
        actual: &'static str,
    },
}

/// Checkout
#[derive(Debug)]
pub struct Checkout<'a, C: ProductCatalog<'a>> {
    catalog: &'a C,
    rules: &'a [Promotion<'a>],
    items: Vec<CheckoutItem<'a>>,
}

impl<'a, C: ProductCatalog<'a>> Checkout<'a, C> {
    /// Create an empty checkout pricing against the given catalog and promotions.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CurrencyMismatch`] if any promotion is priced in a currency
    /// other than the catalog's.
    pub fn new(catalog: &'a C, rules: &'a [Promotion<'a>]) -> Result<Self, CheckoutError> {
        let expected = catalog.currency();

        for promotion in rules {
            if let Some(actual) = promotion.currencies().find(|currency| *currency != expected) {
                return Err(CheckoutError::CurrencyMismatch {
                    promotion: promotion.key(),
                    expected: expected.iso_alpha_code,
                    actual: actual.iso_alpha_code,
                });
            }
        }

        Ok(Checkout {
            catalog,
            rules,
            items: Vec::new(),
        })
    }

    /// Add one unit of the product with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownProduct`] if the catalog has no such product; the
    /// basket is left unchanged.
    #[tracing::instrument(name = "checkout.scan", skip(self), err)]
    pub fn scan(&mut self, code: &str) -> Result<(), CheckoutError> {
        let catalog: &'a C = self.catalog;

        let product = catalog
            .find(code)
            .ok_or_else(|| CheckoutError::UnknownProduct(code.to_string()))?;

        self.items.push(CheckoutItem::new(product));

        debug!(items = self.items.len(), "scanned item");

        Ok(())
    }

    /// Scanned items in scan order.
    #[must_use]
    pub fn items(&self) -> &[CheckoutItem<'a>] {
        &self.items
    }

    /// Number of scanned items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been scanned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency of all amounts.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// Sum of unit prices before any discount.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        subtotal(&self.items, self.currency())
    }

    /// The single best order tier discount for the current subtotal.
    #[must_use]
    pub fn order_discount(&self) -> Money<'a, Currency> {
        self.best_order_discount(&self.subtotal()).0
    }

    /// Sum of the best per-unit item tier discounts.
    #[must_use]
    pub fn item_discount(&self) -> Money<'a, Currency> {
        total_discount(&self.discounted_items(), self.currency())
    }

    /// Combined order and item tier discount, unrounded.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.receipt().discount()
    }

    /// Amount payable: the subtotal less all discounts, rounded to the currency and never
    /// negative.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.receipt().total()
    }

    /// Evaluate every promotion against the current basket.
    #[must_use]
    pub fn receipt(&self) -> Receipt<'a> {
        let currency = self.currency();
        let subtotal = self.subtotal();

        let lines = self.discounted_items();
        let item_discount = total_discount(&lines, currency);
        let (order_discount, order_promotion) = self.best_order_discount(&subtotal);

        let discount = *item_discount.amount() + *order_discount.amount();
        let total = max_money(
            round_to_currency(&Money::from_decimal(*subtotal.amount() - discount, currency)),
            Money::from_decimal(Decimal::ZERO, currency),
        );

        debug!(
            items = lines.len(),
            %subtotal,
            %item_discount,
            %order_discount,
            %total,
            "evaluated checkout"
        );

        Receipt::new(
            lines,
            order_promotion,
            subtotal,
            item_discount,
            order_discount,
            total,
            currency,
        )
    }

    /// Fresh copies of the scanned items with every item promotion applied in rule order.
    fn discounted_items(&self) -> Vec<CheckoutItem<'a>> {
        let mut items = self.items.clone();

        for item in &mut items {
            item.reset();
        }

        for promotion in item_promotions(self.rules) {
            promotion.apply(&mut items);
        }

        items
    }

    /// The largest order tier discount and the promotion giving it. Ties keep the earlier rule.
    fn best_order_discount(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> (Money<'a, Currency>, Option<PromotionKey>) {
        let mut best = Money::from_decimal(Decimal::ZERO, subtotal.currency());
        let mut winner = None;

        for promotion in order_promotions(self.rules) {
            let discount = promotion.discount(subtotal);

            trace!(
                promotion = ?promotion.key(),
                %discount,
                "order promotion evaluated"
            );

            if discount.amount() > best.amount() {
                best = discount;
                winner = Some(promotion.key());
            }
        }

        (best, winner)
    }
}
