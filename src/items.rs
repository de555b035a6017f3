//! Items

use rusty_money::{Money, iso::Currency};

use crate::{products::Product, promotions::PromotionKey};

/// A single scanned unit of a product.
///
/// Carries the best per-unit discount found so far by item promotions, along with the
/// promotion that supplied it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckoutItem<'a> {
    product: &'a Product<'a>,
    discount: Money<'a, Currency>,
    promotion: Option<PromotionKey>,
}

impl<'a> CheckoutItem<'a> {
    /// Creates a new, undiscounted item for the given product
    #[must_use]
    pub fn new(product: &'a Product<'a>) -> Self {
        Self {
            product,
            discount: Money::from_minor(0, product.price.currency()),
            promotion: None,
        }
    }

    /// Returns the scanned product
    #[must_use]
    pub fn product(&self) -> &'a Product<'a> {
        self.product
    }

    /// Returns the product code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.product.code
    }

    /// Returns the unit price of the item
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.product.price
    }

    /// Returns the current per-unit discount
    #[must_use]
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// Returns the promotion supplying the current discount, if any
    #[must_use]
    pub fn promotion(&self) -> Option<PromotionKey> {
        self.promotion
    }

    /// Returns the unit price less the current discount
    #[must_use]
    pub fn discounted_price(&self) -> Money<'a, Currency> {
        Money::from_decimal(
            *self.price().amount() - *self.discount.amount(),
            self.price().currency(),
        )
    }

    /// Replace the discount if `candidate` is strictly greater than the current one.
    ///
    /// Returns whether the discount changed.
    pub fn offer_discount(
        &mut self,
        candidate: Money<'a, Currency>,
        promotion: PromotionKey,
    ) -> bool {
        if candidate.amount() > self.discount.amount() {
            self.discount = candidate;
            self.promotion = Some(promotion);

            true
        } else {
            false
        }
    }

    /// Clear any discount applied to this item.
    pub fn reset(&mut self) {
        self.discount = Money::from_minor(0, self.price().currency());
        self.promotion = None;
    }
}
