//! Item Bundle Promotion
//!
//! Buy at least `minimum_quantity` units of one product and every unit of it is sold at
//! `discounted_price`.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::trace;

use crate::{items::CheckoutItem, promotions::PromotionKey};

/// Item bundle promotion
#[derive(Debug, Clone)]
pub struct ItemPromotion<'a> {
    key: PromotionKey,
    product_code: String,
    minimum_quantity: usize,
    discounted_price: Money<'a, Currency>,
}

impl<'a> ItemPromotion<'a> {
    /// Create a new item bundle promotion.
    ///
    /// A `minimum_quantity` of zero behaves like one, since a basket without the product has
    /// nothing to discount. A `discounted_price` at or above the unit price never discounts.
    #[must_use]
    pub fn new(
        key: PromotionKey,
        product_code: impl Into<String>,
        minimum_quantity: usize,
        discounted_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            key,
            product_code: product_code.into(),
            minimum_quantity,
            discounted_price,
        }
    }

    /// Return the promotion key
    #[must_use]
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// Return the product code this promotion targets
    #[must_use]
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    /// Return the number of units needed to qualify
    #[must_use]
    pub fn minimum_quantity(&self) -> usize {
        self.minimum_quantity
    }

    /// Return the per-unit price once qualified
    #[must_use]
    pub fn discounted_price(&self) -> &Money<'a, Currency> {
        &self.discounted_price
    }

    /// Return whether enough units of the product are present.
    #[must_use]
    pub fn is_applicable(&self, items: &[CheckoutItem<'_>]) -> bool {
        self.matching_count(items) >= self.minimum_quantity
    }

    /// Offer this promotion's per-unit discount to every matching item.
    ///
    /// Each item keeps whichever discount is larger, so competing promotions on the same
    /// product never stack. Nothing changes when the promotion does not qualify.
    pub fn apply(&self, items: &mut [CheckoutItem<'a>]) {
        let selected: SmallVec<[usize; 10]> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.code() == self.product_code)
            .map(|(idx, _)| idx)
            .collect();

        if selected.len() < self.minimum_quantity {
            trace!(
                product_code = %self.product_code,
                quantity = selected.len(),
                minimum_quantity = self.minimum_quantity,
                "item promotion not applicable"
            );

            return;
        }

        let mut improved = 0usize;

        for idx in selected {
            let Some(item) = items.get_mut(idx) else {
                continue;
            };

            let candidate = Money::from_decimal(
                *item.price().amount() - *self.discounted_price.amount(),
                item.price().currency(),
            );

            if item.offer_discount(candidate, self.key) {
                improved += 1;
            }
        }

        trace!(
            product_code = %self.product_code,
            improved,
            "item promotion applied"
        );
    }

    fn matching_count(&self, items: &[CheckoutItem<'_>]) -> usize {
        items
            .iter()
            .filter(|item| item.code() == self.product_code)
            .count()
    }
}
