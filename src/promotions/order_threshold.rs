//! Order Threshold Promotion
//!
//! A promotion keyed on the value of the whole basket: once the subtotal reaches
//! `minimum_total`, the basket receives an [`OrderDiscount`], optionally capped at
//! `max_discount`.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{pricing::min_money, promotions::PromotionKey};

/// Discount modes for an order threshold promotion.
#[derive(Debug, Clone)]
pub enum OrderDiscount<'a> {
    /// Percentage of the order total.
    PercentOfTotal(Percentage),

    /// Fixed amount off the order total.
    AmountOff(Money<'a, Currency>),

    /// No discount configured; the promotion matches but is worth nothing.
    NoDiscount,
}

/// Order threshold promotion
#[derive(Debug, Clone)]
pub struct OrderPromotion<'a> {
    key: PromotionKey,
    minimum_total: Money<'a, Currency>,
    discount: OrderDiscount<'a>,
    max_discount: Option<Money<'a, Currency>>,
}

impl<'a> OrderPromotion<'a> {
    /// Create a new, uncapped order threshold promotion.
    #[must_use]
    pub fn new(
        key: PromotionKey,
        minimum_total: Money<'a, Currency>,
        discount: OrderDiscount<'a>,
    ) -> Self {
        Self {
            key,
            minimum_total,
            discount,
            max_discount: None,
        }
    }

    /// Cap the discount this promotion can give.
    #[must_use]
    pub fn with_max_discount(mut self, max_discount: Money<'a, Currency>) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    /// Return the promotion key
    #[must_use]
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// Return the minimum order total needed to qualify
    #[must_use]
    pub fn minimum_total(&self) -> &Money<'a, Currency> {
        &self.minimum_total
    }

    /// Return the discount mode
    #[must_use]
    pub fn order_discount(&self) -> &OrderDiscount<'a> {
        &self.discount
    }

    /// Return the discount cap, if any
    #[must_use]
    pub fn max_discount(&self) -> Option<&Money<'a, Currency>> {
        self.max_discount.as_ref()
    }

    /// Return whether an order with this total qualifies.
    #[must_use]
    pub fn is_applicable(&self, total: &Money<'_, Currency>) -> bool {
        total.amount() >= self.minimum_total.amount()
    }

    /// Calculate the discount this promotion gives an order with the given total.
    ///
    /// Returns zero when the order does not qualify.
    #[must_use]
    pub fn discount(&self, total: &Money<'a, Currency>) -> Money<'a, Currency> {
        let currency = total.currency();

        if !self.is_applicable(total) {
            return Money::from_decimal(Decimal::ZERO, currency);
        }

        let uncapped = match &self.discount {
            OrderDiscount::PercentOfTotal(percent) => {
                Money::from_decimal(*percent * *total.amount(), currency)
            }
            OrderDiscount::AmountOff(amount) => *amount,
            OrderDiscount::NoDiscount => return Money::from_decimal(Decimal::ZERO, currency),
        };

        match self.max_discount {
            Some(cap) => min_money(cap, uncapped),
            None => uncapped,
        }
    }

    /// Money values carried by this promotion.
    pub(crate) fn money_values(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        let amount_off = match &self.discount {
            OrderDiscount::AmountOff(amount) => Some(amount),
            OrderDiscount::PercentOfTotal(_) | OrderDiscount::NoDiscount => None,
        };

        std::iter::once(&self.minimum_total)
            .chain(amount_off)
            .chain(self.max_discount.as_ref())
    }
}
