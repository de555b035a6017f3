//! Promotion Fixtures

use serde::Deserialize;
use tracing::warn;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_money, parse_percentage},
    },
    promotions::{
        Promotion, PromotionKey, PromotionMeta,
        item_bundle::ItemPromotion,
        order_threshold::{OrderDiscount, OrderPromotion},
    },
};

/// Wrapper for promotions in YAML
///
/// Promotions are a list rather than a map so rule order survives loading.
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promotions in rule order
    pub promotions: Vec<PromotionEntry>,
}

/// A named promotion in a fixture file
#[derive(Debug, Deserialize)]
pub struct PromotionEntry {
    /// Fixture key used to look the promotion up
    pub key: String,

    /// Display name
    pub name: String,

    /// Promotion rule
    #[serde(flatten)]
    pub rule: PromotionFixture,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Spend threshold on the whole order
    OrderThreshold {
        /// Minimum order total (e.g., "60.00 GBP")
        minimum_total: String,

        /// Percentage off the order (e.g., "10%")
        #[serde(default)]
        percent: Option<String>,

        /// Fixed amount off the order (e.g., "5.00 GBP")
        #[serde(default)]
        amount_off: Option<String>,

        /// Discount cap (e.g., "20.00 GBP")
        #[serde(default)]
        max_discount: Option<String>,
    },

    /// Multi-buy price on a single product
    ItemBundle {
        /// Product code
        product: String,

        /// Units needed to qualify
        minimum_quantity: usize,

        /// Per-unit price once qualified (e.g., "8.50 GBP")
        price: String,
    },
}

impl PromotionEntry {
    /// Convert to `PromotionMeta` and `Promotion`
    ///
    /// # Errors
    ///
    /// Returns an error if a price or percentage is invalid.
    pub fn try_into_promotion(
        self,
        key: PromotionKey,
    ) -> Result<(PromotionMeta, Promotion<'static>), FixtureError> {
        let meta = PromotionMeta { name: self.name };

        let promotion = match self.rule {
            PromotionFixture::OrderThreshold {
                minimum_total,
                percent,
                amount_off,
                max_discount,
            } => {
                let discount = match (percent, amount_off) {
                    (Some(percent), None) => {
                        OrderDiscount::PercentOfTotal(parse_percentage(&percent)?)
                    }
                    (None, Some(amount)) => OrderDiscount::AmountOff(parse_money(&amount)?),
                    (Some(_), Some(_)) => {
                        warn!(
                            promotion = %self.key,
                            "order promotion sets both percent and amount_off, giving no discount"
                        );

                        OrderDiscount::NoDiscount
                    }
                    (None, None) => {
                        warn!(
                            promotion = %self.key,
                            "order promotion sets no percent or amount_off, giving no discount"
                        );

                        OrderDiscount::NoDiscount
                    }
                };

                let promotion = OrderPromotion::new(key, parse_money(&minimum_total)?, discount);

                let promotion = match max_discount {
                    Some(cap) => promotion.with_max_discount(parse_money(&cap)?),
                    None => promotion,
                };

                Promotion::Order(promotion)
            }
            PromotionFixture::ItemBundle {
                product,
                minimum_quantity,
                price,
            } => {
                if minimum_quantity == 0 {
                    return Err(FixtureError::InvalidPromotion(
                        self.key,
                        "minimum_quantity must be at least 1".to_string(),
                    ));
                }

                let price = parse_money(&price)?;

                if price.is_negative() {
                    return Err(FixtureError::InvalidPromotion(
                        self.key,
                        "price must not be negative".to_string(),
                    ));
                }

                Promotion::Item(ItemPromotion::new(key, product, minimum_quantity, price))
            }
        };

        Ok((meta, promotion))
    }
}
