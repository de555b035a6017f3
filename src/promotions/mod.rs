//! Promotions

use rusty_money::iso::Currency;
use slotmap::new_key_type;

use crate::promotions::{item_bundle::ItemPromotion, order_threshold::OrderPromotion};

pub mod item_bundle;
pub mod order_threshold;

new_key_type! {
    /// Promotion Key
    pub struct PromotionKey;
}

/// Promotion metadata
#[derive(Debug, Default, Clone)]
pub struct PromotionMeta {
    /// Promotion name
    pub name: String,
}

/// Promotion enum
///
/// Promotions fall into two tiers. Within a tier only the best discount applies; the
/// order tier and the item tier add together.
#[derive(Debug, Clone)]
pub enum Promotion<'a> {
    /// Spend-threshold discount on the whole order
    Order(OrderPromotion<'a>),

    /// Multi-buy price on a single product
    Item(ItemPromotion<'a>),
}

impl<'a> Promotion<'a> {
    /// Return the promotion key.
    #[must_use]
    pub fn key(&self) -> PromotionKey {
        match self {
            Promotion::Order(order) => order.key(),
            Promotion::Item(item) => item.key(),
        }
    }

    /// Return the currencies of every money value in this promotion.
    pub(crate) fn currencies(&self) -> impl Iterator<Item = &'a Currency> {
        let (order, item) = match self {
            Promotion::Order(order) => (Some(order), None),
            Promotion::Item(item) => (None, Some(item)),
        };

        order
            .into_iter()
            .flat_map(|order| order.money_values())
            .chain(item.map(|item| item.discounted_price()))
            .map(|money| money.currency())
    }
}

impl<'a> From<OrderPromotion<'a>> for Promotion<'a> {
    fn from(promotion: OrderPromotion<'a>) -> Self {
        Promotion::Order(promotion)
    }
}

impl<'a> From<ItemPromotion<'a>> for Promotion<'a> {
    fn from(promotion: ItemPromotion<'a>) -> Self {
        Promotion::Item(promotion)
    }
}

/// Order tier promotions, in rule order.
pub fn order_promotions<'p, 'a>(
    promotions: &'p [Promotion<'a>],
) -> impl Iterator<Item = &'p OrderPromotion<'a>> {
    promotions.iter().filter_map(|promotion| match promotion {
        Promotion::Order(order) => Some(order),
        Promotion::Item(_) => None,
    })
}

/// Item tier promotions, in rule order.
pub fn item_promotions<'p, 'a>(
    promotions: &'p [Promotion<'a>],
) -> impl Iterator<Item = &'p ItemPromotion<'a>> {
    promotions.iter().filter_map(|promotion| match promotion {
        Promotion::Item(item) => Some(item),
        Promotion::Order(_) => None,
    })
}
