//! Pricing

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

use crate::items::CheckoutItem;

/// Sum of the unit prices of all items.
#[must_use]
pub fn subtotal<'a>(
    items: &[CheckoutItem<'a>],
    currency: &'static Currency,
) -> Money<'a, Currency> {
    let total = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + *item.price().amount());

    Money::from_decimal(total, currency)
}

/// Sum of the per-unit discounts currently held by all items.
#[must_use]
pub fn total_discount<'a>(
    items: &[CheckoutItem<'a>],
    currency: &'static Currency,
) -> Money<'a, Currency> {
    let total = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + *item.discount().amount());

    Money::from_decimal(total, currency)
}

/// Round an amount to the precision of its currency, with midpoints rounded away from zero.
#[must_use]
pub fn round_to_currency<'a>(money: &Money<'a, Currency>) -> Money<'a, Currency> {
    let currency = money.currency();
    let rounded = money
        .amount()
        .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, currency)
}

/// The smaller of two amounts in the same currency.
pub(crate) fn min_money<'a>(a: Money<'a, Currency>, b: Money<'a, Currency>) -> Money<'a, Currency> {
    if b.amount() < a.amount() { b } else { a }
}

/// The larger of two amounts in the same currency.
pub(crate) fn max_money<'a>(a: Money<'a, Currency>, b: Money<'a, Currency>) -> Money<'a, Currency> {
    if b.amount() > a.amount() { b } else { a }
}
