//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    items::CheckoutItem,
    promotions::{PromotionKey, PromotionMeta},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Priced breakdown of a single checkout evaluation.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Scanned items with their winning item tier discounts
    lines: Vec<CheckoutItem<'a>>,

    /// Order tier promotion that was applied, if any
    order_promotion: Option<PromotionKey>,

    /// Total cost before any promotion applications
    subtotal: Money<'a, Currency>,

    /// Sum of item tier discounts
    item_discount: Money<'a, Currency>,

    /// Order tier discount
    order_discount: Money<'a, Currency>,

    /// Amount payable, rounded to the currency
    total: Money<'a, Currency>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt with the given details.
    #[must_use]
    pub fn new(
        lines: Vec<CheckoutItem<'a>>,
        order_promotion: Option<PromotionKey>,
        subtotal: Money<'a, Currency>,
        item_discount: Money<'a, Currency>,
        order_discount: Money<'a, Currency>,
        total: Money<'a, Currency>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            order_promotion,
            subtotal,
            item_discount,
            order_discount,
            total,
            currency,
        }
    }

    /// Scanned items, in scan order, with their item tier discounts
    #[must_use]
    pub fn lines(&self) -> &[CheckoutItem<'a>] {
        &self.lines
    }

    /// Order tier promotion that was applied, if any
    #[must_use]
    pub fn order_promotion(&self) -> Option<PromotionKey> {
        self.order_promotion
    }

    /// Total cost before any promotion applications
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Sum of item tier discounts
    #[must_use]
    pub fn item_discount(&self) -> Money<'a, Currency> {
        self.item_discount
    }

    /// Order tier discount
    #[must_use]
    pub fn order_discount(&self) -> Money<'a, Currency> {
        self.order_discount
    }

    /// Combined discount across both tiers, unrounded
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        Money::from_decimal(
            *self.item_discount.amount() + *self.order_discount.amount(),
            self.currency,
        )
    }

    /// Amount payable
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Amount saved relative to the subtotal, after rounding.
    ///
    /// This can be less than [`Receipt::discount`] when the discounts exceed the subtotal.
    #[must_use]
    pub fn savings(&self) -> Money<'a, Currency> {
        Money::from_decimal(
            *self.subtotal.amount() - *self.total.amount(),
            self.currency,
        )
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        promotion_meta: &SlotMap<PromotionKey, PromotionMeta>,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Code", "Item", "Price", "Discounted Price", "Promotion"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let (discounted, promotion) = match line.promotion() {
                Some(key) => (
                    format!("{}", line.discounted_price()),
                    promotion_name(promotion_meta, key),
                ),
                None => (String::new(), String::new()),
            };

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.code().to_string(),
                line.product().name.clone(),
                format!("{}", line.price()),
                discounted,
                promotion,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        writeln!(out, " Subtotal:        {}", self.subtotal).map_err(|_err| ReceiptError::IO)?;

        if !self.item_discount.amount().is_zero() {
            writeln!(out, " Item discounts: -{}", self.item_discount)
                .map_err(|_err| ReceiptError::IO)?;
        }

        if let Some(key) = self.order_promotion {
            writeln!(
                out,
                " Order discount: -{} ({})",
                self.order_discount,
                promotion_name(promotion_meta, key)
            )
            .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out, " Total:           {}", self.total).map_err(|_err| ReceiptError::IO)?;

        if self.savings().amount() > &Decimal::ZERO {
            writeln!(out, " Savings:         {}", self.savings()).map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }
}

fn promotion_name(
    promotion_meta: &SlotMap<PromotionKey, PromotionMeta>,
    key: PromotionKey,
) -> String {
    promotion_meta
        .get(key)
        .map_or("<unknown>", |meta| meta.name.as_str())
        .to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;
    use crate::products::Product;

    #[test]
    fn accessors_return_values_from_constructor() {
        let receipt = Receipt::new(
            Vec::new(),
            None,
            Money::from_minor(300, GBP),
            Money::from_minor(20, GBP),
            Money::from_minor(30, GBP),
            Money::from_minor(250, GBP),
            GBP,
        );

        assert_eq!(receipt.subtotal(), Money::from_minor(300, GBP));
        assert_eq!(receipt.item_discount(), Money::from_minor(20, GBP));
        assert_eq!(receipt.order_discount(), Money::from_minor(30, GBP));
        assert_eq!(receipt.discount(), Money::from_minor(50, GBP));
        assert_eq!(receipt.total(), Money::from_minor(250, GBP));
        assert_eq!(receipt.savings(), Money::from_minor(50, GBP));
        assert_eq!(receipt.currency(), GBP);
        assert!(receipt.lines().is_empty());
    }

    #[test]
    fn savings_is_capped_by_subtotal() {
        let receipt = Receipt::new(
            Vec::new(),
            None,
            Money::from_minor(300, GBP),
            Money::from_minor(0, GBP),
            Money::from_minor(1000, GBP),
            Money::from_minor(0, GBP),
            GBP,
        );

        assert_eq!(receipt.discount(), Money::from_minor(1000, GBP));
        assert_eq!(receipt.savings(), Money::from_minor(300, GBP));
    }

    #[test]
    fn write_to_renders_lines_and_promotion_names() -> TestResult {
        let mut meta = SlotMap::<PromotionKey, PromotionMeta>::with_key();
        let bundle = meta.insert(PromotionMeta {
            name: "Two hearts".to_string(),
        });
        let spend = meta.insert(PromotionMeta {
            name: "10% over £60".to_string(),
        });

        let heart = Product::new("001", "Lavender heart", Money::from_minor(925, GBP));
        let mut line = CheckoutItem::new(&heart);
        line.offer_discount(Money::from_minor(75, GBP), bundle);

        let receipt = Receipt::new(
            vec![line, CheckoutItem::new(&heart)],
            Some(spend),
            Money::from_minor(1850, GBP),
            Money::from_minor(75, GBP),
            Money::from_minor(100, GBP),
            Money::from_minor(1675, GBP),
            GBP,
        );

        let mut out = Vec::new();
        receipt.write_to(&mut out, &meta)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Lavender heart"), "missing product name");
        assert!(rendered.contains("Two hearts"), "missing item promotion name");
        assert!(rendered.contains("10% over £60"), "missing order promotion name");
        assert!(rendered.contains("£8.50"), "missing discounted price");
        assert!(rendered.contains("£16.75"), "missing total");

        Ok(())
    }

    #[test]
    fn write_to_renders_unknown_promotion_name() -> TestResult {
        let meta = SlotMap::<PromotionKey, PromotionMeta>::with_key();

        let heart = Product::new("001", "Lavender heart", Money::from_minor(925, GBP));
        let mut line = CheckoutItem::new(&heart);
        line.offer_discount(Money::from_minor(75, GBP), PromotionKey::default());

        let receipt = Receipt::new(
            vec![line],
            None,
            Money::from_minor(925, GBP),
            Money::from_minor(75, GBP),
            Money::from_minor(0, GBP),
            Money::from_minor(850, GBP),
            GBP,
        );

        let mut out = Vec::new();
        receipt.write_to(&mut out, &meta)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("<unknown>"), "missing placeholder promotion name");
        assert!(!rendered.contains("Order discount"), "unexpected order discount line");

        Ok(())
    }
}
