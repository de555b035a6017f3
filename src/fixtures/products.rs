//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product code -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "9.25 GBP")
    pub price: String,
}

impl ProductFixture {
    /// Convert into a product with the given code.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_product(self, code: String) -> Result<Product<'static>, FixtureError> {
        let price = parse_money(&self.price)?;

        Ok(Product {
            code,
            name: self.name,
            price,
        })
    }
}

/// Parse a money string (e.g., "9.25 GBP") keeping its exact decimal amount.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not recognized.
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_decimal(amount, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is invalid.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
            / Decimal::ONE_HUNDRED
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    };

    Ok(Percentage::from(fraction))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_money_keeps_exact_amount() -> TestResult {
        let money = parse_money("9.25 GBP")?;

        assert_eq!(money, Money::from_minor(925, GBP));

        Ok(())
    }

    #[test]
    fn parse_money_accepts_usd_and_eur() -> TestResult {
        assert_eq!(parse_money("1.00 USD")?, Money::from_minor(100, USD));
        assert_eq!(parse_money("2.50 EUR")?, Money::from_minor(250, EUR));

        Ok(())
    }

    #[test]
    fn parse_money_rejects_invalid_format() {
        let result = parse_money("9.25GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_money_rejects_unknown_currency() {
        let result = parse_money("9.25 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_money_rejects_non_numeric_amount() {
        let result = parse_money("lots GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> TestResult {
        let expected = Percentage::try_from("0.1")?;

        assert_eq!(parse_percentage("10%")?, expected);
        assert_eq!(parse_percentage("  10 %  ")?, expected);
        assert_eq!(parse_percentage("0.10")?, expected);

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_invalid_format() {
        let result = parse_percentage("ten percent");

        assert!(matches!(result, Err(FixtureError::InvalidPercentage(_))));
    }

    #[test]
    fn product_fixture_converts_with_code() -> TestResult {
        let fixture = ProductFixture {
            name: "Kids T-shirt".to_string(),
            price: "19.95 GBP".to_string(),
        };

        let product = fixture.try_into_product("003".to_string())?;

        assert_eq!(product.code, "003");
        assert_eq!(product.name, "Kids T-shirt");
        assert_eq!(product.price, Money::from_minor(1995, GBP));

        Ok(())
    }
}
