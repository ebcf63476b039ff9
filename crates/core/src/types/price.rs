//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn whole(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(units), currency_code)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
    GBP,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_serializes_as_string() {
        let price = Price::whole(2990, CurrencyCode::RUB);
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json["amount"], "2990");
        assert_eq!(json["currency_code"], "RUB");
    }

    #[test]
    fn test_currency_defaults_when_missing() {
        let price: Price = serde_json::from_str(r#"{"amount":"19.99"}"#).unwrap();
        assert_eq!(price.currency_code, CurrencyCode::RUB);
        assert_eq!(price.amount, Decimal::new(1999, 2));
    }
}
