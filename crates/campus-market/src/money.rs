//! Money type for listing prices.
//!
//! Amounts are integers in the currency's minor unit (paise for INR), so
//! range filters and price sorting compare exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MarketError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount.
///
/// Ordering compares `amount_minor` first. A catalog is priced in a single
/// currency, so the currency only breaks ties between otherwise equal
/// amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units (rupees, dollars).
    ///
    /// ```
    /// use campus_market::money::{Currency, Money};
    /// let price = Money::from_major(850, Currency::INR);
    /// assert_eq!(price.amount_minor, 85000);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Parse a decimal string such as `"1200"` or `"49.99"`.
    ///
    /// At most two fractional digits are accepted, matching the listing
    /// price input.
    pub fn parse(input: &str, currency: Currency) -> Result<Self, MarketError> {
        let trimmed = input.trim();
        let invalid = || MarketError::InvalidPrice(input.to_string());

        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > currency.decimal_places() as usize
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let mut frac_minor: i64 = if frac.is_empty() { 0 } else { frac.parse().map_err(|_| invalid())? };
        for _ in frac.len()..currency.decimal_places() as usize {
            frac_minor *= 10;
        }

        whole
            .checked_mul(currency.minor_per_major())
            .and_then(|m| m.checked_add(frac_minor))
            .map(|amount| Self::new(amount, currency))
            .ok_or_else(invalid)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Whole major units, truncated.
    pub fn major(&self) -> i64 {
        self.amount_minor / self.currency.minor_per_major()
    }

    /// Format as a display string (e.g., "₹850" or "₹49.99").
    ///
    /// Whole amounts drop the fractional part, as listing cards do.
    pub fn display(&self) -> String {
        let per_major = self.currency.minor_per_major();
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let whole = abs / per_major as u64;
        let frac = abs % per_major as u64;
        if frac == 0 {
            format!("{}{}{}", sign, self.currency.symbol(), whole)
        } else {
            let places = self.currency.decimal_places() as usize;
            format!("{}{}{}.{:0places$}", sign, self.currency.symbol(), whole, frac)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(65000, Currency::INR);
        assert_eq!(m.amount_minor, 6_500_000);
        assert_eq!(m.major(), 65000);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(
            Money::parse("1200", Currency::INR).unwrap(),
            Money::from_major(1200, Currency::INR)
        );
        assert_eq!(Money::parse("49.9", Currency::INR).unwrap().amount_minor, 4990);
        assert_eq!(Money::parse("0.05", Currency::INR).unwrap().amount_minor, 5);
        assert!(Money::parse("12.345", Currency::INR).is_err());
        assert!(Money::parse("-5", Currency::INR).is_err());
        assert!(Money::parse("abc", Currency::INR).is_err());
        assert!(Money::parse("", Currency::INR).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_major(850, Currency::INR).display(), "\u{20b9}850");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(4905, Currency::USD).display(), "$49.05");
    }

    #[test]
    fn test_money_ordering_is_by_amount() {
        let low = Money::from_major(3500, Currency::INR);
        let high = Money::from_major(4500, Currency::INR);
        assert!(low < high);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
