//! Value Objects for storefront pricing

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Numeric value(s) read from a price string. A single amount has `min == max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedMoney { min: Decimal, max: Decimal }

impl ParsedMoney {
    pub fn single(amount: Decimal) -> Self { Self { min: amount, max: amount } }

    /// Bounds are stored ordered regardless of how they were written.
    pub fn range(a: Decimal, b: Decimal) -> Self {
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    pub fn min(&self) -> Decimal { self.min }
    pub fn max(&self) -> Decimal { self.max }
    pub fn is_range(&self) -> bool { self.min != self.max }
}

/// Discount badge value, always strictly between 0 and 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    pub fn new(value: i64) -> Option<Self> {
        if value > 0 && value < 100 { Some(Self(value as u8)) } else { None }
    }
    pub fn value(&self) -> u8 { self.0 }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}%", self.0) }
}

/// Currency marker and separators of the single locale prices are written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceLocale {
    currency_prefix: String,
    thousands_separator: char,
    decimal_separator: char,
}

impl PriceLocale {
    pub const PREFIX_VAR: &'static str = "PRICE_CURRENCY_PREFIX";
    pub const THOUSANDS_VAR: &'static str = "PRICE_THOUSANDS_SEPARATOR";
    pub const DECIMAL_VAR: &'static str = "PRICE_DECIMAL_SEPARATOR";

    pub fn new(currency_prefix: impl Into<String>, thousands_separator: char, decimal_separator: char) -> Result<Self, LocaleError> {
        let currency_prefix = currency_prefix.into().trim().to_string();
        if currency_prefix.is_empty() { return Err(LocaleError::EmptyPrefix); }
        if currency_prefix.chars().any(|c| c.is_ascii_digit() || c == '-') {
            return Err(LocaleError::InvalidPrefix(currency_prefix));
        }
        for sep in [thousands_separator, decimal_separator] {
            if sep.is_ascii_digit() || sep == '-' || sep.is_whitespace() { return Err(LocaleError::InvalidSeparator(sep)); }
        }
        if thousands_separator == decimal_separator { return Err(LocaleError::SameSeparators); }
        Ok(Self { currency_prefix, thousands_separator, decimal_separator })
    }

    /// Reads the locale from the environment, falling back to the defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, LocaleError> {
        let default = Self::default();
        let prefix = std::env::var(Self::PREFIX_VAR).unwrap_or(default.currency_prefix);
        let thousands = separator_var(Self::THOUSANDS_VAR, default.thousands_separator)?;
        let decimal = separator_var(Self::DECIMAL_VAR, default.decimal_separator)?;
        Self::new(prefix, thousands, decimal)
    }

    pub fn currency_prefix(&self) -> &str { &self.currency_prefix }
    pub fn thousands_separator(&self) -> char { self.thousands_separator }
    pub fn decimal_separator(&self) -> char { self.decimal_separator }
}

/// Indonesian Rupiah, as the storefront authors its prices: `Rp150.000,00`.
impl Default for PriceLocale {
    fn default() -> Self {
        Self { currency_prefix: "Rp".to_string(), thousands_separator: '.', decimal_separator: ',' }
    }
}

fn separator_var(name: &'static str, default: char) -> Result<char, LocaleError> {
    let Ok(value) = std::env::var(name) else { return Ok(default) };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LocaleError::NotASingleChar { var: name, value }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    EmptyPrefix,
    InvalidPrefix(String),
    InvalidSeparator(char),
    SameSeparators,
    NotASingleChar { var: &'static str, value: String },
}

impl std::error::Error for LocaleError {}
impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPrefix => write!(f, "Currency prefix empty"),
            Self::InvalidPrefix(p) => write!(f, "Currency prefix {p:?} may not contain digits or '-'"),
            Self::InvalidSeparator(c) => write!(f, "Invalid separator {c:?}"),
            Self::SameSeparators => write!(f, "Thousands and decimal separators must differ"),
            Self::NotASingleChar { var, value } => write!(f, "{var} must be a single character, got {value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_orders_bounds() {
        let m = ParsedMoney::range(Decimal::new(250, 0), Decimal::new(100, 0));
        assert_eq!(m.min(), Decimal::new(100, 0));
        assert_eq!(m.max(), Decimal::new(250, 0));
        assert!(m.is_range());
        assert!(!ParsedMoney::single(Decimal::ONE).is_range());
    }

    #[test]
    fn test_discount_percent_bounds() {
        assert_eq!(DiscountPercent::new(0), None);
        assert_eq!(DiscountPercent::new(-5), None);
        assert_eq!(DiscountPercent::new(100), None);
        assert_eq!(DiscountPercent::new(99).map(|d| d.value()), Some(99));
        assert_eq!(DiscountPercent::new(25).unwrap().to_string(), "25%");
    }

    #[test]
    fn test_locale_validation() {
        assert_eq!(PriceLocale::new("  ", '.', ','), Err(LocaleError::EmptyPrefix));
        assert_eq!(PriceLocale::new("Rp", '.', '.'), Err(LocaleError::SameSeparators));
        assert_eq!(PriceLocale::new("Rp", '-', ','), Err(LocaleError::InvalidSeparator('-')));
        assert!(matches!(PriceLocale::new("R1", '.', ','), Err(LocaleError::InvalidPrefix(_))));
        let en = PriceLocale::new("$", ',', '.').unwrap();
        assert_eq!(en.currency_prefix(), "$");
        assert_eq!(PriceLocale::default().currency_prefix(), "Rp");
    }
}
