//! Price string parsing and display formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;
use crate::domain::value_objects::{ParsedMoney, PriceLocale};
use crate::PriceError;

/// Reads free-text catalog prices such as `Rp150.000`, `150000`,
/// `Rp150.000,50` or `Rp100.000-Rp150.000`.
#[derive(Clone, Debug, Default)]
pub struct PriceParser { locale: PriceLocale }

/// A price split into its currency marker and the amount text, for views that
/// style the two separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PriceLabel { pub prefix: Option<String>, pub amount: String }

impl PriceParser {
    pub fn new(locale: PriceLocale) -> Self { Self { locale } }
    pub fn locale(&self) -> &PriceLocale { &self.locale }

    pub fn parse(&self, raw: &str) -> Result<ParsedMoney, PriceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { return Err(PriceError::Empty); }
        let parts: Vec<&str> = trimmed.split('-').collect();
        match parts.as_slice() {
            [single] => self.parse_amount(single)
                .map(ParsedMoney::single)
                .ok_or_else(|| PriceError::InvalidAmount(raw.to_string())),
            [low, high] => match (self.parse_amount(low), self.parse_amount(high)) {
                (Some(low), Some(high)) => Ok(ParsedMoney::range(low, high)),
                _ => Err(PriceError::InvalidRange(raw.to_string())),
            },
            _ => Err(PriceError::InvalidRange(raw.to_string())),
        }
    }

    /// Renders `raw` as `Rp150.000,00`. Input that already carries the
    /// currency marker, or that cannot be parsed, is returned as written, so
    /// formatting twice is the same as formatting once.
    pub fn format(&self, raw: &str) -> String {
        if raw.contains(self.locale.currency_prefix()) { return raw.to_string(); }
        let rendered = match self.parse(raw) {
            Ok(money) if money.is_range() => self.render(money.min()).zip(self.render(money.max())).map(|(low, high)| format!("{low}-{high}")),
            Ok(money) => self.render(money.min()),
            Err(e) => {
                tracing::debug!(raw = %raw, error = %e, "keeping unparseable price as written");
                None
            }
        };
        rendered.unwrap_or_else(|| raw.to_string())
    }

    /// Removes every occurrence of the currency marker from `raw`, keeping the
    /// amount text otherwise untouched.
    pub fn split_prefix(&self, raw: &str) -> PriceLabel {
        let prefix = self.locale.currency_prefix();
        if raw.contains(prefix) {
            PriceLabel { prefix: Some(prefix.to_string()), amount: raw.replace(prefix, "").trim().to_string() }
        } else {
            PriceLabel { prefix: None, amount: raw.trim().to_string() }
        }
    }

    fn parse_amount(&self, part: &str) -> Option<Decimal> {
        let part = part.trim();
        let part = part.strip_prefix(self.locale.currency_prefix()).unwrap_or(part).trim_start();
        let thousands = self.locale.thousands_separator();
        let decimal = self.locale.decimal_separator();
        let cleaned: String = part.chars().filter(|&c| c != thousands).collect();
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == decimal) {
            return None;
        }
        let normalized = match cleaned.split_once(decimal) {
            None => cleaned,
            // decimal separator only directly before exactly two trailing digits
            Some((int, frac)) if !int.is_empty() && frac.len() == 2 && !frac.contains(decimal) => format!("{int}.{frac}"),
            Some(_) => return None,
        };
        Decimal::from_str(&normalized).ok()
    }

    /// `None` when the amount is too large to carry two decimal digits.
    fn render(&self, amount: Decimal) -> Option<String> {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        if rounded.scale() != 2 {
            tracing::debug!(amount = %amount, "amount too large to render with cents");
            return None;
        }
        let text = rounded.to_string();
        let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        Some(format!(
            "{}{}{}{}",
            self.locale.currency_prefix(),
            group_thousands(int, self.locale.thousands_separator()),
            self.locale.decimal_separator(),
            frac
        ))
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 { out.push(separator); }
        out.push(c);
    }
    out
}
