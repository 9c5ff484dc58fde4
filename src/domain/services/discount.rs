//! Discount percentage derivation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use crate::domain::services::PriceParser;
use crate::domain::value_objects::{DiscountPercent, ParsedMoney};
use crate::ProductEntity;

/// Derives the discount badge for a product.
///
/// An authored `discountPercentage` wins whenever it carries digits. Otherwise
/// the percentage is computed from `price` against `nominalDiscount`, using the
/// lowest current bound against the highest original bound so a range reports
/// its best case. Single amounts are the degenerate range, so card and detail
/// views get the same answer from this one rule.
#[derive(Clone, Debug, Default)]
pub struct DiscountCalculator { parser: PriceParser }

impl DiscountCalculator {
    pub fn new(parser: PriceParser) -> Self { Self { parser } }
    pub fn parser(&self) -> &PriceParser { &self.parser }

    pub fn discount_percent(&self, product: &ProductEntity) -> Option<DiscountPercent> {
        if let Some(digits) = product.discount_percentage.as_deref().and_then(authored_digits) {
            return digits.parse().ok().and_then(DiscountPercent::new);
        }
        let price = non_blank(product.price.as_deref())?;
        let original = non_blank(product.nominal_discount.as_deref())?;
        self.derive(price, original)
    }

    /// Percentage saved going from `original` to `price`, absent unless it is a
    /// real discount.
    pub fn derive(&self, price: &str, original: &str) -> Option<DiscountPercent> {
        let current = self.parse_logged(price)?;
        let original = self.parse_logged(original)?;
        best_case_percent(&current, &original)
    }

    fn parse_logged(&self, raw: &str) -> Option<ParsedMoney> {
        self.parser
            .parse(raw)
            .map_err(|e| tracing::debug!(raw = %raw, error = %e, "no discount from unparseable price"))
            .ok()
    }
}

fn best_case_percent(current: &ParsedMoney, original: &ParsedMoney) -> Option<DiscountPercent> {
    let highest = original.max();
    if highest.is_zero() { return None; }
    let ratio = current.min().checked_div(highest)?;
    let percent = Decimal::ONE
        .checked_sub(ratio)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    DiscountPercent::new(percent.to_i64()?)
}

/// Digits of an authored percentage such as `"25%"` or `"-25 %"`. Any digits
/// at all make the authored value decide the result.
fn authored_digits(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
