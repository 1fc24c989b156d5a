//! Name and price search inputs.

use crate::item_form::FieldError;
use crate::Intent;
use storefront_core::search::FilterCriteria;
use storefront_core::Money;

/// How the price input is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceMode {
    /// Price must equal the input.
    #[default]
    Exact,
    /// Price must not exceed the input.
    AtMost,
}

/// Raw text of the search inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBar {
    pub name: String,
    pub price: String,
    pub mode: PriceMode,
}

impl SearchBar {
    /// Empty inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the inputs. Blank inputs add no predicate.
    pub fn criteria(&self) -> Result<FilterCriteria, FieldError> {
        let mut criteria = FilterCriteria::new();
        if !self.name.trim().is_empty() {
            criteria = criteria.name(self.name.trim());
        }
        if let Some(price) = parse_price(&self.price)? {
            criteria = match self.mode {
                PriceMode::Exact => criteria.exact_price(price),
                PriceMode::AtMost => criteria.max_price(price),
            };
        }
        Ok(criteria)
    }

    /// Intent for the filter button.
    pub fn submit(&self) -> Result<Intent, FieldError> {
        self.criteria().map(Intent::ApplyFilter)
    }

    /// Reset the inputs and emit the clear intent.
    pub fn clear(&mut self) -> Intent {
        *self = Self::default();
        Intent::ClearFilters
    }
}

/// Parse an optional, non-negative price.
pub(crate) fn parse_price(input: &str) -> Result<Option<Money>, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount: f64 = digits
        .parse()
        .map_err(|_| FieldError::PriceInvalid(trimmed.to_string()))?;
    if amount < 0.0 {
        return Err(FieldError::PriceNegative);
    }
    Money::from_decimal(amount)
        .map(Some)
        .map_err(|_| FieldError::PriceInvalid(trimmed.to_string()))
}
