//! Reference price collaborator.
//!
//! Market data is not retrieved by the engine. The wizard asks a `PriceSource`
//! for the price of a submitted symbol; the default `FixedPriceSource` answers
//! every symbol with the same stub price.
use std::collections::HashMap;

use crate::error::QuoteError;
use crate::result::Result;

/// Stub price used when nothing else is configured.
pub const DEFAULT_STUB_PRICE: f64 = 100.0;

/// Supplies reference prices for collateral symbols.
pub trait PriceSource {
    /// Price per share for an uppercase `symbol`.
    fn reference_price(&self, symbol: &str) -> Result<f64>;
}

/// Same price for every symbol.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriceSource {
    price: f64,
}

impl FixedPriceSource {
    /// Creates a source that always answers `price`.
    pub fn new(price: f64) -> Result<Self> {
        if !(price.is_finite() && price > 0.0) {
            return Err(QuoteError::Config(format!(
                "stub price must be positive, got {}",
                price
            )));
        }
        Ok(FixedPriceSource { price })
    }
}

impl Default for FixedPriceSource {
    fn default() -> Self {
        FixedPriceSource {
            price: DEFAULT_STUB_PRICE,
        }
    }
}

impl PriceSource for FixedPriceSource {
    fn reference_price(&self, _symbol: &str) -> Result<f64> {
        Ok(self.price)
    }
}

/// Per-symbol prices; unknown symbols are unavailable.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    /// Adds or replaces the price of `symbol`.
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }
}

impl PriceSource for PriceTable {
    fn reference_price(&self, symbol: &str) -> Result<f64> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| QuoteError::PriceUnavailable(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_answers_every_symbol() {
        let source = FixedPriceSource::default();
        assert_eq!(source.reference_price("AAPL").unwrap(), 100.0);
        assert_eq!(source.reference_price("ANYTHING").unwrap(), 100.0);
        assert!(FixedPriceSource::new(0.0).is_err());
    }

    #[test]
    fn table_reports_missing_symbols() {
        let table = PriceTable::default().with_price("msft", 410.5);
        assert_eq!(table.reference_price("MSFT").unwrap(), 410.5);
        assert!(matches!(
            table.reference_price("AAPL"),
            Err(QuoteError::PriceUnavailable(_))
        ));
    }
}
