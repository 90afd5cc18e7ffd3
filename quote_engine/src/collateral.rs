//! Collateral symbol, reference price and share quantity parsing.
//!
//! All text arriving from the front-end is untrusted; the helpers here turn it
//! into validated values or an `InvalidInput` error.
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::result::Result;

/// Pledged asset: a ticker symbol and its reference price per share.
///
/// Immutable once built. A new price for the same symbol produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralQuote {
    symbol: String,
    reference_price: f64,
}

impl CollateralQuote {
    /// Builds a collateral quote from an already normalized symbol.
    pub fn new(symbol: String, reference_price: f64) -> Result<Self> {
        if !(reference_price.is_finite() && reference_price > 0.0) {
            return Err(QuoteError::OutOfDomain(format!(
                "reference price for {} must be positive, got {}",
                symbol, reference_price
            )));
        }
        Ok(CollateralQuote {
            symbol,
            reference_price,
        })
    }

    /// Uppercase ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Price per share in currency units.
    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    /// Same symbol at a new price.
    pub fn repriced(&self, reference_price: f64) -> Result<Self> {
        CollateralQuote::new(self.symbol.clone(), reference_price)
    }
}

/// Normalizes a user-typed symbol: trimmed, non-empty, uppercased.
///
/// Any other text is accepted as is; the price source decides whether it
/// knows the symbol.
pub fn parse_symbol(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuoteError::InvalidInput("symbol is empty".to_string()));
    }
    Ok(trimmed.to_uppercase())
}

/// Parses a share quantity: a finite decimal greater than zero.
pub fn parse_share_quantity(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuoteError::InvalidInput(
            "share quantity is empty".to_string(),
        ));
    }
    let quantity: f64 = trimmed.parse().map_err(|_| {
        QuoteError::InvalidInput(format!("share quantity is not a number: {}", trimmed))
    })?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(QuoteError::InvalidInput(format!(
            "share quantity must be positive, got {}",
            trimmed
        )));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        assert_eq!(parse_symbol("  aapl ").unwrap(), "AAPL");
        assert_eq!(parse_symbol("brk.b").unwrap(), "BRK.B");
    }

    #[test]
    fn any_non_blank_symbol_text_is_accepted() {
        assert_eq!(parse_symbol("^gspc").unwrap(), "^GSPC");
        assert_eq!(parse_symbol("brk/b").unwrap(), "BRK/B");
        assert_eq!(parse_symbol(" aa pl ").unwrap(), "AA PL");
        assert_eq!(parse_symbol("äpfel").unwrap(), "ÄPFEL");
        assert_eq!(parse_symbol("7203.t").unwrap(), "7203.T");
    }

    #[test]
    fn blank_symbol_is_rejected() {
        assert!(matches!(parse_symbol(""), Err(QuoteError::InvalidInput(_))));
        assert!(matches!(parse_symbol("   "), Err(QuoteError::InvalidInput(_))));
        assert!(matches!(parse_symbol("\t\n"), Err(QuoteError::InvalidInput(_))));
    }

    #[test]
    fn share_quantity_must_be_positive_number() {
        assert_eq!(parse_share_quantity("50").unwrap(), 50.0);
        assert_eq!(parse_share_quantity(" 0.25 ").unwrap(), 0.25);
        for raw in ["", "fifty", "0", "-1", "NaN", "inf"] {
            assert!(
                matches!(parse_share_quantity(raw), Err(QuoteError::InvalidInput(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn collateral_needs_positive_price() {
        assert!(CollateralQuote::new("AAPL".to_string(), 0.0).is_err());
        assert!(CollateralQuote::new("AAPL".to_string(), f64::NAN).is_err());
        let collateral = CollateralQuote::new("AAPL".to_string(), 100.0).unwrap();
        let repriced = collateral.repriced(120.0).unwrap();
        assert_eq!(repriced.symbol(), "AAPL");
        assert_eq!(repriced.reference_price(), 120.0);
        assert_eq!(collateral.reference_price(), 100.0);
    }
}
