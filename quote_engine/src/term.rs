//! Loan term selection: a preset duration from the catalog or a custom one.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::QuoteError;
use crate::result::Result;

/// Active loan duration. Exactly one representation is held at a time, so
/// picking a preset drops any custom value and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "lowercase")]
pub enum LoanTerm {
    /// One of the catalog's preset durations.
    Preset(u32),
    /// Duration typed in by the user.
    Custom(u32),
}

impl LoanTerm {
    /// Selects a preset term, checking it against the catalog.
    pub fn preset(catalog: &Catalog, days: u32) -> Result<Self> {
        catalog.preset(days).map(LoanTerm::Preset)
    }

    /// Parses untrusted custom-term text.
    ///
    /// The value must be a positive whole number of days and must not exceed
    /// the catalog's `max_custom_term_days` when one is configured.
    pub fn parse_custom(catalog: &Catalog, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuoteError::InvalidInput(
                "custom term is empty".to_string(),
            ));
        }
        let days: u32 = trimmed.parse().map_err(|_| {
            QuoteError::InvalidInput(format!("custom term is not a whole number: {}", trimmed))
        })?;
        if days == 0 {
            return Err(QuoteError::InvalidInput(
                "custom term must be at least one day".to_string(),
            ));
        }
        if let Some(max) = catalog.max_custom_term_days {
            if days > max {
                return Err(QuoteError::InvalidInput(format!(
                    "custom term of {} days exceeds the maximum of {} days",
                    days, max
                )));
            }
        }
        Ok(LoanTerm::Custom(days))
    }

    /// Duration in days.
    pub fn days(&self) -> u32 {
        match self {
            LoanTerm::Preset(days) | LoanTerm::Custom(days) => *days,
        }
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanTerm::Preset(days) => write!(f, "{} days", days),
            LoanTerm::Custom(days) => write!(f, "{} days (custom)", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_term_text_is_validated() {
        let catalog = Catalog::default();
        assert_eq!(
            LoanTerm::parse_custom(&catalog, " 45 ").unwrap(),
            LoanTerm::Custom(45)
        );
        for raw in ["", "   ", "abc", "0", "-3", "4.5"] {
            assert!(
                matches!(
                    LoanTerm::parse_custom(&catalog, raw),
                    Err(QuoteError::InvalidInput(_))
                ),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn custom_term_respects_configured_limit() {
        let catalog = Catalog {
            max_custom_term_days: Some(365),
            ..Catalog::default()
        };
        assert!(LoanTerm::parse_custom(&catalog, "365").is_ok());
        assert!(LoanTerm::parse_custom(&catalog, "366").is_err());
        assert!(LoanTerm::parse_custom(&Catalog::default(), "3650").is_ok());
    }

    #[test]
    fn preset_must_come_from_catalog() {
        let catalog = Catalog::default();
        assert_eq!(LoanTerm::preset(&catalog, 14).unwrap().days(), 14);
        assert!(LoanTerm::preset(&catalog, 15).is_err());
    }

    #[test]
    fn display_marks_custom_terms() {
        assert_eq!(LoanTerm::Preset(30).to_string(), "30 days");
        assert_eq!(LoanTerm::Custom(21).to_string(), "21 days (custom)");
    }
}
