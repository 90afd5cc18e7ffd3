//! Wizard configuration: pricing rates, catalogs and the stub price.
//!
//! Configuration is plain JSON. Every field is optional; missing values fall
//! back to the built-in defaults. Values are validated after loading.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculator::{PricingConfig, QuoteCalculator};
use crate::catalog::Catalog;
use crate::price::{DEFAULT_STUB_PRICE, FixedPriceSource};
use crate::result::Result;

/// Top-level configuration for one wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Calculator rates.
    pub pricing: PricingConfig,
    /// Tokens, chains and terms offered to the user.
    pub catalog: Catalog,
    /// Reference price answered for every symbol.
    pub stub_price: f64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        WizardConfig {
            pricing: PricingConfig::default(),
            catalog: Catalog::default(),
            stub_price: DEFAULT_STUB_PRICE,
        }
    }
}

impl WizardConfig {
    /// Parses and validates JSON configuration from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: WizardConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        self.catalog.validate()?;
        FixedPriceSource::new(self.stub_price)?;
        Ok(())
    }

    /// Calculator for the configured rates.
    pub fn calculator(&self) -> Result<QuoteCalculator> {
        QuoteCalculator::new(self.pricing)
    }

    /// Stub price source for the configured price.
    pub fn price_source(&self) -> Result<FixedPriceSource> {
        FixedPriceSource::new(self.stub_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let config = WizardConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let json = r#"{
            "pricing": { "loan_to_value": 0.5 },
            "catalog": { "preset_terms": [10, 20], "max_custom_term_days": 180 },
            "stub_price": 42.0
        }"#;
        let config = WizardConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.pricing.loan_to_value, 0.5);
        assert_eq!(config.pricing.fee_rate, 0.02);
        assert_eq!(config.catalog.preset_terms, vec![10, 20]);
        assert_eq!(config.catalog.max_custom_term_days, Some(180));
        assert_eq!(config.catalog.tokens.len(), 2);
        assert_eq!(config.stub_price, 42.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let json = r#"{ "pricing": { "loan_to_value": 1.5 } }"#;
        assert!(matches!(
            WizardConfig::from_reader(json.as_bytes()),
            Err(QuoteError::Config(_))
        ));
        let json = r#"{ "stub_price": 0 }"#;
        assert!(WizardConfig::from_reader(json.as_bytes()).is_err());
        assert!(matches!(
            WizardConfig::from_reader("not json".as_bytes()),
            Err(QuoteError::SerdeJson(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "catalog": {{ "default_term_days": 14 }} }}"#).unwrap();
        let config = WizardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.catalog.default_term_days, 14);

        let missing = WizardConfig::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(QuoteError::Io(_))));
    }
}
