//! Static catalogs of payout tokens, payout chains and preset loan terms.
//!
//! Catalogs are configuration data: the defaults mirror the tokens and chains
//! the product ships with, but any `Catalog` can be injected into the wizard,
//! which keeps tests free to use minimal catalogs.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::result::Result;

/// Preset loan durations offered by default, in days.
pub const DEFAULT_PRESET_TERMS: [u32; 5] = [7, 14, 30, 60, 90];
/// Term used to price the preview quote before the user picks one.
pub const DEFAULT_TERM_DAYS: u32 = 30;

/// One selectable token or chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable lowercase identifier, e.g. `usdc`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Display symbol, e.g. `USDC`.
    pub symbol: String,
}

impl CatalogEntry {
    /// Convenience constructor.
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        CatalogEntry {
            id: String::from(id),
            name: String::from(name),
            symbol: String::from(symbol),
        }
    }

    fn matches(&self, raw: &str) -> bool {
        self.id.eq_ignore_ascii_case(raw) || self.symbol.eq_ignore_ascii_case(raw)
    }
}

/// Everything the wizard may offer the user to choose from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Tokens the loan can be paid out in.
    pub tokens: Vec<CatalogEntry>,
    /// Chains the payout can be delivered on.
    pub chains: Vec<CatalogEntry>,
    /// Preset term durations in days.
    pub preset_terms: Vec<u32>,
    /// Term used for the preview quote until a term is chosen.
    pub default_term_days: u32,
    /// Optional upper bound for user-supplied custom terms.
    pub max_custom_term_days: Option<u32>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            tokens: vec![
                CatalogEntry::new("usdc", "USDC", "USDC"),
                CatalogEntry::new("eth", "Ethereum", "ETH"),
            ],
            chains: vec![
                CatalogEntry::new("mantle", "Mantle", "MNT"),
                CatalogEntry::new("ethereum", "Ethereum", "ETH"),
                CatalogEntry::new("arbitrum", "Arbitrum", "ARB"),
            ],
            preset_terms: DEFAULT_PRESET_TERMS.to_vec(),
            default_term_days: DEFAULT_TERM_DAYS,
            max_custom_term_days: None,
        }
    }
}

impl Catalog {
    /// Looks up a payout token by id or symbol (ASCII case-insensitive).
    pub fn token(&self, raw: &str) -> Result<&CatalogEntry> {
        lookup(&self.tokens, "token", raw)
    }

    /// Looks up a payout chain by id or symbol (ASCII case-insensitive).
    pub fn chain(&self, raw: &str) -> Result<&CatalogEntry> {
        lookup(&self.chains, "chain", raw)
    }

    /// Returns `days` if it is one of the preset terms.
    pub fn preset(&self, days: u32) -> Result<u32> {
        if self.preset_terms.contains(&days) {
            Ok(days)
        } else {
            Err(QuoteError::UnknownCatalogEntry {
                kind: "preset term",
                id: days.to_string(),
            })
        }
    }

    /// Token pre-selected when the payout step opens.
    pub fn default_token(&self) -> Option<&CatalogEntry> {
        self.tokens.first()
    }

    /// Chain pre-selected when the payout step opens.
    pub fn default_chain(&self) -> Option<&CatalogEntry> {
        self.chains.first()
    }

    /// Checks the catalog for values the wizard cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_term_days == 0 {
            return Err(QuoteError::Config(
                "default_term_days must be positive".to_string(),
            ));
        }
        if self.preset_terms.contains(&0) {
            return Err(QuoteError::Config(
                "preset terms must be positive".to_string(),
            ));
        }
        if self.max_custom_term_days == Some(0) {
            return Err(QuoteError::Config(
                "max_custom_term_days must be positive when set".to_string(),
            ));
        }
        ensure_unique_ids(&self.tokens, "token")?;
        ensure_unique_ids(&self.chains, "chain")?;
        Ok(())
    }
}

fn lookup<'a>(
    entries: &'a [CatalogEntry],
    kind: &'static str,
    raw: &str,
) -> Result<&'a CatalogEntry> {
    let trimmed = raw.trim();
    entries
        .iter()
        .find(|entry| entry.matches(trimmed))
        .ok_or_else(|| QuoteError::UnknownCatalogEntry {
            kind,
            id: trimmed.to_string(),
        })
}

fn ensure_unique_ids(entries: &[CatalogEntry], kind: &str) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        if entry.id.trim().is_empty() {
            return Err(QuoteError::Config(format!("{} with empty id", kind)));
        }
        if entries[..i]
            .iter()
            .any(|prev| prev.id.eq_ignore_ascii_case(&entry.id))
        {
            return Err(QuoteError::Config(format!(
                "duplicate {} id: {}",
                kind, entry.id
            )));
        }
    }
    Ok(())
}
