//!
//! Collateralized loan quote engine and wizard state machine.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `calculator` — pure quote calculation (collateral value, loan amount, protection cost).
//! - `collateral` — collateral symbol, reference price and share quantity parsing.
//! - `term` — preset and custom loan terms.
//! - `catalog` — injectable payout token, chain and term catalogs.
//! - `price` — reference price collaborator.
//! - `config` — JSON configuration for a wizard session.
//! - `wizard` — the step-gated `WizardController`.
#![warn(missing_docs)]
pub mod calculator;
pub mod catalog;
pub mod collateral;
pub mod config;
pub mod error;
pub mod price;
pub mod result;
pub mod term;
pub mod wizard;

pub use calculator::{PricingConfig, ProtectionCost, Quote, QuoteCalculator};
pub use config::WizardConfig;
pub use error::QuoteError;
pub use result::Result;
pub use term::LoanTerm;
pub use wizard::{WizardController, WizardInput, WizardSnapshot, WizardStep};
