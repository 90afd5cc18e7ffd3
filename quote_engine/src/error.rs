//! Error types shared by the quote engine and the wizard front-end.
//!
//! The `QuoteError` enum covers local validation failures (rejected step
//! submissions), calculator domain errors, and configuration loading issues,
//! so the whole workspace can propagate a single error type.
use std::io;

use thiserror::Error;

use crate::wizard::WizardStep;

/// Unified error type for the quote engine.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Empty, non-numeric or non-positive text submitted by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Calculator arguments (or its result) outside the valid numeric domain.
    #[error("Out of domain: {0}")]
    OutOfDomain(String),

    /// A token, chain or preset term that the catalog does not offer.
    #[error("Unknown {kind}: {id}")]
    UnknownCatalogEntry {
        /// Catalog section, e.g. `token`.
        kind: &'static str,
        /// Identifier that was submitted.
        id: String,
    },

    /// Input addressed to a step the wizard has not reached yet.
    #[error("Step {required} is locked, wizard is at step {current}")]
    StepLocked {
        /// Step the wizard is currently on.
        current: WizardStep,
        /// Step the submitted input belongs to.
        required: WizardStep,
    },

    /// Input for a step that was already passed and cannot be edited anymore.
    #[error("Step {step} can no longer be changed at step {current}, restart the wizard")]
    StepClosed {
        /// Step the wizard is currently on.
        current: WizardStep,
        /// Step the submitted input belongs to.
        step: WizardStep,
    },

    /// The create-loan action needs a connected wallet.
    #[error("Wallet is not connected")]
    WalletDisconnected,

    /// The price collaborator could not provide a reference price.
    #[error("Reference price unavailable: {0}")]
    PriceUnavailable(String),

    /// Configuration values that fail validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl QuoteError {
    /// Returns `true` for failures that only reject the current submission
    /// and leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            QuoteError::Config(_) | QuoteError::Io(_) | QuoteError::SerdeJson(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_failures_end_the_session() {
        assert!(QuoteError::InvalidInput("empty".into()).is_recoverable());
        assert!(QuoteError::WalletDisconnected.is_recoverable());
        assert!(
            QuoteError::StepLocked {
                current: WizardStep::Collateral,
                required: WizardStep::Term,
            }
            .is_recoverable()
        );
        assert!(!QuoteError::Config("bad rate".into()).is_recoverable());
    }

    #[test]
    fn locked_step_message_names_both_steps() {
        let err = QuoteError::StepLocked {
            current: WizardStep::Quantity,
            required: WizardStep::Summary,
        };
        assert_eq!(err.to_string(), "Step Summary is locked, wizard is at step Quantity");
    }
}
