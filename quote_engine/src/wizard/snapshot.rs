//! Read-only views handed to the rendering layer.
use serde::{Deserialize, Serialize};

use crate::calculator::Quote;
use crate::term::LoanTerm;

use super::step::WizardStep;

/// Confirmed payout token and chain (catalog ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSelection {
    /// Token id, e.g. `usdc`.
    pub token: String,
    /// Chain id, e.g. `mantle`.
    pub chain: String,
}

/// Current wizard state and quote, for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardSnapshot {
    /// Current step.
    pub step: WizardStep,
    /// Current step as a number (0..=4).
    pub step_index: usize,
    /// Collateral symbol once submitted.
    pub symbol: Option<String>,
    /// Reference price of the collateral.
    pub reference_price: Option<f64>,
    /// Share quantity once submitted.
    pub share_quantity: Option<f64>,
    /// Selected payout token id.
    pub token: Option<String>,
    /// Selected payout chain id.
    pub chain: Option<String>,
    /// Active loan term.
    pub term: Option<LoanTerm>,
    /// Latest quote, absent until it can be computed.
    pub quote: Option<Quote>,
}

impl WizardSnapshot {
    /// Returns `true` for the state right after session start or restart.
    pub fn is_initial(&self) -> bool {
        self.step == WizardStep::Collateral
            && self.symbol.is_none()
            && self.reference_price.is_none()
            && self.share_quantity.is_none()
            && self.token.is_none()
            && self.chain.is_none()
            && self.term.is_none()
            && self.quote.is_none()
    }
}

/// Loan parameters released by the create-loan action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanDraft {
    /// Collateral symbol.
    pub symbol: String,
    /// Reference price used for the quote.
    pub reference_price: f64,
    /// Pledged share quantity.
    pub share_quantity: f64,
    /// Payout token and chain.
    pub payout: PayoutSelection,
    /// Loan term.
    pub term: LoanTerm,
    /// Final quote.
    pub quote: Quote,
}

/// Notification pushed to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// An input was accepted; carries the new state.
    Updated(WizardSnapshot),
    /// An input was rejected; state is unchanged.
    Rejected {
        /// Step the wizard stayed on.
        step: WizardStep,
        /// Human-readable reason.
        reason: String,
    },
    /// All inputs were discarded.
    Restarted,
}
