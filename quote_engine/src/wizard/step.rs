//! Named wizard steps in their fixed order.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// Linear wizard steps, numbered 0 to 4.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
)]
pub enum WizardStep {
    /// Pick the collateral symbol.
    Collateral,
    /// Enter the share quantity.
    Quantity,
    /// Choose payout token and chain.
    Payout,
    /// Choose the loan term.
    Term,
    /// Read-only loan summary.
    Summary,
}

impl WizardStep {
    /// Zero-based position of the step.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short prompt shown to the user.
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Collateral => "Select stock symbol",
            WizardStep::Quantity => "Enter share quantity",
            WizardStep::Payout => "Choose payout token and chain",
            WizardStep::Term => "Select loan term",
            WizardStep::Summary => "Review loan",
        }
    }
}
