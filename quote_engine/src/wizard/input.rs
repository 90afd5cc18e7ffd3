//! Submit events accepted by the wizard.
use super::step::WizardStep;

/// One discrete user submission. Text payloads are untrusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    /// Collateral ticker symbol.
    Symbol(String),
    /// Number of shares pledged.
    ShareQuantity(String),
    /// Payout token id or symbol.
    Token(String),
    /// Payout chain id or symbol.
    Chain(String),
    /// Accept the current token and chain.
    ConfirmPayout,
    /// Preset term in days.
    PresetTerm(u32),
    /// Custom term text in days.
    CustomTerm(String),
}

impl WizardInput {
    /// Step this input belongs to.
    pub fn step(&self) -> WizardStep {
        match self {
            WizardInput::Symbol(_) => WizardStep::Collateral,
            WizardInput::ShareQuantity(_) => WizardStep::Quantity,
            WizardInput::Token(_) | WizardInput::Chain(_) | WizardInput::ConfirmPayout => {
                WizardStep::Payout
            }
            WizardInput::PresetTerm(_) | WizardInput::CustomTerm(_) => WizardStep::Term,
        }
    }
}
