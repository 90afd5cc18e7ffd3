//! Internal wizard state.
//!
//! Each variant carries exactly the data captured so far, so a stage whose
//! entry precondition is unmet cannot be built: `Payout` needs a priced
//! position, `Term` a confirmed payout, `Summary` a chosen term.
use crate::calculator::{Quote, QuoteCalculator};
use crate::collateral::CollateralQuote;
use crate::result::Result;
use crate::term::LoanTerm;

use super::snapshot::{PayoutSelection, WizardSnapshot};
use super::step::WizardStep;

/// Collateral, share quantity and the quote derived from them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Priced {
    pub(crate) collateral: CollateralQuote,
    pub(crate) shares: f64,
    pub(crate) quote: Quote,
}

impl Priced {
    /// Full recompute from the given inputs.
    pub(crate) fn compute(
        calculator: &QuoteCalculator,
        collateral: CollateralQuote,
        shares: f64,
        term_days: u32,
    ) -> Result<Self> {
        let quote = calculator.compute_quote(collateral.reference_price(), shares, term_days)?;
        Ok(Priced {
            collateral,
            shares,
            quote,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Stage {
    #[default]
    Collateral,
    Quantity {
        collateral: CollateralQuote,
    },
    Payout {
        priced: Priced,
        token: Option<String>,
        chain: Option<String>,
    },
    Term {
        priced: Priced,
        payout: PayoutSelection,
    },
    Summary {
        priced: Priced,
        payout: PayoutSelection,
        term: LoanTerm,
    },
}

impl Stage {
    pub(crate) fn step(&self) -> WizardStep {
        match self {
            Stage::Collateral => WizardStep::Collateral,
            Stage::Quantity { .. } => WizardStep::Quantity,
            Stage::Payout { .. } => WizardStep::Payout,
            Stage::Term { .. } => WizardStep::Term,
            Stage::Summary { .. } => WizardStep::Summary,
        }
    }

    pub(crate) fn collateral(&self) -> Option<&CollateralQuote> {
        match self {
            Stage::Collateral => None,
            Stage::Quantity { collateral } => Some(collateral),
            _ => self.priced().map(|p| &p.collateral),
        }
    }

    pub(crate) fn priced(&self) -> Option<&Priced> {
        match self {
            Stage::Payout { priced, .. }
            | Stage::Term { priced, .. }
            | Stage::Summary { priced, .. } => Some(priced),
            _ => None,
        }
    }

    pub(crate) fn term(&self) -> Option<LoanTerm> {
        match self {
            Stage::Summary { term, .. } => Some(*term),
            _ => None,
        }
    }

    /// Term the quote is priced for: the chosen one, or the preview default.
    pub(crate) fn pricing_term_days(&self, default_days: u32) -> u32 {
        self.term().map_or(default_days, |term| term.days())
    }

    /// Same stage with a freshly computed position. Stages without a
    /// position are returned unchanged.
    pub(crate) fn with_priced(self, next: Priced) -> Stage {
        match self {
            Stage::Payout { token, chain, .. } => Stage::Payout {
                priced: next,
                token,
                chain,
            },
            Stage::Term { payout, .. } => Stage::Term {
                priced: next,
                payout,
            },
            Stage::Summary { payout, term, .. } => Stage::Summary {
                priced: next,
                payout,
                term,
            },
            other => other,
        }
    }

    pub(crate) fn snapshot(&self) -> WizardSnapshot {
        let step = self.step();
        let collateral = self.collateral();
        let priced = self.priced();
        let (token, chain) = match self {
            Stage::Payout { token, chain, .. } => (token.clone(), chain.clone()),
            Stage::Term { payout, .. } | Stage::Summary { payout, .. } => {
                (Some(payout.token.clone()), Some(payout.chain.clone()))
            }
            _ => (None, None),
        };

        WizardSnapshot {
            step,
            step_index: step.index(),
            symbol: collateral.map(|c| c.symbol().to_string()),
            reference_price: collateral.map(|c| c.reference_price()),
            share_quantity: priced.map(|p| p.shares),
            token,
            chain,
            term: self.term(),
            quote: priced.map(|p| p.quote),
        }
    }
}
