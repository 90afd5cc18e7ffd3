//! Step-gated wizard controller.
//!
//! `WizardController` owns the session state, validates each submission
//! against the current step, re-derives the quote whenever a pricing input
//! changes, and broadcasts the resulting snapshot to subscribers.
//!
//! Every mutation builds the next `Stage` from the current one and only
//! installs it when the whole step (parsing, catalog lookups, quote
//! computation) succeeded, so a rejected submission leaves the state as it
//! was.
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};

use crate::calculator::{Quote, QuoteCalculator};
use crate::catalog::Catalog;
use crate::collateral::{CollateralQuote, parse_share_quantity, parse_symbol};
use crate::config::WizardConfig;
use crate::error::QuoteError;
use crate::price::PriceSource;
use crate::result::Result;
use crate::term::LoanTerm;

use super::input::WizardInput;
use super::snapshot::{LoanDraft, PayoutSelection, WizardEvent, WizardSnapshot};
use super::stage::{Priced, Stage};
use super::step::WizardStep;

/// Connection state reported by the wallet collaborator.
pub trait WalletStatus {
    /// Returns `true` while a wallet is connected.
    fn is_connected(&self) -> bool;
}

impl WalletStatus for bool {
    fn is_connected(&self) -> bool {
        *self
    }
}

/// Single-session loan quote wizard.
pub struct WizardController {
    calculator: QuoteCalculator,
    catalog: Catalog,
    prices: Box<dyn PriceSource>,
    stage: Stage,
    subscribers: Vec<Sender<WizardEvent>>,
}

impl WizardController {
    /// Creates a controller at step 0 after validating `catalog`.
    pub fn new(
        calculator: QuoteCalculator,
        catalog: Catalog,
        prices: Box<dyn PriceSource>,
    ) -> Result<Self> {
        catalog.validate()?;
        Ok(WizardController {
            calculator,
            catalog,
            prices,
            stage: Stage::default(),
            subscribers: Vec::new(),
        })
    }

    /// Builds a controller with the configured calculator, catalog and stub
    /// price source.
    pub fn from_config(config: &WizardConfig) -> Result<Self> {
        Self::new(
            config.calculator()?,
            config.catalog.clone(),
            Box::new(config.price_source()?),
        )
    }

    /// Registers a new observer. Events are delivered without blocking;
    /// dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<WizardEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.stage.step()
    }

    /// Catalog offered to the user.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current quote, if one can be computed.
    pub fn quote(&self) -> Option<Quote> {
        self.stage.priced().map(|p| p.quote)
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> WizardSnapshot {
        self.stage.snapshot()
    }

    /// Applies one user submission.
    ///
    /// On success the new snapshot is returned and broadcast. On failure the
    /// state is left untouched and the error describes why the step did not
    /// advance.
    pub fn submit(&mut self, input: WizardInput) -> Result<WizardSnapshot> {
        debug!("Submit {:?} at step {}", input, self.step());
        let next = self.next_stage(input);
        self.commit(next)
    }

    /// Replaces the collateral's reference price and recomputes the quote.
    pub fn reprice(&mut self, reference_price: f64) -> Result<WizardSnapshot> {
        let next = self.repriced_stage(reference_price);
        self.commit(next)
    }

    /// Asks the price source again for the current symbol's price.
    pub fn refresh_price(&mut self) -> Result<WizardSnapshot> {
        let next = self
            .current_collateral()
            .and_then(|collateral| self.prices.reference_price(collateral.symbol()))
            .and_then(|price| self.repriced_stage(price));
        self.commit(next)
    }

    /// Discards every input and the quote, returning to step 0.
    pub fn restart(&mut self) -> WizardSnapshot {
        info!("Wizard restarted from step {}", self.step());
        self.stage = Stage::default();
        self.broadcast(WizardEvent::Restarted);
        let snapshot = self.snapshot();
        self.broadcast(WizardEvent::Updated(snapshot.clone()));
        snapshot
    }

    /// Returns `true` when the create-loan action is available.
    pub fn can_create_loan(&self, wallet: &impl WalletStatus) -> bool {
        self.step() == WizardStep::Summary && wallet.is_connected()
    }

    /// Releases the final loan parameters. Requires the summary step and a
    /// connected wallet; builds no transaction.
    pub fn create_loan(&self, wallet: &impl WalletStatus) -> Result<LoanDraft> {
        let Stage::Summary {
            priced,
            payout,
            term,
        } = &self.stage
        else {
            return Err(QuoteError::StepLocked {
                current: self.step(),
                required: WizardStep::Summary,
            });
        };
        if !wallet.is_connected() {
            return Err(QuoteError::WalletDisconnected);
        }

        info!(
            "Loan draft created: {} x {} for {}",
            priced.shares,
            priced.collateral.symbol(),
            term
        );
        Ok(LoanDraft {
            symbol: priced.collateral.symbol().to_string(),
            reference_price: priced.collateral.reference_price(),
            share_quantity: priced.shares,
            payout: payout.clone(),
            term: *term,
            quote: priced.quote,
        })
    }

    fn commit(&mut self, next: Result<Stage>) -> Result<WizardSnapshot> {
        let current = self.step();
        match next {
            Ok(stage) => {
                self.stage = stage;
                let snapshot = self.snapshot();
                if snapshot.step != current {
                    info!("Wizard advanced from {} to {}", current, snapshot.step);
                }
                self.broadcast(WizardEvent::Updated(snapshot.clone()));
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Submission rejected at step {}: {}", current, e);
                self.broadcast(WizardEvent::Rejected {
                    step: current,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn broadcast(&mut self, event: WizardEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    fn current_collateral(&self) -> Result<&CollateralQuote> {
        self.stage.collateral().ok_or(QuoteError::StepLocked {
            current: self.step(),
            required: WizardStep::Quantity,
        })
    }

    fn next_stage(&self, input: WizardInput) -> Result<Stage> {
        let current = self.step();
        let required = input.step();
        if required > current {
            return Err(QuoteError::StepLocked { current, required });
        }

        match (input, &self.stage) {
            (WizardInput::Symbol(raw), Stage::Collateral) => {
                let symbol = parse_symbol(&raw)?;
                let price = self.prices.reference_price(&symbol)?;
                let collateral = CollateralQuote::new(symbol, price)?;
                debug!(
                    "Collateral {} priced at {}",
                    collateral.symbol(),
                    collateral.reference_price()
                );
                Ok(Stage::Quantity { collateral })
            }
            (WizardInput::ShareQuantity(raw), stage) => {
                let shares = parse_share_quantity(&raw)?;
                self.with_shares(stage, shares)
            }
            (WizardInput::Token(raw), stage) => {
                let id = self.catalog.token(&raw)?.id.clone();
                Ok(with_payout(stage, Some(id), None))
            }
            (WizardInput::Chain(raw), stage) => {
                let id = self.catalog.chain(&raw)?.id.clone();
                Ok(with_payout(stage, None, Some(id)))
            }
            (
                WizardInput::ConfirmPayout,
                Stage::Payout {
                    priced,
                    token,
                    chain,
                },
            ) => match (token, chain) {
                (Some(token), Some(chain)) => Ok(Stage::Term {
                    priced: priced.clone(),
                    payout: PayoutSelection {
                        token: token.clone(),
                        chain: chain.clone(),
                    },
                }),
                _ => Err(QuoteError::InvalidInput(
                    "payout token and chain must both be chosen".to_string(),
                )),
            },
            (WizardInput::PresetTerm(days), stage) => {
                let term = LoanTerm::preset(&self.catalog, days)?;
                self.with_term(stage, term)
            }
            (WizardInput::CustomTerm(raw), stage) => {
                let term = LoanTerm::parse_custom(&self.catalog, &raw)?;
                self.with_term(stage, term)
            }
            (input, _) => Err(QuoteError::StepClosed {
                current,
                step: input.step(),
            }),
        }
    }

    fn with_shares(&self, stage: &Stage, shares: f64) -> Result<Stage> {
        let default_days = self.catalog.default_term_days;
        match stage {
            Stage::Collateral => Err(QuoteError::StepLocked {
                current: stage.step(),
                required: WizardStep::Quantity,
            }),
            Stage::Quantity { collateral } => {
                let priced =
                    Priced::compute(&self.calculator, collateral.clone(), shares, default_days)?;
                Ok(Stage::Payout {
                    priced,
                    token: self.catalog.default_token().map(|t| t.id.clone()),
                    chain: self.catalog.default_chain().map(|c| c.id.clone()),
                })
            }
            Stage::Payout { priced, .. }
            | Stage::Term { priced, .. }
            | Stage::Summary { priced, .. } => {
                let next = Priced::compute(
                    &self.calculator,
                    priced.collateral.clone(),
                    shares,
                    stage.pricing_term_days(default_days),
                )?;
                Ok(stage.clone().with_priced(next))
            }
        }
    }

    fn with_term(&self, stage: &Stage, term: LoanTerm) -> Result<Stage> {
        match stage {
            Stage::Term { priced, payout } | Stage::Summary { priced, payout, .. } => {
                let next = Priced::compute(
                    &self.calculator,
                    priced.collateral.clone(),
                    priced.shares,
                    term.days(),
                )?;
                Ok(Stage::Summary {
                    priced: next,
                    payout: payout.clone(),
                    term,
                })
            }
            _ => Err(QuoteError::StepLocked {
                current: stage.step(),
                required: WizardStep::Term,
            }),
        }
    }

    fn repriced_stage(&self, reference_price: f64) -> Result<Stage> {
        let collateral = self.current_collateral()?.repriced(reference_price)?;
        match self.stage.priced() {
            None => Ok(Stage::Quantity { collateral }),
            Some(priced) => {
                let days = self
                    .stage
                    .pricing_term_days(self.catalog.default_term_days);
                let next = Priced::compute(&self.calculator, collateral, priced.shares, days)?;
                Ok(self.stage.clone().with_priced(next))
            }
        }
    }
}

/// Replaces the token and/or chain wherever the stage holds them.
fn with_payout(stage: &Stage, token: Option<String>, chain: Option<String>) -> Stage {
    match stage.clone() {
        Stage::Payout {
            priced,
            token: old_token,
            chain: old_chain,
        } => Stage::Payout {
            priced,
            token: token.or(old_token),
            chain: chain.or(old_chain),
        },
        Stage::Term { priced, payout } => Stage::Term {
            priced,
            payout: merge_payout(payout, token, chain),
        },
        Stage::Summary {
            priced,
            payout,
            term,
        } => Stage::Summary {
            priced,
            payout: merge_payout(payout, token, chain),
            term,
        },
        other => other,
    }
}

fn merge_payout(
    payout: PayoutSelection,
    token: Option<String>,
    chain: Option<String>,
) -> PayoutSelection {
    PayoutSelection {
        token: token.unwrap_or(payout.token),
        chain: chain.unwrap_or(payout.chain),
    }
}
