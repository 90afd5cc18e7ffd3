//! Rendering of wizard snapshots and events for the terminal.
use quote_engine::WizardSnapshot;
use quote_engine::catalog::Catalog;
use quote_engine::wizard::{LoanDraft, WizardEvent};
use quote_engine::{QuoteError, Result};
use strum::IntoEnumIterator;

use crate::args::OutputFormat;
use crate::command::SessionCommand;

/// Formats snapshots in the chosen output format.
pub struct Renderer {
    format: OutputFormat,
    catalog: Catalog,
}

impl Renderer {
    pub fn new(format: OutputFormat, catalog: Catalog) -> Self {
        Renderer { format, catalog }
    }

    /// Text for one observer event, `None` when nothing should be printed.
    pub fn event(&self, event: &WizardEvent) -> Result<Option<String>> {
        match event {
            WizardEvent::Updated(snapshot) => self.snapshot(snapshot).map(Some),
            WizardEvent::Rejected { step, reason } => {
                Ok(Some(format!("Cannot advance from step {}: {}", step.index(), reason)))
            }
            WizardEvent::Restarted => Ok(Some("Wizard restarted.".to_string())),
        }
    }

    pub fn snapshot(&self, snapshot: &WizardSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
            OutputFormat::Text => Ok(self.snapshot_text(snapshot)),
        }
    }

    pub fn loan(&self, draft: &LoanDraft) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(draft)?),
            OutputFormat::Text => Ok(format!(
                "Loan created: borrow {} {} against {} {} for {}",
                money(draft.quote.loan_amount),
                self.token_symbol(&draft.payout.token),
                draft.share_quantity,
                draft.symbol,
                draft.term
            )),
        }
    }

    fn snapshot_text(&self, snapshot: &WizardSnapshot) -> String {
        let mut lines = vec![format!(
            "[{}/5] {}",
            snapshot.step_index + 1,
            snapshot.step.title()
        )];

        if let (Some(symbol), Some(price)) = (&snapshot.symbol, snapshot.reference_price) {
            match snapshot.share_quantity {
                Some(shares) => lines.push(format!(
                    "  Collateral:       {} {} @ {}",
                    shares,
                    symbol,
                    money(price)
                )),
                None => lines.push(format!("  Collateral:       {} @ {}", symbol, money(price))),
            }
        }
        if let Some(quote) = &snapshot.quote {
            lines.push(format!("  Collateral value: {}", money(quote.collateral_value)));
            lines.push(format!("  Estimated loan:   {}", money(quote.loan_amount)));
            lines.push(format!(
                "  Protection ({} days): put premium {}, interest {}, fees {}, total {}",
                quote.term_days,
                money(quote.protection.put_premium),
                money(quote.protection.interest),
                money(quote.protection.fees),
                money(quote.protection_cost())
            ));
        }
        if let (Some(token), Some(chain)) = (&snapshot.token, &snapshot.chain) {
            lines.push(format!(
                "  Payout:           {} on {}",
                self.token_symbol(token),
                self.chain_name(chain)
            ));
        }
        if let Some(term) = &snapshot.term {
            lines.push(format!("  Term:             {}", term));
        }
        lines.join("\n")
    }

    fn token_symbol(&self, id: &str) -> String {
        self.catalog
            .token(id)
            .map(|entry| entry.symbol.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    fn chain_name(&self, id: &str) -> String {
        self.catalog
            .chain(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    pub fn help(&self) -> String {
        let presets: Vec<String> = self
            .catalog
            .preset_terms
            .iter()
            .map(|days| days.to_string())
            .collect();
        let tokens: Vec<&str> = self.catalog.tokens.iter().map(|t| t.id.as_str()).collect();
        let chains: Vec<&str> = self.catalog.chains.iter().map(|c| c.id.as_str()).collect();

        let mut lines = vec![
            "Inputs: symbol <SYM> | qty <N> | token <ID> | chain <ID> | continue | term <DAYS> | custom <DAYS>".to_string(),
            "  bare text answers the current step; use `symbol <SYM>` for a ticker named like a command".to_string(),
            format!("  tokens: {}", tokens.join(", ")),
            format!("  chains: {}", chains.join(", ")),
            format!("  preset terms: {}", presets.join(", ")),
            "Commands:".to_string(),
        ];
        for command in SessionCommand::iter() {
            lines.push(format!("  {:<11}{}", command.to_string(), command.describe()));
        }
        lines.join("\n")
    }
}

/// Two-decimal currency formatting; rounding is display-only.
fn money(value: f64) -> String {
    format!("${:.2}", value)
}

/// Short explanation for errors raised outside of `submit`.
pub fn error_line(err: &QuoteError) -> String {
    match err {
        QuoteError::WalletDisconnected => "Connect Wallet to Continue".to_string(),
        other => format!("Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_engine::{WizardConfig, WizardController, WizardInput};

    fn summary_snapshot() -> WizardSnapshot {
        let mut wizard = WizardController::from_config(&WizardConfig::default()).unwrap();
        wizard.submit(WizardInput::Symbol("AAPL".into())).unwrap();
        wizard.submit(WizardInput::ShareQuantity("50".into())).unwrap();
        wizard.submit(WizardInput::ConfirmPayout).unwrap();
        wizard.submit(WizardInput::PresetTerm(30)).unwrap()
    }

    #[test]
    fn text_summary_shows_rounded_figures() {
        let renderer = Renderer::new(OutputFormat::Text, Catalog::default());
        let text = renderer.snapshot(&summary_snapshot()).unwrap();
        assert!(text.starts_with("[5/5] Review loan"));
        assert!(text.contains("50 AAPL @ $100.00"));
        assert!(text.contains("Estimated loan:   $3500.00"));
        assert!(text.contains("interest $32.88"));
        assert!(text.contains("USDC on Mantle"));
        assert!(text.contains("30 days"));
    }

    #[test]
    fn json_snapshot_is_machine_readable() {
        let renderer = Renderer::new(OutputFormat::Json, Catalog::default());
        let json = renderer.snapshot(&summary_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["step_index"], 4);
        assert_eq!(value["term"]["kind"], "preset");
        assert_eq!(value["quote"]["loan_amount"], 3500.0);
    }

    #[test]
    fn help_lists_every_session_command() {
        let renderer = Renderer::new(OutputFormat::Text, Catalog::default());
        let help = renderer.help();
        for command in SessionCommand::iter() {
            assert!(help.contains(&command.to_string()));
        }
        assert!(help.contains("symbol <SYM>` for a ticker"));
    }
}
