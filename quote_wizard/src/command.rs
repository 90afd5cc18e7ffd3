//! Line-oriented command parsing for the terminal front-end.
//!
//! A line is either a session command (`restart`, `connect`, ...), a keyword
//! input (`qty 20`, `chain arbitrum`, `custom 45`), or bare text that is
//! interpreted according to the current step.
//!
//! A keyword without its argument is bare text, so a ticker such as `NEXT`
//! typed at the symbol step is submitted as a symbol. Tickers that collide
//! with a session command need the keyword form, e.g. `symbol status`.
use quote_engine::WizardInput;
use quote_engine::WizardStep;
use quote_engine::catalog::Catalog;
use strum_macros::{Display, EnumIter, EnumString};

/// Session commands handled by the front-end itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SessionCommand {
    Restart,
    Connect,
    Disconnect,
    Create,
    Status,
    Refresh,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn describe(self) -> &'static str {
        match self {
            SessionCommand::Restart => "discard all inputs and start over",
            SessionCommand::Connect => "connect the (stub) wallet",
            SessionCommand::Disconnect => "disconnect the wallet",
            SessionCommand::Create => "create the loan from the summary",
            SessionCommand::Status => "print the current state",
            SessionCommand::Refresh => "fetch the reference price again",
            SessionCommand::Help => "show this help",
            SessionCommand::Quit => "leave the wizard",
        }
    }
}

/// Keywords that address a specific step's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
enum InputKeyword {
    Symbol,
    #[strum(serialize = "qty", serialize = "shares")]
    Qty,
    Token,
    Chain,
    #[strum(serialize = "continue", serialize = "next")]
    Continue,
    Term,
    Custom,
}

/// What a single line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Session(SessionCommand),
    Input(WizardInput),
    /// Nothing to submit at this step.
    Ignored,
}

/// Interprets `line` for the wizard currently at `step`.
pub fn parse_line(line: &str, step: WizardStep, catalog: &Catalog) -> Action {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    if rest.is_empty() {
        if let Ok(command) = head.parse::<SessionCommand>() {
            return Action::Session(command);
        }
    }

    if let Some(keyword) = keyword_input(head, rest, step) {
        let rest = rest.to_string();
        let input = match keyword {
            InputKeyword::Symbol => WizardInput::Symbol(rest),
            InputKeyword::Qty => WizardInput::ShareQuantity(rest),
            InputKeyword::Token => WizardInput::Token(rest),
            InputKeyword::Chain => WizardInput::Chain(rest),
            InputKeyword::Continue => WizardInput::ConfirmPayout,
            InputKeyword::Term => term_input(&rest, catalog),
            InputKeyword::Custom => WizardInput::CustomTerm(rest),
        };
        return Action::Input(input);
    }

    match step {
        WizardStep::Collateral => Action::Input(WizardInput::Symbol(trimmed.to_string())),
        WizardStep::Quantity => Action::Input(WizardInput::ShareQuantity(trimmed.to_string())),
        WizardStep::Payout if trimmed.is_empty() => Action::Input(WizardInput::ConfirmPayout),
        WizardStep::Payout => Action::Ignored,
        WizardStep::Term => Action::Input(term_input(trimmed, catalog)),
        WizardStep::Summary => Action::Ignored,
    }
}

/// Keyword that applies to this line, if any. Only `continue` stands alone,
/// and only once the payout step has been reached.
fn keyword_input(head: &str, rest: &str, step: WizardStep) -> Option<InputKeyword> {
    let keyword = head.parse::<InputKeyword>().ok()?;
    match keyword {
        InputKeyword::Continue if step >= WizardStep::Payout => Some(keyword),
        InputKeyword::Continue => None,
        _ if rest.is_empty() => None,
        _ => Some(keyword),
    }
}

/// A number matching a preset selects it; anything else is a custom term.
fn term_input(raw: &str, catalog: &Catalog) -> WizardInput {
    match raw.trim().parse::<u32>() {
        Ok(days) if catalog.preset_terms.contains(&days) => WizardInput::PresetTerm(days),
        _ => WizardInput::CustomTerm(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str, step: WizardStep) -> Action {
        parse_line(line, step, &Catalog::default())
    }

    #[test]
    fn session_commands_are_case_insensitive() {
        assert_eq!(parse("Restart", WizardStep::Term), Action::Session(SessionCommand::Restart));
        assert_eq!(parse(" QUIT ", WizardStep::Collateral), Action::Session(SessionCommand::Quit));
    }

    #[test]
    fn bare_text_follows_the_current_step() {
        assert_eq!(
            parse("aapl", WizardStep::Collateral),
            Action::Input(WizardInput::Symbol("aapl".into()))
        );
        assert_eq!(
            parse("50", WizardStep::Quantity),
            Action::Input(WizardInput::ShareQuantity("50".into()))
        );
        assert_eq!(parse("", WizardStep::Payout), Action::Input(WizardInput::ConfirmPayout));
        assert_eq!(parse("whatever", WizardStep::Summary), Action::Ignored);
    }

    #[test]
    fn term_numbers_pick_presets_or_custom() {
        assert_eq!(parse("30", WizardStep::Term), Action::Input(WizardInput::PresetTerm(30)));
        assert_eq!(
            parse("45", WizardStep::Term),
            Action::Input(WizardInput::CustomTerm("45".into()))
        );
        assert_eq!(
            parse("term 90", WizardStep::Summary),
            Action::Input(WizardInput::PresetTerm(90))
        );
    }

    #[test]
    fn keywords_address_earlier_steps() {
        assert_eq!(
            parse("qty 20", WizardStep::Summary),
            Action::Input(WizardInput::ShareQuantity("20".into()))
        );
        assert_eq!(
            parse("chain arbitrum", WizardStep::Payout),
            Action::Input(WizardInput::Chain("arbitrum".into()))
        );
        assert_eq!(parse("next", WizardStep::Payout), Action::Input(WizardInput::ConfirmPayout));
    }

    #[test]
    fn bare_keywords_are_tickers_at_the_symbol_step() {
        for ticker in ["NEXT", "continue", "TERM", "Custom", "qty"] {
            assert_eq!(
                parse(ticker, WizardStep::Collateral),
                Action::Input(WizardInput::Symbol(ticker.into()))
            );
        }
        assert_eq!(
            parse("next", WizardStep::Quantity),
            Action::Input(WizardInput::ShareQuantity("next".into()))
        );
        assert_eq!(
            parse("symbol STATUS", WizardStep::Collateral),
            Action::Input(WizardInput::Symbol("STATUS".into()))
        );
        assert_eq!(
            parse("status", WizardStep::Collateral),
            Action::Session(SessionCommand::Status)
        );
    }
}
