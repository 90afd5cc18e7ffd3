//! Quote Wizard — an interactive terminal front-end for the loan quote engine.
//! It walks the user through picking a collateral symbol, a share quantity, a
//! payout token/chain and a loan term, printing the derived quote after every
//! accepted input.
//!
//! Usage example (CLI):
//! ```bash
//! quote_wizard --config ./wizard.json --wallet-connected --output text
//! ```
//!
//! Snapshots are printed from the wizard's event stream, so every accepted or
//! rejected input is reported exactly once. Diagnostics go through `log`.
#![warn(missing_docs)]
mod args;
mod command;
mod render;

use crate::args::Args;
use crate::command::{Action, SessionCommand, parse_line};
use crate::render::{Renderer, error_line};
use clap::Parser;
use crossbeam_channel::Receiver;
use log::{debug, info};
use quote_engine::Result;
use quote_engine::wizard::WizardEvent;
use quote_engine::{QuoteError, WizardConfig, WizardController};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            WizardConfig::from_file(path)?
        }
        None => WizardConfig::default(),
    };
    if let Some(price) = args.stub_price {
        config.stub_price = price;
        config.validate()?;
    }
    debug!("Configuration: {:?}", config);

    let mut wizard = WizardController::from_config(&config)?;
    let events = wizard.subscribe();
    let renderer = Renderer::new(args.output, config.catalog.clone());
    let mut wallet_connected = args.wallet_connected;

    println!("{}", renderer.help());
    println!("{}", renderer.snapshot(&wizard.snapshot())?);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let action = parse_line(&line, wizard.step(), wizard.catalog());
        debug!("Parsed {:?}", action);

        match action {
            Action::Input(input) => keep_session(wizard.submit(input))?,
            Action::Ignored => println!("Nothing to enter here, type `help` for commands."),
            Action::Session(SessionCommand::Quit) => break,
            Action::Session(SessionCommand::Help) => println!("{}", renderer.help()),
            Action::Session(SessionCommand::Status) => {
                println!("{}", renderer.snapshot(&wizard.snapshot())?)
            }
            Action::Session(SessionCommand::Restart) => {
                wizard.restart();
            }
            Action::Session(SessionCommand::Refresh) => keep_session(wizard.refresh_price())?,
            Action::Session(SessionCommand::Connect) => {
                wallet_connected = true;
                info!("Wallet connected");
            }
            Action::Session(SessionCommand::Disconnect) => {
                wallet_connected = false;
                info!("Wallet disconnected");
            }
            Action::Session(SessionCommand::Create) => match wizard.create_loan(&wallet_connected) {
                Ok(draft) => println!("{}", renderer.loan(&draft)?),
                Err(e) => println!("{}", error_line(&e)),
            },
        }

        drain_events(&events, &renderer)?;
        print_prompt(&wizard, wallet_connected)?;
    }

    info!("Wizard session finished");
    Ok(())
}

/// Rejections are reported through the event stream; only failures that
/// leave the session unusable end the loop.
fn keep_session<T>(outcome: Result<T, QuoteError>) -> Result<(), QuoteError> {
    match outcome {
        Err(e) if !e.is_recoverable() => Err(e),
        Err(e) => {
            debug!("Submission rejected: {}", e);
            Ok(())
        }
        Ok(_) => Ok(()),
    }
}

/// Prints every pending event from the wizard.
fn drain_events(events: &Receiver<WizardEvent>, renderer: &Renderer) -> Result<(), QuoteError> {
    for event in events.try_iter() {
        if let Some(text) = renderer.event(&event)? {
            println!("{}", text);
        }
    }
    Ok(())
}

fn print_prompt(wizard: &WizardController, wallet_connected: bool) -> Result<(), QuoteError> {
    let mut stdout = io::stdout();
    if wizard.can_create_loan(&wallet_connected) {
        write!(stdout, "(create) > ")?;
    } else {
        write!(stdout, "{} > ", wizard.step().title())?;
    }
    stdout.flush()?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
