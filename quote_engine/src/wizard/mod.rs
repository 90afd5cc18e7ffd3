//! Loan quote wizard state machine.
//!
//! - `step` — named steps and their order.
//! - `input` — submit events coming from the front-end.
//! - `snapshot` — read-only state views, loan drafts and observer events.
//! - `controller` — `WizardController`, which gates the steps and re-derives the quote.
mod controller;
mod input;
mod snapshot;
mod stage;
mod step;

pub use controller::{WalletStatus, WizardController};
pub use input::WizardInput;
pub use snapshot::{LoanDraft, PayoutSelection, WizardEvent, WizardSnapshot};
pub use step::WizardStep;
