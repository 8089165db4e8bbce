//! Wizard engine for dental case evaluation
//!
//! The logic behind the case-creation flow: a six-step wizard state machine
//! with quick-case branching and credit-gated transitions, resumable draft
//! persistence with debounced flush-on-dispose writes, and
//! classification-driven retry with exponential backoff for the remote
//! operations the wizard depends on.
//!
//! Rendering and the backend are external collaborators: the engine
//! consumes an abstract analysis operation, abstract persistence stores and
//! a credit-confirmation callback, and exposes its state plus an event bus
//! for the rendering layer to observe.

pub mod config;
pub mod credits;
pub mod error;
pub mod events;
pub mod retry;
pub mod stepper;
pub mod wizard;

// Re-export the primary surface
pub use config::EngineConfig;
pub use credits::{CreditLedger, CreditOp, CreditPrompt};
pub use error::{AppResult, ConfigError, RemoteError, StoreError};
pub use events::{EventBus, SubscriberId, WizardEvent};
pub use retry::{classify, with_retry, with_retry_observed, CancellationToken, RetryClass, RetryOptions};
pub use stepper::{NavOutcome, StepDirection, Stepper};
pub use wizard::{
    AnalysisDriver, CaseDraft, DraftManager, DraftStore, NavigationResult, WizardFlow, WizardState,
    WizardStep,
};
