/// Wizard flow management
///
/// Drives navigation through the case-creation steps. The flow owns no I/O:
/// analysis, credit checks and confirmation dialogs are injected
/// collaborators, persistence runs through an optional autosave hook, and
/// every observable change is published on the event bus.
///
/// Illegal transitions are silent no-ops; the one user-visible failure is
/// the insufficient-credit denial.
use super::draft::SmilePreference;
use super::state::WizardState;
use super::steps::WizardStep;
use crate::credits::{CreditLedger, CreditOp, CreditPrompt};
use crate::events::{EventBus, WizardEvent};
use crate::retry::CancellationToken;

/// Starts the photo-analysis operation.
///
/// Fire-and-forget from the flow's perspective: implementations run the
/// operation elsewhere (worker thread, async task), poll the token for
/// cancellation, and report the outcome back through
/// `WizardFlow::analysis_finished`.
pub trait AnalysisDriver {
    fn start(&self, token: CancellationToken);
}

/// Per-step validation hook; `Err` carries the user-facing message
pub type Validator = Box<dyn Fn(WizardStep) -> Result<(), String>>;

/// Persistence hook invoked with the new step number after each transition
pub type AutosaveHook = Box<dyn Fn(u8)>;

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// Navigation succeeded, now on the new step
    Moved(WizardStep),

    /// The terminal step was entered
    Completed,

    /// Back was pressed on the first step; the host should leave the wizard
    Exited,

    /// Navigation rejected, state unchanged
    Blocked { reason: String },

    /// A credit-gated transition was denied for lack of balance
    Denied { required: u32, remaining: u32 },
}

/// Wizard flow manager
pub struct WizardFlow {
    state: WizardState,
    ledger: Box<dyn CreditLedger>,
    prompt: Box<dyn CreditPrompt>,
    driver: Box<dyn AnalysisDriver>,
    validator: Option<Validator>,
    autosave: Option<AutosaveHook>,
    events: EventBus,
    analysis_token: Option<CancellationToken>,
    preference: SmilePreference,
    free_jump: bool,
}

impl WizardFlow {
    /// Create a flow with the required collaborators
    pub fn new(
        ledger: Box<dyn CreditLedger>,
        prompt: Box<dyn CreditPrompt>,
        driver: Box<dyn AnalysisDriver>,
    ) -> Self {
        Self {
            state: WizardState::new(),
            ledger,
            prompt,
            driver,
            validator: None,
            autosave: None,
            events: EventBus::new(),
            analysis_token: None,
            preference: SmilePreference::default(),
            free_jump: false,
        }
    }

    /// Install a per-step validation hook
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Install a persistence hook run after every step change
    pub fn with_autosave(mut self, autosave: AutosaveHook) -> Self {
        self.autosave = Some(autosave);
        self
    }

    /// Allow forward jumps past the high-water mark
    pub fn with_free_jump(mut self) -> Self {
        self.free_jump = true;
        self
    }

    /// Read access to the wizard state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current step
    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    /// Event bus for the rendering layer to subscribe on
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Currently selected smile preference
    pub fn preference(&self) -> SmilePreference {
        self.preference
    }

    /// Set the smile preference (preferences step)
    pub fn set_preference(&mut self, preference: SmilePreference) {
        self.preference = preference;
    }

    /// Attempt a direct jump to a step number.
    ///
    /// Rejects unknown targets, forward jumps past the high-water mark and
    /// steps hidden by quick-case mode; jumps onto the internal processing
    /// step are redirected. The terminal step accepts no navigation.
    pub fn go_to_step(&mut self, target: u8) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        if self.state.step().is_terminal() {
            return NavigationResult::Blocked {
                reason: "case already submitted".to_string(),
            };
        }

        let Some(requested) = WizardStep::from_number(target) else {
            return NavigationResult::Blocked {
                reason: format!("step {} out of range", target),
            };
        };

        // Quick case has fewer visible steps; stale UI must not jump into a
        // hidden one
        if self.state.is_quick_case() && requested.is_skipped_in_quick_case() {
            return NavigationResult::Blocked {
                reason: format!("{} is hidden in quick case", requested),
            };
        }

        let step = requested
            .jump_redirect(self.state.is_quick_case())
            .unwrap_or(requested);

        if step.number() > self.state.max_step_reached() && !self.free_jump {
            return NavigationResult::Blocked {
                reason: format!("{} not reached yet", step),
            };
        }

        self.apply_step(step)
    }

    /// Unconditionally set the current step, bypassing legality checks.
    ///
    /// For flow controllers that already know the target is legal, e.g.
    /// advancing to review once analysis completes.
    pub fn set_step(&mut self, step: WizardStep) -> NavigationResult {
        self.apply_step(step)
    }

    /// Credit-gated transition from the photo step to preferences.
    ///
    /// Checks the combined cost of analysis and simulation against the
    /// remaining balance, then asks for explicit confirmation. Any denial
    /// leaves the state unchanged; insufficient balance additionally
    /// publishes the one user-visible failure.
    pub fn go_to_preferences(&mut self) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        if self.state.step() != WizardStep::Photo {
            return NavigationResult::Blocked {
                reason: "preferences are entered from the photo step".to_string(),
            };
        }

        let required = self.ledger.cost_of(CreditOp::CaseAnalysis)
            + self.ledger.cost_of(CreditOp::DsdSimulation);
        let remaining = self.ledger.remaining();

        if remaining < required {
            log::info!(
                "[wizard] credit gate denied: {} required, {} remaining",
                required,
                remaining
            );
            self.events.publish(WizardEvent::CreditsDenied {
                required,
                remaining,
            });
            return NavigationResult::Denied {
                required,
                remaining,
            };
        }

        // Guard against re-entrant transitions while the dialog is open
        self.state.set_navigating(true);
        let accepted = self.prompt.confirm(
            CreditOp::CaseAnalysis,
            "Case analysis and smile simulation",
            required,
        );
        self.state.set_navigating(false);

        if !accepted {
            return NavigationResult::Blocked {
                reason: "confirmation declined".to_string(),
            };
        }

        self.apply_step(WizardStep::Preferences)
    }

    /// Enter quick-case mode: default preference, straight to analysis.
    pub fn go_to_quick_case(&mut self) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        if self.state.step() != WizardStep::Photo {
            return NavigationResult::Blocked {
                reason: "quick case starts from the photo step".to_string(),
            };
        }

        self.state.set_quick_case(true);
        self.preference = SmilePreference::default();
        self.events.publish(WizardEvent::QuickCaseEntered);

        let result = self.apply_step(WizardStep::Processing);
        self.start_analysis();
        result
    }

    /// Trigger analysis from the preferences step.
    ///
    /// No step change here; the embedding controller advances once the
    /// driver reports completion. Returns whether analysis was started.
    pub fn handle_preferences_continue(&mut self) -> bool {
        if self.state.step() != WizardStep::Preferences || self.state.is_analysis_loading() {
            return false;
        }

        self.start_analysis();
        true
    }

    /// Context-sensitive backward transition
    pub fn handle_back(&mut self) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        let current = self.state.step();

        if current.is_first() {
            self.events.publish(WizardEvent::ExitRequested);
            return NavigationResult::Exited;
        }

        if current.is_terminal() {
            return NavigationResult::Blocked {
                reason: "case already submitted".to_string(),
            };
        }

        let quick_case = self.state.is_quick_case();
        let Some(target) = current.back_target(quick_case) else {
            return NavigationResult::Blocked {
                reason: format!("cannot go back from {}", current),
            };
        };

        if current == WizardStep::Processing {
            // Leaving the processing screen abandons the in-flight analysis
            self.state.clear_analysis_flags();
            if quick_case {
                self.state.set_quick_case(false);
            }
        }

        self.apply_step(target)
    }

    /// Clear the analysis error and run analysis again; no step change
    pub fn handle_retry_analysis(&mut self) {
        if self.state.is_analysis_loading() {
            return;
        }

        self.state.set_analysis_error(None);
        self.start_analysis();
    }

    /// Escape hatch: stop waiting for analysis and force the review step.
    pub fn handle_skip_to_review(&mut self) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        if self.state.step().is_terminal() {
            return NavigationResult::Blocked {
                reason: "case already submitted".to_string(),
            };
        }

        self.state.clear_analysis_flags();
        self.apply_step(WizardStep::Review)
    }

    /// Cancel the in-flight analysis and leave the processing step.
    ///
    /// Cancellation is cooperative: the token is tripped, the driver is
    /// expected to notice; nothing is force-aborted.
    pub fn cancel_analysis(&mut self) -> NavigationResult {
        if self.state.is_busy() {
            return NavigationResult::Blocked {
                reason: "transition in flight".to_string(),
            };
        }

        if let Some(token) = &self.analysis_token {
            token.cancel();
        }
        self.state.clear_analysis_flags();
        self.events.publish(WizardEvent::AnalysisCancelled);

        if self.state.is_quick_case() {
            self.state.set_quick_case(false);
            self.apply_step(WizardStep::Photo)
        } else {
            self.apply_step(WizardStep::Preferences)
        }
    }

    /// Driver-side completion report for the analysis operation
    pub fn analysis_finished(&mut self, result: Result<(), String>) {
        self.state.set_analysis_loading(false);

        match result {
            Ok(()) => self.state.set_analysis_error(None),
            Err(message) => {
                log::warn!("[wizard] analysis failed: {}", message);
                self.state.set_analysis_error(Some(message.clone()));
                self.events.publish(WizardEvent::AnalysisFailed { message });
            }
        }
    }

    /// Run the injected validator for the current step.
    ///
    /// The `validating` guard is reset on every path; failures land in
    /// `validation_error` and on the bus, they are never thrown.
    pub fn validate_current_step(&mut self) -> bool {
        let Some(validator) = &self.validator else {
            return true;
        };

        self.state.set_validating(true);
        let result = validator(self.state.step());
        self.state.set_validating(false);

        match result {
            Ok(()) => {
                self.state.set_validation_error(None);
                true
            }
            Err(message) => {
                self.state.set_validation_error(Some(message.clone()));
                self.events
                    .publish(WizardEvent::ValidationFailed { message });
                false
            }
        }
    }

    fn start_analysis(&mut self) {
        let token = CancellationToken::new();
        self.analysis_token = Some(token.clone());
        self.state.set_analysis_error(None);
        self.state.set_analysis_loading(true);
        self.events.publish(WizardEvent::AnalysisStarted);
        self.driver.start(token);
    }

    fn apply_step(&mut self, target: WizardStep) -> NavigationResult {
        let from = self.state.step();
        self.state.set_step(target);

        self.events.publish(WizardEvent::StepChanged {
            from: from.number(),
            to: target.number(),
            direction: self.state.direction(),
        });

        if let Some(autosave) = &self.autosave {
            autosave(target.number());
        }

        if target.is_terminal() {
            self.events.publish(WizardEvent::WizardCompleted);
            NavigationResult::Completed
        } else {
            NavigationResult::Moved(target)
        }
    }
}
