/// Wizard state management
///
/// Tracks the current step and the flags guarding transitions. Mutated only
/// through `WizardFlow`; the rendering layer reads it through accessors.
use super::steps::WizardStep;
use crate::stepper::StepDirection;

/// Wizard state
#[derive(Debug, Clone)]
pub struct WizardState {
    /// Current step
    step: WizardStep,

    /// Direction of the last step change, for transition animation
    direction: StepDirection,

    /// Quick-case mode: preferences and simulation are unreachable
    quick_case: bool,

    /// Furthest step number reached this session
    max_reached: u8,

    /// A transition (possibly waiting on a confirmation dialog) is in flight
    navigating: bool,

    /// A validation hook is running
    validating: bool,

    /// Last validation failure, cleared on success
    validation_error: Option<String>,

    /// Photo analysis is in flight
    analysis_loading: bool,

    /// Last analysis failure, cleared on retry/cancel
    analysis_error: Option<String>,
}

impl WizardState {
    /// Fresh state on the photo step
    pub fn new() -> Self {
        Self {
            step: WizardStep::Photo,
            direction: StepDirection::Forward,
            quick_case: false,
            max_reached: 1,
            navigating: false,
            validating: false,
            validation_error: None,
            analysis_loading: false,
            analysis_error: None,
        }
    }

    /// Current step
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Direction of the last step change
    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    /// Whether quick-case mode is active
    pub fn is_quick_case(&self) -> bool {
        self.quick_case
    }

    /// Furthest step number reached this session
    pub fn max_step_reached(&self) -> u8 {
        self.max_reached
    }

    /// Whether a transition or validation is in flight
    pub fn is_busy(&self) -> bool {
        self.navigating || self.validating
    }

    /// Whether a transition is in flight
    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Whether a validation hook is running
    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Last validation failure
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Whether photo analysis is in flight
    pub fn is_analysis_loading(&self) -> bool {
        self.analysis_loading
    }

    /// Last analysis failure
    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        self.direction = if step.number() > self.step.number() {
            StepDirection::Forward
        } else {
            StepDirection::Backward
        };
        self.step = step;
        self.max_reached = self.max_reached.max(step.number());
    }

    pub(crate) fn set_quick_case(&mut self, quick_case: bool) {
        self.quick_case = quick_case;
    }

    pub(crate) fn set_navigating(&mut self, navigating: bool) {
        self.navigating = navigating;
    }

    pub(crate) fn set_validating(&mut self, validating: bool) {
        self.validating = validating;
    }

    pub(crate) fn set_validation_error(&mut self, error: Option<String>) {
        self.validation_error = error;
    }

    pub(crate) fn set_analysis_loading(&mut self, loading: bool) {
        self.analysis_loading = loading;
    }

    pub(crate) fn set_analysis_error(&mut self, error: Option<String>) {
        self.analysis_error = error;
    }

    /// Clear both analysis flags, e.g. when navigating away from processing
    pub(crate) fn clear_analysis_flags(&mut self) {
        self.analysis_loading = false;
        self.analysis_error = None;
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
