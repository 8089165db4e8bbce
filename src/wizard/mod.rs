/// Dental case-creation wizard
///
/// The six-step flow a clinician walks through to create a case:
///
/// 1. **Photo** - Upload an intraoral photo
/// 2. **Preferences** - Choose smile style and treatment priorities
/// 3. **Processing** - Automated analysis (internal, no user-facing form)
/// 4. **Simulation** - Digital smile design preview
/// 5. **Review** - Review detected teeth and recommended treatments
/// 6. **Submission** - Confirm and submit (terminal)
///
/// ## Architecture
///
/// ```text
/// WizardFlow
///   ├── WizardState (step, direction, quick-case, guards)
///   ├── WizardStep (step graph, skip and redirect rules)
///   ├── injected collaborators (AnalysisDriver, CreditLedger, CreditPrompt)
///   └── DraftManager (debounced autosave over a remote DraftStore)
/// ```
///
/// Quick case is an orthogonal mode bit, not an extra state: it hides the
/// preferences and simulation steps and re-routes transitions around them.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut flow = WizardFlow::new(ledger, prompt, driver);
///
/// match flow.go_to_preferences() {
///     NavigationResult::Moved(step) => { /* render the new step */ }
///     NavigationResult::Denied { required, remaining } => {
///         // show the insufficient-credits notice
///     }
///     _ => {}
/// }
/// ```

pub mod draft;
pub mod flow;
pub mod manager;
pub mod state;
pub mod steps;

// Re-export commonly used types
pub use draft::{
    AnalysisFinding, AnalysisOutcome, CaseDraft, DraftStore, PhotoRef, SmilePreference,
    ToothTreatment, Treatment,
};
pub use flow::{AnalysisDriver, NavigationResult, WizardFlow};
pub use manager::{DraftManager, DEFAULT_DEBOUNCE};
pub use state::WizardState;
pub use steps::WizardStep;
