/// Wizard step definitions
///
/// Defines the six steps of the case-creation flow and the routing rules
/// around them: which steps quick-case mode hides, where the internal
/// processing step redirects direct jumps, and what "back" means from each
/// step in each mode.

/// Case-creation wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Intraoral photo capture and upload
    Photo,

    /// Treatment preferences (smile style, priorities)
    Preferences,

    /// Automated analysis in progress; internal step with no user-facing form
    Processing,

    /// Digital smile design simulation
    Simulation,

    /// Review of detected teeth and recommended treatments
    Review,

    /// Final confirmation and submission
    Submission,
}

impl WizardStep {
    /// Get step title
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Photo => "Patient Photo",
            WizardStep::Preferences => "Treatment Preferences",
            WizardStep::Processing => "Analyzing",
            WizardStep::Simulation => "Smile Simulation",
            WizardStep::Review => "Review Results",
            WizardStep::Submission => "Confirm & Submit",
        }
    }

    /// Get step description
    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Photo => "Upload an intraoral photo of the patient",
            WizardStep::Preferences => "Choose the smile style and treatment priorities",
            WizardStep::Processing => "Automated analysis of the uploaded photo",
            WizardStep::Simulation => "Preview the digital smile design",
            WizardStep::Review => "Review detected teeth and recommended treatments",
            WizardStep::Submission => "Confirm the evaluation and submit the case",
        }
    }

    /// Get step number (1-indexed)
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Photo => 1,
            WizardStep::Preferences => 2,
            WizardStep::Processing => 3,
            WizardStep::Simulation => 4,
            WizardStep::Review => 5,
            WizardStep::Submission => 6,
        }
    }

    /// Look a step up by its number
    pub fn from_number(number: u8) -> Option<WizardStep> {
        match number {
            1 => Some(WizardStep::Photo),
            2 => Some(WizardStep::Preferences),
            3 => Some(WizardStep::Processing),
            4 => Some(WizardStep::Simulation),
            5 => Some(WizardStep::Review),
            6 => Some(WizardStep::Submission),
            _ => None,
        }
    }

    /// Get total number of steps
    pub fn total_steps() -> u8 {
        6
    }

    /// Check if this is the first step
    pub fn is_first(&self) -> bool {
        matches!(self, WizardStep::Photo)
    }

    /// Check if this is the terminal step; it accepts no further navigation
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Submission)
    }

    /// Steps hidden entirely in quick-case mode
    pub fn is_skipped_in_quick_case(&self) -> bool {
        matches!(self, WizardStep::Preferences | WizardStep::Simulation)
    }

    /// Where a direct jump onto this step lands instead, if anywhere.
    ///
    /// Processing has no user-facing form, so jumps onto it are redirected
    /// to the step before it: preferences in normal mode, photo in quick
    /// case.
    pub fn jump_redirect(&self, quick_case: bool) -> Option<WizardStep> {
        match self {
            WizardStep::Processing => {
                if quick_case {
                    Some(WizardStep::Photo)
                } else {
                    Some(WizardStep::Preferences)
                }
            }
            _ => None,
        }
    }

    /// The step "back" leads to, `None` on the boundary steps.
    ///
    /// Back from the photo step leaves the wizard and back from submission
    /// is a no-op; both are the flow's call, not the step graph's.
    pub fn back_target(&self, quick_case: bool) -> Option<WizardStep> {
        match self {
            WizardStep::Photo => None,
            WizardStep::Preferences => Some(WizardStep::Photo),
            WizardStep::Processing => {
                if quick_case {
                    Some(WizardStep::Photo)
                } else {
                    Some(WizardStep::Preferences)
                }
            }
            WizardStep::Simulation => Some(WizardStep::Preferences),
            WizardStep::Review => {
                if quick_case {
                    Some(WizardStep::Processing)
                } else {
                    Some(WizardStep::Simulation)
                }
            }
            WizardStep::Submission => None,
        }
    }

    /// All steps in order
    pub fn all_steps() -> Vec<WizardStep> {
        vec![
            WizardStep::Photo,
            WizardStep::Preferences,
            WizardStep::Processing,
            WizardStep::Simulation,
            WizardStep::Review,
            WizardStep::Submission,
        ]
    }

    /// Steps visible to the user in the given mode, in order
    pub fn visible_steps(quick_case: bool) -> Vec<WizardStep> {
        Self::all_steps()
            .into_iter()
            .filter(|step| !quick_case || !step.is_skipped_in_quick_case())
            .collect()
    }

    /// 1-indexed position of this step among the visible steps of the mode.
    /// `None` for a step the mode hides.
    pub fn position_in_mode(&self, quick_case: bool) -> Option<usize> {
        Self::visible_steps(quick_case)
            .iter()
            .position(|step| step == self)
            .map(|index| index + 1)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Photo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
