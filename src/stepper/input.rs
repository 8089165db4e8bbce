/// Abstract keyboard surface for the stepper
///
/// The engine never touches OS or DOM listeners; the host translates its
/// input events into `NavKey` values and forwards them together with an
/// `InputContext` describing where focus currently sits.
use serde::{Deserialize, Serialize};

/// Navigation keys the stepper understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavKey {
    /// Go back one step
    ArrowLeft,

    /// Advance one step
    ArrowRight,

    /// Advance one step (confirm)
    Enter,
}

impl NavKey {
    /// Human-readable description of the bound action
    pub fn description(&self) -> &'static str {
        match self {
            NavKey::ArrowLeft => "Go to previous step",
            NavKey::ArrowRight => "Go to next step",
            NavKey::Enter => "Confirm and go to next step",
        }
    }
}

/// Focus context accompanying a key press.
///
/// When focus is inside a text input, textarea or select, navigation keys
/// must reach the field instead of the stepper.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    /// An editable field currently has focus
    pub editable_focus: bool,
}

impl InputContext {
    /// Context with an editable field focused
    pub fn editing() -> Self {
        Self {
            editable_focus: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_descriptions() {
        assert_eq!(NavKey::ArrowLeft.description(), "Go to previous step");
        assert_eq!(
            NavKey::Enter.description(),
            "Confirm and go to next step"
        );
    }

    #[test]
    fn test_default_context_is_not_editing() {
        assert!(!InputContext::default().editable_focus);
        assert!(InputContext::editing().editable_focus);
    }
}
