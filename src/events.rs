/// Wizard event surface
///
/// Events describe things that have happened (past tense). The flow
/// publishes them; the rendering layer subscribes and reacts. Publishing
/// never blocks: slow or dropped subscribers miss events rather than stall
/// a transition.
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::stepper::StepDirection;

/// Events emitted by the wizard flow
#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// The current step changed
    StepChanged {
        from: u8,
        to: u8,
        direction: StepDirection,
    },

    /// A credit-gated transition was denied for lack of balance.
    /// The one user-visible failure: render a notification for this.
    CreditsDenied { required: u32, remaining: u32 },

    /// Quick-case mode was entered
    QuickCaseEntered,

    /// Photo analysis was started
    AnalysisStarted,

    /// Photo analysis reported a failure
    AnalysisFailed { message: String },

    /// Photo analysis was cancelled by the user
    AnalysisCancelled,

    /// Step validation rejected the current step
    ValidationFailed { message: String },

    /// A draft was persisted
    DraftSaved { step: u8 },

    /// A stored draft was restored into the wizard
    DraftRestored { step: u8 },

    /// The stored draft was deleted
    DraftCleared,

    /// Back was pressed on the first step; the host should leave the wizard
    ExitRequested,

    /// The terminal step was reached
    WizardCompleted,
}

impl WizardEvent {
    /// Human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            WizardEvent::StepChanged { from, to, .. } => {
                format!("Step changed: {} -> {}", from, to)
            }
            WizardEvent::CreditsDenied {
                required,
                remaining,
            } => format!(
                "Not enough credits: {} required, {} remaining",
                required, remaining
            ),
            WizardEvent::QuickCaseEntered => "Quick case started".to_string(),
            WizardEvent::AnalysisStarted => "Analysis started".to_string(),
            WizardEvent::AnalysisFailed { message } => format!("Analysis failed: {}", message),
            WizardEvent::AnalysisCancelled => "Analysis cancelled".to_string(),
            WizardEvent::ValidationFailed { message } => {
                format!("Validation failed: {}", message)
            }
            WizardEvent::DraftSaved { step } => format!("Draft saved at step {}", step),
            WizardEvent::DraftRestored { step } => format!("Draft restored at step {}", step),
            WizardEvent::DraftCleared => "Draft cleared".to_string(),
            WizardEvent::ExitRequested => "Exit requested".to_string(),
            WizardEvent::WizardCompleted => "Wizard completed".to_string(),
        }
    }
}

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<WizardEvent>,
}

/// Fan-out bus broadcasting wizard events to all subscribers
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<WizardEvent>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers.write().push(Subscriber { id, sender: tx });

        (rx, id)
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers (non-blocking)
    pub fn publish(&self, event: WizardEvent) {
        let subscribers = self.subscribers.read();

        for subscriber in subscribers.iter() {
            // A closed subscriber channel is fine, the receiver is gone
            let _ = subscriber.sender.try_send(event.clone());
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
