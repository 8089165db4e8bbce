// Integration tests for the case wizard engine
// These tests exercise the public surface end to end: navigation, credit
// gating, draft persistence and retry working together.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use case_wizard::retry::{with_retry, RetryOptions};
use case_wizard::stepper::{
    clear_progress, load_progress, save_progress, MemoryStore, Stepper, StoredProgress,
};
use case_wizard::wizard::draft::DraftStore;
use case_wizard::wizard::manager::DraftManager;
use case_wizard::{
    AnalysisDriver, CancellationToken, CaseDraft, CreditLedger, CreditOp, CreditPrompt,
    NavigationResult, RemoteError, WizardEvent, WizardFlow, WizardStep,
};

struct FixedLedger {
    remaining: u32,
}

impl CreditLedger for FixedLedger {
    fn remaining(&self) -> u32 {
        self.remaining
    }
}

struct AlwaysConfirm;

impl CreditPrompt for AlwaysConfirm {
    fn confirm(&self, _op: CreditOp, _label: &str, _cost: u32) -> bool {
        true
    }
}

#[derive(Clone, Default)]
struct CountingDriver {
    starts: Arc<Mutex<u32>>,
}

impl AnalysisDriver for CountingDriver {
    fn start(&self, _token: CancellationToken) {
        *self.starts.lock() += 1;
    }
}

#[derive(Default)]
struct InMemoryDraftStore {
    drafts: Mutex<Option<CaseDraft>>,
}

impl DraftStore for InMemoryDraftStore {
    fn load(&self, _user_id: &str) -> Result<Option<CaseDraft>, RemoteError> {
        Ok(self.drafts.lock().clone())
    }

    fn save(&self, _user_id: &str, draft: &CaseDraft) -> Result<(), RemoteError> {
        *self.drafts.lock() = Some(draft.clone());
        Ok(())
    }

    fn remove(&self, _user_id: &str) -> Result<(), RemoteError> {
        *self.drafts.lock() = None;
        Ok(())
    }
}

fn flow_with_credits(remaining: u32) -> (WizardFlow, CountingDriver) {
    let driver = CountingDriver::default();
    let flow = WizardFlow::new(
        Box::new(FixedLedger { remaining }),
        Box::new(AlwaysConfirm),
        Box::new(driver.clone()),
    );
    (flow, driver)
}

#[test]
fn test_full_case_creation_path() {
    let (mut flow, driver) = flow_with_credits(10);
    let (events, _) = flow.events().subscribe();

    // Photo -> preferences through the credit gate
    assert_eq!(
        flow.go_to_preferences(),
        NavigationResult::Moved(WizardStep::Preferences)
    );

    // Preferences continue kicks off analysis without a step change
    assert!(flow.handle_preferences_continue());
    assert_eq!(*driver.starts.lock(), 1);
    assert_eq!(flow.step(), WizardStep::Preferences);

    // The controller advances through processing once analysis completes
    flow.set_step(WizardStep::Processing);
    flow.analysis_finished(Ok(()));
    flow.set_step(WizardStep::Simulation);
    flow.set_step(WizardStep::Review);

    // Submission is terminal
    assert_eq!(
        flow.set_step(WizardStep::Submission),
        NavigationResult::Completed
    );
    assert!(matches!(
        flow.go_to_step(1),
        NavigationResult::Blocked { .. }
    ));

    // The bus saw the whole journey
    let mut saw_completed = false;
    while let Ok(event) = events.try_recv() {
        if matches!(event, WizardEvent::WizardCompleted) {
            saw_completed = true;
        }
    }
    assert!(saw_completed);
}

#[test]
fn test_quick_case_path() {
    let (mut flow, driver) = flow_with_credits(10);

    assert_eq!(
        flow.go_to_quick_case(),
        NavigationResult::Moved(WizardStep::Processing)
    );
    assert!(flow.state().is_quick_case());
    assert_eq!(*driver.starts.lock(), 1);

    // Hidden steps stay unreachable for the whole session
    flow.analysis_finished(Ok(()));
    flow.set_step(WizardStep::Review);
    assert!(matches!(
        flow.go_to_step(2),
        NavigationResult::Blocked { .. }
    ));
    assert!(matches!(
        flow.go_to_step(4),
        NavigationResult::Blocked { .. }
    ));

    // Back from review lands on processing in quick case
    assert_eq!(
        flow.handle_back(),
        NavigationResult::Moved(WizardStep::Processing)
    );
}

#[test]
fn test_credit_denial_is_the_only_loud_failure() {
    let (mut flow, _) = flow_with_credits(0);
    let (events, _) = flow.events().subscribe();

    let result = flow.go_to_preferences();
    assert_eq!(
        result,
        NavigationResult::Denied {
            required: 3,
            remaining: 0
        }
    );
    assert_eq!(flow.step(), WizardStep::Photo);

    assert!(matches!(
        events.try_recv().unwrap(),
        WizardEvent::CreditsDenied { .. }
    ));
}

#[test]
fn test_draft_survives_manager_teardown() {
    let store = Arc::new(InMemoryDraftStore::default());

    // First session: a save is still pending when the manager is dropped
    {
        let manager = DraftManager::with_options(
            Arc::clone(&store) as Arc<dyn DraftStore>,
            "clinician-7",
            Duration::from_secs(30),
            7,
        );
        let mut draft = CaseDraft::new(2);
        draft.photos.push(case_wizard::wizard::draft::PhotoRef {
            id: "upload-9".to_string(),
            url: None,
        });
        manager.save_draft(draft);
    }

    // Second session resumes from the flushed draft
    let manager = DraftManager::with_options(
        Arc::clone(&store) as Arc<dyn DraftStore>,
        "clinician-7",
        Duration::from_millis(50),
        7,
    );
    let resumed = manager.load_draft().expect("draft should have been flushed");
    assert_eq!(resumed.step, 2);
    assert_eq!(resumed.photos.len(), 1);
}

#[test]
fn test_debounced_saves_coalesce_across_the_manager() {
    let store = Arc::new(InMemoryDraftStore::default());
    let manager = DraftManager::with_options(
        Arc::clone(&store) as Arc<dyn DraftStore>,
        "clinician-7",
        Duration::from_millis(40),
        7,
    );

    for step in 1..=4 {
        manager.save_draft(CaseDraft::new(step));
    }
    std::thread::sleep(Duration::from_millis(200));

    let stored = store.drafts.lock().clone().unwrap();
    assert_eq!(stored.step, 4);
    assert!(!manager.is_saving());
}

#[test]
fn test_generic_stepper_resume_round_trip() {
    let store = MemoryStore::new();
    let mut stepper = Stepper::new(4);

    stepper.next();
    stepper.next();
    save_progress(&store, "onboarding", stepper.step(), Some("notes".to_string()));

    // A new session offers resumption from the stored record
    let resumed: StoredProgress<String> = load_progress(&store, "onboarding", 7).unwrap();
    let mut fresh = Stepper::new(4);
    fresh.set_step(resumed.step);
    assert_eq!(fresh.step(), 3);
    assert_eq!(resumed.data.as_deref(), Some("notes"));

    // Completion clears the record
    clear_progress(&store, "onboarding");
    let gone: Option<StoredProgress<String>> = load_progress(&store, "onboarding", 7);
    assert!(gone.is_none());
}

#[test]
fn test_analysis_operation_retries_transient_failures() {
    let options = RetryOptions {
        max_retries: 1,
        base_delay: Duration::from_millis(10),
    };

    let mut attempts = 0;
    let result = with_retry(&options, || {
        attempts += 1;
        if attempts == 1 {
            Err(RemoteError::Network("Failed to fetch".to_string()))
        } else {
            Ok("analysis complete")
        }
    });

    assert_eq!(result.unwrap(), "analysis complete");
    assert_eq!(attempts, 2);
}

#[test]
fn test_billing_rejection_fails_fast_into_the_flow() {
    let options = RetryOptions {
        max_retries: 3,
        base_delay: Duration::from_millis(10),
    };

    let mut attempts = 0;
    let result: Result<(), _> = with_retry(&options, || {
        attempts += 1;
        Err(RemoteError::InsufficientCredits {
            required: 3,
            remaining: 1,
        })
    });

    assert_eq!(attempts, 1);
    assert!(matches!(
        result,
        Err(RemoteError::InsufficientCredits { .. })
    ));
}
