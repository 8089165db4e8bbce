/// Case draft payload
///
/// The resumable snapshot of an in-progress case: uploaded photos, the
/// chosen smile preference, analysis results and per-tooth treatment
/// selections. Persistence is remote; the crate only defines the record and
/// the `DraftStore` collaborator it is saved through.
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::stepper::progress::now_millis;

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Reference to an uploaded intraoral photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Storage identifier of the upload
    pub id: String,

    /// Display URL, if already resolved
    pub url: Option<String>,
}

/// Smile style the simulation aims for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmilePreference {
    /// Balanced, unmodified proportions
    Natural,

    /// Slightly widened, brighter smile line
    Enhanced,

    /// Maximal brightness and symmetry
    Hollywood,
}

impl Default for SmilePreference {
    fn default() -> Self {
        SmilePreference::Natural
    }
}

/// Treatment that can be proposed for a tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Treatment {
    Whitening,
    Veneer,
    Crown,
    Implant,
    Orthodontics,
}

/// A treatment selected for one tooth (FDI numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothTreatment {
    /// FDI tooth number, e.g. 11 for the upper right central incisor
    pub tooth: u8,

    /// Selected treatment
    pub treatment: Treatment,
}

/// One finding produced by the automated analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFinding {
    /// FDI tooth number the finding applies to
    pub tooth: u8,

    /// Observed condition, as reported by the analysis backend
    pub condition: String,

    /// Recommended treatment, if the analysis proposes one
    pub recommendation: Option<Treatment>,
}

/// Full result of the automated photo analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Teeth detected in the photo, FDI numbers
    pub detected_teeth: Vec<u8>,

    /// Per-tooth findings
    pub findings: Vec<AnalysisFinding>,
}

/// Resumable snapshot of an in-progress case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    /// Wizard step the draft was saved on (1-indexed)
    pub step: u8,

    /// Uploaded photos
    #[serde(default)]
    pub photos: Vec<PhotoRef>,

    /// Chosen smile preference
    #[serde(default)]
    pub preference: SmilePreference,

    /// Analysis results, once available
    pub analysis: Option<AnalysisOutcome>,

    /// Per-tooth treatment selections made during review
    #[serde(default)]
    pub treatments: Vec<ToothTreatment>,

    /// Save time, epoch milliseconds
    pub saved_at: u64,
}

impl CaseDraft {
    /// Empty draft positioned on the given step
    pub fn new(step: u8) -> Self {
        Self {
            step,
            photos: Vec::new(),
            preference: SmilePreference::default(),
            analysis: None,
            treatments: Vec::new(),
            saved_at: now_millis(),
        }
    }

    /// Refresh the save timestamp
    pub fn touch(&mut self) {
        self.saved_at = now_millis();
    }

    /// Whether the draft has outlived the expiry window
    pub fn is_expired(&self, expiry_days: u32, now: u64) -> bool {
        now.saturating_sub(self.saved_at) > u64::from(expiry_days) * MILLIS_PER_DAY
    }
}

/// Remote persistence collaborator for case drafts.
///
/// Implementations talk to the backend; the draft manager wraps them with
/// debouncing, caching and expiry, and swallows their failures.
pub trait DraftStore: Send + Sync {
    /// Load the draft stored for a user, `None` if there is none
    fn load(&self, user_id: &str) -> Result<Option<CaseDraft>, RemoteError>;

    /// Overwrite the draft stored for a user
    fn save(&self, user_id: &str, draft: &CaseDraft) -> Result<(), RemoteError>;

    /// Delete the draft stored for a user; absent drafts are not an error
    fn remove(&self, user_id: &str) -> Result<(), RemoteError>;
}
