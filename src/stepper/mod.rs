/// Generic multi-step navigation engine
///
/// A framework-free stepper for linear flows: integer steps, a high-water
/// mark that forbids forward jumps into unvisited steps, direction tracking
/// for transition animation, an abstract keyboard surface, and resumable
/// progress persistence over a key/value backend.
///
/// ## Architecture
///
/// ```text
/// Stepper
///   ├── navigation (go_to, next, back, high-water mark)
///   ├── input (NavKey -> navigation, editable-focus suppression)
///   └── progress (StoredProgress save/load/clear with expiry)
/// ```
///
/// The dental case wizard builds its richer flow on the same semantics; see
/// `crate::wizard`.

pub mod engine;
pub mod input;
pub mod progress;

// Re-export commonly used types
pub use engine::{NavOutcome, StepDirection, Stepper};
pub use input::{InputContext, NavKey};
pub use progress::{
    clear_progress, load_progress, save_progress, FileStore, MemoryStore, ProgressStore,
    StoredProgress, DEFAULT_EXPIRY_DAYS,
};
