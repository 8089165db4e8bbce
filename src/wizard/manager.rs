/// Draft autosave manager
///
/// Wraps a remote `DraftStore` with debounced saves, an in-memory cache and
/// a flush-on-dispose guarantee: a pending debounced write is persisted
/// synchronously when the manager is torn down, never dropped. Store
/// failures are logged and swallowed; draft loss must not block the wizard.
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::draft::{CaseDraft, DraftStore};
use crate::stepper::progress::now_millis;
use crate::stepper::DEFAULT_EXPIRY_DAYS;

/// Default debounce window for `save_draft`
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

enum Msg {
    Save(CaseDraft),
    Flush,
    Clear,
    Shutdown,
}

/// Debounced autosave over a remote draft store
pub struct DraftManager {
    tx: Sender<Msg>,
    worker: Option<JoinHandle<()>>,
    cache: Arc<Mutex<Option<CaseDraft>>>,
    saving: Arc<AtomicBool>,
    store: Arc<dyn DraftStore>,
    user_id: String,
    expiry_days: u32,
}

impl DraftManager {
    /// Create a manager for one user's draft with the default debounce
    /// window and expiry
    pub fn new(store: Arc<dyn DraftStore>, user_id: impl Into<String>) -> Self {
        Self::with_options(store, user_id, DEFAULT_DEBOUNCE, DEFAULT_EXPIRY_DAYS)
    }

    /// Create a manager with explicit debounce window and expiry
    pub fn with_options(
        store: Arc<dyn DraftStore>,
        user_id: impl Into<String>,
        debounce: Duration,
        expiry_days: u32,
    ) -> Self {
        let (tx, rx) = unbounded();
        let cache = Arc::new(Mutex::new(None));
        let saving = Arc::new(AtomicBool::new(false));
        let user_id = user_id.into();

        let worker = {
            let store = Arc::clone(&store);
            let saving = Arc::clone(&saving);
            let user_id = user_id.clone();
            thread::spawn(move || worker_loop(rx, store, saving, user_id, debounce))
        };

        Self {
            tx,
            worker: Some(worker),
            cache,
            saving,
            store,
            user_id,
            expiry_days,
        }
    }

    /// Load the user's draft.
    ///
    /// Cache-first; a remote load fills the cache. Expired drafts are
    /// remotely deleted and reported absent. Remote failures degrade to
    /// `None` so a failed load is indistinguishable from "no draft".
    pub fn load_draft(&self) -> Option<CaseDraft> {
        if let Some(cached) = self.cache.lock().clone() {
            return Some(cached);
        }

        match self.store.load(&self.user_id) {
            Ok(Some(draft)) => {
                if draft.is_expired(self.expiry_days, now_millis()) {
                    log::debug!("[draft-manager] stored draft expired, deleting");
                    if let Err(e) = self.store.remove(&self.user_id) {
                        log::warn!("[draft-manager] failed to delete expired draft: {}", e);
                    }
                    None
                } else {
                    *self.cache.lock() = Some(draft.clone());
                    Some(draft)
                }
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("[draft-manager] draft load failed: {}", e);
                None
            }
        }
    }

    /// Schedule a debounced save.
    ///
    /// Each call resets the window; of N calls within one window only the
    /// last payload is written. The cache is updated immediately.
    pub fn save_draft(&self, mut draft: CaseDraft) {
        draft.touch();
        *self.cache.lock() = Some(draft.clone());
        self.saving.store(true, Ordering::SeqCst);

        if self.tx.send(Msg::Save(draft)).is_err() {
            log::warn!("[draft-manager] save requested after dispose, dropped");
            self.saving.store(false, Ordering::SeqCst);
        }
    }

    /// Whether a debounced save is pending or in flight
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Ask the worker to persist any pending payload now (fire-and-forget).
    /// Use `dispose` for the synchronous teardown guarantee.
    pub fn flush(&self) {
        let _ = self.tx.send(Msg::Flush);
    }

    /// Cancel any pending save, clear the cache and delete the remote
    /// draft. Idempotent.
    pub fn clear_draft(&self) {
        *self.cache.lock() = None;
        let _ = self.tx.send(Msg::Clear);

        if let Err(e) = self.store.remove(&self.user_id) {
            log::warn!("[draft-manager] draft delete failed: {}", e);
        }
    }

    /// Tear the manager down, synchronously persisting any pending payload
    /// before returning. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.tx.send(Msg::Shutdown);
            let _ = worker.join();
        }
    }
}

impl Drop for DraftManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn worker_loop(
    rx: Receiver<Msg>,
    store: Arc<dyn DraftStore>,
    saving: Arc<AtomicBool>,
    user_id: String,
    debounce: Duration,
) {
    log::debug!("[draft-manager] worker started");

    loop {
        let message = match rx.recv() {
            Ok(message) => message,
            Err(_) => break,
        };

        match message {
            Msg::Save(draft) => {
                let shutdown = debounce_and_write(&rx, &*store, &user_id, debounce, draft);
                saving.store(false, Ordering::SeqCst);
                if shutdown {
                    break;
                }
            }
            Msg::Flush | Msg::Clear => {
                // Nothing pending
                saving.store(false, Ordering::SeqCst);
            }
            Msg::Shutdown => break,
        }
    }

    log::debug!("[draft-manager] worker stopped");
}

/// Hold the latest payload until the debounce window closes, then write it.
/// Returns true when the manager is shutting down.
///
/// The pending payload is a local that drops after a successful write
/// ("clear after success"): a flush racing a just-completed write may write
/// identical data again, which is harmless; a lost flush is not.
fn debounce_and_write(
    rx: &Receiver<Msg>,
    store: &dyn DraftStore,
    user_id: &str,
    debounce: Duration,
    first: CaseDraft,
) -> bool {
    let mut pending = first;
    let mut deadline = Instant::now() + debounce;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(Msg::Save(next)) => {
                pending = next;
                deadline = Instant::now() + debounce;
            }
            Ok(Msg::Flush) => {
                write_draft(store, user_id, &pending);
                return false;
            }
            Ok(Msg::Clear) => {
                // Pending write cancelled; the caller deletes remotely
                return false;
            }
            Ok(Msg::Shutdown) => {
                write_draft(store, user_id, &pending);
                return true;
            }
            Err(RecvTimeoutError::Timeout) => {
                write_draft(store, user_id, &pending);
                return false;
            }
            Err(RecvTimeoutError::Disconnected) => {
                write_draft(store, user_id, &pending);
                return true;
            }
        }
    }
}

fn write_draft(store: &dyn DraftStore, user_id: &str, draft: &CaseDraft) {
    if let Err(e) = store.save(user_id, draft) {
        log::warn!("[draft-manager] draft save failed: {}", e);
    } else {
        log::debug!("[draft-manager] draft saved at step {}", draft.step);
    }
}
