//! Autosave scheduler - trailing-edge debounce over a live draft.
//!
//! One scheduler exists per edit session. It owns two single-shot timers
//! (the debounce and the `saved -> idle` revert), the last saved content
//! signature and the [`SaveStatus`] the UI renders. Dropping the scheduler
//! cancels both timers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use draftpad_core::domain::{Post, PostStatus, SaveStatus};
use draftpad_core::error::RepoError;
use draftpad_core::ports::PostRepository;

use super::config::AutosaveConfig;
use super::draft::DraftHandle;

/// Result of a save request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content matched the last saved signature; the repository was not called.
    Unchanged,
    /// The repository stored the draft and returned this canonical record.
    Saved(Post),
}

/// Autosave errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Repository save failed: {0}")]
    Repository(#[from] RepoError),
}

struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Timers {
    debounce: Option<Timer>,
    revert: Option<Timer>,
}

impl Timers {
    fn abort_all(&mut self) {
        for timer in [self.debounce.take(), self.revert.take()].into_iter().flatten() {
            timer.handle.abort();
        }
    }
}

struct Shared {
    repo: Arc<dyn PostRepository>,
    draft: DraftHandle,
    config: AutosaveConfig,
    status: watch::Sender<SaveStatus>,
    /// Last successfully saved signature. Holding the lock is the in-flight
    /// guard: saves from any source run one at a time.
    last_saved: tokio::sync::Mutex<String>,
    timers: Mutex<Timers>,
    generation: AtomicU64,
    closed: AtomicBool,
}

impl Shared {
    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn set_status(&self, status: SaveStatus) {
        let previous = self.status.send_replace(status);
        if previous != status {
            tracing::debug!(from = %previous, to = %status, "Save status changed");
        }
    }

    /// Detach a fired debounce timer. Returns `false` if it was superseded.
    fn claim_debounce(&self, generation: u64) -> bool {
        let mut timers = self.timers();
        match &timers.debounce {
            Some(timer) if timer.generation == generation => {
                timers.debounce = None;
                true
            }
            _ => false,
        }
    }

    fn claim_revert(&self, generation: u64) -> bool {
        let mut timers = self.timers();
        match &timers.revert {
            Some(timer) if timer.generation == generation => {
                timers.revert = None;
                true
            }
            _ => false,
        }
    }

    fn cancel_debounce(&self) -> bool {
        match self.timers().debounce.take() {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    fn cancel_revert(&self) {
        if let Some(timer) = self.timers().revert.take() {
            timer.handle.abort();
        }
    }

    fn schedule_revert(self: &Arc<Self>) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        let generation = self.next_generation();
        let deadline = Instant::now() + self.config.saved_display;
        let shared = Arc::clone(self);

        let mut timers = self.timers();
        if let Some(previous) = timers.revert.take() {
            previous.handle.abort();
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if shared.claim_revert(generation) {
                shared
                    .status
                    .send_if_modified(|status| match status {
                        SaveStatus::Saved => {
                            *status = SaveStatus::Idle;
                            true
                        }
                        _ => false,
                    });
            }
        });
        timers.revert = Some(Timer { generation, handle });
    }

    async fn save_if_changed(self: &Arc<Self>) -> Result<SaveOutcome, SaveError> {
        let mut last_saved = self.last_saved.lock().await;
        self.save_guarded(&mut last_saved).await
    }

    /// Save with the in-flight guard already held by the caller.
    async fn save_guarded(
        self: &Arc<Self>,
        last_saved: &mut String,
    ) -> Result<SaveOutcome, SaveError> {
        // Read the draft only once the guard is held so a queued save sees
        // what the previous one wrote back.
        let post = self.draft.snapshot().await;
        let signature = post.signature();
        if signature == *last_saved {
            tracing::debug!(post_id = %post.id, "Draft unchanged since last save, skipping");
            return Ok(SaveOutcome::Unchanged);
        }

        self.persist(last_saved, post, signature)
            .await
            .map(SaveOutcome::Saved)
    }

    async fn publish(self: &Arc<Self>) -> Result<Post, SaveError> {
        let mut last_saved = self.last_saved.lock().await;

        let mut post = self.draft.snapshot().await;
        let signature = post.signature();
        post.status = PostStatus::Published;

        self.persist(&mut last_saved, post, signature).await
    }

    async fn persist(
        self: &Arc<Self>,
        last_saved: &mut String,
        post: Post,
        signature: String,
    ) -> Result<Post, SaveError> {
        self.cancel_revert();
        self.set_status(SaveStatus::Saving);

        match self.repo.save(post).await {
            Ok(saved) => {
                *last_saved = signature;
                self.draft.apply_saved(&saved).await;
                self.set_status(SaveStatus::Saved);
                self.schedule_revert();
                tracing::info!(post_id = %saved.id, status = %saved.status, "Draft saved");
                Ok(saved)
            }
            Err(e) => {
                self.set_status(SaveStatus::Error);
                tracing::error!(error = %e, "Error saving draft");
                Err(e.into())
            }
        }
    }
}

/// Per-session autosave scheduler.
///
/// Timer operations spawn onto the current tokio runtime and must be called
/// from within one.
pub struct AutosaveScheduler {
    shared: Arc<Shared>,
}

impl AutosaveScheduler {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        draft: DraftHandle,
        config: AutosaveConfig,
    ) -> Self {
        let (status, _) = watch::channel(SaveStatus::Idle);
        Self {
            shared: Arc::new(Shared {
                repo,
                draft,
                config,
                status,
                last_saved: tokio::sync::Mutex::new(String::new()),
                timers: Mutex::new(Timers::default()),
                generation: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// The draft this scheduler persists.
    pub fn draft(&self) -> &DraftHandle {
        &self.shared.draft
    }

    /// Current save status.
    pub fn status(&self) -> SaveStatus {
        *self.shared.status.borrow()
    }

    /// Receiver that observes every status transition.
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.shared.status.subscribe()
    }

    /// Schedule an autosave after `debounce` of inactivity.
    ///
    /// Any pending autosave is cancelled first, so only the most recent call
    /// within the window fires. The fired save reads the draft at fire time.
    pub fn schedule_save(&self, debounce: Duration) {
        let generation = self.shared.next_generation();
        let deadline = Instant::now() + debounce;
        let shared = Arc::clone(&self.shared);

        // Held across the spawn so the task cannot claim before it is stored.
        let mut timers = self.shared.timers();
        if let Some(previous) = timers.debounce.take() {
            previous.handle.abort();
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Take the guard before claiming: once the slot is empty, anyone
            // waiting on the guard also waits for this save.
            let mut last_saved = shared.last_saved.lock().await;
            if shared.claim_debounce(generation) {
                // Failures are reported through the status and logged.
                let _ = shared.save_guarded(&mut last_saved).await;
            }
        });
        timers.debounce = Some(Timer { generation, handle });

        tracing::trace!(debounce = ?debounce, "Autosave scheduled");
    }

    /// [`schedule_save`](Self::schedule_save) with the configured interval.
    pub fn schedule_default(&self) {
        self.schedule_save(self.shared.config.debounce);
    }

    /// Whether a debounced autosave is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.shared.timers().debounce.is_some()
    }

    /// Save immediately if the content changed since the last save.
    pub async fn save_now(&self) -> Result<SaveOutcome, SaveError> {
        self.shared.save_if_changed().await
    }

    /// Persist the draft as published, skipping the debounce and the
    /// change check. A pending autosave is cancelled.
    pub async fn publish(&self) -> Result<Post, SaveError> {
        self.shared.cancel_debounce();
        self.shared.publish().await
    }

    /// Cancel a pending autosave without running it.
    pub fn cancel(&self) {
        if self.shared.cancel_debounce() {
            tracing::debug!("Pending autosave cancelled");
        }
    }

    /// Run a pending autosave now instead of waiting for the debounce.
    ///
    /// With nothing pending this still waits for an autosave that has
    /// already fired, so its result is stored when `flush` returns.
    pub async fn flush(&self) -> Result<SaveOutcome, SaveError> {
        if self.shared.cancel_debounce() {
            return self.save_now().await;
        }
        drop(self.shared.last_saved.lock().await);
        Ok(SaveOutcome::Unchanged)
    }

    /// Flush pending work and end the session.
    pub async fn close(self) -> Result<SaveOutcome, SaveError> {
        let outcome = self.flush().await;
        drop(self);
        outcome
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.timers().abort_all();
        tracing::debug!("Autosave scheduler torn down");
    }
}
