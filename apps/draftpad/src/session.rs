//! Edit session - one draft, its autosave scheduler and the status notices.

use std::sync::Arc;

use tokio::task::JoinHandle;

use draftpad_core::domain::{Post, SaveStatus};
use draftpad_core::ports::PostRepository;
use draftpad_infra::{AutosaveConfig, AutosaveScheduler, DraftHandle, SaveError, SaveOutcome};
use draftpad_shared::{NoticeLevel, StatusNotice};

/// A post being edited. Closing or dropping the session cancels its timers;
/// the notice task ends once the scheduler's status channel closes.
pub struct EditorSession {
    autosave: AutosaveScheduler,
    notices: JoinHandle<()>,
}

impl EditorSession {
    pub fn open(repo: Arc<dyn PostRepository>, post: Post, config: AutosaveConfig) -> Self {
        tracing::info!(post_id = %post.id, "Edit session opened");
        let autosave = AutosaveScheduler::new(repo, DraftHandle::new(post), config);
        let notices = spawn_notices(&autosave);
        Self { autosave, notices }
    }

    pub async fn draft(&self) -> Post {
        self.autosave.draft().snapshot().await
    }

    pub fn status(&self) -> SaveStatus {
        self.autosave.status()
    }

    /// Apply an edit. Returns whether the draft changed.
    ///
    /// Changes to a post that has been saved before schedule an autosave;
    /// a brand new post is only stored by an explicit save or publish.
    pub async fn edit<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Post) -> bool,
    {
        let (changed, persisted) = self
            .autosave
            .draft()
            .update(|post| (f(post), post.is_persisted()))
            .await;

        if changed && persisted {
            self.autosave.schedule_default();
        }
        changed
    }

    pub async fn save(&self) -> Result<SaveOutcome, SaveError> {
        self.autosave.save_now().await
    }

    pub async fn publish(&self) -> Result<Post, SaveError> {
        self.autosave.publish().await
    }

    /// Flush a pending autosave and end the session.
    pub async fn close(self) -> Result<SaveOutcome, SaveError> {
        let Self { autosave, notices } = self;
        let outcome = autosave.close().await;
        notices.abort();
        tracing::info!("Edit session closed");
        outcome
    }
}

fn spawn_notices(autosave: &AutosaveScheduler) -> JoinHandle<()> {
    let mut rx = autosave.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let status = *rx.borrow_and_update();
            match StatusNotice::for_status(status) {
                Some(notice) if notice.level == NoticeLevel::Error => {
                    eprintln!("[{}]", notice.message);
                }
                Some(notice) => println!("[{}]", notice.message),
                None => {}
            }
        }
    })
}
