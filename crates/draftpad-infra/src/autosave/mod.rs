//! Autosave - debounced, change-detecting persistence of an edit session's draft.

mod config;
mod draft;
mod scheduler;

pub use config::AutosaveConfig;
pub use draft::DraftHandle;
pub use scheduler::{AutosaveScheduler, SaveError, SaveOutcome};
