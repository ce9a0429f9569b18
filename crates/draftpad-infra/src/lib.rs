//! # Draftpad Infrastructure
//!
//! Concrete implementations of the ports defined in `draftpad-core`, plus the
//! per-session autosave scheduler.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `file-store` - JSON files in a data directory

pub mod autosave;
pub mod clock;
pub mod repository;
pub mod store;

// Re-exports
pub use autosave::{AutosaveConfig, AutosaveScheduler, DraftHandle, SaveError, SaveOutcome};
pub use clock::{ManualClock, SystemClock};
pub use repository::CollectionPostRepository;
pub use store::{InMemoryStore, InMemoryStoreConfig};

#[cfg(feature = "file-store")]
pub use store::FileStore;
