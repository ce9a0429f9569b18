//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod repository;
mod store;

pub use clock::Clock;
pub use repository::PostRepository;
pub use store::{KeyValueStore, POSTS_COLLECTION_KEY};
