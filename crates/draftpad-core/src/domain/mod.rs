//! Domain entities - the core editor objects.

mod post;
mod save_status;

pub use post::{Post, PostFilter, PostStatus, signature};
pub use save_status::SaveStatus;
