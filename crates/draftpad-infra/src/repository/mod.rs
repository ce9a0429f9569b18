//! Post repository implementations.

mod collection;

pub use collection::CollectionPostRepository;
