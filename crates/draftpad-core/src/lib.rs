//! # Draftpad Core
//!
//! The domain layer of the Draftpad editor.
//! This crate contains the post model, save status and the ports that
//! storage and scheduling adapters implement. It has no runtime dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
