//! Outline Services
//!
//! This module contains the orchestration layer of the outline core:
//!
//! - `OutlineService` - drag lifecycle, optimistic mutation, persistence glue
//! - `OutlineEvent` - broadcast events for UI shells
//! - `OutlineError` - the error taxonomy shared by the tree algorithms
//!
//! The service coordinates between the tree algorithms and the persistence
//! boundary; the algorithms themselves live under [`crate::tree`].

pub mod error;
pub mod events;
pub mod outline_service;

pub use error::OutlineError;
pub use events::OutlineEvent;
pub use outline_service::{OutlineService, DEFAULT_INDENT_WIDTH};
