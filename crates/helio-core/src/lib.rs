//! # helio-core
//!
//! Core types, traits, and abstractions for heliograph, a webhook receiver
//! for a Mirror-style timeline service.
//!
//! This crate provides the notification and timeline data model, the trait
//! seams over the three external collaborators (credential store, timeline
//! API, third-party content APIs), the error taxonomy, and the pure HTML
//! composition helpers.

pub mod defaults;
pub mod error;
pub mod html;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::{ContentFetcher, CredentialResolver, TimelineClient};
