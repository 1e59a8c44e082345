//! # helio-mirror
//!
//! Concrete clients for heliograph's three external services: the timeline
//! API ([`MirrorClient`]), the third-party content APIs
//! ([`HttpContentFetcher`]), and the credential store
//! ([`InMemoryCredentialStore`]). The [`mock`] module provides deterministic
//! in-memory implementations of the same seams for tests.

pub mod client;
pub mod content;
pub mod credentials;
pub mod mock;

pub use client::MirrorClient;
pub use content::HttpContentFetcher;
pub use credentials::{InMemoryCredentialStore, StoredCredentials};
