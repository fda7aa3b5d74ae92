//! Client layer for the GitHub release and git-data APIs.
//!
//! Provides token-based authentication and the release, asset and tag
//! operations the reconciler consumes, behind a trait so the core can be
//! driven by mocks in tests.

/// Configuration and authentication for the hosting platform.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Dry-run aware wrapper around a forge implementation.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common trait for hosting platform abstraction.
pub mod traits;
