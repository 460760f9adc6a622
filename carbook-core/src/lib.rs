pub mod identity;
pub mod repository;

/// Error type repositories surface. The store layer wraps its own failure
/// modes; the domain only needs to propagate them.
pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
