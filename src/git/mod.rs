//! Git history as a pull request source.
//!
//! Squash-merged pull requests land as a single commit whose subject is the
//! pull request title followed by `(#N)`. Walking a revision range therefore
//! recovers the pull requests of a release without talking to GitHub.

pub mod commit;
pub mod repository;

pub use commit::{pull_request_from_commit, split_pr_number};
pub use repository::GitRepository;

/// Range used when none is given.
pub const DEFAULT_RANGE: &str = "HEAD";
