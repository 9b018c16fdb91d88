//! # relnotes
//!
//! Drafts release notes from merged pull requests using release-drafter
//! style configuration: an autolabeler, ordered title replacers and a
//! changelog template.
//!
//! ## Quick Start
//!
//! ```rust
//! use relnotes::data::PullRequest;
//! use relnotes::drafter::Drafter;
//!
//! let drafter = Drafter::embedded().unwrap();
//! let draft = drafter.draft(&[PullRequest::new("feat(rust): add x").with_number(1)]);
//! assert!(draft.body.starts_with("- add x (#1)"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod drafter;
pub mod error;
pub mod git;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::drafter::Drafter;
pub use crate::error::ConfigError;

/// The current version of relnotes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
