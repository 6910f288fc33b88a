//! Provision throwaway Mercurial and Git repositories for end-to-end tests
//! of a version manager.
//!
//! ```no_run
//! use repo_layout::{AppLayout, ParamsOptions, RepoKind};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut layout = AppLayout::in_temp_dir()?;
//! layout.create_repo("repo1", RepoKind::Git)?;
//! let changeset = layout.write_file("repo1", "a.txt", "hello")?;
//! let params = layout.create_mercurial_backend_params("svc", ParamsOptions::default());
//! # let _ = (changeset, params);
//! # Ok(())
//! # }
//! ```

pub mod command_utils;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod params;
pub mod repo;
pub mod vcs;

pub use config::VcsConfig;
pub use error::LayoutError;
pub use layout::AppLayout;
pub use params::{backend_params, BackendParams, ParamsOptions};
pub use repo::{Changeset, RepoKind, RepoRecord};
