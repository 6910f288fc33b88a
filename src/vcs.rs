//! Thin wrappers around the `hg` and `git` binaries.
//!
//! Each function runs one client process in the repository directory and
//! returns once it exits.

use crate::command_utils::{execute_command, failure, run_checked};
use crate::config::VcsConfig;
use anyhow::Result;
use std::ffi::OsString;
use std::path::Path;

pub struct Hg<'a> {
    config: &'a VcsConfig,
}

impl<'a> Hg<'a> {
    pub fn new(config: &'a VcsConfig) -> Self {
        Self { config }
    }

    pub fn init(&self, dest: &Path) -> Result<()> {
        let parent = working_parent(dest);
        run_checked(&self.config.hg_path, &[os("init"), dest.into()], parent)?;
        Ok(())
    }

    pub fn clone_repo(&self, source: &Path, dest: &Path) -> Result<()> {
        let parent = working_parent(dest);
        run_checked(
            &self.config.hg_path,
            &[os("clone"), source.into(), dest.into()],
            parent,
        )?;
        Ok(())
    }

    pub fn add(&self, repo: &Path, file: &Path) -> Result<()> {
        run_checked(&self.config.hg_path, &[os("add"), file.into()], repo)?;
        Ok(())
    }

    pub fn remove(&self, repo: &Path, file: &Path) -> Result<()> {
        run_checked(&self.config.hg_path, &[os("remove"), file.into()], repo)?;
        Ok(())
    }

    /// Commit as the configured user, or as `user` when given. `include`
    /// restricts the commit to that one file, given relative to `repo`.
    pub fn commit(
        &self,
        repo: &Path,
        message: &str,
        user: Option<&str>,
        include: Option<&Path>,
    ) -> Result<()> {
        let user = user.unwrap_or(&self.config.user);
        let mut args = vec![
            os("--config"),
            os(&format!("ui.username={}", user)),
            os("commit"),
            os("-m"),
            os(message),
        ];
        if let Some(file) = include {
            args.push(os("-I"));
            args.push(os(&format!("path:{}", file.display())));
        }
        run_checked(&self.config.hg_path, &args, repo)?;
        Ok(())
    }

    /// Push to the default path. Exit code 1 means nothing to push.
    pub fn push(&self, repo: &Path) -> Result<()> {
        let args = [os("push")];
        let output = execute_command(&self.config.hg_path, &args, repo)?;
        match output.status.code() {
            Some(0) | Some(1) => Ok(()),
            _ => Err(failure(&self.config.hg_path, &args, &output).into()),
        }
    }

    /// Full node of the newest changeset on the `default` branch.
    pub fn tip(&self, repo: &Path) -> Result<String> {
        run_checked(
            &self.config.hg_path,
            &["log", "-b", "default", "-l", "1", "--template", "{node}"],
            repo,
        )
    }
}

pub struct Git<'a> {
    config: &'a VcsConfig,
}

impl<'a> Git<'a> {
    pub fn new(config: &'a VcsConfig) -> Self {
        Self { config }
    }

    pub fn init(&self, dest: &Path) -> Result<()> {
        let parent = working_parent(dest);
        run_checked(&self.config.git_path, &[os("init"), dest.into()], parent)?;
        Ok(())
    }

    pub fn add(&self, repo: &Path, file: &Path) -> Result<()> {
        run_checked(
            &self.config.git_path,
            &[os("add"), os("--"), file.into()],
            repo,
        )?;
        Ok(())
    }

    /// Always records a commit, even when the tree is unchanged.
    pub fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        let (name, email) = self.config.git_identity();
        run_checked(
            &self.config.git_path,
            &[
                os("-c"),
                os(&format!("user.name={}", name)),
                os("-c"),
                os(&format!("user.email={}", email)),
                os("commit"),
                os("--allow-empty"),
                os("-m"),
                os(message),
            ],
            repo,
        )?;
        Ok(())
    }

    pub fn head(&self, repo: &Path) -> Result<String> {
        run_checked(&self.config.git_path, &["rev-parse", "HEAD"], repo)
    }
}

fn os(s: &str) -> OsString {
    OsString::from(s)
}

// `init` and `clone` target a directory that may not exist yet, so they run
// from its parent.
fn working_parent(dest: &Path) -> &Path {
    dest.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
