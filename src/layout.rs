//! Simulated application layout: a main Mercurial "versions" working copy
//! cloned from a "remote_versions" repository, plus any number of named
//! Mercurial or Git repositories created next to it.
//!
//! Every repository created with [`AppLayout::create_repo`] is deleted when
//! the layout is dropped, so a panicking test still cleans up after itself.

use crate::config::VcsConfig;
use crate::error::LayoutError;
use crate::params::{backend_params, BackendParams, ParamsOptions};
use crate::repo::{Changeset, RepoKind, RepoRecord};
use crate::vcs::{Git, Hg};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const VERSION_INFO_USER: &str = "version_manager";

pub struct AppLayout {
    config: VcsConfig,
    versions_root: PathBuf,
    remote_versions_root: PathBuf,
    base_dir: PathBuf,
    repos: HashMap<String, RepoRecord>,
    temp_dir: Option<TempDir>,
    teardown: bool,
}

impl AppLayout {
    /// Initialize an empty remote at `remote_versions` and clone it into
    /// `versions`. Named repositories go into the parent of `versions`.
    pub fn new(versions: &Path, remote_versions: &Path) -> Result<Self> {
        Self::with_config(versions, remote_versions, VcsConfig::from_env())
    }

    pub fn with_config(versions: &Path, remote_versions: &Path, config: VcsConfig) -> Result<Self> {
        // hg/git run with their own working directory, so every path they see
        // must be absolute.
        let versions = &std::path::absolute(versions)?;
        let remote_versions = &std::path::absolute(remote_versions)?;
        let base_dir = versions
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let hg = Hg::new(&config);
        hg.init(remote_versions).with_context(|| {
            format!(
                "Failed to init remote versions repo at {}",
                remote_versions.display()
            )
        })?;
        hg.clone_repo(remote_versions, versions).with_context(|| {
            format!("Failed to clone versions repo into {}", versions.display())
        })?;

        info!(
            "Versions repo {} cloned from {}",
            versions.display(),
            remote_versions.display()
        );

        Ok(Self {
            config,
            versions_root: versions.to_path_buf(),
            remote_versions_root: remote_versions.to_path_buf(),
            base_dir,
            repos: HashMap::new(),
            temp_dir: None,
            teardown: true,
        })
    }

    /// Fresh layout under a new temporary directory holding `versions/` and
    /// `remote_versions/`. The directory goes away with the layout.
    pub fn in_temp_dir() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let versions = temp_dir.path().join("versions");
        let remote_versions = temp_dir.path().join("remote_versions");
        fs::create_dir(&versions)?;
        fs::create_dir(&remote_versions)?;

        let mut layout = Self::new(&versions, &remote_versions)?;
        layout.temp_dir = Some(temp_dir);
        Ok(layout)
    }

    pub fn versions_path(&self) -> &Path {
        &self.versions_root
    }

    pub fn remote_versions_path(&self) -> &Path {
        &self.remote_versions_root
    }

    /// Directory holding the named repositories.
    pub fn repos_path(&self) -> &Path {
        &self.base_dir
    }

    pub fn create_repo(&mut self, name: &str, kind: RepoKind) -> Result<&Path> {
        let path = self.base_dir.join(name);

        match kind {
            RepoKind::Mercurial => Hg::new(&self.config).init(&path)?,
            RepoKind::Git => Git::new(&self.config).init(&path)?,
        }
        info!("Created {} repo {} at {}", kind, name, path.display());

        self.repos.insert(name.to_string(), RepoRecord::new(path, kind));
        self.repo_path(name)
    }

    /// Write `content` to `relative_path` inside the named repository and
    /// commit it. Returns the new changeset.
    pub fn write_file(
        &mut self,
        name: &str,
        relative_path: impl AsRef<Path>,
        content: &str,
    ) -> Result<Changeset> {
        let record = self.record(name)?;
        let repo_path = record.path.clone();
        let kind = record.kind;
        let path = repo_path.join(relative_path.as_ref());

        let is_new = !path.is_file();
        if is_new {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&path, content)?;

        let message = if is_new {
            format!("Added file {}", path.display())
        } else {
            format!("Modified file {}", path.display())
        };

        let changeset = match kind {
            RepoKind::Mercurial => {
                let hg = Hg::new(&self.config);
                if is_new {
                    hg.add(&repo_path, &path)?;
                }
                hg.commit(&repo_path, &message, None, None)?;
                Changeset {
                    hash: hg.tip(&repo_path)?,
                    vcs_type: kind,
                }
            }
            RepoKind::Git => {
                // git needs modified files staged too
                let git = Git::new(&self.config);
                git.add(&repo_path, &path)?;
                git.commit(&repo_path, &message)?;
                Changeset {
                    hash: git.head(&repo_path)?,
                    vcs_type: kind,
                }
            }
        };
        debug!("{}: {} -> {}", name, message, changeset.hash);

        self.record_mut(name)?.changesets = Some(changeset.clone());
        Ok(changeset)
    }

    pub fn get_repo_type(&self, name: &str) -> Result<RepoKind> {
        Ok(self.record(name)?.kind)
    }

    /// Latest changeset of the named repository, `None` before its first
    /// commit.
    pub fn get_changesets(&self, name: &str) -> Result<Option<&Changeset>> {
        Ok(self.record(name)?.changesets.as_ref())
    }

    pub fn repo_path(&self, name: &str) -> Result<&Path> {
        Ok(&self.record(name)?.path)
    }

    /// Remove a tracked file from the versions repo, commit and push.
    pub fn remove_app_version_file(&self, app_version_file: impl AsRef<Path>) -> Result<()> {
        let path = self.in_versions(app_version_file.as_ref());
        self.relative_to_versions(&path)?;
        let hg = Hg::new(&self.config);

        hg.remove(&self.versions_root, &path)?;
        hg.commit(
            &self.versions_root,
            &format!("Manually removed file {}", path.display()),
            None,
            None,
        )?;
        hg.push(&self.versions_root)?;

        info!("Removed {} from versions repo", path.display());
        Ok(())
    }

    /// Write a version info file into the versions repo, commit it as
    /// [`VERSION_INFO_USER`] and push. Does nothing when both values are
    /// absent.
    pub fn add_version_info_file(
        &self,
        version_info_file: impl AsRef<Path>,
        custom_version: Option<&str>,
        custom_repos: Option<&serde_json::Value>,
    ) -> Result<()> {
        if custom_version.is_none() && custom_repos.is_none() {
            return Ok(());
        }

        let path = self.in_versions(version_info_file.as_ref());
        let relative = self.relative_to_versions(&path)?.to_path_buf();

        let mut body = String::new();
        if let Some(version) = custom_version {
            body.push_str(&format!("version = {}\n", version));
        }
        if let Some(repos) = custom_repos {
            let json = serde_json::to_string(repos).map_err(LayoutError::from)?;
            body.push_str(&format!("repos = {}\n", json));
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, body)?;

        let hg = Hg::new(&self.config);
        hg.add(&self.versions_root, &path)?;
        hg.commit(
            &self.versions_root,
            "Manually add version_info file",
            Some(VERSION_INFO_USER),
            Some(&relative),
        )?;
        hg.push(&self.versions_root)?;

        info!("Added version info file {}", path.display());
        Ok(())
    }

    pub fn create_mercurial_backend_params(
        &self,
        app_name: &str,
        options: ParamsOptions,
    ) -> BackendParams {
        backend_params(&self.versions_root, &self.base_dir, app_name, options)
    }

    /// Newest changeset on `default` in the versions working copy.
    pub fn head_changeset(&self) -> Result<String> {
        Hg::new(&self.config).tip(&self.versions_root)
    }

    pub fn remote_head_changeset(&self) -> Result<String> {
        Hg::new(&self.config).tip(&self.remote_versions_root)
    }

    /// Keep everything on disk and return the root directory.
    pub fn persist(mut self) -> PathBuf {
        self.teardown = false;
        match self.temp_dir.take() {
            Some(temp_dir) => temp_dir.keep(),
            None => self.base_dir.clone(),
        }
    }

    fn record(&self, name: &str) -> Result<&RepoRecord> {
        self.repos.get(name).ok_or_else(|| {
            LayoutError::RepoNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut RepoRecord> {
        self.repos.get_mut(name).ok_or_else(|| {
            LayoutError::RepoNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn relative_to_versions<'p>(&self, path: &'p Path) -> Result<&'p Path> {
        path.strip_prefix(&self.versions_root).map_err(|_| {
            LayoutError::OutsideVersionsRepo {
                path: path.display().to_string(),
            }
            .into()
        })
    }

    fn in_versions(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.versions_root.join(path)
        }
    }
}

impl Drop for AppLayout {
    fn drop(&mut self) {
        if !self.teardown {
            return;
        }

        for (name, record) in self.repos.drain() {
            if let Err(e) = fs::remove_dir_all(&record.path) {
                warn!(
                    "Failed to remove repo {} at {}: {}",
                    name,
                    record.path.display(),
                    e
                );
            }
        }
    }
}
