use anyhow::{Context, Result};
use clap::Args;
use log::info;
use repo_layout::{backend_params, AppLayout, Changeset, ParamsOptions, RepoKind};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct ParamsArgs {
    /// Group the app under this main system
    #[arg(long)]
    pub main_system: Option<String>,
    #[arg(long, default_value = "debug")]
    pub release_mode: String,
    #[arg(long, default_value = "0.0.0.0")]
    pub starting_version: String,
    #[arg(long, default_value = "{0}.{1}.{2}")]
    pub version_template: String,
}

impl From<ParamsArgs> for ParamsOptions {
    fn from(args: ParamsArgs) -> Self {
        ParamsOptions {
            release_mode: args.release_mode,
            starting_version: args.starting_version,
            main_system_name: args.main_system,
            version_template: args.version_template,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepoSpec {
    pub name: String,
    pub kind: RepoKind,
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    pub repo: String,
    pub path: String,
    pub content: String,
}

pub fn parse_repo_spec(s: &str) -> Result<RepoSpec, String> {
    let (name, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=KIND, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("missing repository name in '{}'", s));
    }
    let kind = kind.parse::<RepoKind>().map_err(|e| e.to_string())?;

    Ok(RepoSpec {
        name: name.to_string(),
        kind,
    })
}

pub fn parse_file_spec(s: &str) -> Result<FileSpec, String> {
    let (repo, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected REPO:PATH=CONTENT, got '{}'", s))?;
    let (path, content) = rest
        .split_once('=')
        .ok_or_else(|| format!("expected REPO:PATH=CONTENT, got '{}'", s))?;
    if repo.is_empty() || path.is_empty() {
        return Err(format!("missing repository or path in '{}'", s));
    }

    Ok(FileSpec {
        repo: repo.to_string(),
        path: path.to_string(),
        content: content.to_string(),
    })
}

pub(crate) fn print_params(root: &Path, app_name: &str, args: ParamsArgs) -> Result<()> {
    let root = &std::path::absolute(root)?;
    let params = backend_params(&root.join("versions"), root, app_name, args.into());
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

pub(crate) fn run(
    root: &Path,
    repos: &[RepoSpec],
    files: &[FileSpec],
    app_name: Option<&str>,
    args: ParamsArgs,
) -> Result<()> {
    let root = &std::path::absolute(root)?;
    let versions = root.join("versions");
    let remote_versions = root.join("remote_versions");
    fs::create_dir_all(&versions)
        .with_context(|| format!("Failed to create {}", versions.display()))?;
    fs::create_dir_all(&remote_versions)
        .with_context(|| format!("Failed to create {}", remote_versions.display()))?;

    let mut layout = AppLayout::new(&versions, &remote_versions)?;

    for spec in repos {
        layout.create_repo(&spec.name, spec.kind)?;
    }
    for spec in files {
        layout.write_file(&spec.repo, &spec.path, &spec.content)?;
    }

    let mut changesets: BTreeMap<&str, Option<Changeset>> = BTreeMap::new();
    for spec in repos {
        changesets.insert(&spec.name, layout.get_changesets(&spec.name)?.cloned());
    }

    let params = app_name.map(|app| layout.create_mercurial_backend_params(app, args.into()));

    let report = json!({
        "versions": layout.versions_path(),
        "remote_versions": layout.remote_versions_path(),
        "repos": changesets,
        "params": params,
    });

    let root = layout.persist();
    info!("Layout kept at {}", root.display());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
