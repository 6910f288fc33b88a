use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    Mercurial,
    Git,
}

impl RepoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoKind::Mercurial => "mercurial",
            RepoKind::Git => "git",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mercurial" => Ok(RepoKind::Mercurial),
            "git" => Ok(RepoKind::Git),
            other => Err(LayoutError::UnknownRepoType {
                kind: other.to_string(),
            }),
        }
    }
}

/// Latest commit of a repository. Replaced on every commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub hash: String,
    pub vcs_type: RepoKind,
}

#[derive(Debug, Clone)]
pub struct RepoRecord {
    pub path: PathBuf,
    pub kind: RepoKind,
    pub changesets: Option<Changeset>,
}

impl RepoRecord {
    pub fn new(path: PathBuf, kind: RepoKind) -> Self {
        Self {
            path,
            kind,
            changesets: None,
        }
    }
}
