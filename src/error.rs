use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Unknown repository type provided: {kind}")]
    UnknownRepoType { kind: String },

    #[error("repo {name} not found")]
    RepoNotFound { name: String },

    #[error("{path} is not inside the versions repository")]
    OutsideVersionsRepo { path: String },

    #[error("VCS command failed: {message}")]
    VcsCommandFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
