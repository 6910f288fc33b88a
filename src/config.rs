pub const DEFAULT_USER: &str = "repo-layout <repo-layout@localhost>";

/// Which client binaries to run and who to commit as.
#[derive(Debug, Clone)]
pub struct VcsConfig {
    pub hg_path: String,
    pub git_path: String,
    /// Committer in `Name <email>` form.
    pub user: String,
}

impl VcsConfig {
    pub fn from_env() -> Self {
        let hg_path = std::env::var("REPO_LAYOUT_HG").unwrap_or_else(|_| "hg".to_string());
        let git_path = std::env::var("REPO_LAYOUT_GIT").unwrap_or_else(|_| "git".to_string());
        let user = std::env::var("REPO_LAYOUT_USER").unwrap_or_else(|_| DEFAULT_USER.to_string());

        Self {
            hg_path,
            git_path,
            user,
        }
    }

    /// Split `user` into the name and email git wants separately.
    pub fn git_identity(&self) -> (String, String) {
        match self.user.split_once('<') {
            Some((name, rest)) => (
                name.trim().to_string(),
                rest.trim_end_matches('>').trim().to_string(),
            ),
            None => (self.user.trim().to_string(), String::new()),
        }
    }
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            hg_path: "hg".to_string(),
            git_path: "git".to_string(),
            user: DEFAULT_USER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_identity_splits_name_and_email() {
        let config = VcsConfig {
            user: "Test User <test@example.com>".to_string(),
            ..VcsConfig::default()
        };
        assert_eq!(
            config.git_identity(),
            ("Test User".to_string(), "test@example.com".to_string())
        );
    }

    #[test]
    fn test_git_identity_without_email() {
        let config = VcsConfig {
            user: "version_manager".to_string(),
            ..VcsConfig::default()
        };
        assert_eq!(
            config.git_identity(),
            ("version_manager".to_string(), String::new())
        );
    }

    #[test]
    fn test_default_binaries() {
        let config = VcsConfig::default();
        assert_eq!(config.hg_path, "hg");
        assert_eq!(config.git_path, "git");
    }
}
