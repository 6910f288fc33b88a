use serde::Serialize;
use std::path::Path;

/// Optional knobs for [`backend_params`].
#[derive(Debug, Clone)]
pub struct ParamsOptions {
    pub release_mode: String,
    pub starting_version: String,
    pub main_system_name: Option<String>,
    pub version_template: String,
}

impl Default for ParamsOptions {
    fn default() -> Self {
        Self {
            release_mode: "debug".to_string(),
            starting_version: "0.0.0.0".to_string(),
            main_system_name: None,
            version_template: "{0}.{1}.{2}".to_string(),
        }
    }
}

impl ParamsOptions {
    pub fn with_main_system(mut self, name: impl Into<String>) -> Self {
        self.main_system_name = Some(name.into());
        self
    }
}

/// Configuration handed to the version manager's Mercurial backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendParams {
    pub repos_path: String,
    pub release_mode: String,
    pub app_name: String,
    pub starting_version: String,
    pub main_system_name: Option<String>,
    pub version_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_version_file: Option<String>,
    pub app_version_file: String,
}

pub fn backend_params(
    versions_root: &Path,
    repos_path: &Path,
    app_name: &str,
    options: ParamsOptions,
) -> BackendParams {
    let root = versions_root.display();

    let (main_version_file, app_version_file) = match &options.main_system_name {
        None => (None, format!("{}/apps/{}/version.py", root, app_name)),
        Some(main) => (
            Some(format!("{}/apps/{}/main_version.py", root, main)),
            format!("{}/apps/{}/{}/version.py", root, main, app_name),
        ),
    };

    BackendParams {
        repos_path: repos_path.display().to_string(),
        release_mode: options.release_mode,
        app_name: app_name.to_string(),
        starting_version: options.starting_version,
        main_system_name: options.main_system_name,
        version_template: options.version_template,
        main_version_file,
        app_version_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungrouped_app() {
        let params = backend_params(
            Path::new("/tmp/t/versions"),
            Path::new("/tmp/t"),
            "svc",
            ParamsOptions::default(),
        );

        assert_eq!(params.app_version_file, "/tmp/t/versions/apps/svc/version.py");
        assert_eq!(params.main_version_file, None);
        assert_eq!(params.repos_path, "/tmp/t");
        assert_eq!(params.release_mode, "debug");
        assert_eq!(params.starting_version, "0.0.0.0");
        assert_eq!(params.version_template, "{0}.{1}.{2}");

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("main_version_file").is_none());
        assert!(json["main_system_name"].is_null());
    }

    #[test]
    fn test_grouped_app() {
        let params = backend_params(
            Path::new("/tmp/t/versions"),
            Path::new("/tmp/t"),
            "svc",
            ParamsOptions::default().with_main_system("core"),
        );

        assert_eq!(
            params.main_version_file.as_deref(),
            Some("/tmp/t/versions/apps/core/main_version.py")
        );
        assert_eq!(
            params.app_version_file,
            "/tmp/t/versions/apps/core/svc/version.py"
        );
        assert_eq!(params.main_system_name.as_deref(), Some("core"));
    }
}
