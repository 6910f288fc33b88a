use repo_layout::{logging, AppLayout};
use std::fs;
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// `hg` and `git` both runnable. Tests that need them return early otherwise,
/// after saying so on stderr.
pub fn vcs_available() -> bool {
    let missing: Vec<&str> = ["hg", "git"]
        .into_iter()
        .filter(|bin| {
            !StdCommand::new(bin)
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .collect();

    if !missing.is_empty() {
        eprintln!(
            "SKIPPED {}: {} not available",
            std::thread::current().name().unwrap_or("test"),
            missing.join(", ")
        );
    }
    missing.is_empty()
}

/// Per-test layout: `versions/` and `remote_versions/` inside `temp_dir`.
#[allow(dead_code)]
pub fn setup_layout(temp_dir: &TempDir) -> AppLayout {
    logging::init();

    let versions = temp_dir.path().join("versions");
    let remote_versions = temp_dir.path().join("remote_versions");
    fs::create_dir(&versions).unwrap();
    fs::create_dir(&remote_versions).unwrap();

    AppLayout::new(&versions, &remote_versions).expect("Failed to set up layout")
}

#[allow(dead_code)]
pub fn hg_last_description(repo: &std::path::Path) -> String {
    let output = StdCommand::new("hg")
        .args(["log", "-l", "1", "--template", "{desc}"])
        .current_dir(repo)
        .output()
        .expect("Failed to run hg log");
    String::from_utf8(output.stdout).unwrap()
}

#[allow(dead_code)]
pub fn git_last_subject(repo: &std::path::Path) -> String {
    let output = StdCommand::new("git")
        .args(["log", "-1", "--format=%s"])
        .current_dir(repo)
        .output()
        .expect("Failed to run git log");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
