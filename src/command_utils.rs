use crate::error::LayoutError;
use anyhow::Result;
use log::debug;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Execute a command inside `cwd` with debug logging.
///
/// The raw [`Output`] is returned whatever the exit status; callers that
/// need success use [`run_checked`].
pub fn execute_command<S: AsRef<OsStr>>(cmd: &str, args: &[S], cwd: &Path) -> Result<Output> {
    let line = render(cmd, args);
    debug!("Executing command: {} (in {})", line, cwd.display());

    let output = Command::new(cmd)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(LayoutError::from)?;

    if output.status.success() {
        debug!("Command succeeded: {}", line);
    } else {
        debug!(
            "Command failed: {} (exit code: {:?})",
            line,
            output.status.code()
        );
    }
    if !output.stdout.is_empty() {
        debug!("stdout: {}", String::from_utf8_lossy(&output.stdout).trim());
    }
    if !output.stderr.is_empty() {
        debug!("stderr: {}", String::from_utf8_lossy(&output.stderr).trim());
    }

    Ok(output)
}

/// Like [`execute_command`], but a non-zero exit is turned into
/// [`LayoutError::VcsCommandFailed`]. Returns trimmed stdout.
pub fn run_checked<S: AsRef<OsStr>>(cmd: &str, args: &[S], cwd: &Path) -> Result<String> {
    let output = execute_command(cmd, args, cwd)?;

    if !output.status.success() {
        return Err(failure(cmd, args, &output).into());
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

pub(crate) fn failure<S: AsRef<OsStr>>(cmd: &str, args: &[S], output: &Output) -> LayoutError {
    LayoutError::VcsCommandFailed {
        message: format!(
            "{} exited with {:?}: {}",
            render(cmd, args),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ),
    }
}

fn render<S: AsRef<OsStr>>(cmd: &str, args: &[S]) -> String {
    let mut line = cmd.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}
