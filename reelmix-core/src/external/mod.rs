//! Interactions with external command-line tools.
//!
//! Everything substantive in this system is delegated to yt-dlp, ffmpeg and
//! exiftool. This module owns the narrow capability the orchestrators use to
//! invoke them: run a command, get back the exit status and captured output.
//! Providing a fake [`CommandRunner`] lets the pipelines run under test
//! without any binary present.

use std::io;
use std::process::{Command, Stdio};

use log::{debug, error};

use crate::error::{CoreError, CoreResult};

pub mod exiftool;
pub mod ffmpeg;
pub mod ytdlp;

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Capability to run an external media command to completion.
///
/// `Err` is reserved for failures to start the process at all; a non-zero
/// exit comes back as a successful `run` whose output the caller interprets.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CommandOutput>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CommandOutput> {
        debug!("Running: {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                error!("External tool '{}' not found", program);
                CoreError::DependencyNotFound(program.to_string())
            } else {
                error!("Failed to start '{}': {}", program, e);
                CoreError::CommandStart(program.to_string(), e)
            }
        })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Checks that a required external command is available and executable by
/// probing it with its version flag.
pub fn check_dependency(cmd_name: &str, version_arg: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg(version_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::CommandStart(cmd_name.to_string(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_runner_captures_stdout() {
        let output = SystemRunner.run("echo", &["hello".to_string()]).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_system_runner_missing_binary() {
        let result = SystemRunner.run("surely-no-such-tool-42", &[]);
        match result {
            Err(CoreError::DependencyNotFound(name)) => {
                assert_eq!(name, "surely-no-such-tool-42");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_dependency_missing() {
        let result = check_dependency("surely-no-such-tool-42", "-version");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
