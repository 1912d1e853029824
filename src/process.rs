// Process management for running sample build and run commands: one blocking
// child at a time, output capture, and failure diagnostics

use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use crate::diagnostics;
use crate::error::{ProcessError, Result};
use crate::executable::HostOs;

/// Upper bound on paths reported by the launch-failure scan
const DIAGNOSTIC_SCAN_LIMIT: usize = 20;

/// Process execution configuration
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub command: String,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
    pub environment: HashMap<String, String>,
    pub capture_output: bool,
}

impl ProcessConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
            environment: HashMap::new(),
            capture_output: true,
        }
    }

    pub fn with_args(mut self, args: Vec<impl Into<OsString>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_environment(mut self, env: HashMap<String, String>) -> Self {
        self.environment = env;
        self
    }

    pub fn with_capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// Space-joined command line, for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Process execution result
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub duration: Duration,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Decoded stdout on success; otherwise log both streams and fail with
    /// the child's exit code
    pub fn into_output(self, config: &ProcessConfig) -> Result<String> {
        if self.success() {
            return Ok(self.stdout());
        }

        let stdout = self.stdout();
        let stderr = self.stderr();
        tracing::debug!(
            command = %config.command_line(),
            exit_code = ?self.exit_code,
            "Command failed"
        );
        if !stdout.is_empty() {
            eprintln!("{stdout}");
        }
        if !stderr.is_empty() {
            eprintln!("{stderr}");
        }

        Err(ProcessError::NonZeroExit {
            command: config.command_line(),
            exit_code: self.exit_code,
            stdout,
            stderr,
        }
        .into())
    }
}

/// Something that can run a [`ProcessConfig`] to completion
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Spawn the command and wait for it; a non-zero exit is not an error here
    async fn execute(&self, config: ProcessConfig) -> Result<ProcessResult>;

    /// Run the command and return its stdout, failing on a non-zero exit
    async fn check_output(&self, config: ProcessConfig) -> Result<String> {
        let result = self.execute(config.clone()).await?;
        result.into_output(&config)
    }
}

/// Runs real child processes
#[derive(Debug, Clone)]
pub struct ProcessManager {
    os: HostOs,
}

impl ProcessManager {
    pub fn new() -> Self {
        Self {
            os: HostOs::current(),
        }
    }

    fn not_found(&self, config: &ProcessConfig) -> ProcessError {
        let suggestion = match which::which(&config.command) {
            Ok(path) => {
                tracing::debug!(
                    command = %config.command,
                    resolved = %path.display(),
                    "PATH lookup"
                );
                None
            }
            Err(_) => Some(format!(
                "Make sure '{}' is installed and on PATH",
                config.command
            )),
        };

        if self.os == HostOs::Windows {
            self.report_candidates(config);
        }

        ProcessError::CommandNotFound {
            command: config.command.clone(),
            suggestion,
        }
    }

    fn report_candidates(&self, config: &ProcessConfig) {
        let start = config
            .working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        let root = diagnostics::drive_root(&start);
        let file_name = Path::new(&config.command)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.command.clone());

        tracing::warn!(
            command = %config.command,
            root = %root.display(),
            "Executable not found, scanning drive for candidates"
        );
        for candidate in diagnostics::scan_for_file(&root, &file_name, DIAGNOSTIC_SCAN_LIMIT) {
            tracing::warn!(candidate = %candidate.display(), "Found file with same name");
        }
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ProcessManager {
    async fn execute(&self, config: ProcessConfig) -> Result<ProcessResult> {
        use tokio::io::AsyncReadExt;
        use tokio::process::Command;

        let start_time = Instant::now();

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);

        if let Some(ref dir) = config.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &config.environment {
            cmd.env(key, value);
        }

        if config.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);

        tracing::debug!(
            command = %config.command_line(),
            working_dir = ?config.working_dir,
            "Running command"
        );

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                self.not_found(&config)
            } else {
                ProcessError::SpawnFailed {
                    command: config.command_line(),
                    error: e.to_string(),
                }
            }
        })?;

        let mut stdout_data = Vec::new();
        let mut stderr_data = Vec::new();

        if config.capture_output {
            let capture_failed =
                |stream: &str, e: std::io::Error| ProcessError::OutputCaptureFailed {
                    message: format!("Failed to read {stream}: {e}"),
                    command: config.command_line(),
                };

            // Drain both pipes together so a chatty stderr cannot block stdout
            let stdout = child.stdout.take();
            let stderr = child.stderr.take();
            let (out, err) = tokio::join!(
                async {
                    match stdout {
                        Some(mut pipe) => pipe.read_to_end(&mut stdout_data).await.map(|_| ()),
                        None => Ok(()),
                    }
                },
                async {
                    match stderr {
                        Some(mut pipe) => pipe.read_to_end(&mut stderr_data).await.map(|_| ()),
                        None => Ok(()),
                    }
                }
            );
            out.map_err(|e| capture_failed("stdout", e))?;
            err.map_err(|e| capture_failed("stderr", e))?;
        }

        let exit_status = child.wait().await.map_err(|e| ProcessError::SpawnFailed {
            command: config.command_line(),
            error: format!("Failed to wait for process: {e}"),
        })?;

        let duration = start_time.elapsed();
        tracing::debug!(
            command = %config.command,
            exit_code = ?exit_status.code(),
            duration_ms = duration.as_millis() as u64,
            "Command finished"
        );

        Ok(ProcessResult {
            exit_code: exit_status.code(),
            stdout: stdout_data,
            stderr: stderr_data,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_config_builder() {
        let config = ProcessConfig::new("go")
            .with_args(vec!["run", "main.go"])
            .with_working_dir("go")
            .with_capture_output(false);

        assert_eq!(config.command, "go");
        assert_eq!(config.args.len(), 2);
        assert_eq!(config.working_dir, Some(PathBuf::from("go")));
        assert!(!config.capture_output);
        assert_eq!(config.command_line(), "go run main.go");
    }

    #[test]
    fn test_into_output_success() {
        let config = ProcessConfig::new("cargo").with_args(vec!["run"]);
        let result = ProcessResult {
            exit_code: Some(0),
            stdout: b"Hello, world!\n".to_vec(),
            stderr: b"Compiling\n".to_vec(),
            duration: Duration::from_millis(5),
        };
        assert_eq!(result.into_output(&config).unwrap(), "Hello, world!\n");
    }

    #[test]
    fn test_into_output_failure_keeps_exit_code() {
        let config = ProcessConfig::new("cargo").with_args(vec!["run"]);
        let result = ProcessResult {
            exit_code: Some(101),
            stdout: Vec::new(),
            stderr: b"error[E0425]".to_vec(),
            duration: Duration::from_millis(5),
        };

        match result.into_output(&config) {
            Err(crate::error::CheckError::Process(err)) => match *err {
                ProcessError::NonZeroExit {
                    exit_code,
                    ref command,
                    ref stderr,
                    ..
                } => {
                    assert_eq!(exit_code, Some(101));
                    assert_eq!(command, "cargo run");
                    assert_eq!(stderr, "error[E0425]");
                }
                ref other => panic!("Expected NonZeroExit, got {other:?}"),
            },
            other => panic!("Expected process error, got {other:?}"),
        }
    }

    #[test]
    fn test_signal_termination_is_failure() {
        let result = ProcessResult {
            exit_code: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            duration: Duration::ZERO,
        };
        assert!(!result.success());
    }
}
