// Environment bootstrapper: fresh Python virtual environment, one pip
// package, then a script run inside that environment

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};
use crate::executable::{resolve_executable, HostOs};
use crate::process::{CommandExecutor, ProcessConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Interpreter used to create the environment
    pub python: String,
    /// Removed and recreated on every run
    pub env_dir: PathBuf,
    pub package: String,
    pub script: PathBuf,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            env_dir: PathBuf::from("env"),
            package: "config".to_string(),
            script: PathBuf::from("prog.py"),
        }
    }
}

pub struct Bootstrapper<E: CommandExecutor> {
    config: BootstrapConfig,
    executor: E,
    os: HostOs,
}

impl<E: CommandExecutor> Bootstrapper<E> {
    pub fn new(config: BootstrapConfig, executor: E) -> Self {
        Self {
            config,
            executor,
            os: HostOs::current(),
        }
    }

    pub fn with_host_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    pub async fn run(&self) -> Result<()> {
        let env_path = if self.config.env_dir.is_absolute() {
            self.config.env_dir.clone()
        } else {
            std::env::current_dir()?.join(&self.config.env_dir)
        };

        self.remove_existing(&env_path).await?;

        tracing::debug!("Creating venv at {}", env_path.display());
        let create = ProcessConfig::new(resolve_executable(&self.config.python, self.os))
            .with_args(vec![
                "-m".into(),
                "venv".into(),
                env_path.clone().into_os_string(),
            ]);
        self.executor.check_output(create).await?;
        tracing::debug!("Created venv at {}", env_path.display());

        let python = self.locate_interpreter(&env_path).await?;

        let install = ProcessConfig::new(python.to_string_lossy())
            .with_args(vec!["-m", "pip", "install", self.config.package.as_str()]);
        tracing::debug!("About to run: '{}'", install.command_line());
        self.executor.check_output(install).await?;

        let run = ProcessConfig::new(python.to_string_lossy())
            .with_args(vec![self.config.script.clone().into_os_string()])
            .with_capture_output(false);
        tracing::debug!("About to run: '{}'", run.command_line());
        let result = self.executor.execute(run.clone()).await?;
        result.into_output(&run)?;

        Ok(())
    }

    async fn remove_existing(&self, env_path: &Path) -> Result<()> {
        if !tokio::fs::try_exists(env_path).await.unwrap_or(false) {
            return Ok(());
        }

        tracing::debug!("Removing existing environment at {}", env_path.display());
        tokio::fs::remove_dir_all(env_path).await.map_err(|e| {
            BootstrapError::CleanupFailed {
                path: env_path.to_path_buf(),
                error: e.to_string(),
            }
            .into()
        })
    }

    /// Interpreter inside the environment. Windows layouts normally use
    /// `Scripts`, but some distributions (MSYS2) create `bin`.
    pub async fn locate_interpreter(&self, env_path: &Path) -> Result<PathBuf> {
        let python = match self.os {
            HostOs::Posix => env_path.join("bin").join("python"),
            HostOs::Windows => {
                let scripts = env_path.join("Scripts");
                let dir = if tokio::fs::try_exists(&scripts).await.unwrap_or(false) {
                    scripts
                } else {
                    env_path.join("bin")
                };
                dir.join("python.exe")
            }
        };

        if tokio::fs::try_exists(&python).await.unwrap_or(false) {
            return Ok(python);
        }

        let dir = python.parent().unwrap_or(env_path);
        let listing = list_dir(dir).await;
        tracing::debug!(
            "Executable {} not found, dir has: {:?}",
            python.display(),
            listing
        );
        Err(BootstrapError::InterpreterMissing {
            path: python,
            listing,
        }
        .into())
    }
}

async fn list_dir(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    names
}
