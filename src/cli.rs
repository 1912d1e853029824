// CLI interface for cfgcheck using clap
use clap::Parser;
use std::path::PathBuf;

use crate::bootstrap::{BootstrapConfig, Bootstrapper};
use crate::config::RunnerConfig;
use crate::error::{exit_codes, Result};
use crate::logging::{init_logging, LogConfig};
use crate::orchestrator::TestOrchestrator;
use crate::process::ProcessManager;
use crate::user_output::{UserOutput, UserOutputConfig};

#[derive(Parser, Debug)]
#[command(
    name = "cfgcheck",
    about = "cfgcheck - Cross-language sample runner for the CFG configuration library",
    version = crate::VERSION,
    long_version = crate::LONG_VERSION,
    long_about = "Builds and runs the CFG sample project of each language in its own \
                  subdirectory and checks the last line it prints.\n\n\
                  Built-in languages: dlang, dotnet, go, js, jvm, python, ruby, rust, \
                  elixir, nim, dart.\n\n\
                  Set PY_DEBUG for verbose failure diagnostics."
)]
pub struct Cli {
    /// Languages to test (all when omitted)
    #[arg(value_name = "LANGUAGE")]
    pub languages: Vec<String>,
}

impl Cli {
    pub async fn run(&self) -> Result<i32> {
        let config = RunnerConfig::from_env()?;
        self.run_with_config(&config).await
    }

    pub async fn run_with_config(&self, config: &RunnerConfig) -> Result<i32> {
        if let Err(e) = init_logging(LogConfig::for_runner(
            config.debug,
            config.log_format.clone(),
        )) {
            eprintln!("Failed to initialize logging: {e}");
        }

        let registry = config.load_registry()?;
        let output = UserOutput::new(UserOutputConfig::new(config.debug, false));
        let orchestrator = TestOrchestrator::new(&registry, &config.base_dir, ProcessManager::new())
            .with_output(output);

        orchestrator.run(&self.languages).await?;
        Ok(exit_codes::SUCCESS)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cfgcheck-bootstrap",
    about = "Create a fresh Python virtual environment, install one package into it \
             and run a script there",
    version = crate::VERSION
)]
pub struct BootstrapCli {
    /// Interpreter used to create the environment
    #[arg(long, default_value = "python3")]
    pub python: String,

    /// Environment directory, removed first if it exists
    #[arg(long, default_value = "env")]
    pub env_dir: PathBuf,

    /// Package to pip install
    #[arg(long, default_value = "config")]
    pub package: String,

    /// Script to run with the environment's interpreter
    #[arg(long, default_value = "prog.py")]
    pub script: PathBuf,

    /// Log file, truncated on every run
    #[arg(long, default_value = "app.log")]
    pub log_file: PathBuf,
}

impl BootstrapCli {
    pub fn to_config(&self) -> BootstrapConfig {
        BootstrapConfig {
            python: self.python.clone(),
            env_dir: self.env_dir.clone(),
            package: self.package.clone(),
            script: self.script.clone(),
        }
    }

    pub async fn run(&self) -> Result<i32> {
        if let Err(e) = init_logging(LogConfig::for_bootstrap(self.log_file.clone())) {
            eprintln!("Failed to initialize logging: {e}");
        }

        Bootstrapper::new(self.to_config(), ProcessManager::new())
            .run()
            .await?;
        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;
    use clap::CommandFactory;

    #[test]
    fn test_cli_no_languages() {
        let cli = Cli::try_parse_from(["cfgcheck"]).unwrap();
        assert!(cli.languages.is_empty());
    }

    #[test]
    fn test_cli_positional_languages() {
        let cli = Cli::try_parse_from(["cfgcheck", "rust", "python"]).unwrap();
        assert_eq!(cli.languages, vec!["rust", "python"]);
    }

    #[test]
    fn test_cli_rejects_flags() {
        assert!(Cli::try_parse_from(["cfgcheck", "--all"]).is_err());
    }

    #[test]
    fn test_cli_parsing_help_and_version() {
        // clap reports these as errors with exit code 0
        assert!(Cli::try_parse_from(["cfgcheck", "--help"]).is_err());
        assert!(Cli::try_parse_from(["cfgcheck", "--version"]).is_err());
    }

    #[test]
    fn test_long_help_lists_builtin_languages() {
        let help = Cli::command().render_long_help().to_string();
        for id in LanguageRegistry::builtin().ids() {
            assert!(help.contains(&id), "help does not mention {id}");
        }
    }

    #[test]
    fn test_bootstrap_defaults() {
        let cli = BootstrapCli::try_parse_from(["cfgcheck-bootstrap"]).unwrap();
        assert_eq!(cli.to_config(), BootstrapConfig::default());
        assert_eq!(cli.log_file, PathBuf::from("app.log"));
    }

    #[test]
    fn test_bootstrap_overrides() {
        let cli = BootstrapCli::try_parse_from([
            "cfgcheck-bootstrap",
            "--package",
            "requests",
            "--script",
            "main.py",
            "--env-dir",
            ".venv",
        ])
        .unwrap();
        let config = cli.to_config();
        assert_eq!(config.package, "requests");
        assert_eq!(config.script, PathBuf::from("main.py"));
        assert_eq!(config.env_dir, PathBuf::from(".venv"));
    }
}
