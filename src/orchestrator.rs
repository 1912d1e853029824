// Test orchestration: pick languages, run their commands one after another,
// validate the final output, stop at the first failure

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::error::{CliError, ConfigError, Result};
use crate::executable::HostOs;
use crate::language::{LanguageDescriptor, LanguageRegistry};
use crate::process::CommandExecutor;
use crate::user_output::{UserOutput, UserOutputConfig};

/// Result of one language that passed
#[derive(Debug, Clone)]
pub struct LanguageOutcome {
    pub id: String,
    /// Captured stdout of the run command
    pub output: String,
    pub duration: Duration,
}

/// A completed run; only produced when every selected language passed
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub passed: Vec<String>,
}

pub struct TestOrchestrator<'a, E: CommandExecutor> {
    registry: &'a LanguageRegistry,
    base_dir: PathBuf,
    executor: E,
    os: HostOs,
    output: UserOutput,
}

impl<'a, E: CommandExecutor> TestOrchestrator<'a, E> {
    pub fn new(registry: &'a LanguageRegistry, base_dir: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            registry,
            base_dir: base_dir.into(),
            executor,
            os: HostOs::current(),
            output: UserOutput::new(UserOutputConfig::silent()),
        }
    }

    pub fn with_output(mut self, output: UserOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_host_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    /// Resolve requested names to descriptors. Empty selects the whole
    /// registry. Languages flagged `run_last` are moved to the end, keeping
    /// relative order otherwise.
    pub fn select(&self, names: &[String]) -> Result<Vec<&'a LanguageDescriptor>> {
        let mut selected: Vec<&'a LanguageDescriptor> = if names.is_empty() {
            self.registry.iter().collect()
        } else {
            let mut seen = HashSet::new();
            let mut picked = Vec::new();
            for name in names {
                let descriptor =
                    self.registry
                        .get(name)
                        .ok_or_else(|| CliError::UnknownLanguage {
                            name: name.clone(),
                            available: self.registry.ids(),
                        })?;
                if seen.insert(descriptor.id.as_str()) {
                    picked.push(descriptor);
                }
            }
            picked
        };

        // sort_by_key is stable
        selected.sort_by_key(|l| l.run_last);
        Ok(selected)
    }

    /// Run setup commands, then the run command, and validate its output
    pub async fn run_language(&self, language: &LanguageDescriptor) -> Result<LanguageOutcome> {
        let span = tracing::info_span!("language", language = %language.id);
        self.run_language_inner(language).instrument(span).await
    }

    async fn run_language_inner(&self, language: &LanguageDescriptor) -> Result<LanguageOutcome> {
        let start = Instant::now();
        let working_dir = language.working_dir(&self.base_dir);
        language.validate()?;

        for setup in language.setup_commands() {
            let config = setup.to_process_config(self.os, &working_dir)?;
            tracing::debug!(command = %config.command_line(), "Running setup command");
            self.executor.check_output(config).await?;
        }

        let run = language
            .run_command()
            .ok_or_else(|| ConfigError::InvalidRegistry {
                message: format!("{} has no commands", language.id),
                language: Some(language.id.clone()),
            })?;
        let config = run.to_process_config(self.os, &working_dir)?;
        tracing::debug!(command = %config.command_line(), "Running sample");
        let output = self.executor.check_output(config).await?;

        language
            .match_rule()
            .check(&language.id, &language.name, &output)?;

        let duration = start.elapsed();
        tracing::debug!(
            duration_ms = duration.as_millis() as u64,
            "Sample output matched"
        );
        Ok(LanguageOutcome {
            id: language.id.clone(),
            output,
            duration,
        })
    }

    /// Select, then run each language in turn; the first failure aborts the run
    pub async fn run(&self, names: &[String]) -> Result<RunSummary> {
        let selected = self.select(names)?;
        tracing::debug!(
            languages = ?selected.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            "Selected languages"
        );

        let mut summary = RunSummary::default();
        for language in selected {
            self.output.show_language_start(&language.name);
            match self.run_language(language).await {
                Ok(outcome) => {
                    self.output.show_language_passed(&outcome);
                    summary.passed.push(outcome.id);
                }
                Err(e) => {
                    self.output.show_language_failed();
                    return Err(e);
                }
            }
        }

        self.output.show_summary(&summary);
        Ok(summary)
    }
}
