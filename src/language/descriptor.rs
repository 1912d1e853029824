// Language descriptors: how to build, run and validate one sample project

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::executable::{resolve_executable, HostOs};
use crate::matcher::MatchRule;
use crate::process::ProcessConfig;

/// One command of a descriptor, either a whitespace-separated line or an
/// already tokenised argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandTemplate {
    Line(String),
    Argv(Vec<String>),
}

impl CommandTemplate {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            CommandTemplate::Line(line) => line.split_whitespace().map(String::from).collect(),
            CommandTemplate::Argv(argv) => argv.clone(),
        }
    }

    /// Build a process configuration, resolving the program name for `os`
    pub fn to_process_config(&self, os: HostOs, working_dir: &Path) -> Result<ProcessConfig> {
        let mut tokens = self.tokens().into_iter();
        let program = tokens.next().ok_or_else(|| ConfigError::InvalidRegistry {
            message: "empty command".to_string(),
            language: None,
        })?;

        Ok(ProcessConfig::new(resolve_executable(&program, os))
            .with_args(tokens.collect::<Vec<String>>())
            .with_working_dir(working_dir))
    }
}

impl From<&str> for CommandTemplate {
    fn from(line: &str) -> Self {
        CommandTemplate::Line(line.to_string())
    }
}

/// Configuration record for one target-language sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDescriptor {
    pub id: String,
    pub name: String,
    /// Subdirectory of the base directory; defaults to `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Setup commands followed by the run command
    pub commands: Vec<CommandTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<MatchRule>,
    /// Move this language behind all others when ordering a run
    #[serde(default)]
    pub run_last: bool,
}

impl LanguageDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dir: None,
            commands: Vec::new(),
            expect: None,
            run_last: false,
        }
    }

    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<CommandTemplate>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn with_rule(mut self, rule: MatchRule) -> Self {
        self.expect = Some(rule);
        self
    }

    pub fn with_run_last(mut self, run_last: bool) -> Self {
        self.run_last = run_last;
        self
    }

    pub fn working_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.dir.as_deref().unwrap_or(&self.id))
    }

    pub fn match_rule(&self) -> MatchRule {
        self.expect.clone().unwrap_or_default()
    }

    /// Commands run only for their side effects
    pub fn setup_commands(&self) -> &[CommandTemplate] {
        match self.commands.split_last() {
            Some((_, setup)) => setup,
            None => &[],
        }
    }

    /// The command whose output is validated
    pub fn run_command(&self) -> Option<&CommandTemplate> {
        self.commands.last()
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| ConfigError::InvalidRegistry {
            message,
            language: Some(self.id.clone()),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("language id must not be empty".to_string()).into());
        }
        if self.commands.is_empty() {
            return Err(invalid(format!("{} has no commands", self.id)).into());
        }
        if let Some(index) = self.commands.iter().position(|c| c.tokens().is_empty()) {
            return Err(invalid(format!("{} command #{} is empty", self.id, index + 1)).into());
        }
        Ok(())
    }
}
