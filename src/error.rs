// Error handling framework for cfgcheck
use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

/// Main error type for cfgcheck
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("CLI argument error: {0}")]
    Cli(#[from] Box<CliError>),

    #[error("Process execution failed: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("{0}")]
    Match(#[from] Box<MatchError>),

    #[error("Environment bootstrap failed: {0}")]
    Bootstrap(#[from] Box<BootstrapError>),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Registry file and environment configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid YAML syntax: {message}")]
    InvalidYaml {
        message: String,
        line: Option<u32>,
        column: Option<u32>,
        file_path: Option<PathBuf>,
    },

    #[error("Registry file not readable: {path}")]
    Unreadable { path: PathBuf, error: String },

    #[error("Invalid language registry: {message}")]
    InvalidRegistry {
        message: String,
        language: Option<String>,
    },

    #[error("Invalid configuration value for {variable}: {value}")]
    InvalidValue {
        variable: String,
        value: String,
        expected: String,
    },
}

/// CLI argument errors, rejected before any command runs
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid choice: '{name}' (choose from {})", .available.join(", "))]
    UnknownLanguage {
        name: String,
        available: Vec<String>,
    },
}

/// Process execution errors with captured context
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Command not found: {command}")]
    CommandNotFound {
        command: String,
        suggestion: Option<String>,
    },

    #[error("Process spawn failed: {command}: {error}")]
    SpawnFailed { command: String, error: String },

    #[error("Command '{command}' returned non-zero exit status {}", exit_status(.exit_code))]
    NonZeroExit {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Output capture failed: {message}")]
    OutputCaptureFailed { message: String, command: String },
}

fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "(killed by signal)".to_string(), |c| c.to_string())
}

/// Raised when a language sample ran but printed the wrong thing
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Unexpected result for {display_name} ({language}): {output}")]
    Mismatch {
        language: String,
        display_name: String,
        output: String,
    },
}

/// Environment bootstrapper errors
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Python executable {path} not found in environment")]
    InterpreterMissing { path: PathBuf, listing: Vec<String> },

    #[error("Could not remove existing environment {path}: {error}")]
    CleanupFailed { path: PathBuf, error: String },
}

/// Exit codes for both binaries
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INTERRUPTED: i32 = 2;
}

impl CheckError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Cli(_) => exit_codes::USAGE,
            _ => exit_codes::FAILURE,
        }
    }

    /// Short type name shown in debug diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            CheckError::Config(_) => "ConfigError",
            CheckError::Cli(_) => "CliError",
            CheckError::Process(_) => "ProcessError",
            CheckError::Match(_) => "MatchError",
            CheckError::Bootstrap(_) => "BootstrapError",
            CheckError::Io(_) => "IoError",
        }
    }

    /// Create a user-facing error message, terse unless `debug` is set
    pub fn user_message(&self, debug: bool) -> String {
        ErrorFormatter::new(debug).format_error(self)
    }
}

/// Formats errors for the console
pub struct ErrorFormatter {
    debug: bool,
}

impl ErrorFormatter {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn format_error(&self, error: &CheckError) -> String {
        if !self.debug {
            return format!("Failed: {error}");
        }

        let mut output = format!("Failed: {}: {error}", error.kind_name());
        self.add_context(&mut output, error);

        output.push_str("\nTrace:\n");
        output.push_str(&format!("  {error:#?}"));
        let mut source = error.source();
        while let Some(cause) = source {
            output.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }

        output
    }

    fn add_context(&self, output: &mut String, error: &CheckError) {
        match error {
            CheckError::Process(process_err) => match process_err.as_ref() {
                ProcessError::CommandNotFound {
                    suggestion: Some(suggestion),
                    ..
                } => {
                    output.push_str(&format!("\n  Help: {suggestion}"));
                }
                ProcessError::NonZeroExit { stderr, .. } if !stderr.is_empty() => {
                    output.push_str(&format!("\n  Process error: {stderr}"));
                }
                _ => {}
            },
            CheckError::Config(config_err) => {
                if let ConfigError::InvalidYaml {
                    file_path: Some(path),
                    line: Some(line),
                    ..
                } = config_err.as_ref()
                {
                    output.push_str(&format!("\n  --> {}:{}", path.display(), line));
                }
            }
            CheckError::Bootstrap(bootstrap_err) => {
                if let BootstrapError::InterpreterMissing { listing, .. } = bootstrap_err.as_ref() {
                    output.push_str(&format!("\n  Directory has: {}", listing.join(", ")));
                }
            }
            _ => {}
        }
    }
}

// Conversion from serde_yaml::Error to ConfigError
impl From<serde_yaml::Error> for Box<ConfigError> {
    fn from(error: serde_yaml::Error) -> Self {
        let location = error.location();
        Box::new(ConfigError::InvalidYaml {
            message: error.to_string(),
            line: location.as_ref().map(|l| l.line() as u32),
            column: location.as_ref().map(|l| l.column() as u32),
            file_path: None,
        })
    }
}

impl From<ConfigError> for CheckError {
    fn from(error: ConfigError) -> Self {
        CheckError::Config(Box::new(error))
    }
}

impl From<CliError> for CheckError {
    fn from(error: CliError) -> Self {
        CheckError::Cli(Box::new(error))
    }
}

impl From<ProcessError> for CheckError {
    fn from(error: ProcessError) -> Self {
        CheckError::Process(Box::new(error))
    }
}

impl From<MatchError> for CheckError {
    fn from(error: MatchError) -> Self {
        CheckError::Match(Box::new(error))
    }
}

impl From<BootstrapError> for CheckError {
    fn from(error: BootstrapError) -> Self {
        CheckError::Bootstrap(Box::new(error))
    }
}
