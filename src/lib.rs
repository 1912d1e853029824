// cfgcheck - Library module
// Cross-language test runner for the CFG configuration library samples

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod executable;
pub mod language;
pub mod logging;
pub mod matcher;
pub mod orchestrator;
pub mod process;
pub mod user_output;

// Re-export main types for easier access
pub use bootstrap::{BootstrapConfig, Bootstrapper};
pub use config::RunnerConfig;
pub use error::{
    exit_codes, BootstrapError, CheckError, CliError, ConfigError, MatchError, ProcessError,
    Result,
};
pub use executable::{resolve_executable, HostOs};
pub use language::{CommandTemplate, LanguageDescriptor, LanguageRegistry};
pub use logging::{ColorConfig, LogConfig, LogDestination, LogFormat};
pub use matcher::{CheckKind, MatchCheck, MatchRule};
pub use orchestrator::{LanguageOutcome, RunSummary, TestOrchestrator};
pub use process::{CommandExecutor, ProcessConfig, ProcessManager, ProcessResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Build information (set by build script)
pub const BUILD_DATE: &str = env!("BUILD_DATE");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
pub const RUST_VERSION: &str = env!("RUST_VERSION");

/// Version string with build information, shown by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit: ",
    env!("GIT_COMMIT"),
    ", built: ",
    env!("BUILD_DATE"),
    ", rustc: ",
    env!("RUST_VERSION"),
    ")"
);
