// cfgcheck - Main entry point
use cfgcheck::cli::Cli;
use cfgcheck::config::DEBUG_ENV;
use cfgcheck::error::exit_codes;
use clap::Parser;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let debug = std::env::var_os(DEBUG_ENV).is_some();

    let exit_code = tokio::select! {
        result = cli.run() => match result {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!(error_type = e.kind_name(), error = %e, "Run aborted");
                eprintln!("{}", e.user_message(debug));
                e.exit_code()
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => exit_codes::INTERRUPTED,
    };

    process::exit(exit_code);
}
