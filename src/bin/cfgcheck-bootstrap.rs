// cfgcheck-bootstrap - isolated Python environment setup
use anyhow::Context;
use cfgcheck::cli::BootstrapCli;
use cfgcheck::config::DEBUG_ENV;
use cfgcheck::error::exit_codes;
use clap::Parser;
use std::process;

async fn run(cli: &BootstrapCli) -> anyhow::Result<i32> {
    cli.run()
        .await
        .with_context(|| format!("bootstrapping environment in {}", cli.env_dir.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = BootstrapCli::parse();
    let debug = std::env::var_os(DEBUG_ENV).is_some();

    let exit_code = tokio::select! {
        result = run(&cli) => match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!("Failed: {e:#}");
                if debug {
                    eprintln!("Failed: {e:?}");
                } else {
                    eprintln!("Failed: {e:#}");
                }
                exit_codes::FAILURE
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => exit_codes::INTERRUPTED,
    };

    process::exit(exit_code);
}
