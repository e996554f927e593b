//! dataproxy-console
//!
//! Command-line front end for the proxy test and account activation flows.
//! Snapshots are printed to stdout as JSON; logs go to stderr.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dataproxy_console::activation::{ActivationController, PageLocator};
use dataproxy_console::config::{apply_overrides, load_config, ClientConfig};
use dataproxy_console::observability::logging;
use dataproxy_console::proxy::{ProxyQuery, ProxyTestController, Region};
use dataproxy_console::{HttpDispatcher, LifecycleState};

#[derive(Parser)]
#[command(name = "dataproxy-console")]
#[command(about = "Operator console for the multi-region data proxy", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the proxy API base URL.
    #[arg(long)]
    proxy_base: Option<String>,

    /// Override the account API base URL.
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a test request through the proxy
    Fetch {
        /// Target URL the proxy should fetch.
        #[arg(short, long)]
        url: String,

        /// Proxy region code.
        #[arg(short, long, default_value = "us-east")]
        region: String,

        /// Proxy API key.
        #[arg(short = 'k', long, env = "DATAPROXY_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Write a sandboxed HTML preview of the result here.
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
    /// Activate an account; reads the new password and its confirmation from stdin
    Activate {
        /// Activation link received out of band (must carry `?token=`).
        #[arg(long)]
        page_url: String,
    },
    /// List proxy region codes
    Regions,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(status: LifecycleState) -> ExitCode {
    match status {
        LifecycleState::Succeeded => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Read the password and its confirmation, one per line.
fn read_passwords() -> io::Result<(String, String)> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut next = || -> io::Result<String> {
        let line = lines.next().transpose()?.unwrap_or_default();
        Ok(line.trim_end_matches('\r').to_string())
    };
    let new_password = next()?;
    let confirm_password = next()?;
    Ok((new_password, confirm_password))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    let config = apply_overrides(config, cli.proxy_base, cli.api_base)?;

    logging::init(&config.observability);
    tracing::debug!(
        proxy_base = %config.endpoints.proxy_base,
        api_base = %config.endpoints.api_base,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Regions => {
            for region in Region::ALL {
                println!("{}", region);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fetch {
            url,
            region,
            api_key,
            html_out,
        } => {
            let dispatcher = HttpDispatcher::new(&config.timeouts)?;
            let controller = ProxyTestController::from_config(dispatcher, &config);

            controller.run_test(&ProxyQuery::new(url, region, api_key)).await;
            let snapshot = controller.snapshot();
            print_json(&snapshot)?;

            if let Some(path) = html_out {
                match snapshot.result.as_ref().and_then(|r| r.html_artifact.as_ref()) {
                    Some(artifact) => {
                        fs::write(&path, artifact.sandboxed_preview())?;
                        tracing::info!(path = %path.display(), "Wrote sandboxed HTML preview");
                    }
                    None => tracing::warn!("No HTML artifact in response, preview not written"),
                }
            }

            Ok(exit_code(snapshot.status))
        }
        Commands::Activate { page_url } => {
            let locator = PageLocator::parse(&page_url)?;
            let (new_password, confirm_password) = read_passwords()?;

            let dispatcher = HttpDispatcher::new(&config.timeouts)?;
            let controller = ActivationController::from_config(dispatcher, locator, &config);
            controller.set_new_password(new_password);
            controller.set_confirm_password(confirm_password);

            controller.activate().await;
            let snapshot = controller.snapshot();
            print_json(&snapshot)?;

            Ok(exit_code(snapshot.status))
        }
    }
}
