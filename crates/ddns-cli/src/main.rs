// # ddns - dynamic DNS client
//
// Thin integration layer: reads configuration, parses the command, and hands
// one operation to the ddns-core executor with the RFC 2136 provider.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Required
// - `DDNS_KEY_NAME`: TSIG key name
// - `DDNS_KEY_SECRET`: TSIG secret (base64)
// - `DDNS_DOMAIN`: Zone to update
// - `DDNS_SERVER`: Server accepting UPDATE and AXFR
//
// ### Optional
// - `DDNS_KEY_ALGORITHM`: hmac-sha256 (default), hmac-sha384, hmac-sha512
// - `DDNS_SERVER_PORT`: Server port (default 53)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn (default), error
// - `DDNS_MODE`: live (default) or dry-run
//
// ## Example
//
// ```bash
// export DDNS_KEY_NAME=ddns-key
// export DDNS_KEY_SECRET=c2VjcmV0
// export DDNS_DOMAIN=example.com
// export DDNS_SERVER=ns1.example.com
//
// ddns add -n host1 -t 120 -i 10.0.0.5
// ddns get
// ddns delete -n host1
// ```

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use ddns_core::zone::{render_json, render_table};
use ddns_core::{DdnsConfig, Executor, InvocationContext, Outcome, UpdateResult};
use ddns_provider_rfc2136::Rfc2136Provider;
use std::io::Write;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration or input error (nothing was sent)
/// - 2: Runtime error (transport or server rejection)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration error or invalid input
    ConfigError = 1,
    /// Runtime error (network, timeout, rejected by server)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Usage errors and --help are handled by clap before any configuration
    let cli = Cli::parse();

    // Load configuration from environment
    let config = match DdnsConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = init_tracing(&config.log_level) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let context = match InvocationContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    debug!("Configuration loaded: {:?}", config);

    // One request per invocation: a current-thread runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(&config, &context, &cli.command));

    match result {
        Ok(()) => DdnsExitCode::Success,
        Err(e) => exit_code_for(&e),
    }
    .into()
}

/// Initialize tracing on stderr, leaving stdout for command output
fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Run the command
async fn run(config: &DdnsConfig, context: &InvocationContext, command: &Commands) -> Result<()> {
    let provider = Rfc2136Provider::from_context(context, config.is_dry_run())?;
    let executor = Executor::new(context, &provider);

    match executor.execute(command.operation()).await? {
        Outcome::Updated(UpdateResult::Applied { response_code }) => {
            info!("Update applied ({})", response_code);
        }
        Outcome::Updated(UpdateResult::Skipped) => {
            info!("Dry-run: update not sent");
        }
        Outcome::Listing(entries) => {
            let output = match command {
                Commands::Get(args) if args.json => render_json(&entries)? + "\n",
                _ => render_table(&entries),
            };

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Report a failed run and pick its exit code
///
/// Input errors print their message verbatim (e.g. `Invalid IP address.`),
/// everything else goes through the error log.
fn exit_code_for(err: &anyhow::Error) -> DdnsExitCode {
    match err.downcast_ref::<ddns_core::Error>() {
        Some(e) if e.is_usage() => {
            eprintln!("{}", e);
            DdnsExitCode::ConfigError
        }
        // every accepted log level includes errors
        _ => {
            error!("{:#}", err);
            DdnsExitCode::RuntimeError
        }
    }
}
