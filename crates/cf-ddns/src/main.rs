// # cf-ddns - one-shot Cloudflare DDNS reconciler
//
// This binary is a thin integration layer over ddns-core. It is responsible
// for:
// 1. Reading configuration from flags with environment fallback
// 2. Initializing logging and the runtime
// 3. Wiring the observer, resolver and updater into a DdnsEngine
// 4. Running a single reconciliation pass and mapping the result to an
//    exit code
//
// Scheduling is left to cron, systemd timers or similar.
//
// ## Configuration
//
// - `--api-token` / `CLOUDFLARE_API_TOKEN`: API token (required)
// - `--zone-id` / `CLOUDFLARE_ZONE_ID`: Zone ID (required)
// - `--dns-record-id` / `CLOUDFLARE_DNS_RECORD_ID`: Record ID (required)
// - `--dns-record-name` / `CLOUDFLARE_DNS_RECORD_NAME`: Record name (required)
// - `--dry-run` / `DDNS_DRY_RUN`: Log the update instead of sending it
// - `--log-level` / `DDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// export CLOUDFLARE_ZONE_ID=your_zone_id
// export CLOUDFLARE_DNS_RECORD_ID=your_record_id
// export CLOUDFLARE_DNS_RECORD_NAME=home.example.com
//
// cf-ddns
// ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use ddns_core::config::{
    DEFAULT_API_BASE, DEFAULT_DOH_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRACE_URL,
};
use ddns_core::{DdnsConfig, DdnsEngine, EndpointConfig, PassOutcome};
use ddns_ip_http::HttpAddressObserver;
use ddns_provider_cloudflare::CloudflareProvider;
use ddns_resolver_doh::DohResolver;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Pass finished (no change, updated, or dry-run)
/// - 1: Configuration or startup error
/// - 2: Pass failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Pass finished normally
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Pass failed at some stage
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Keep a Cloudflare A record in sync with this host's public IPv4 address
#[derive(Parser)]
#[command(name = "cf-ddns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cloudflare API token
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Cloudflare zone ID
    #[arg(long, env = "CLOUDFLARE_ZONE_ID")]
    zone_id: Option<String>,

    /// Cloudflare DNS record ID
    #[arg(long, env = "CLOUDFLARE_DNS_RECORD_ID")]
    dns_record_id: Option<String>,

    /// Cloudflare DNS record name
    #[arg(long, env = "CLOUDFLARE_DNS_RECORD_NAME")]
    dns_record_name: Option<String>,

    /// Address-echo endpoint
    #[arg(long, env = "DDNS_TRACE_URL", default_value = DEFAULT_TRACE_URL)]
    trace_url: String,

    /// DNS-over-HTTPS endpoint
    #[arg(long, env = "DDNS_DOH_URL", default_value = DEFAULT_DOH_URL)]
    doh_url: String,

    /// Cloudflare API base URL
    #[arg(long, env = "DDNS_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "DDNS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log the intended update instead of sending it
    #[arg(long, env = "DDNS_DRY_RUN")]
    dry_run: bool,

    /// Log level
    #[arg(long, env = "DDNS_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

impl Cli {
    /// Build the core configuration; absent values become empty strings
    /// and are rejected by validation
    fn into_config(self) -> DdnsConfig {
        DdnsConfig::new(
            self.api_token.unwrap_or_default(),
            self.zone_id.unwrap_or_default(),
            self.dns_record_id.unwrap_or_default(),
            self.dns_record_name.unwrap_or_default(),
        )
        .with_endpoints(EndpointConfig {
            trace_url: self.trace_url,
            doh_url: self.doh_url,
            api_base: self.api_base,
            timeout_secs: self.timeout_secs,
        })
        .with_dry_run(self.dry_run)
    }
}

fn print_usage_hint() {
    eprintln!("Please set all the required environment vars or provide them as command line args:");
    eprintln!("\t--api-token <API_TOKEN>\t\t\tor set CLOUDFLARE_API_TOKEN");
    eprintln!("\t--zone-id <ZONE_ID>\t\t\tor set CLOUDFLARE_ZONE_ID");
    eprintln!("\t--dns-record-id <DNS_RECORD_ID>\t\tor set CLOUDFLARE_DNS_RECORD_ID");
    eprintln!("\t--dns-record-name <DNS_RECORD_NAME>\tor set CLOUDFLARE_DNS_RECORD_NAME");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = Level::from(cli.log_level);
    let config = cli.into_config();

    // Validate configuration before any network activity
    if let Err(e) = config.validate() {
        eprintln!("ERROR: {}", e);
        print_usage_hint();
        return DdnsExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    if config.dry_run {
        warn!("Running in DRY-RUN mode - no changes will be made");
    }

    // Every step is awaited in turn, so a single-threaded runtime suffices
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

    let result = rt.block_on(async {
        match run_pass(&config).await {
            Ok(outcome) => {
                report(&outcome);
                DdnsExitCode::Success
            }
            Err(e) => {
                error!("Reconciliation failed: {:#}", e);
                DdnsExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Wire the components together and run one pass
async fn run_pass(config: &DdnsConfig) -> Result<PassOutcome> {
    let timeout = config.endpoints.timeout();

    let observer = HttpAddressObserver::with_timeout(config.endpoints.trace_url.as_str(), timeout)?;
    let resolver = DohResolver::with_timeout(config.endpoints.doh_url.as_str(), timeout)?;
    let updater = CloudflareProvider::with_endpoint(
        config.api_token.as_str(),
        config.endpoints.api_base.as_str(),
        timeout,
        config.dry_run,
    )?;

    let engine = DdnsEngine::new(
        Box::new(observer),
        Box::new(resolver),
        Box::new(updater),
        config,
    )?;

    Ok(engine.run_once().await?)
}

/// Report the pass outcome to the operator
fn report(outcome: &PassOutcome) {
    match outcome {
        PassOutcome::NoChangeNeeded { address } => {
            info!("Nothing to update ({}), exiting.", address);
        }
        PassOutcome::UpdateApplied { previous, current } => {
            info!("DNS record updated successfully: {} -> {}", previous, current);
        }
        PassOutcome::DryRun { previous, current } => {
            info!("[DRY-RUN] DNS record would be updated: {} -> {}", previous, current);
        }
    }
}
