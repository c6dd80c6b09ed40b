use clap::{Parser, Subcommand};
use regieleki_domain::CliOverrides;
use regieleki_infrastructure::system::load_or_create_token;
use std::path::Path;
use tracing::info;

mod bootstrap;
mod di;
mod server;

const DEFAULT_TOKEN_PATH: &str = "/var/lib/regieleki/token";

#[derive(Parser)]
#[command(name = "regieleki")]
#[command(version)]
#[command(about = "Regieleki - small authoritative/forwarding DNS server with a record API")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listen address (":53" is IPv4 only, "[::]:53" is dual-stack)
    #[arg(long, value_name = "ADDR")]
    dns: Option<String>,

    /// HTTP listen address
    #[arg(long, value_name = "ADDR")]
    http: Option<String>,

    /// Path to the records file
    #[arg(long, value_name = "FILE")]
    data: Option<String>,

    /// Path to the API token file (empty to disable auth)
    #[arg(long, value_name = "FILE")]
    token: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the API token, creating it first if needed
    AccessToken {
        #[arg(long, value_name = "FILE", default_value = DEFAULT_TOKEN_PATH)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::AccessToken { token }) = cli.command {
        let token = load_or_create_token(Path::new(&token)).await?;
        println!("{}", token);
        return Ok(());
    }

    let cli_overrides = CliOverrides {
        dns_address: cli.dns,
        http_address: cli.http,
        data_path: cli.data,
        token_path: cli.token,
        log_level: cli
            .log_level
            .or_else(|| cli.debug.then(|| "debug".to_string())),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging.level);

    info!("Starting Regieleki v{}", env!("CARGO_PKG_VERSION"));

    let repos = di::Repositories::new(&config).await?;
    let dns_services = di::DnsServices::new(&config, &repos).await?;
    let app_state = di::build_app_state(&config, &repos).await?;

    server::run(&config, dns_services, app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
