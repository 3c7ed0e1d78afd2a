use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use terraform_provider_wistia::{logging, ProviderConfig, ProviderServer, ResourceRegistry};

#[derive(Parser, Debug)]
#[command(name = "terraform-provider-wistia")]
#[command(about = "Wistia resource provider", version, long_about = None)]
struct Args {
    /// Run with debug logging and announce the provider on stderr
    #[arg(long, env = "WISTIA_DEBUG")]
    debug: bool,

    /// Optional TOML configuration file
    #[arg(long, env = "WISTIA_CONFIG_PATH")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load and validate configuration
    let mut config = ProviderConfig::load(args.config.as_deref())?;
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 2. Initialize logging
    if args.debug {
        config.logging.level = "debug".to_string();
        config.logging.format = "pretty".to_string();
        eprintln!(
            "terraform-provider-wistia {} running in debug mode (environment: {})",
            env!("CARGO_PKG_VERSION"),
            config.environment
        );
    }
    logging::init_logging(&config.logging)?;

    // 3. Build the client and serve
    let client = config.client()?;
    info!(
        environment = %config.environment,
        api = client.config().api_endpoint(),
        "Wistia provider starting"
    );
    let server = ProviderServer::new(client, ResourceRegistry::wistia());

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        result = server.serve(stdin, stdout) => result?,
        () = terraform_provider_wistia::server::shutdown_signal() => {}
    }

    info!("Wistia provider stopped");
    Ok(())
}
