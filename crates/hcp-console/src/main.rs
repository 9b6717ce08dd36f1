use eyre::Result;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use hcp_agent::HttpTransport;
use hcp_console::config::{self, BASE_URL_ENV, LogFormat};
use hcp_console::console::Console;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // The log format lives in the config file, so it is read before the
    // subscriber exists and settled after.
    let config_dir = config::config_dir()?;
    let loaded = config::load_config_in(&config_dir)?;

    // Logs go to stderr so the conversation on stdout stays readable.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match loaded.config.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    if let Err(e) = loaded.settle(&config_dir) {
        tracing::warn!(
            error = %e,
            dir = %config_dir.display(),
            "could not write default config, continuing with defaults"
        );
    }
    let config = loaded.resolve(std::env::var(BASE_URL_ENV).ok());

    let transport = HttpTransport::new(&config.base_url, config.request_timeout())?;
    tracing::info!(
        url = %transport.url(),
        timeout_secs = ?config.request_timeout_secs,
        "starting hcp-console"
    );

    let console = Console::new(transport, std::io::stdout());
    console.run(BufReader::new(tokio::io::stdin())).await
}
