//! Setup shared by every demo binary.

use std::io;

use notify_africa::NotifyAfricaClient;
use tracing_subscriber::EnvFilter;

/// Log to stderr; `RUST_LOG` overrides the default `notify_africa=debug`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notify_africa=debug")),
        )
        .init();
}

pub fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Build a client from `NOTIFY_AFRICA_API_KEY`, `NOTIFY_AFRICA_SENDER_ID` and,
/// if set, `NOTIFY_AFRICA_BASE_URL`.
pub fn client_from_env() -> Result<NotifyAfricaClient, Box<dyn std::error::Error>> {
    let mut builder = NotifyAfricaClient::builder(
        required_env("NOTIFY_AFRICA_API_KEY")?,
        required_env("NOTIFY_AFRICA_SENDER_ID")?,
    );
    if let Ok(base_url) = std::env::var("NOTIFY_AFRICA_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    Ok(builder.build()?)
}
