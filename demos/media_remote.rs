//! Minimal remote-control demo.
//!
//! Connects to the configured server and logs the playback commands it
//! receives instead of driving a real player. Point it at a TOML
//! config file:
//!
//! ```text
//! cargo run --example media_remote -- remote.toml
//! ```
//!
//! where `remote.toml` looks like:
//!
//! ```toml
//! server = "irc.libera.chat"
//! channel = "#media-remote"
//! nick = "media-remote"
//! client_name = "media_remote_demo"
//! ```

use slirc_remote::{PlaybackController, PlaybackError, RemoteClient, RemoteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Stands in for a real playback engine. Tracks state so repeated
/// commands are no-ops, the way a host player behaves.
struct LoggingPlayer {
    playing: bool,
}

impl PlaybackController for LoggingPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.playing {
            self.playing = true;
            info!("▶ play");
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.playing {
            self.playing = false;
            info!("⏸ pause");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "remote.toml".to_string());
    let config = RemoteConfig::load(&config_path)?;

    let client = RemoteClient::new(config, LoggingPlayer { playing: false });
    let shutdown = client.shutdown_flag();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            shutdown.request();
        }
    });

    client.run().await?;
    Ok(())
}
