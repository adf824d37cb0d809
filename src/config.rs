//! Configuration loading and validation.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default IRC port.
pub const DEFAULT_PORT: u16 = 6667;

/// Default maximum line length, per IRC convention.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Default delay between connection attempts.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(30);

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_reconnect_delay_secs() -> u64 {
    DEFAULT_RECONNECT_DELAY.as_secs()
}

/// Remote-control client configuration.
///
/// `server`, `channel`, `nick`, and `client_name` must all be non-empty
/// before a connection is attempted; [`RemoteConfig::validate`] enforces
/// this and the client fails fast otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// IRC server hostname.
    pub server: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Channel to join after the end of the MOTD.
    pub channel: String,
    /// Nickname to register with.
    pub nick: String,
    /// Client identification string sent in the USER line.
    pub client_name: String,
    /// Maximum accepted line length in bytes.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Seconds to wait between connection attempts.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl RemoteConfig {
    /// Build a config with defaults for port, line length, and
    /// reconnect delay.
    pub fn new(
        server: impl Into<String>,
        channel: impl Into<String>,
        nick: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_PORT,
            channel: channel.into(),
            nick: nick.into(),
            client_name: client_name.into(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            reconnect_delay_secs: DEFAULT_RECONNECT_DELAY.as_secs(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: RemoteConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.is_empty() {
            return Err(ConfigError::MissingServer);
        }
        if self.channel.is_empty() {
            return Err(ConfigError::MissingChannel);
        }
        if self.nick.is_empty() {
            return Err(ConfigError::MissingNick);
        }
        if self.client_name.is_empty() {
            return Err(ConfigError::MissingClientName);
        }
        Ok(())
    }

    /// Delay between connection attempts.
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::new("irc.example.com", "#media", "remote", "vlc");
        assert_eq!(config.port, 6667);
        assert_eq!(config.max_line_len, 512);
        assert_eq!(config.reconnect_delay(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_fail_fast() {
        let config = RemoteConfig::new("", "#media", "remote", "vlc");
        assert!(matches!(config.validate(), Err(ConfigError::MissingServer)));

        let config = RemoteConfig::new("irc.example.com", "", "remote", "vlc");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingChannel)
        ));

        let config = RemoteConfig::new("irc.example.com", "#media", "", "vlc");
        assert!(matches!(config.validate(), Err(ConfigError::MissingNick)));

        let config = RemoteConfig::new("irc.example.com", "#media", "remote", "");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingClientName)
        ));
    }

    #[test]
    fn test_parse_toml() {
        let config: RemoteConfig = toml::from_str(
            r##"
            server = "irc.example.com"
            channel = "#media"
            nick = "remote"
            client_name = "vlc"
            "##,
        )
        .unwrap();
        assert_eq!(config.server, "irc.example.com");
        assert_eq!(config.port, 6667);
        assert_eq!(config.channel, "#media");

        let config: RemoteConfig = toml::from_str(
            r##"
            server = "irc.example.com"
            port = 6697
            channel = "#media"
            nick = "remote"
            client_name = "vlc"
            max_line_len = 8192
            reconnect_delay_secs = 5
            "##,
        )
        .unwrap();
        assert_eq!(config.port, 6697);
        assert_eq!(config.max_line_len, 8192);
        assert_eq!(config.reconnect_delay(), Duration::from_secs(5));
    }
}
