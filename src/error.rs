//! Error types for the remote-control client.
//!
//! This module defines error types for configuration validation,
//! message parsing failures, line framing, and session termination.

use thiserror::Error;

/// Convenience type alias for Results using [`ConfigError`].
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Configuration errors.
///
/// All variants are fail-fast: no connection is attempted while the
/// configuration is incomplete or unreadable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No server host was specified.
    #[error("no server specified")]
    MissingServer,

    /// No channel was specified.
    #[error("no channel specified")]
    MissingChannel,

    /// No nickname was specified.
    #[error("no nickname specified")]
    MissingNick,

    /// No client identification string was specified.
    #[error("no client name specified")]
    MissingClientName,

    /// Failed to read the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors encountered when parsing IRC messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Message was empty.
    #[error("empty message")]
    EmptyMessage,

    /// A `:` introduced a prefix but no prefix token followed.
    #[error("invalid prefix")]
    InvalidPrefix,

    /// Command token was missing.
    #[error("invalid command")]
    InvalidCommand,
}

/// Errors raised by the line assembler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FramingError {
    /// A line exceeded the configured maximum before a CRLF was seen.
    ///
    /// The in-progress line has been discarded; framing resumes at the
    /// next CRLF boundary.
    #[error("line too long: {actual} bytes exceeds limit of {limit}")]
    LineTooLong {
        /// Bytes accumulated when the limit was hit.
        actual: usize,
        /// The configured maximum line length.
        limit: usize,
    },
}

/// Why a session ended.
///
/// None of these are fatal to the client: the connection manager logs
/// the reason and reconnects after the configured delay. Only a
/// shutdown request stops the reconnect loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionEnd {
    /// The server closed the connection in an orderly fashion.
    #[error("connection closed by server")]
    PeerClosed,

    /// A read on the socket failed.
    #[error("read error: {0}")]
    ReadError(#[source] std::io::Error),

    /// A write on the socket failed.
    #[error("write error: {0}")]
    WriteError(#[source] std::io::Error),

    /// Shutdown was requested by the host.
    #[error("shutdown requested")]
    Shutdown,
}

/// Failure indicator from the playback collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    /// There is no active media session to control.
    #[error("no active media session")]
    NoSession,
}
