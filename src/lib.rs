//! # slirc-remote
//!
//! An IRC client core for remote-controlling a media session over a
//! chat channel: it connects, registers, joins one channel, answers
//! keep-alive pings, and maps a narrow `>command` convention in channel
//! messages to playback actions on the host.
//!
//! ## Features
//!
//! - Byte-level CRLF framing that is correct across partial reads,
//!   split terminators, and oversized lines
//! - A tolerant parser for the IRC line grammar (optional prefix,
//!   middle parameters, trailing parameter)
//! - A growable outbound queue with partial-write tracking
//! - A readiness-driven, single-owner session loop with bounded waits
//! - An infinite, interruptible reconnect lifecycle
//!
//! ## Quick Start
//!
//! ```no_run
//! use slirc_remote::{PlaybackController, PlaybackError, RemoteClient, RemoteConfig};
//!
//! struct Player;
//!
//! impl PlaybackController for Player {
//!     fn play(&mut self) -> Result<(), PlaybackError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) -> Result<(), PlaybackError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), slirc_remote::ConfigError> {
//!     let config = RemoteConfig::new("irc.example.com", "#media", "remote", "vlc");
//!     RemoteClient::new(config, Player).run().await
//! }
//! ```
//!
//! Channel members then drive playback with `>play` and `>pause`.

#![deny(clippy::all)]

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod line;
pub mod message;
pub mod sendq;

pub use self::client::{RemoteClient, ShutdownFlag};
pub use self::config::RemoteConfig;
pub use self::dispatch::{Dispatcher, PlaybackAction, PlaybackController, COMMAND_MARKER};
pub use self::error::{
    ConfigError, FramingError, MessageParseError, PlaybackError, SessionEnd,
};
pub use self::line::LineAssembler;
pub use self::message::IrcMessage;
pub use self::sendq::SendQueue;
