//! Message dispatch: protocol replies and playback actions.
//!
//! The dispatcher recognizes three inbound commands (the end-of-MOTD
//! numeric, `PING`, and `PRIVMSG`) and treats everything else as a
//! no-op so unknown traffic never becomes an error. Channel messages
//! starting with the `>` marker are looked up in a finite action table
//! and run against the host's [`PlaybackController`].

use tracing::{debug, info, warn};

use crate::error::PlaybackError;
use crate::message::IrcMessage;
use crate::sendq::SendQueue;

/// End-of-MOTD numeric; the cue to join the configured channel.
pub const RPL_ENDOFMOTD: &str = "376";

/// Marker that introduces a control command in channel messages.
pub const COMMAND_MARKER: char = '>';

/// Narrow control interface onto the host's media playback engine.
///
/// Implementations transition only when not already in the target
/// state, and report [`PlaybackError::NoSession`] when there is no
/// active media session. The dispatcher logs that failure and moves on.
pub trait PlaybackController {
    /// Begin playback unless already playing.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback unless already paused.
    fn pause(&mut self) -> Result<(), PlaybackError>;
}

/// The finite table of channel-invokable playback actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// `>play`
    Play,
    /// `>pause`
    Pause,
}

impl PlaybackAction {
    /// Look up an action by its command name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            _ => None,
        }
    }

    fn invoke<P: PlaybackController>(self, playback: &mut P) -> Result<(), PlaybackError> {
        match self {
            Self::Play => playback.play(),
            Self::Pause => playback.pause(),
        }
    }
}

/// Maps parsed messages to protocol replies and playback actions.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    channel: String,
}

impl Dispatcher {
    /// Create a dispatcher joining and watching `channel`.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    /// Handle one inbound message. Side effects only; never fails.
    pub fn handle<P: PlaybackController>(
        &self,
        msg: &IrcMessage<'_>,
        out: &mut SendQueue,
        playback: &mut P,
    ) {
        match msg.command {
            // Fires on every 376 seen in a session; a server that
            // replays its MOTD causes a harmless re-JOIN.
            RPL_ENDOFMOTD => {
                info!(channel = %self.channel, "end of MOTD, joining");
                out.append(format!("JOIN {}\r\n", self.channel).as_bytes());
            }
            "PING" => {
                // Some servers send the token as a middle parameter
                // rather than trailing; echo whichever was present.
                let payload = msg.trailing.or(msg.params).unwrap_or("");
                debug!(payload, "answering PING");
                out.append(format!("PONG :{}\r\n", payload).as_bytes());
            }
            "PRIVMSG" => self.handle_privmsg(msg, playback),
            _ => {}
        }
    }

    fn handle_privmsg<P: PlaybackController>(&self, msg: &IrcMessage<'_>, playback: &mut P) {
        let Some(text) = msg.trailing else { return };
        let Some(name) = text.strip_prefix(COMMAND_MARKER) else {
            return;
        };

        match PlaybackAction::from_name(name) {
            Some(action) => {
                info!(?action, sender = msg.prefix.unwrap_or("?"), "control command");
                if let Err(e) = action.invoke(playback) {
                    warn!(error = %e, "control command ignored");
                }
            }
            None => debug!(command = name, "unrecognized control command"),
        }
    }
}
