//! IRC line grammar parsing.
//!
//! Parses one CRLF-stripped line into an ephemeral, borrowed
//! [`IrcMessage`]. The grammar is the client subset:
//!
//! ```text
//! [:<prefix> ]<command>[ <params>][ :<trailing>]
//! ```
//!
//! `params` is kept as a single string; the remainder after the command
//! is split at its first `:`, with everything after that verbatim as
//! the trailing parameter.

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    error::{context, VerboseError},
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Parse the message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        preceded(char(':'), take_while1(|c| c != ' ')),
    )(input)
}

/// Parse the command token (everything up to the next space).
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context("parsing command", take_while1(|c| c != ' '))(input)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// A parsed IRC message with borrowed string slices.
///
/// Constructed by [`IrcMessage::parse`], consumed by the dispatcher,
/// then discarded. `command` is always present; everything else is
/// optional.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IrcMessage<'a> {
    /// Message source, without the leading `:`.
    pub prefix: Option<&'a str>,
    /// The command name or numeric.
    pub command: &'a str,
    /// Middle parameters, as one string with the separating space
    /// before any trailing parameter removed.
    pub params: Option<&'a str>,
    /// Trailing parameter, verbatim; may contain spaces and colons.
    pub trailing: Option<&'a str>,
}

impl<'a> IrcMessage<'a> {
    /// Parse one line into an `IrcMessage`.
    ///
    /// A trailing CR/LF run is tolerated and ignored. A message without
    /// a command token is an error; callers log and drop the line.
    pub fn parse(line: &'a str) -> Result<IrcMessage<'a>, MessageParseError> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let mut rest = trimmed;
        let mut prefix = None;
        if rest.starts_with(':') {
            let (after, p) =
                parse_prefix(rest).map_err(|_| MessageParseError::InvalidPrefix)?;
            prefix = Some(p);
            rest = after.trim_start_matches(' ');
        }

        let (after, command) =
            parse_command(rest).map_err(|_| MessageParseError::InvalidCommand)?;

        let remainder = after.strip_prefix(' ').unwrap_or(after);
        let (params, trailing) = match remainder.find(':') {
            Some(idx) => {
                let middles = &remainder[..idx];
                let middles = middles.strip_suffix(' ').unwrap_or(middles);
                (non_empty(middles), Some(&remainder[idx + 1..]))
            }
            None => (non_empty(remainder), None),
        };

        Ok(IrcMessage {
            prefix,
            command,
            params,
            trailing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let msg = IrcMessage::parse("PING").unwrap();
        assert_eq!(msg.command, "PING");
        assert!(msg.prefix.is_none());
        assert!(msg.params.is_none());
        assert!(msg.trailing.is_none());
    }

    #[test]
    fn test_parse_with_prefix_and_trailing() {
        let msg = IrcMessage::parse(":irc.example.com PING :hello there").unwrap();
        assert_eq!(msg.prefix, Some("irc.example.com"));
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, None);
        assert_eq!(msg.trailing, Some("hello there"));
    }

    #[test]
    fn test_parse_numeric_response() {
        let msg = IrcMessage::parse(":server 376 nick :End of /MOTD command.").unwrap();
        assert_eq!(msg.prefix, Some("server"));
        assert_eq!(msg.command, "376");
        assert_eq!(msg.params, Some("nick"));
        assert_eq!(msg.trailing, Some("End of /MOTD command."));
    }

    #[test]
    fn test_parse_privmsg() {
        let msg = IrcMessage::parse(":nick!user@host PRIVMSG #media :>play").unwrap();
        assert_eq!(msg.prefix, Some("nick!user@host"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, Some("#media"));
        assert_eq!(msg.trailing, Some(">play"));
    }

    #[test]
    fn test_parse_params_without_trailing() {
        let msg = IrcMessage::parse("JOIN #media").unwrap();
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.params, Some("#media"));
        assert!(msg.trailing.is_none());
    }

    #[test]
    fn test_parse_trailing_keeps_colons_and_spaces() {
        let msg = IrcMessage::parse("PRIVMSG #c :a:b: c").unwrap();
        assert_eq!(msg.params, Some("#c"));
        assert_eq!(msg.trailing, Some("a:b: c"));
    }

    #[test]
    fn test_parse_empty_trailing() {
        let msg = IrcMessage::parse("PRIVMSG #c :").unwrap();
        assert_eq!(msg.params, Some("#c"));
        assert_eq!(msg.trailing, Some(""));
    }

    #[test]
    fn test_parse_with_crlf() {
        let msg = IrcMessage::parse("PING :server\r\n").unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.trailing, Some("server"));
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(
            IrcMessage::parse(""),
            Err(MessageParseError::EmptyMessage)
        );
        assert_eq!(
            IrcMessage::parse("\r\n"),
            Err(MessageParseError::EmptyMessage)
        );
    }

    #[test]
    fn test_parse_lone_colon() {
        assert_eq!(
            IrcMessage::parse(":"),
            Err(MessageParseError::InvalidPrefix)
        );
    }

    #[test]
    fn test_parse_prefix_without_command() {
        assert_eq!(
            IrcMessage::parse(":irc.example.com"),
            Err(MessageParseError::InvalidCommand)
        );
        assert_eq!(
            IrcMessage::parse(":irc.example.com "),
            Err(MessageParseError::InvalidCommand)
        );
    }
}
