//! Connection lifecycle and the readiness-driven session loop.
//!
//! One task owns a connection's assembler and send queue for the whole
//! session; there is no sharing and no locking. Cross-thread shutdown
//! requests arrive through a [`ShutdownFlag`] observed at every bounded
//! wait, so the client stops within a second even when the server is
//! silent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::Interest;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::RemoteConfig;
use crate::dispatch::{Dispatcher, PlaybackController};
use crate::error::{ConfigError, SessionEnd};
use crate::line::LineAssembler;
use crate::message::IrcMessage;
use crate::sendq::SendQueue;

/// Bound on each readiness wait, so a pending shutdown is noticed
/// promptly even with no I/O activity.
const READY_TIMEOUT: Duration = Duration::from_secs(1);

/// Bound on a single connection attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Read chunk size.
const READ_CHUNK: usize = 4096;

/// Cloneable shutdown request flag.
///
/// The host holds a clone and calls [`request`](ShutdownFlag::request);
/// the client observes the flag at each bounded wait and winds down.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the client to stop at its next bounded wait.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Connection lifecycle.
enum ConnState {
    /// Attempt a connection now.
    Connecting,
    /// Run a session on the live connection.
    Connected(TcpStream),
    /// Wait out the reconnect delay, then try again.
    Disconnected,
}

/// Best-effort TCP keepalive; a refusal is logged by the caller and
/// does not affect the session.
fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)
}

/// IRC remote-control client: owns the connect/reconnect lifecycle and
/// drives one session at a time against the host's playback engine.
pub struct RemoteClient<P> {
    config: RemoteConfig,
    dispatcher: Dispatcher,
    playback: P,
    shutdown: ShutdownFlag,
}

impl<P: PlaybackController> RemoteClient<P> {
    /// Create a client from a validated-or-not config and a playback
    /// collaborator. Validation happens in [`run`](RemoteClient::run).
    pub fn new(config: RemoteConfig, playback: P) -> Self {
        let dispatcher = Dispatcher::new(config.channel.clone());
        Self {
            config,
            dispatcher,
            playback,
            shutdown: ShutdownFlag::new(),
        }
    }

    /// Handle for requesting shutdown from another thread or task.
    pub fn shutdown_flag(&self) -> ShutdownFlag {
        self.shutdown.clone()
    }

    /// Run the connect/reconnect loop until shutdown.
    ///
    /// Fails fast with [`ConfigError`] when the configuration is
    /// incomplete; after that, connect and session failures are logged
    /// and retried forever. Returns `Ok(())` only on a shutdown
    /// request.
    pub async fn run(mut self) -> Result<(), ConfigError> {
        self.config.validate()?;

        let delay = self.config.reconnect_delay();
        let mut state = ConnState::Connecting;

        loop {
            if self.shutdown.is_requested() {
                break;
            }

            state = match state {
                ConnState::Connecting => {
                    info!(
                        server = %self.config.server,
                        port = self.config.port,
                        "connecting"
                    );
                    let addr = (self.config.server.as_str(), self.config.port);
                    match timeout(CONNECT_TIMEOUT, TcpStream::connect(addr)).await {
                        Ok(Ok(stream)) => {
                            info!(server = %self.config.server, "connected");
                            if let Err(e) = enable_keepalive(&stream) {
                                warn!(error = %e, "failed to enable TCP keepalive");
                            }
                            ConnState::Connected(stream)
                        }
                        Ok(Err(e)) => {
                            warn!(error = %e, "error connecting to server");
                            ConnState::Disconnected
                        }
                        Err(_) => {
                            warn!("connection attempt timed out");
                            ConnState::Disconnected
                        }
                    }
                }
                ConnState::Connected(stream) => {
                    let end = self.run_session(stream).await;
                    info!(reason = %end, "session ended");
                    if matches!(end, SessionEnd::Shutdown) {
                        break;
                    }
                    ConnState::Disconnected
                }
                ConnState::Disconnected => {
                    self.wait_before_retry(delay).await;
                    ConnState::Connecting
                }
            };
        }

        info!("shutdown complete");
        Ok(())
    }

    /// Interruptible inter-connection delay, re-checking the shutdown
    /// flag once per second.
    async fn wait_before_retry(&self, delay: Duration) {
        let mut remaining = delay;
        while !remaining.is_zero() && !self.shutdown.is_requested() {
            let step = remaining.min(Duration::from_secs(1));
            tokio::time::sleep(step).await;
            remaining -= step;
        }
    }

    /// Drive one session to completion.
    ///
    /// Per-connection state is built fresh here and dropped on return;
    /// nothing carries across reconnects. Any read or write failure
    /// ends the session; retrying the socket is not this loop's job.
    async fn run_session(&mut self, stream: TcpStream) -> SessionEnd {
        let mut assembler = LineAssembler::new(self.config.max_line_len);
        let mut sendq = SendQueue::new();

        sendq.append(format!("NICK {}\r\n", self.config.nick).as_bytes());
        sendq.append(
            format!(
                "USER {} 8 * {}\r\n",
                self.config.nick, self.config.client_name
            )
            .as_bytes(),
        );

        let mut read_buf = vec![0u8; READ_CHUNK];

        loop {
            if self.shutdown.is_requested() {
                return SessionEnd::Shutdown;
            }

            let interest = if sendq.has_pending() {
                Interest::READABLE | Interest::WRITABLE
            } else {
                Interest::READABLE
            };

            let ready = match timeout(READY_TIMEOUT, stream.ready(interest)).await {
                // idle; loop to re-check the shutdown flag
                Err(_) => continue,
                Ok(Err(e)) => return SessionEnd::ReadError(e),
                Ok(Ok(ready)) => ready,
            };

            if ready.is_readable() {
                match stream.try_read(&mut read_buf) {
                    Ok(0) => return SessionEnd::PeerClosed,
                    Ok(n) => self.process_bytes(&mut assembler, &read_buf[..n], &mut sendq),
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(e) => return SessionEnd::ReadError(e),
                }
            }

            if ready.is_writable() && sendq.has_pending() {
                match sendq.flush_once(|bytes| stream.try_write(bytes)) {
                    Ok(n) => {
                        if n > 0 {
                            debug!(bytes = n, "flushed");
                        }
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(e) => return SessionEnd::WriteError(e),
                }
            }
        }
    }

    /// Feed received bytes through framing, parsing, and dispatch.
    ///
    /// Framing and parse failures drop the offending line and keep the
    /// session alive.
    fn process_bytes(
        &mut self,
        assembler: &mut LineAssembler,
        chunk: &[u8],
        sendq: &mut SendQueue,
    ) {
        for item in assembler.feed(chunk) {
            let line = match item {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "dropping oversized line");
                    continue;
                }
            };
            let text = match std::str::from_utf8(&line) {
                Ok(text) => text,
                Err(e) => {
                    debug!(error = %e, "dropping non-UTF-8 line");
                    continue;
                }
            };
            debug!(line = text, "line received");
            match IrcMessage::parse(text) {
                Ok(msg) => self.dispatcher.handle(&msg, sendq, &mut self.playback),
                Err(e) => debug!(error = %e, line = text, "malformed message, dropped"),
            }
        }
    }
}
