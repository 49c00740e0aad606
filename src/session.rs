//! Session Management
//!
//! One [`Session`] per endpoint drives the protocol from connection
//! establishment through credential exchange, maze exchange and start-time
//! negotiation into the active phase, then services the per-tick dispatch
//! loop. The session exclusively owns both transports and all protocol
//! state; everything runs on the caller's single thread.
//!
//! The handshake ([`Session::listen`] / [`Session::connect`]) is
//! intentionally blocking, since no simulation is running yet. [`Session::poll`]
//! never blocks.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::codec::{DecodeError, Message};
use crate::config::NetConfig;
use crate::controller::{GameController, PixelPos, TilePos};
use crate::dispatch;
use crate::framing::FrameReader;
use crate::sequence::SequenceTracker;
use crate::transport::{DatagramChannel, StreamChannel, StreamListener, MAX_DATAGRAM};

/// Grace period between start negotiation and simulation start.
pub const START_GRACE_SECS: u64 = 2;

/// Sleep interval while waiting for the negotiated start instant.
pub const START_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bytes drained from the reliable socket per poll.
const READ_CHUNK: usize = 8192;

/// Which side of the connection this endpoint plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Connects out to the acceptor.
    Initiator,
    /// Binds the listening port and accepts one connection.
    Acceptor,
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection activity yet.
    Idle,
    /// Acceptor is waiting for an incoming connection.
    Listening,
    /// Credential exchange in progress.
    Authenticating,
    /// Maze snapshots are being exchanged.
    ExchangingState,
    /// Waiting for the negotiated start instant.
    NegotiatingStart,
    /// Steady state; both channels open, dispatch loop running.
    Active,
    /// Session over; the peer is gone.
    Closed,
}

/// Session errors.
///
/// Transport and peer-termination errors are fatal and surface to the
/// process boundary; decode errors are fatal only while handshaking (at
/// steady state they are contained inside the dispatch loop).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Underlying socket I/O failed.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// A handshake frame failed to decode.
    #[error("protocol error during handshake: {0}")]
    Protocol(#[from] DecodeError),

    /// The peer sent the wrong message for the current handshake step.
    #[error("handshake failed: {0}")]
    Handshake(&'static str),

    /// The acceptor rejected our credential.
    #[error("authentication rejected by peer")]
    AuthRejected,

    /// The peer closed the reliable channel.
    #[error("remote game has quit")]
    PeerClosed,

    /// The operation requires an active session.
    #[error("session is not active")]
    NotActive,

    /// Initiator role requires a configured peer address.
    #[error("no peer address configured")]
    NoPeer,
}

/// Protocol endpoint: handshake driver, dispatch loop, and send surface.
///
/// Exactly one `Session` exists per running endpoint.
#[derive(Debug)]
pub struct Session {
    config: NetConfig,
    role: Option<Role>,
    state: SessionState,
    stream: Option<StreamChannel>,
    datagrams: Option<DatagramChannel>,
    remote_udp: Option<SocketAddr>,
    frames: FrameReader,
    sequences: SequenceTracker,
}

impl Session {
    /// Create an idle session.
    pub fn new(config: NetConfig) -> Self {
        Self {
            config,
            role: None,
            state: SessionState::Idle,
            stream: None,
            datagrams: None,
            remote_udp: None,
            frames: FrameReader::new(),
            sequences: SequenceTracker::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The role taken by this endpoint, once a handshake has begun.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Whether the session has reached the active phase.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    // =========================================================================
    // HANDSHAKE: ACCEPTOR
    // =========================================================================

    /// Acceptor handshake: bind, authenticate one peer, exchange mazes,
    /// negotiate the start instant, open the unreliable channel.
    ///
    /// Blocks until the session is active or a fatal error occurs. Rejected
    /// or malformed authentication attempts close that connection and resume
    /// accepting without tearing down the listener.
    pub fn listen(&mut self, controller: &mut dyn GameController) -> Result<(), SessionError> {
        self.role = Some(Role::Acceptor);
        self.state = SessionState::Listening;

        let listener = StreamListener::bind_with_retry(self.config.tcp_port);
        info!(port = self.config.tcp_port, "listening for incoming connection");

        let (mut stream, peer) = self.accept_authenticated(&listener)?;
        drop(listener); // stop listening; exactly two endpoints per session

        self.exchange_state(&mut stream, controller)?;

        self.state = SessionState::NegotiatingStart;
        let start = unix_now() + START_GRACE_SECS;
        stream.send_frame(&Message::StartAt { start_unix: start as u32 }.to_frame())?;
        info!(start_unix = start, "start instant sent");
        wait_until(start);

        self.stream = Some(stream);
        self.activate(peer.ip())
    }

    /// Accept connections until one presents the correct credential.
    fn accept_authenticated(
        &mut self,
        listener: &StreamListener,
    ) -> Result<(StreamChannel, SocketAddr), SessionError> {
        loop {
            let (mut stream, peer) = listener.accept()?;
            self.state = SessionState::Authenticating;
            info!(%peer, "connection attempt");

            let msg = match read_message_blocking(&mut stream) {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(error = %e, "authentication attempt failed, still listening");
                    self.state = SessionState::Listening;
                    continue;
                }
            };

            match msg {
                Message::Auth { password } if password == self.config.secret => {
                    stream.send_frame(&Message::AuthResult { accepted: true }.to_frame())?;
                    info!(%peer, "credential accepted");
                    return Ok((stream, peer));
                }
                Message::Auth { .. } => {
                    warn!(%peer, "credential rejected, still listening");
                    let _ =
                        stream.send_frame(&Message::AuthResult { accepted: false }.to_frame());
                    self.state = SessionState::Listening;
                }
                other => {
                    warn!(tag = other.tag(), "unexpected message during authentication");
                    self.state = SessionState::Listening;
                }
            }
        }
    }

    // =========================================================================
    // HANDSHAKE: INITIATOR
    // =========================================================================

    /// Initiator handshake: connect, present the credential, exchange mazes,
    /// receive the start instant, open the unreliable channel.
    ///
    /// Blocks until the session is active or a fatal error occurs. A rejected
    /// credential fails with [`SessionError::AuthRejected`] and the session
    /// never reaches [`SessionState::Active`].
    pub fn connect(&mut self, controller: &mut dyn GameController) -> Result<(), SessionError> {
        let peer_ip = self.config.peer.ok_or(SessionError::NoPeer)?;
        self.role = Some(Role::Initiator);
        self.state = SessionState::Authenticating;

        let addr = SocketAddr::new(peer_ip, self.config.tcp_port);
        let mut stream = StreamChannel::connect(addr)?;
        info!(%addr, "connected, authenticating");

        stream.send_frame(&Message::Auth { password: self.config.secret.clone() }.to_frame())?;
        match read_message_blocking(&mut stream)? {
            Message::AuthResult { accepted: true } => {}
            Message::AuthResult { accepted: false } => return Err(SessionError::AuthRejected),
            _ => return Err(SessionError::Handshake("expected authentication result")),
        }

        self.exchange_state(&mut stream, controller)?;

        self.state = SessionState::NegotiatingStart;
        let start = match read_message_blocking(&mut stream)? {
            Message::StartAt { start_unix } => u64::from(start_unix),
            _ => return Err(SessionError::Handshake("expected start instant")),
        };
        info!(start_unix = start, "start instant received");
        wait_until(start);

        self.stream = Some(stream);
        self.activate(peer_ip)
    }

    // =========================================================================
    // HANDSHAKE: SHARED STEPS
    // =========================================================================

    /// Exchange maze snapshots, exactly once in each direction. The reliable
    /// channel is full-duplex, so send-then-receive works for both roles.
    fn exchange_state(
        &mut self,
        stream: &mut StreamChannel,
        controller: &mut dyn GameController,
    ) -> Result<(), SessionError> {
        self.state = SessionState::ExchangingState;

        let maze = controller.get_maze();
        stream.send_frame(&Message::Maze(maze).to_frame())?;

        match read_message_blocking(stream)? {
            Message::Maze(remote) => {
                info!(width = remote.width, height = remote.height, "received peer maze");
                controller.received_maze(remote);
                Ok(())
            }
            _ => Err(SessionError::Handshake("expected maze snapshot")),
        }
    }

    /// Open the unreliable channel and enter the active phase.
    fn activate(&mut self, peer_ip: IpAddr) -> Result<(), SessionError> {
        let udp = DatagramChannel::bind(self.config.udp_port)?;
        self.remote_udp = Some(SocketAddr::new(peer_ip, self.config.peer_udp_port()));
        if let Some(stream) = &self.stream {
            stream.set_nonblocking()?;
        }
        self.datagrams = Some(udp);
        self.state = SessionState::Active;
        info!(udp_port = self.config.udp_port, "game synchronized, session active");
        Ok(())
    }

    // =========================================================================
    // DISPATCH LOOP
    // =========================================================================

    /// One non-blocking poll cycle; call once per simulation tick.
    ///
    /// Reads whatever the reliable channel has, dispatches completed frames
    /// in arrival order, then drains all queued datagrams through the
    /// duplicate filter. Undecodable messages are logged and dropped;
    /// a closed reliable channel is fatal.
    pub fn poll(&mut self, controller: &mut dyn GameController) -> Result<(), SessionError> {
        if self.state != SessionState::Active {
            return Err(SessionError::NotActive);
        }
        self.poll_stream(controller)?;
        self.poll_datagrams(controller);
        Ok(())
    }

    fn poll_stream(&mut self, controller: &mut dyn GameController) -> Result<(), SessionError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(SessionError::NotActive);
        };

        let mut buf = [0u8; READ_CHUNK];
        match stream.poll_read(&mut buf)? {
            None => Ok(()),
            Some(0) => {
                self.state = SessionState::Closed;
                Err(SessionError::PeerClosed)
            }
            Some(n) => {
                self.ingest_stream_bytes(&buf[..n], controller);
                Ok(())
            }
        }
    }

    /// Feed raw stream bytes through the frame reader and route every
    /// completed frame. Decode failures drop only the offending frame.
    fn ingest_stream_bytes(&mut self, bytes: &[u8], controller: &mut dyn GameController) {
        self.frames.push(bytes);
        while let Some(frame) = self.frames.next_frame() {
            let Some((&msg_tag, payload)) = frame.split_first() else {
                debug!("empty frame, dropped");
                continue;
            };
            match Message::decode(msg_tag, payload) {
                Ok(msg) => dispatch::route(msg, controller),
                Err(e) => {
                    warn!(error = %e, frame = %hex::encode(&frame), "dropping undecodable frame");
                }
            }
        }
    }

    fn poll_datagrams(&mut self, controller: &mut dyn GameController) {
        let mut buf = [0u8; MAX_DATAGRAM];
        loop {
            let Some(udp) = self.datagrams.as_ref() else { return };
            match udp.poll_recv(&mut buf) {
                Ok(None) => return,
                Ok(Some((n, _from))) => {
                    let datagram = buf[..n].to_vec();
                    self.ingest_datagram(&datagram, controller);
                }
                Err(e) => {
                    // Per-packet errors never end the session.
                    warn!(error = %e, "datagram receive error, ignored");
                    return;
                }
            }
        }
    }

    /// Decode one datagram (`[len][seq][tag][payload]`), apply the duplicate
    /// filter, and route it if accepted.
    fn ingest_datagram(&mut self, datagram: &[u8], controller: &mut dyn GameController) {
        if datagram.len() < 5 {
            warn!(len = datagram.len(), "short datagram, dropped");
            return;
        }
        let seq = u16::from_be_bytes([datagram[2], datagram[3]]);
        let msg_tag = datagram[4];
        if !self.sequences.accept(msg_tag, seq) {
            debug!(seq, tag = msg_tag, "duplicate datagram, dropped");
            return;
        }
        match Message::decode(msg_tag, &datagram[5..]) {
            Ok(msg) => dispatch::route(msg, controller),
            Err(e) => {
                warn!(error = %e, datagram = %hex::encode(datagram), "dropping undecodable datagram");
            }
        }
    }

    // =========================================================================
    // SEND SURFACE: RELIABLE
    // =========================================================================

    /// Announce a game phase change lasting `duration` ticks.
    pub fn send_game_mode_update(&mut self, mode: u8, duration: u16) -> Result<(), SessionError> {
        self.send_reliable(&Message::PhaseChange { mode, duration })
    }

    /// Our pacman arrived on the peer's screen.
    pub fn send_foreign_pacman_arrived(&mut self) -> Result<(), SessionError> {
        self.send_reliable(&Message::PacmanArrived)
    }

    /// Our pacman left the peer's screen.
    pub fn send_foreign_pacman_left(&mut self) -> Result<(), SessionError> {
        self.send_reliable(&Message::PacmanLeft)
    }

    /// Our pacman died.
    pub fn send_foreign_pacman_died(&mut self) -> Result<(), SessionError> {
        self.send_reliable(&Message::PacmanDied)
    }

    /// Order the peer's visiting pacman home.
    pub fn send_pacman_go_home(&mut self) -> Result<(), SessionError> {
        self.send_reliable(&Message::PacmanGoHome)
    }

    /// Our pacman ate the peer's ghost `index`.
    pub fn send_foreign_pacman_ate_ghost(&mut self, index: u8) -> Result<(), SessionError> {
        self.send_reliable(&Message::GhostCaptured { ghost: index })
    }

    /// A consumable at `pos` was eaten.
    pub fn send_eat(
        &mut self,
        pos: TilePos,
        is_foreign: bool,
        is_powerpill: bool,
    ) -> Result<(), SessionError> {
        self.send_reliable(&Message::ConsumableEaten {
            x: pos.0,
            y: pos.1,
            foreign: is_foreign,
            powerpill: is_powerpill,
        })
    }

    /// Our score changed.
    pub fn send_score_update(&mut self, score: u32) -> Result<(), SessionError> {
        self.send_reliable(&Message::ScoreUpdate { score })
    }

    /// Our lives count changed.
    pub fn send_lives_update(&mut self, lives: u8) -> Result<(), SessionError> {
        self.send_reliable(&Message::LivesUpdate { lives })
    }

    /// Our game status changed.
    pub fn send_status_update(&mut self, status: u8) -> Result<(), SessionError> {
        self.send_reliable(&Message::StatusUpdate { status })
    }

    fn send_reliable(&mut self, msg: &Message) -> Result<(), SessionError> {
        let stream = self.stream.as_mut().ok_or(SessionError::NotActive)?;
        stream.send_frame(&msg.to_frame())?;
        Ok(())
    }

    // =========================================================================
    // SEND SURFACE: UNRELIABLE
    // =========================================================================

    /// High-frequency pacman position sample. Loss is acceptable; send
    /// errors are logged and ignored.
    pub fn send_pacman_update(&mut self, pos: PixelPos, direction: u8, speed: u8) {
        self.send_unreliable(&Message::PositionUpdate {
            x: pos.0,
            y: pos.1,
            direction,
            moving: speed > 0,
        });
    }

    /// High-frequency ghost position sample. Loss is acceptable; send
    /// errors are logged and ignored.
    pub fn send_ghost_update(
        &mut self,
        index: u8,
        pos: PixelPos,
        direction: u8,
        speed: u8,
        mode: u8,
    ) {
        self.send_unreliable(&Message::GhostUpdate {
            ghost: index,
            x: pos.0,
            y: pos.1,
            direction,
            moving: speed > 0,
            mode,
        });
    }

    fn send_unreliable(&mut self, msg: &Message) {
        let (Some(udp), Some(addr)) = (self.datagrams.as_ref(), self.remote_udp) else {
            return; // channel opens only after the handshake
        };
        let seq = self.sequences.next_outbound();
        if let Err(e) = udp.send_to(&msg.to_datagram(seq), addr) {
            warn!(error = %e, "datagram send error, ignored");
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Read exactly one frame and decode it (blocking; handshake only).
fn read_message_blocking(stream: &mut StreamChannel) -> Result<Message, SessionError> {
    let frame = stream.read_frame_blocking()?;
    let (&msg_tag, payload) =
        frame.split_first().ok_or(SessionError::Handshake("empty frame"))?;
    Ok(Message::decode(msg_tag, payload)?)
}

/// Current wall-clock time in unix seconds.
fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Sleep-poll until the wall clock reaches `start_unix`. Both endpoints run
/// this independently, so their simulations begin within one polling
/// interval of each other without continuous clock sync.
fn wait_until(start_unix: u64) {
    while unix_now() < start_unix {
        std::thread::sleep(START_POLL_INTERVAL);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::RecordingController;
    use std::sync::atomic::{AtomicU16, Ordering};
    use std::time::Instant;

    // Each test takes a disjoint block of ports so parallel tests never
    // collide on the loopback interface. The block sits above the kernel's
    // default ephemeral range (32768-60999) so outgoing connections from
    // other tests cannot steal a port before we bind it.
    static NEXT_PORT: AtomicU16 = AtomicU16::new(61100);

    fn port_block() -> u16 {
        NEXT_PORT.fetch_add(8, Ordering::SeqCst)
    }

    fn acceptor_config(base: u16) -> NetConfig {
        NetConfig {
            tcp_port: base,
            udp_port: base + 1,
            peer_udp_port: Some(base + 2),
            secret: "pw".into(),
            peer: None,
        }
    }

    fn initiator_config(base: u16, secret: &str, udp_offset: u16) -> NetConfig {
        NetConfig {
            tcp_port: base,
            udp_port: base + udp_offset,
            peer_udp_port: Some(base + 1),
            secret: secret.into(),
            peer: Some("127.0.0.1".parse().unwrap()),
        }
    }

    #[test]
    fn test_handshake_and_steady_state() {
        let base = port_block();

        let acceptor = std::thread::spawn(move || {
            let mut ctrl = RecordingController::default();
            let mut session = Session::new(acceptor_config(base));
            session.listen(&mut ctrl).unwrap();
            let active_at = Instant::now();

            // Exercise both channels once active. The short sleep lets the
            // peer finish binding its datagram socket first.
            std::thread::sleep(Duration::from_millis(300));
            session.send_pacman_update((100, 200), 3, 1);
            session.send_score_update(1500).unwrap();

            (session, ctrl, active_at)
        });

        // Give the acceptor a moment to bind.
        std::thread::sleep(Duration::from_millis(100));

        let mut ctrl = RecordingController::default();
        let mut session = Session::new(initiator_config(base, "pw", 2));
        let started = Instant::now();
        session.connect(&mut ctrl).unwrap();
        let active_at = Instant::now();

        // The negotiated instant is integer unix seconds, so the observed
        // wait is between one and two seconds of wall time.
        assert!(active_at - started >= Duration::from_secs(1));
        assert!(session.is_active());
        assert_eq!(session.role(), Some(Role::Initiator));
        assert_eq!(ctrl.events, vec!["maze 2x2"]);

        let (server_session, server_ctrl, server_active_at) = acceptor.join().unwrap();
        assert!(server_session.is_active());
        assert_eq!(server_session.role(), Some(Role::Acceptor));
        assert_eq!(server_ctrl.events, vec!["maze 2x2"]);

        // Both endpoints reached Active close together.
        let skew = if server_active_at > active_at {
            server_active_at - active_at
        } else {
            active_at - server_active_at
        };
        assert!(skew < Duration::from_millis(500), "start skew too large: {skew:?}");

        // Drain both channels until the two sent messages arrive.
        let deadline = Instant::now() + Duration::from_secs(2);
        while ctrl.events.len() < 3 && Instant::now() < deadline {
            session.poll(&mut ctrl).unwrap();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(ctrl.events.contains(&"pacman 100,200 d3 s1".to_string()), "{:?}", ctrl.events);
        assert!(ctrl.events.contains(&"score 1500".to_string()), "{:?}", ctrl.events);
    }

    #[test]
    fn test_wrong_secret_rejected_then_retry_succeeds() {
        let base = port_block();

        let acceptor = std::thread::spawn(move || {
            let mut ctrl = RecordingController::default();
            let mut session = Session::new(acceptor_config(base));
            // Survives the rejected attempt and completes on the second one.
            session.listen(&mut ctrl).unwrap();
            session.state()
        });

        std::thread::sleep(Duration::from_millis(100));

        let mut ctrl = RecordingController::default();
        let mut rejected = Session::new(initiator_config(base, "wrong", 4));
        let err = rejected.connect(&mut ctrl).unwrap_err();
        assert!(matches!(err, SessionError::AuthRejected));
        assert!(!rejected.is_active());
        assert_eq!(rejected.state(), SessionState::Authenticating);
        assert!(ctrl.events.is_empty());

        // The acceptor is still listening; a correct credential now works.
        let mut ctrl2 = RecordingController::default();
        let mut session = Session::new(initiator_config(base, "pw", 2));
        session.connect(&mut ctrl2).unwrap();
        assert!(session.is_active());

        assert_eq!(acceptor.join().unwrap(), SessionState::Active);
    }

    #[test]
    fn test_poll_before_active_fails() {
        let mut ctrl = RecordingController::default();
        let mut session = Session::new(NetConfig::default());
        assert!(matches!(session.poll(&mut ctrl), Err(SessionError::NotActive)));
    }

    #[test]
    fn test_unknown_frame_does_not_corrupt_stream() {
        let mut ctrl = RecordingController::default();
        let mut session = Session::new(NetConfig::default());

        // Unknown tag 0xFF followed by a valid frame in the same read.
        let mut bytes = vec![0x00, 0x03, 0xFF, 0xAA, 0xBB];
        bytes.extend_from_slice(&Message::LivesUpdate { lives: 1 }.to_frame());
        session.ingest_stream_bytes(&bytes, &mut ctrl);

        assert_eq!(ctrl.events, vec!["lives 1"]);
    }

    #[test]
    fn test_truncated_frame_dropped_next_frame_survives() {
        let mut ctrl = RecordingController::default();
        let mut session = Session::new(NetConfig::default());

        // ScoreUpdate declaring only 2 payload bytes: decodes as Truncated.
        let mut bytes = vec![0x00, 0x03, crate::codec::tag::SCORE_UPDATE, 0x01, 0x02];
        bytes.extend_from_slice(&Message::StatusUpdate { status: 2 }.to_frame());
        session.ingest_stream_bytes(&bytes, &mut ctrl);

        assert_eq!(ctrl.events, vec!["status 2"]);
    }

    #[test]
    fn test_datagram_duplicate_suppression_end_to_end() {
        let mut ctrl = RecordingController::default();
        let mut session = Session::new(NetConfig::default());
        let msg = Message::PositionUpdate { x: 1, y: 2, direction: 0, moving: false };

        for seq in [5u16, 5, 6, 4, 7] {
            session.ingest_datagram(&msg.to_datagram(seq), &mut ctrl);
        }
        // Only the repeated 5 is dropped.
        assert_eq!(ctrl.events.len(), 4);

        // Wraparound: 65535 then 0 are both applied.
        let ghost = Message::GhostUpdate {
            ghost: 0,
            x: 0,
            y: 0,
            direction: 0,
            moving: false,
            mode: 0,
        };
        session.ingest_datagram(&ghost.to_datagram(65535), &mut ctrl);
        session.ingest_datagram(&ghost.to_datagram(0), &mut ctrl);
        assert_eq!(ctrl.events.len(), 6);
    }

    #[test]
    fn test_short_datagram_dropped() {
        let mut ctrl = RecordingController::default();
        let mut session = Session::new(NetConfig::default());
        session.ingest_datagram(&[0x00, 0x01, 0x00], &mut ctrl);
        assert!(ctrl.events.is_empty());
    }

    #[test]
    fn test_send_before_handshake() {
        let mut session = Session::new(NetConfig::default());
        assert!(matches!(session.send_score_update(1), Err(SessionError::NotActive)));
        // Unreliable sends are silently skipped until the channel exists.
        session.send_pacman_update((0, 0), 0, 0);
    }
}
