//! Protocol Messages
//!
//! Wire format for peer-to-peer communication between two game instances.
//! Pure encode/decode between typed [`Message`] values and byte sequences;
//! no I/O happens here.
//!
//! Every reliable frame has the form `[len:2][tag:1][payload]` where `len`
//! counts everything after the length field. Unreliable datagrams insert a
//! 16-bit sequence number: `[len:2][seq:2][tag:1][payload]`. All multi-byte
//! integers are big-endian.
//!
//! High-frequency position fields are bit-packed into three bytes
//! (x:10 bits, y:10 bits, direction:3 bits, moving:1 bit). Values outside
//! their declared bit width are masked to the low bits on encode; this is a
//! deliberate lossy-clamp policy, never an error.

use thiserror::Error;

/// Message type tags.
pub mod tag {
    /// Credential exchange (reliable, handshake only).
    pub const AUTH: u8 = 0x00;
    /// Accept/reject verdict for [`AUTH`].
    pub const AUTH_RESULT: u8 = 0x01;
    /// Initial maze snapshot.
    pub const MAZE: u8 = 0x02;
    /// Negotiated start instant (unix seconds).
    pub const START_AT: u8 = 0x03;
    /// Game phase change with duration.
    pub const PHASE_CHANGE: u8 = 0x04;
    /// Remote pacman arrived on the local screen.
    pub const PACMAN_ARRIVED: u8 = 0x10;
    /// Remote pacman left the local screen.
    pub const PACMAN_LEFT: u8 = 0x11;
    /// Remote pacman died.
    pub const PACMAN_DIED: u8 = 0x12;
    /// Local pacman must return home.
    pub const PACMAN_GO_HOME: u8 = 0x13;
    /// High-frequency pacman position (unreliable channel).
    pub const POSITION_UPDATE: u8 = 0x14;
    /// High-frequency ghost position (unreliable channel).
    pub const GHOST_UPDATE: u8 = 0x15;
    /// A ghost was eaten by the remote pacman.
    pub const GHOST_CAPTURED: u8 = 0x16;
    /// A food item or power pill was consumed.
    pub const CONSUMABLE_EATEN: u8 = 0x17;
    /// Remote score changed.
    pub const SCORE_UPDATE: u8 = 0x20;
    /// Remote lives count changed.
    pub const LIVES_UPDATE: u8 = 0x21;
    /// Remote game status changed.
    pub const STATUS_UPDATE: u8 = 0x22;
}

/// Maximum encodable credential length in bytes (length-prefixed by one byte).
pub const MAX_PASSWORD_LEN: usize = 255;

// =============================================================================
// MAZE SNAPSHOT
// =============================================================================

/// Authoritative maze grid, exchanged exactly once per session in each
/// direction during the handshake.
///
/// Cells are row-major, one small integer code per cell. Invariant:
/// `cells.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSnapshot {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
    /// Row-major cell codes.
    pub cells: Vec<u8>,
}

impl MazeSnapshot {
    /// Create a snapshot. Debug-asserts the grid invariant.
    pub fn new(width: u16, height: u16, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self { width, height, cells }
    }

    /// Cell code at `(x, y)`, or `None` if out of bounds.
    pub fn cell(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize).copied()
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// All messages exchanged between the two endpoints.
///
/// Immutable value types; each variant carries only the fields relevant to
/// its wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Shared-secret credential (reliable, handshake only).
    Auth {
        /// The shared secret, UTF-8, at most [`MAX_PASSWORD_LEN`] bytes.
        password: String,
    },
    /// Verdict for a received [`Message::Auth`].
    AuthResult {
        /// `true` if the credential matched.
        accepted: bool,
    },
    /// Initial maze state.
    Maze(MazeSnapshot),
    /// Start instant negotiated by the acceptor.
    StartAt {
        /// Wall-clock start time, unix seconds.
        start_unix: u32,
    },
    /// Game phase changed (e.g. frightened mode) for `duration` ticks.
    PhaseChange {
        /// New phase code.
        mode: u8,
        /// Phase duration.
        duration: u16,
    },
    /// Remote pacman entered the local maze.
    PacmanArrived,
    /// Remote pacman left the local maze.
    PacmanLeft,
    /// Remote pacman died.
    PacmanDied,
    /// Local pacman is ordered home.
    PacmanGoHome,
    /// Pacman position sample (unreliable channel).
    PositionUpdate {
        /// X coordinate, 10 bits on the wire.
        x: u16,
        /// Y coordinate, 10 bits on the wire.
        y: u16,
        /// Heading, 3 bits on the wire.
        direction: u8,
        /// Whether the pacman is currently moving.
        moving: bool,
    },
    /// Ghost position sample (unreliable channel).
    GhostUpdate {
        /// Ghost index.
        ghost: u8,
        /// X coordinate, 10 bits on the wire.
        x: u16,
        /// Y coordinate, 10 bits on the wire.
        y: u16,
        /// Heading, 3 bits on the wire.
        direction: u8,
        /// Whether the ghost is currently moving.
        moving: bool,
        /// Ghost behaviour mode.
        mode: u8,
    },
    /// The remote pacman ate one of our ghosts.
    GhostCaptured {
        /// Index of the captured ghost.
        ghost: u8,
    },
    /// A consumable was eaten at a tile.
    ConsumableEaten {
        /// Tile X coordinate.
        x: u8,
        /// Tile Y coordinate.
        y: u8,
        /// Eaten by the pacman visiting the foreign maze.
        foreign: bool,
        /// The consumable was a power pill.
        powerpill: bool,
    },
    /// Remote player's score.
    ScoreUpdate {
        /// Absolute score value.
        score: u32,
    },
    /// Remote player's remaining lives.
    LivesUpdate {
        /// Absolute lives count.
        lives: u8,
    },
    /// Remote game status (e.g. paused, game over).
    StatusUpdate {
        /// Status code.
        status: u8,
    },
}

/// Errors produced while decoding a frame payload.
///
/// All decode errors are non-fatal to the session: the offending frame is
/// dropped and processing continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is shorter than the type's declared layout.
    #[error("truncated payload: need {need} bytes, have {have}")]
    Truncated {
        /// Bytes required by the declared layout.
        need: usize,
        /// Bytes actually supplied.
        have: usize,
    },
    /// The type tag is not part of the protocol.
    #[error("unknown message type 0x{0:02X}")]
    UnknownType(u8),
    /// The credential bytes were not valid UTF-8.
    #[error("credential is not valid utf-8")]
    BadPassword,
}

impl Message {
    /// Wire type tag for this message.
    pub fn tag(&self) -> u8 {
        match self {
            Message::Auth { .. } => tag::AUTH,
            Message::AuthResult { .. } => tag::AUTH_RESULT,
            Message::Maze(_) => tag::MAZE,
            Message::StartAt { .. } => tag::START_AT,
            Message::PhaseChange { .. } => tag::PHASE_CHANGE,
            Message::PacmanArrived => tag::PACMAN_ARRIVED,
            Message::PacmanLeft => tag::PACMAN_LEFT,
            Message::PacmanDied => tag::PACMAN_DIED,
            Message::PacmanGoHome => tag::PACMAN_GO_HOME,
            Message::PositionUpdate { .. } => tag::POSITION_UPDATE,
            Message::GhostUpdate { .. } => tag::GHOST_UPDATE,
            Message::GhostCaptured { .. } => tag::GHOST_CAPTURED,
            Message::ConsumableEaten { .. } => tag::CONSUMABLE_EATEN,
            Message::ScoreUpdate { .. } => tag::SCORE_UPDATE,
            Message::LivesUpdate { .. } => tag::LIVES_UPDATE,
            Message::StatusUpdate { .. } => tag::STATUS_UPDATE,
        }
    }

    /// Encode the type-specific payload (everything after the tag byte).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Message::Auth { password } => {
                let bytes = password.as_bytes();
                let mut take = bytes.len().min(MAX_PASSWORD_LEN);
                // Never split a multi-byte code point; the truncated
                // credential must still decode.
                while !password.is_char_boundary(take) {
                    take -= 1;
                }
                let mut out = Vec::with_capacity(1 + take);
                out.push(take as u8);
                out.extend_from_slice(&bytes[..take]);
                out
            }
            Message::AuthResult { accepted } => vec![u8::from(*accepted)],
            Message::Maze(maze) => {
                let mut out = Vec::with_capacity(4 + maze.cells.len());
                out.extend_from_slice(&maze.width.to_be_bytes());
                out.extend_from_slice(&maze.height.to_be_bytes());
                out.extend_from_slice(&maze.cells);
                out
            }
            Message::StartAt { start_unix } => start_unix.to_be_bytes().to_vec(),
            Message::PhaseChange { mode, duration } => {
                let mut out = Vec::with_capacity(3);
                out.push(*mode);
                out.extend_from_slice(&duration.to_be_bytes());
                out
            }
            Message::PacmanArrived
            | Message::PacmanLeft
            | Message::PacmanDied
            | Message::PacmanGoHome => Vec::new(),
            Message::PositionUpdate { x, y, direction, moving } => {
                pack_position(*x, *y, *direction, *moving).to_vec()
            }
            Message::GhostUpdate { ghost, x, y, direction, moving, mode } => {
                let mut out = Vec::with_capacity(5);
                out.push(*ghost);
                out.extend_from_slice(&pack_position(*x, *y, *direction, *moving));
                out.push(*mode);
                out
            }
            Message::GhostCaptured { ghost } => vec![*ghost],
            Message::ConsumableEaten { x, y, foreign, powerpill } => {
                let mut flags = 0u8;
                if *foreign {
                    flags |= 0x01;
                }
                if *powerpill {
                    flags |= 0x02;
                }
                vec![*x, *y, flags]
            }
            Message::ScoreUpdate { score } => score.to_be_bytes().to_vec(),
            Message::LivesUpdate { lives } => vec![*lives],
            Message::StatusUpdate { status } => vec![*status],
        }
    }

    /// Encode as a reliable-channel frame: `[len:2][tag:1][payload]`.
    pub fn to_frame(&self) -> Vec<u8> {
        let payload = self.encode_payload();
        let len = (1 + payload.len()) as u16;
        let mut out = Vec::with_capacity(2 + len as usize);
        out.extend_from_slice(&len.to_be_bytes());
        out.push(self.tag());
        out.extend_from_slice(&payload);
        out
    }

    /// Encode as an unreliable-channel datagram: `[len:2][seq:2][tag:1][payload]`.
    pub fn to_datagram(&self, seq: u16) -> Vec<u8> {
        let payload = self.encode_payload();
        let len = (2 + 1 + payload.len()) as u16;
        let mut out = Vec::with_capacity(2 + len as usize);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&seq.to_be_bytes());
        out.push(self.tag());
        out.extend_from_slice(&payload);
        out
    }

    /// Decode a message from its tag and payload bytes.
    pub fn decode(msg_tag: u8, payload: &[u8]) -> Result<Message, DecodeError> {
        match msg_tag {
            tag::AUTH => {
                need(payload, 1)?;
                let pass_len = payload[0] as usize;
                need(payload, 1 + pass_len)?;
                let password = std::str::from_utf8(&payload[1..1 + pass_len])
                    .map_err(|_| DecodeError::BadPassword)?
                    .to_string();
                Ok(Message::Auth { password })
            }
            tag::AUTH_RESULT => {
                need(payload, 1)?;
                Ok(Message::AuthResult { accepted: payload[0] != 0 })
            }
            tag::MAZE => {
                need(payload, 4)?;
                let width = be_u16(&payload[0..2]);
                let height = be_u16(&payload[2..4]);
                let n = width as usize * height as usize;
                need(payload, 4 + n)?;
                let cells = payload[4..4 + n].to_vec();
                Ok(Message::Maze(MazeSnapshot { width, height, cells }))
            }
            tag::START_AT => {
                need(payload, 4)?;
                Ok(Message::StartAt { start_unix: be_u32(&payload[0..4]) })
            }
            tag::PHASE_CHANGE => {
                need(payload, 3)?;
                Ok(Message::PhaseChange {
                    mode: payload[0],
                    duration: be_u16(&payload[1..3]),
                })
            }
            tag::PACMAN_ARRIVED => Ok(Message::PacmanArrived),
            tag::PACMAN_LEFT => Ok(Message::PacmanLeft),
            tag::PACMAN_DIED => Ok(Message::PacmanDied),
            tag::PACMAN_GO_HOME => Ok(Message::PacmanGoHome),
            tag::POSITION_UPDATE => {
                need(payload, 3)?;
                let (x, y, direction, moving) = unpack_position(&payload[0..3]);
                Ok(Message::PositionUpdate { x, y, direction, moving })
            }
            tag::GHOST_UPDATE => {
                need(payload, 5)?;
                let ghost = payload[0];
                let (x, y, direction, moving) = unpack_position(&payload[1..4]);
                Ok(Message::GhostUpdate { ghost, x, y, direction, moving, mode: payload[4] })
            }
            tag::GHOST_CAPTURED => {
                need(payload, 1)?;
                Ok(Message::GhostCaptured { ghost: payload[0] })
            }
            tag::CONSUMABLE_EATEN => {
                need(payload, 3)?;
                Ok(Message::ConsumableEaten {
                    x: payload[0],
                    y: payload[1],
                    foreign: payload[2] & 0x01 != 0,
                    powerpill: payload[2] & 0x02 != 0,
                })
            }
            tag::SCORE_UPDATE => {
                need(payload, 4)?;
                Ok(Message::ScoreUpdate { score: be_u32(&payload[0..4]) })
            }
            tag::LIVES_UPDATE => {
                need(payload, 1)?;
                Ok(Message::LivesUpdate { lives: payload[0] })
            }
            tag::STATUS_UPDATE => {
                need(payload, 1)?;
                Ok(Message::StatusUpdate { status: payload[0] })
            }
            other => Err(DecodeError::UnknownType(other)),
        }
    }
}

// =============================================================================
// BIT PACKING
// =============================================================================

/// Pack a position sample into three bytes:
/// `[x9..x2][x1 x0 y9..y4][y3..y0 d2 d1 d0 m]`.
///
/// Coordinates are masked to 10 bits and the direction to 3 bits; out-of-range
/// values silently wrap.
fn pack_position(x: u16, y: u16, direction: u8, moving: bool) -> [u8; 3] {
    let x = x & 0x3FF;
    let y = y & 0x3FF;
    [
        (x >> 2) as u8,
        (((x & 0x03) << 6) as u8) | ((y >> 4) as u8 & 0x3F),
        (((y & 0x0F) << 4) as u8) | ((direction & 0x07) << 1) | u8::from(moving),
    ]
}

/// Inverse of [`pack_position`]. `bytes` must be at least 3 bytes.
fn unpack_position(bytes: &[u8]) -> (u16, u16, u8, bool) {
    let x = ((bytes[0] as u16) << 2) | ((bytes[1] as u16 >> 6) & 0x03);
    let y = (((bytes[1] & 0x3F) as u16) << 4) | ((bytes[2] as u16 >> 4) & 0x0F);
    let direction = (bytes[2] >> 1) & 0x07;
    let moving = bytes[2] & 0x01 != 0;
    (x, y, direction, moving)
}

fn need(payload: &[u8], need: usize) -> Result<(), DecodeError> {
    if payload.len() < need {
        Err(DecodeError::Truncated { need, have: payload.len() })
    } else {
        Ok(())
    }
}

fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(msg: Message) {
        let payload = msg.encode_payload();
        let decoded = Message::decode(msg.tag(), &payload).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_roundtrip_every_kind() {
        roundtrip(Message::Auth { password: "pw".into() });
        roundtrip(Message::AuthResult { accepted: true });
        roundtrip(Message::AuthResult { accepted: false });
        roundtrip(Message::Maze(MazeSnapshot::new(3, 2, vec![0, 1, 2, 3, 4, 5])));
        roundtrip(Message::StartAt { start_unix: 1_700_000_000 });
        roundtrip(Message::PhaseChange { mode: 2, duration: 900 });
        roundtrip(Message::PacmanArrived);
        roundtrip(Message::PacmanLeft);
        roundtrip(Message::PacmanDied);
        roundtrip(Message::PacmanGoHome);
        roundtrip(Message::PositionUpdate { x: 1023, y: 0, direction: 7, moving: true });
        roundtrip(Message::GhostUpdate {
            ghost: 3,
            x: 512,
            y: 511,
            direction: 4,
            moving: false,
            mode: 2,
        });
        roundtrip(Message::GhostCaptured { ghost: 2 });
        roundtrip(Message::ConsumableEaten { x: 13, y: 27, foreign: true, powerpill: false });
        roundtrip(Message::ScoreUpdate { score: u32::MAX });
        roundtrip(Message::LivesUpdate { lives: 3 });
        roundtrip(Message::StatusUpdate { status: 1 });
    }

    #[test]
    fn test_frame_layout() {
        let frame = Message::LivesUpdate { lives: 3 }.to_frame();
        // len = tag + 1 payload byte
        assert_eq!(frame, vec![0x00, 0x02, tag::LIVES_UPDATE, 3]);
    }

    #[test]
    fn test_datagram_layout() {
        let dgram = Message::PositionUpdate { x: 0, y: 0, direction: 0, moving: false }
            .to_datagram(0x0102);
        // len = seq(2) + tag(1) + packed position(3)
        assert_eq!(dgram[0..2], [0x00, 0x06]);
        assert_eq!(dgram[2..4], [0x01, 0x02]);
        assert_eq!(dgram[4], tag::POSITION_UPDATE);
        assert_eq!(dgram.len(), 8);
    }

    #[test]
    fn test_coordinate_clamping() {
        // Encoding an out-of-range coordinate matches encoding value & 0x3FF.
        let wide = Message::PositionUpdate { x: 0x7FF, y: 0x5AB, direction: 9, moving: true };
        let masked = Message::PositionUpdate {
            x: 0x7FF & 0x3FF,
            y: 0x5AB & 0x3FF,
            direction: 9 & 0x07,
            moving: true,
        };
        assert_eq!(wide.encode_payload(), masked.encode_payload());
    }

    #[test]
    fn test_password_length_prefix() {
        let payload = Message::Auth { password: "secret".into() }.encode_payload();
        assert_eq!(payload[0], 6);
        assert_eq!(&payload[1..], b"secret");
    }

    #[test]
    fn test_password_truncated_at_max() {
        let long = "x".repeat(400);
        let payload = Message::Auth { password: long }.encode_payload();
        assert_eq!(payload[0] as usize, MAX_PASSWORD_LEN);
        assert_eq!(payload.len(), 1 + MAX_PASSWORD_LEN);
    }

    #[test]
    fn test_password_truncated_at_char_boundary() {
        // 128 two-byte chars = 256 bytes; the clamp must stop at 254, not
        // mid-code-point at 255, and the result must still decode.
        let long = "é".repeat(128);
        let payload = Message::Auth { password: long.clone() }.encode_payload();
        assert_eq!(payload[0], 254);
        let decoded = Message::decode(tag::AUTH, &payload).unwrap();
        assert_eq!(decoded, Message::Auth { password: "é".repeat(127) });
        assert!(long.starts_with("é".repeat(127).as_str()));
    }

    #[test]
    fn test_truncated_payloads_rejected() {
        assert_eq!(
            Message::decode(tag::SCORE_UPDATE, &[0, 0, 1]),
            Err(DecodeError::Truncated { need: 4, have: 3 })
        );
        assert_eq!(
            Message::decode(tag::GHOST_UPDATE, &[1, 2, 3]),
            Err(DecodeError::Truncated { need: 5, have: 3 })
        );
        // Maze shorter than its declared width * height.
        let mut maze = vec![0x00, 0x04, 0x00, 0x04];
        maze.extend_from_slice(&[0; 10]);
        assert_eq!(
            Message::decode(tag::MAZE, &maze),
            Err(DecodeError::Truncated { need: 20, have: 14 })
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert_eq!(Message::decode(0xFF, &[]), Err(DecodeError::UnknownType(0xFF)));
    }

    #[test]
    fn test_bad_password_utf8() {
        assert_eq!(
            Message::decode(tag::AUTH, &[2, 0xFF, 0xFE]),
            Err(DecodeError::BadPassword)
        );
    }

    #[test]
    fn test_maze_cell_lookup() {
        let maze = MazeSnapshot::new(3, 2, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(maze.cell(0, 0), Some(0));
        assert_eq!(maze.cell(2, 1), Some(5));
        assert_eq!(maze.cell(3, 0), None);
        assert_eq!(maze.cell(0, 2), None);
    }

    proptest! {
        #[test]
        fn prop_position_roundtrip(
            x in 0u16..1024,
            y in 0u16..1024,
            direction in 0u8..8,
            moving: bool,
        ) {
            roundtrip(Message::PositionUpdate { x, y, direction, moving });
        }

        #[test]
        fn prop_ghost_roundtrip(
            ghost: u8,
            x in 0u16..1024,
            y in 0u16..1024,
            direction in 0u8..8,
            moving: bool,
            mode: u8,
        ) {
            roundtrip(Message::GhostUpdate { ghost, x, y, direction, moving, mode });
        }

        #[test]
        fn prop_score_roundtrip(score: u32) {
            roundtrip(Message::ScoreUpdate { score });
        }

        #[test]
        fn prop_clamp_matches_mask(x in 0u16.., y in 0u16..) {
            let wide = Message::PositionUpdate { x, y, direction: 0, moving: false };
            let masked = Message::PositionUpdate {
                x: x & 0x3FF,
                y: y & 0x3FF,
                direction: 0,
                moving: false,
            };
            prop_assert_eq!(wide.encode_payload(), masked.encode_payload());
        }

        #[test]
        fn prop_auth_encoding_always_decodable(password in ".{0,300}") {
            let payload = Message::Auth { password }.encode_payload();
            prop_assert!(Message::decode(tag::AUTH, &payload).is_ok());
        }

        #[test]
        fn prop_decode_never_panics(tag_byte: u8, payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = Message::decode(tag_byte, &payload);
        }
    }
}
