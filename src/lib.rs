//! # Pacnet
//!
//! Peer-to-peer synchronization protocol for a two-party real-time maze
//! game. Establishes a trusted connection between exactly two endpoints,
//! exchanges authoritative initial state, negotiates a simultaneous start
//! instant, and keeps both endpoints' views of shared entities consistent
//! in near-real-time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          PACNET                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  codec.rs      - Message types and bit-level wire format     │
//! │  framing.rs    - Length-prefixed frame reassembly            │
//! │  sequence.rs   - Duplicate suppression (unreliable channel)  │
//! │  transport.rs  - TCP/UDP adapters (non-blocking at steady    │
//! │                  state)                                      │
//! │  session.rs    - Handshake state machine, dispatch loop,     │
//! │                  send surface                                │
//! │  dispatch.rs   - Decoded-message to callback routing         │
//! │  controller.rs - GameController capability interface         │
//! │  config.rs     - Ports, secret, peer address                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound flow: transport bytes → frame reader (reliable) or raw
//! datagrams (unreliable) → codec → sequence filter (unreliable only) →
//! controller callbacks. Outbound: `send_*` → codec → transport.
//!
//! The game simulation itself (maze rules, collision, scoring, rendering)
//! is an external collaborator behind the
//! [`GameController`](controller::GameController) trait; the protocol only
//! carries payloads on its behalf.
//!
//! Everything is single-threaded per endpoint: the handshake is blocking
//! (no simulation runs yet), and [`Session::poll`](session::Session::poll)
//! is a cooperative non-blocking step invoked from the host's tick.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod controller;
mod dispatch;
pub mod framing;
pub mod sequence;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use codec::{DecodeError, MazeSnapshot, Message};
pub use config::NetConfig;
pub use controller::{GameController, PixelPos, TilePos};
pub use session::{Role, Session, SessionError, SessionState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
