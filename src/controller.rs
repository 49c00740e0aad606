//! Controller Interface
//!
//! The protocol core carries payloads on behalf of the game simulation and
//! invokes named callbacks on it. [`GameController`] is that capability
//! interface: the game implements it, the [`Session`](crate::session::Session)
//! consumes it. The core never interprets game rules.

use crate::codec::MazeSnapshot;

/// Pixel-space position carried by high-frequency updates (10-bit coordinates).
pub type PixelPos = (u16, u16);

/// Tile-space position carried by consumable events.
pub type TilePos = (u8, u8);

/// Callbacks and queries the protocol core requires from the game logic.
pub trait GameController {
    /// The local maze, sent to the peer during the handshake.
    fn get_maze(&self) -> MazeSnapshot;

    /// Current local lives count.
    fn get_lives(&self) -> u8;

    /// Current local score.
    fn get_score(&self) -> u32;

    /// The peer's maze arrived during the handshake.
    fn received_maze(&mut self, maze: MazeSnapshot);

    /// The peer announced a game phase change lasting `duration` ticks.
    fn game_mode_update(&mut self, mode: u8, duration: u16);

    /// Position sample for the remote pacman while it is on our screen.
    fn foreign_pacman_update(&mut self, pos: PixelPos, direction: u8, speed: u8);

    /// Position sample for a remote ghost.
    fn remote_ghost_update(&mut self, index: u8, pos: PixelPos, direction: u8, speed: u8, mode: u8);

    /// The remote pacman entered our maze.
    fn foreign_pacman_arrived(&mut self);

    /// The remote pacman left our maze.
    fn foreign_pacman_left(&mut self);

    /// The remote pacman died.
    fn foreign_pacman_died(&mut self);

    /// Our pacman must return to its home maze.
    fn pacman_go_home(&mut self);

    /// The remote pacman ate our ghost `index`.
    fn foreign_pacman_ate_ghost(&mut self, index: u8);

    /// The visiting pacman ate a consumable in our maze.
    fn foreign_eat(&mut self, pos: TilePos, is_powerpill: bool);

    /// The remote pacman ate a consumable in its own maze.
    fn remote_eat(&mut self, pos: TilePos, is_powerpill: bool);

    /// The remote player's score changed.
    fn update_remote_score(&mut self, score: u32);

    /// The remote player's lives count changed.
    fn update_remote_lives(&mut self, lives: u8);

    /// The remote game's status changed.
    fn remote_status_update(&mut self, status: u8);
}
