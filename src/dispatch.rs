//! Message Routing
//!
//! Maps each decoded [`Message`] to exactly one [`GameController`] callback.
//! The poll cycle itself (socket reads, framing, sequence filtering) lives in
//! [`crate::session`]; this module is the pure routing step at its end.

use tracing::warn;

use crate::codec::Message;
use crate::controller::GameController;

/// Route one decoded message to its controller callback.
///
/// Handshake-only messages arriving at steady state are unexpected; they are
/// logged and dropped without affecting later messages.
pub(crate) fn route(msg: Message, controller: &mut dyn GameController) {
    match msg {
        Message::Maze(maze) => controller.received_maze(maze),
        Message::PhaseChange { mode, duration } => controller.game_mode_update(mode, duration),
        Message::PositionUpdate { x, y, direction, moving } => {
            controller.foreign_pacman_update((x, y), direction, u8::from(moving));
        }
        Message::GhostUpdate { ghost, x, y, direction, moving, mode } => {
            controller.remote_ghost_update(ghost, (x, y), direction, u8::from(moving), mode);
        }
        Message::GhostCaptured { ghost } => controller.foreign_pacman_ate_ghost(ghost),
        Message::ConsumableEaten { x, y, foreign, powerpill } => {
            if foreign {
                controller.foreign_eat((x, y), powerpill);
            } else {
                controller.remote_eat((x, y), powerpill);
            }
        }
        Message::PacmanArrived => controller.foreign_pacman_arrived(),
        Message::PacmanLeft => controller.foreign_pacman_left(),
        Message::PacmanDied => controller.foreign_pacman_died(),
        Message::PacmanGoHome => controller.pacman_go_home(),
        Message::ScoreUpdate { score } => controller.update_remote_score(score),
        Message::LivesUpdate { lives } => controller.update_remote_lives(lives),
        Message::StatusUpdate { status } => controller.remote_status_update(status),
        Message::Auth { .. } | Message::AuthResult { .. } | Message::StartAt { .. } => {
            warn!(tag = msg.tag(), "handshake message at steady state, dropped");
        }
    }
}
