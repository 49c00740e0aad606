//! Pacnet Demo
//!
//! Runs both endpoints of a session over loopback: handshake, start-time
//! negotiation, then a short burst of traffic on both channels. Useful as a
//! smoke test and as a usage example for the [`pacnet`] crate.

use std::time::Duration;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pacnet::{
    GameController, MazeSnapshot, NetConfig, PixelPos, Session, SessionError, TilePos, VERSION,
};

/// Minimal controller that logs every callback.
struct DemoController {
    name: &'static str,
    lives: u8,
    score: u32,
    remote_score: u32,
}

impl DemoController {
    fn new(name: &'static str) -> Self {
        Self { name, lives: 3, score: 0, remote_score: 0 }
    }
}

impl GameController for DemoController {
    fn get_maze(&self) -> MazeSnapshot {
        // A tiny walled box; a real game supplies its full maze here.
        MazeSnapshot::new(
            4,
            3,
            vec![
                1, 1, 1, 1, //
                1, 0, 0, 1, //
                1, 1, 1, 1,
            ],
        )
    }

    fn get_lives(&self) -> u8 {
        self.lives
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn received_maze(&mut self, maze: MazeSnapshot) {
        info!(side = self.name, width = maze.width, height = maze.height, "peer maze received");
    }

    fn game_mode_update(&mut self, mode: u8, duration: u16) {
        info!(side = self.name, mode, duration, "phase change");
    }

    fn foreign_pacman_update(&mut self, pos: PixelPos, direction: u8, speed: u8) {
        info!(side = self.name, x = pos.0, y = pos.1, direction, speed, "foreign pacman");
    }

    fn remote_ghost_update(&mut self, index: u8, pos: PixelPos, direction: u8, speed: u8, mode: u8) {
        info!(side = self.name, index, x = pos.0, y = pos.1, direction, speed, mode, "remote ghost");
    }

    fn foreign_pacman_arrived(&mut self) {
        info!(side = self.name, "foreign pacman arrived");
    }

    fn foreign_pacman_left(&mut self) {
        info!(side = self.name, "foreign pacman left");
    }

    fn foreign_pacman_died(&mut self) {
        info!(side = self.name, "foreign pacman died");
    }

    fn pacman_go_home(&mut self) {
        info!(side = self.name, "ordered home");
    }

    fn foreign_pacman_ate_ghost(&mut self, index: u8) {
        info!(side = self.name, index, "our ghost was eaten");
    }

    fn foreign_eat(&mut self, pos: TilePos, is_powerpill: bool) {
        info!(side = self.name, x = pos.0, y = pos.1, is_powerpill, "foreign eat");
    }

    fn remote_eat(&mut self, pos: TilePos, is_powerpill: bool) {
        info!(side = self.name, x = pos.0, y = pos.1, is_powerpill, "remote eat");
    }

    fn update_remote_score(&mut self, score: u32) {
        self.remote_score = score;
        info!(side = self.name, score, "remote score");
    }

    fn update_remote_lives(&mut self, lives: u8) {
        info!(side = self.name, lives, "remote lives");
    }

    fn remote_status_update(&mut self, status: u8) {
        info!(side = self.name, status, "remote status");
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Pacnet Demo v{}", VERSION);

    let tcp_port = 5432;

    // Acceptor endpoint in its own thread; each endpoint stays single-threaded.
    let acceptor = std::thread::spawn(move || -> Result<u32> {
        let mut ctrl = DemoController::new("acceptor");
        ctrl.score = 1500;
        let config = NetConfig {
            tcp_port,
            udp_port: 5433,
            peer_udp_port: Some(5434),
            secret: "demo".into(),
            ..Default::default()
        };
        let mut session = Session::new(config);
        session.listen(&mut ctrl)?;

        session.send_game_mode_update(1, 600)?;
        session.send_score_update(ctrl.get_score())?;
        session.send_lives_update(ctrl.get_lives())?;
        for tick in 0..20u16 {
            session.send_pacman_update((10 + tick * 4, 16), 2, 1);
            session.send_ghost_update(0, (200, 16), 6, 1, 0);
            match session.poll(&mut ctrl) {
                Ok(()) => {}
                Err(SessionError::PeerClosed) => break,
                Err(e) => return Err(e.into()),
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        Ok(ctrl.remote_score)
    });

    std::thread::sleep(Duration::from_millis(200));

    let mut ctrl = DemoController::new("initiator");
    ctrl.score = 700;
    let config = NetConfig {
        tcp_port,
        udp_port: 5434,
        peer_udp_port: Some(5433),
        secret: "demo".into(),
        peer: Some("127.0.0.1".parse()?),
        ..Default::default()
    };
    let mut session = Session::new(config);
    session.connect(&mut ctrl)?;

    session.send_eat((5, 7), false, true)?;
    session.send_score_update(ctrl.get_score())?;
    for _tick in 0..25 {
        match session.poll(&mut ctrl) {
            Ok(()) => {}
            Err(SessionError::PeerClosed) => {
                info!("peer left, ending demo");
                break;
            }
            Err(e) => return Err(e.into()),
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    let acceptor_saw = acceptor.join().expect("acceptor thread panicked")?;
    info!(acceptor_saw, initiator_saw = ctrl.remote_score, "demo complete");
    Ok(())
}
