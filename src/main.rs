//! Headless demo driver.
//!
//! Builds the canonical arena (centered ball, human paddle along the bottom
//! edge, AI paddle defending the top), scripts the human input, and runs the
//! simulation at a fixed 60 Hz step with periodic state logging. Rendering
//! and real input live outside this crate; this binary exists to watch the
//! engine play itself. Usage: `pixel-pong [seed] [tuning.json]`.

use std::sync::Arc;

use glam::IVec2;

use pixel_pong::Tuning;
use pixel_pong::sim::{Arena, OpacityMask, TickInput, tick};

const BALL_SIZE: i32 = 16;
const PADDLE_WIDTH: i32 = 64;
const PADDLE_HEIGHT: i32 = 12;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("seed must be an integer, got {arg:?}");
                std::process::exit(1);
            }
        },
        None => 0x5EED,
    };
    let tuning = args.next().map(|path| load_tuning(&path)).unwrap_or_default();

    log::info!("pixel-pong headless demo starting, seed {seed}");

    let room = tuning.room();
    let mut arena = Arena::new(room);

    let ball_mask = Arc::new(circle_mask(BALL_SIZE));
    let paddle_mask = Arc::new(OpacityMask::filled(PADDLE_WIDTH, PADDLE_HEIGHT));
    let paddle_x = room.center().x - PADDLE_WIDTH / 2;

    let ball = arena.add_ball(
        ball_mask.clone(),
        room.center() - ball_mask.center(),
        tuning.ball_speed,
        seed,
    );
    let human = arena.add_human_paddle(
        paddle_mask.clone(),
        IVec2::new(paddle_x, room.bottom() - PADDLE_HEIGHT),
        tuning.paddle_speed,
    );
    let ai = arena.add_ai_paddle(
        paddle_mask,
        IVec2::new(paddle_x, room.top()),
        tuning.paddle_speed,
        tuning.ai_deadzone,
        room.top(),
        ball,
    );
    arena.set_peers(ball, vec![human, ai]);

    // Ten seconds at 60 Hz, the human paddle sweeping side to side.
    let dt = 1.0 / 60.0;
    for frame in 0u32..600 {
        let sweep_right = frame / 90 % 2 == 0;
        let input = TickInput { left: !sweep_right, right: sweep_right };
        tick(&mut arena, &input, dt);

        if frame % 60 == 0 {
            let ball = arena.body(ball);
            log::info!(
                "t={:>2}s ball at {:?} moving {:?}",
                frame / 60,
                ball.position,
                ball.velocity
            );
        }
    }

    log::info!(
        "done: ball {:?}, human paddle {:?}, ai paddle {:?}",
        arena.body(ball).position,
        arena.body(human).position,
        arena.body(ai).position
    );
}

fn load_tuning(path: &str) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            log::error!("cannot read tuning file {path}: {err}");
            std::process::exit(1);
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("tuning loaded from {path}");
            tuning
        }
        Err(err) => {
            log::error!("invalid tuning file {path}: {err}");
            std::process::exit(1);
        }
    }
}

/// Round ball sprite, shaped like the decoded ball texture would be.
fn circle_mask(size: i32) -> OpacityMask {
    let radius = size as f32 / 2.0;
    OpacityMask::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        dx * dx + dy * dy <= radius * radius
    })
}
