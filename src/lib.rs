//! Pixel Pong - a rectangular arena pong engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pixel-mask collisions, bounce response,
//!   wall-reflecting trajectory forecasts)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset decoding, and input polling live outside this crate. The
//! embedding frame loop feeds elapsed time and key state into [`sim::tick`]
//! and reads body positions, sprite dimensions, and tints back out for
//! drawing.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Arena width in pixels
    pub const ROOM_WIDTH: i32 = 800;
    /// Arena height in pixels
    pub const ROOM_HEIGHT: i32 = 480;

    /// Ball speed in pixels per second
    pub const BALL_SPEED: i32 = 600;
    /// Paddle speed in pixels per second
    pub const PADDLE_SPEED: i32 = 400;

    /// Candidate bounce directions spaced evenly around the circle (the
    /// purely horizontal entries are dropped after rounding)
    pub const BOUNCE_DIRECTIONS: usize = 32;

    /// The AI paddle holds still while the forecast crossing is within this
    /// many pixels of its sprite center
    pub const AI_DEADZONE: i32 = 30;

    /// Wall bounces simulated before a trajectory forecast is abandoned
    pub const FORECAST_BOUNCE_CAP: usize = 1000;

    /// Opaque white draw tint (RGBA8)
    pub const TINT_WHITE: u32 = 0xFFFF_FFFF;
}
