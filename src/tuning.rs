//! Data-driven game balance.
//!
//! Compiled defaults live in [`crate::consts`]; a JSON tuning file can
//! override any subset of them without rebuilding. The embedding layer owns
//! where the JSON comes from (file, localStorage, test fixture) and hands
//! the string in.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Balance values consumed when an arena is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Arena width in pixels.
    pub room_width: i32,
    /// Arena height in pixels.
    pub room_height: i32,
    /// Ball speed in pixels per second.
    pub ball_speed: i32,
    /// Paddle speed in pixels per second, human and AI alike.
    pub paddle_speed: i32,
    /// Forecast-to-paddle slack below which the AI paddle holds still.
    pub ai_deadzone: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            room_width: ROOM_WIDTH,
            room_height: ROOM_HEIGHT,
            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,
            ai_deadzone: AI_DEADZONE,
        }
    }
}

impl Tuning {
    /// Parse a tuning file. Missing fields keep their compiled defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The arena rectangle these values describe.
    pub fn room(&self) -> Bounds {
        Bounds::new(0, 0, self.room_width, self.room_height)
    }
}
