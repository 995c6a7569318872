//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer arena-space positions and velocities
//! - Seeded RNG only
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod mask;
pub mod math;
pub mod predict;
pub mod state;
pub mod tick;

use std::fmt;

pub use collision::{resolve_overlap, resolve_walls};
pub use geom::{Bounds, Line};
pub use mask::OpacityMask;
pub use math::{argmax, argmin, cross, dot};
pub use predict::forecast_crossing;
pub use state::{
    AiPaddleController, Arena, BallController, BodyCore, BodyId, Controller,
    HumanPaddleController,
};
pub use tick::{TickInput, tick};

/// Failures surfaced by the simulation's hardened precondition sites.
///
/// Everything else in the module keeps the debug-assert contract: callers
/// validate invariants up front and release builds skip the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// An extremum was requested over an empty sequence.
    EmptySequence,
    /// An intersection point was requested for parallel or coincident lines.
    ParallelLines,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptySequence => write!(f, "extremum of an empty sequence"),
            SimError::ParallelLines => write!(f, "intersection of parallel lines"),
        }
    }
}

impl std::error::Error for SimError {}
