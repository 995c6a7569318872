//! Wall-bounce trajectory forecasting.
//!
//! Forward-simulates a point along its velocity line, reflecting off the
//! room's boundary lines, until the path crosses a defended horizontal
//! edge. Purely geometric - obstacles are ignored - and it reflects with the
//! same rules as the live wall response, so a forecast agrees with what the
//! simulation will actually do.

use glam::IVec2;

use crate::consts::FORECAST_BOUNCE_CAP;

use super::geom::{Bounds, Line};
use super::math::dot;

/// Predict where a trajectory starting at `start` with `velocity` first
/// crosses `defending_y`, bouncing off the room walls on the way.
///
/// Returns `None` when the trajectory can never get there: a zero velocity
/// has no direction, and a purely horizontal one shuttles between the side
/// walls until the bounce cap trips. Callers hold position for the tick in
/// that case.
pub fn forecast_crossing(
    start: IVec2,
    velocity: IVec2,
    room: Bounds,
    defending_y: i32,
) -> Option<IVec2> {
    debug_assert!(defending_y == room.top() || defending_y == room.bottom());

    let room_lines = Line::boundary_lines(room);
    let mut current = start;
    let mut velocity = velocity;
    let mut trajectory = Line::through(current, current + velocity);

    for _ in 0..FORECAST_BOUNCE_CAP {
        // Next wall hit: the first room line, in [top, right, bottom, left]
        // order, whose intersection with the trajectory lies ahead of the
        // current position and on the actual wall segment.
        let selected = room_lines
            .iter()
            .filter(|room_line| trajectory.intersects(**room_line))
            .filter_map(|room_line| trajectory.intersect(*room_line).ok())
            .filter(|point| dot(velocity, *point - current) > 0)
            .filter(|point| *point != current)
            .find(|point| {
                point.x >= room.left()
                    && point.x <= room.right()
                    && point.y >= room.top()
                    && point.y <= room.bottom()
            })?;

        if selected.y == defending_y {
            return Some(selected);
        }

        // Force the orthogonal component back toward the room interior for
        // whichever wall coordinate matched.
        if selected.x == room.left() {
            velocity.x = velocity.x.abs();
        }
        if selected.x == room.right() {
            velocity.x = -velocity.x.abs();
        }
        if selected.y == room.top() {
            velocity.y = velocity.y.abs();
        }
        if selected.y == room.bottom() {
            velocity.y = -velocity.y.abs();
        }

        current = selected;
        trajectory = Line::through(current, current + velocity);
    }

    log::warn!("trajectory forecast abandoned after {FORECAST_BOUNCE_CAP} wall bounces");
    None
}
