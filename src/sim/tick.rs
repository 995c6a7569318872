//! Per-tick simulation advance.
//!
//! One logical tick per rendered frame: every body decides a velocity,
//! moves, and has its collisions serviced before the next body's turn, in
//! body-id order. All mutation settles inside the tick; the draw phase only
//! ever reads a finished state.

use super::collision::{resolve_overlap, resolve_walls};
use super::state::{Arena, BodyCore, BodyId};

/// Input state for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Left movement key held (human paddle).
    pub left: bool,
    /// Right movement key held (human paddle).
    pub right: bool,
}

/// Advance the arena by one tick of `dt` seconds.
///
/// Per body, in id order: the controller decides a velocity in pixels per
/// second, the body is displaced by `round(velocity * dt)`, then overlap
/// against each registered peer and the room bounds is detected and
/// resolved, with the controller's bounce hooks invoked on each hit.
pub fn tick(arena: &mut Arena, input: &TickInput, dt: f32) {
    debug_assert!(dt >= 0.0);

    for index in 0..arena.bodies.len() {
        let id = BodyId(index);

        let velocity = arena.controllers[index].decide_velocity(id, &arena.bodies, input, dt);
        let body = &mut arena.bodies[index];
        body.velocity = velocity;
        body.position += (velocity.as_vec2() * dt).round().as_ivec2();

        let peer_count = arena.bodies[index].peers.len();
        for peer_index in 0..peer_count {
            let peer = arena.bodies[index].peers[peer_index];
            let (mover, obstacle) = body_pair(&mut arena.bodies, index, peer.0);
            if resolve_overlap(mover, obstacle) {
                arena.controllers[index].on_peer_collision(mover, obstacle);
            }
        }

        let body = &mut arena.bodies[index];
        if resolve_walls(body) {
            arena.controllers[index].on_wall_collision(body);
        }
    }
}

/// Disjoint mutable-mover / shared-obstacle views into the body store.
fn body_pair(bodies: &mut [BodyCore], mover: usize, obstacle: usize) -> (&mut BodyCore, &BodyCore) {
    debug_assert_ne!(mover, obstacle);
    if mover < obstacle {
        let (head, tail) = bodies.split_at_mut(obstacle);
        (&mut head[mover], &tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(mover);
        (&mut tail[0], &head[obstacle])
    }
}
