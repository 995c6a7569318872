//! Bodies, controllers, and the arena that owns them.
//!
//! Every simulated entity carries the same `BodyCore` capability set; the
//! variants differ only in how they decide velocity each tick and how they
//! respond to collisions, which lives behind the [`Controller`] trait.
//! Bodies are arena-owned and referenced through stable [`BodyId`] handles,
//! so the ball-and-paddle reference graph never forms an ownership cycle.

use std::f64::consts::PI;
use std::sync::Arc;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

use super::geom::Bounds;
use super::mask::OpacityMask;
use super::math::argmin;
use super::predict::forecast_crossing;
use super::tick::TickInput;

/// Stable handle to a body in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Shared state every simulated body carries.
#[derive(Debug, Clone)]
pub struct BodyCore {
    /// Display name, used in log lines.
    pub name: &'static str,
    /// Top-left corner of the sprite, arena space.
    pub position: IVec2,
    /// Pixels per second; the tick loop applies `round(velocity * dt)`.
    pub velocity: IVec2,
    /// Opacity mask of the sprite, shared with the content pipeline.
    pub mask: Arc<OpacityMask>,
    /// Arena rectangle the body is confined to.
    pub room: Bounds,
    /// Solid bodies displace each other on overlap.
    pub solid: bool,
    /// Draw tint handed through to the renderer (RGBA8).
    pub tint: u32,
    /// Bodies this one is checked against when its turn comes up each tick.
    pub peers: Vec<BodyId>,
}

impl BodyCore {
    pub fn new(name: &'static str, mask: Arc<OpacityMask>, position: IVec2, room: Bounds) -> Self {
        Self {
            name,
            position,
            velocity: IVec2::ZERO,
            mask,
            room,
            solid: true,
            tint: TINT_WHITE,
            peers: Vec::new(),
        }
    }

    /// Bounding box in arena space.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_pos_size(self.position, self.mask.size())
    }

    /// Sprite center in arena space.
    pub fn center(&self) -> IVec2 {
        self.position + self.mask.center()
    }
}

/// Per-variant behavior over a shared [`BodyCore`].
pub trait Controller {
    /// Velocity for this tick, in pixels per second. Re-derived every tick,
    /// never cached by the caller.
    fn decide_velocity(
        &mut self,
        me: BodyId,
        bodies: &[BodyCore],
        input: &TickInput,
        dt: f32,
    ) -> IVec2;

    /// Bounce response after an overlap with `other` was resolved.
    fn on_peer_collision(&mut self, me: &mut BodyCore, other: &BodyCore) {
        let _ = (me, other);
    }

    /// Bounce response after the body was pushed back inside its room.
    fn on_wall_collision(&mut self, me: &mut BodyCore) {
        let _ = me;
    }
}

/// The ball: random launch direction, quantized bounce responses.
pub struct BallController {
    speed: i32,
    /// Candidate post-collision velocities, evenly spaced in angle with the
    /// purely horizontal entries removed. Fixed after construction.
    bounce_directions: Vec<IVec2>,
    rng: Pcg32,
}

impl BallController {
    pub fn new(speed: i32, seed: u64) -> Self {
        debug_assert!(speed > 0);
        let bounce_directions = (0..BOUNCE_DIRECTIONS)
            .map(|step| {
                let angle = 2.0 * PI * step as f64 / BOUNCE_DIRECTIONS as f64;
                IVec2::new(
                    (speed as f64 * angle.cos()).round() as i32,
                    (speed as f64 * angle.sin()).round() as i32,
                )
            })
            .filter(|direction| direction.y != 0)
            .collect();
        Self { speed, bounce_directions, rng: Pcg32::seed_from_u64(seed) }
    }

    /// Roll a launch velocity: a uniformly random direction at ball speed,
    /// rejection-sampled so the ball never starts near-horizontally.
    pub fn launch_velocity(&mut self) -> IVec2 {
        loop {
            let radians = self.rng.random::<f64>() * 2.0 * PI;
            let degrees = radians.to_degrees();
            if (0.0..=60.0).contains(&degrees) || (120.0..=360.0).contains(&degrees) {
                continue;
            }
            return IVec2::new(
                (self.speed as f64 * radians.cos()).round() as i32,
                (self.speed as f64 * radians.sin()).round() as i32,
            );
        }
    }

    #[cfg(test)]
    fn bounce_directions(&self) -> &[IVec2] {
        &self.bounce_directions
    }
}

impl Controller for BallController {
    fn decide_velocity(
        &mut self,
        me: BodyId,
        bodies: &[BodyCore],
        _input: &TickInput,
        _dt: f32,
    ) -> IVec2 {
        // Collisions reassign the velocity; between collisions the ball
        // flies straight.
        bodies[me.0].velocity
    }

    fn on_peer_collision(&mut self, me: &mut BodyCore, other: &BodyCore) {
        // Quantized reflection: pick the candidate closest to the
        // center-to-center direction, then mirror it on both axes so the
        // ball leaves pointing away from the obstacle.
        let collision_direction = other.center() - me.center();
        let distances: Vec<f32> = self
            .bounce_directions
            .iter()
            .map(|direction| (collision_direction - *direction).as_vec2().length_squared())
            .collect();
        let Ok((_, index)) = argmin(&distances) else {
            return;
        };
        me.velocity = self.bounce_directions[index] * IVec2::new(-1, -1);
        log::debug!("{} bounced off {} into {:?}", me.name, other.name, me.velocity);
    }

    fn on_wall_collision(&mut self, me: &mut BodyCore) {
        let bounds = me.bounds();
        let distances = [
            bounds.left() - me.room.left(),
            me.room.right() - bounds.right(),
            bounds.top() - me.room.top(),
            me.room.bottom() - bounds.bottom(),
        ];
        debug_assert!(distances.iter().all(|&distance| distance >= 0));

        // Flip the axis whose wall is nearest after the push-back; the side
        // walls win index 0 and 1, the top and bottom walls the rest.
        let Ok((_, index)) = argmin(&distances) else {
            return;
        };
        me.velocity *= if index <= 1 { IVec2::new(-1, 1) } else { IVec2::new(1, -1) };
        log::debug!("{} reflected off a wall into {:?}", me.name, me.velocity);
    }
}

/// Keyboard-driven paddle: left/right key state becomes horizontal intent.
pub struct HumanPaddleController {
    speed: i32,
}

impl HumanPaddleController {
    pub fn new(speed: i32) -> Self {
        debug_assert!(speed >= 0);
        Self { speed }
    }
}

impl Controller for HumanPaddleController {
    fn decide_velocity(
        &mut self,
        _me: BodyId,
        _bodies: &[BodyCore],
        input: &TickInput,
        _dt: f32,
    ) -> IVec2 {
        let mut x = 0;
        if input.left {
            x = -self.speed;
        }
        if input.right {
            x = self.speed;
        }
        IVec2::new(x, 0)
    }
}

/// Forecast-driven paddle: re-derives its intent every tick from a fresh
/// trajectory simulation of the ball.
pub struct AiPaddleController {
    ball: BodyId,
    defending_y: i32,
    speed: i32,
    deadzone: i32,
}

impl AiPaddleController {
    pub fn new(ball: BodyId, defending_y: i32, speed: i32, deadzone: i32) -> Self {
        debug_assert!(speed >= 0);
        debug_assert!(deadzone >= 0);
        Self { ball, defending_y, speed, deadzone }
    }
}

impl Controller for AiPaddleController {
    fn decide_velocity(
        &mut self,
        me: BodyId,
        bodies: &[BodyCore],
        _input: &TickInput,
        _dt: f32,
    ) -> IVec2 {
        let ball = &bodies[self.ball.0];
        let paddle = &bodies[me.0];
        debug_assert_eq!(ball.room, paddle.room);

        let forecast =
            forecast_crossing(ball.center(), ball.velocity, paddle.room, self.defending_y);

        let direction = match forecast {
            Some(crossing) => {
                let delta = crossing.x - (paddle.position.x + paddle.mask.center().x);
                if delta.abs() < self.deadzone { 0 } else { delta.signum() }
            }
            // No crossing this tick (stalled or axis-parallel ball): hold.
            None => 0,
        };
        IVec2::new(direction * self.speed, 0)
    }
}

/// Owns every body and its controller, in id order.
pub struct Arena {
    room: Bounds,
    pub(crate) bodies: Vec<BodyCore>,
    pub(crate) controllers: Vec<Box<dyn Controller>>,
}

impl Arena {
    pub fn new(room: Bounds) -> Self {
        Self { room, bodies: Vec::new(), controllers: Vec::new() }
    }

    pub fn room(&self) -> Bounds {
        self.room
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Register a body with its controller; returns its stable handle.
    pub fn add_body(&mut self, core: BodyCore, controller: Box<dyn Controller>) -> BodyId {
        debug_assert_eq!(core.room, self.room);
        let id = BodyId(self.bodies.len());
        log::info!("{} registered as body {} at {:?}", core.name, id.0, core.position);
        self.bodies.push(core);
        self.controllers.push(controller);
        id
    }

    /// Spawn a ball with a seeded RNG and roll its launch velocity.
    pub fn add_ball(
        &mut self,
        mask: Arc<OpacityMask>,
        position: IVec2,
        speed: i32,
        seed: u64,
    ) -> BodyId {
        let mut controller = BallController::new(speed, seed);
        let mut core = BodyCore::new("ball", mask, position, self.room);
        core.velocity = controller.launch_velocity();
        self.add_body(core, Box::new(controller))
    }

    pub fn add_human_paddle(
        &mut self,
        mask: Arc<OpacityMask>,
        position: IVec2,
        speed: i32,
    ) -> BodyId {
        let core = BodyCore::new("paddle", mask, position, self.room);
        self.add_body(core, Box::new(HumanPaddleController::new(speed)))
    }

    /// Spawn the defending paddle. `defending_y` must be the room's top or
    /// bottom edge; `ball` is the body whose trajectory it forecasts.
    pub fn add_ai_paddle(
        &mut self,
        mask: Arc<OpacityMask>,
        position: IVec2,
        speed: i32,
        deadzone: i32,
        defending_y: i32,
        ball: BodyId,
    ) -> BodyId {
        debug_assert!(defending_y == self.room.top() || defending_y == self.room.bottom());
        debug_assert!(ball.0 < self.bodies.len());
        let core = BodyCore::new("paddle", mask, position, self.room);
        self.add_body(core, Box::new(AiPaddleController::new(ball, defending_y, speed, deadzone)))
    }

    /// Collision peers checked on the body's turn each tick. Meant for arena
    /// setup; the lists are read-only during simulation.
    pub fn set_peers(&mut self, id: BodyId, peers: Vec<BodyId>) {
        debug_assert!(peers.iter().all(|peer| peer.0 < self.bodies.len() && *peer != id));
        self.bodies[id.0].peers = peers;
    }

    pub fn body(&self, id: BodyId) -> &BodyCore {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut BodyCore {
        &mut self.bodies[id.0]
    }

    pub fn bodies(&self) -> &[BodyCore] {
        &self.bodies
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn test_room() -> Bounds {
        Bounds::new(0, 0, 800, 480)
    }

    fn ball_body(position: IVec2) -> BodyCore {
        BodyCore::new("ball", Arc::new(OpacityMask::filled(16, 16)), position, test_room())
    }

    fn paddle_body(position: IVec2) -> BodyCore {
        BodyCore::new("paddle", Arc::new(OpacityMask::filled(64, 12)), position, test_room())
    }

    #[test]
    fn test_bounce_table_excludes_horizontal_directions() {
        let ball = BallController::new(600, 1);
        let table = ball.bounce_directions();
        // 32 raw candidates minus the two with zero vertical component.
        assert_eq!(table.len(), 30);
        assert!(table.iter().all(|direction| direction.y != 0));
        // Each entry sits on the speed circle, up to rounding.
        for direction in table {
            let magnitude = direction.as_vec2().length();
            assert!((magnitude - 600.0).abs() < 1.0, "off-circle entry {direction:?}");
        }
    }

    #[test]
    fn test_peer_bounce_mirrors_away_from_the_obstacle() {
        let mut controller = BallController::new(600, 1);
        // Ball center (108, 108); obstacle center directly below at
        // (108, 126). Rounding leaves the 78.75-degree entry (117, 588)
        // slightly inside the speed circle, so it beats (0, 600) against the
        // short collision vector (0, +18); the mirrored pick still sends the
        // ball up and away.
        let mut ball = ball_body(IVec2::new(100, 100));
        let obstacle = paddle_body(IVec2::new(76, 120));
        controller.on_peer_collision(&mut ball, &obstacle);
        assert_eq!(ball.velocity, IVec2::new(-117, -588));
    }

    #[test]
    fn test_wall_bounce_flips_x_near_a_side_wall() {
        let mut controller = BallController::new(600, 1);
        let mut ball = ball_body(IVec2::new(0, 200));
        ball.velocity = IVec2::new(-300, 520);
        controller.on_wall_collision(&mut ball);
        assert_eq!(ball.velocity, IVec2::new(300, 520));
    }

    #[test]
    fn test_wall_bounce_flips_y_near_the_top() {
        let mut controller = BallController::new(600, 1);
        let mut ball = ball_body(IVec2::new(400, 0));
        ball.velocity = IVec2::new(-300, -520);
        controller.on_wall_collision(&mut ball);
        assert_eq!(ball.velocity, IVec2::new(-300, 520));
    }

    #[test]
    fn test_human_paddle_follows_key_state() {
        let mut controller = HumanPaddleController::new(400);
        let bodies = [paddle_body(IVec2::new(100, 468))];
        let me = BodyId(0);

        let idle = TickInput::default();
        assert_eq!(controller.decide_velocity(me, &bodies, &idle, 0.016), IVec2::ZERO);

        let left = TickInput { left: true, right: false };
        assert_eq!(controller.decide_velocity(me, &bodies, &left, 0.016), IVec2::new(-400, 0));

        // Both keys held: right wins.
        let both = TickInput { left: true, right: true };
        assert_eq!(controller.decide_velocity(me, &bodies, &both, 0.016), IVec2::new(400, 0));
    }

    #[test]
    fn test_ai_paddle_chases_the_forecast_crossing() {
        let mut ball = ball_body(IVec2::new(392, 232));
        ball.velocity = IVec2::new(0, -600);
        // Paddle center starts at x = 132; the vertical shot crosses the
        // top at the ball center's x = 400.
        let paddle = paddle_body(IVec2::new(100, 0));
        let bodies = [ball, paddle];

        let mut controller = AiPaddleController::new(BodyId(0), 0, 400, AI_DEADZONE);
        let velocity =
            controller.decide_velocity(BodyId(1), &bodies, &TickInput::default(), 0.016);
        assert_eq!(velocity, IVec2::new(400, 0));
    }

    #[test]
    fn test_ai_paddle_holds_inside_the_deadzone() {
        let mut ball = ball_body(IVec2::new(392, 232));
        ball.velocity = IVec2::new(0, -600);
        // Paddle center at x = 412, within 30 pixels of the crossing at 400.
        let paddle = paddle_body(IVec2::new(380, 0));
        let bodies = [ball, paddle];

        let mut controller = AiPaddleController::new(BodyId(0), 0, 400, AI_DEADZONE);
        let velocity =
            controller.decide_velocity(BodyId(1), &bodies, &TickInput::default(), 0.016);
        assert_eq!(velocity, IVec2::ZERO);
    }

    #[test]
    fn test_ai_paddle_holds_without_a_forecast() {
        // A stationary ball yields no crossing at all.
        let ball = ball_body(IVec2::new(392, 232));
        let paddle = paddle_body(IVec2::new(100, 0));
        let bodies = [ball, paddle];

        let mut controller = AiPaddleController::new(BodyId(0), 0, 400, AI_DEADZONE);
        let velocity =
            controller.decide_velocity(BodyId(1), &bodies, &TickInput::default(), 0.016);
        assert_eq!(velocity, IVec2::ZERO);
    }

    #[test]
    fn test_arena_wiring() {
        let mut arena = Arena::new(test_room());
        let mask = Arc::new(OpacityMask::filled(16, 16));
        let paddle_mask = Arc::new(OpacityMask::filled(64, 12));

        let ball = arena.add_ball(mask, IVec2::new(392, 232), 600, 7);
        let human = arena.add_human_paddle(paddle_mask.clone(), IVec2::new(368, 468), 400);
        let ai = arena.add_ai_paddle(paddle_mask, IVec2::new(368, 0), 400, AI_DEADZONE, 0, ball);
        arena.set_peers(ball, vec![human, ai]);

        assert_eq!(arena.len(), 3);
        assert_eq!(arena.body(ball).peers, vec![human, ai]);
        assert!(arena.body(human).peers.is_empty());
        assert_ne!(arena.body(ball).velocity, IVec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_launch_direction_avoids_the_forbidden_band(seed in any::<u64>()) {
            let mut ball = BallController::new(600, seed);
            let velocity = ball.launch_velocity();
            let degrees = (velocity.y as f64).atan2(velocity.x as f64).to_degrees();
            // The accepted band is (60, 120) degrees; rounding the
            // components moves the angle by well under half a degree at
            // this speed.
            prop_assert!(degrees > 59.5 && degrees < 120.5);
            prop_assert!(velocity.y > 0);
        }
    }
}
