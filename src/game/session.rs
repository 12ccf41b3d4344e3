//! Per-session game state and the frame update.
//!
//! A session has two phases. While [`Phase::Playing`], every call to
//! [`GameSession::update`] steers, moves, eases the camera, spins and collects
//! rings, then checks the world bounds. Once [`Phase::GameOver`] is reached the
//! session is frozen: further updates change nothing and emit nothing.

use cgmath::{
    EuclideanSpace, Euler, MetricSpace, Point3, Quaternion, Rad, Rotation, Rotation3, Vector3,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    data_structures::instance::Instance,
    game::{config::FlightConfig, event::GameEvent},
    input::{Control, InputSource},
};

pub const RING_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Airplane {
    pub position: Vector3<f32>,
    /// Pitch (x), yaw (y) and roll (z), applied in x, y, z order.
    pub attitude: Euler<Rad<f32>>,
}

impl Airplane {
    pub fn orientation(&self) -> Quaternion<f32> {
        Quaternion::from(self.attitude)
    }

    /// Unit heading: local -z rotated into world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.orientation().rotate_vector(-Vector3::unit_z())
    }

    pub fn to_instance(&self) -> Instance {
        Instance::from(self.position).with_rotation(self.orientation())
    }
}

impl Default for Airplane {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            attitude: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub position: Vector3<f32>,
    /// Accumulated spin about the vertical axis. Cosmetic only.
    pub spin: Rad<f32>,
}

impl Ring {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            spin: Rad(0.0),
        }
    }

    pub fn to_instance(&self) -> Instance {
        Instance::from(self.position).with_rotation(Quaternion::from_angle_y(self.spin))
    }
}

/// Trailing camera: eases towards a point behind and above the airplane and looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl FollowCamera {
    fn follow(&mut self, airplane: &Airplane, config: &FlightConfig) {
        let goal = Point3::from_vec(
            airplane.position + airplane.orientation().rotate_vector(config.camera_offset),
        );
        self.position += (goal - self.position) * config.camera_smoothing;
        self.target = Point3::from_vec(airplane.position);
    }
}

#[derive(Debug)]
pub struct GameSession {
    config: FlightConfig,
    airplane: Airplane,
    camera: FollowCamera,
    rings: [Ring; RING_COUNT],
    score: u32,
    phase: Phase,
    rng: StdRng,
}

impl GameSession {
    /// A session with default tuning whose ring placement is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_config(FlightConfig::default(), StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_config(FlightConfig::default(), StdRng::from_entropy())
    }

    pub fn with_config(config: FlightConfig, mut rng: StdRng) -> Self {
        let rings = std::array::from_fn(|_| {
            Ring::new(Vector3::new(
                rng.gen_range(config.spawn_x.clone()),
                rng.gen_range(config.spawn_y.clone()),
                rng.gen_range(config.spawn_z.clone()),
            ))
        });
        let airplane = Airplane::default();
        let camera = FollowCamera {
            position: config.camera_start,
            target: Point3::from_vec(airplane.position),
        };
        Self {
            config,
            airplane,
            camera,
            rings,
            score: 0,
            phase: Phase::Playing,
            rng,
        }
    }

    /// Advances the session by one frame.
    ///
    /// Returns the notifications produced on the way: one [`GameEvent::Score`]
    /// per collected ring, and [`GameEvent::GameOver`] on the frame the
    /// airplane leaves the world.
    pub fn update(&mut self, input: &impl InputSource) -> Vec<GameEvent> {
        if self.phase == Phase::GameOver {
            return vec![];
        }
        let mut events = vec![];

        self.steer(input);
        let velocity = self.airplane.forward() * self.config.speed;
        self.airplane.position += velocity;
        self.camera.follow(&self.airplane, &self.config);

        for idx in 0..RING_COUNT {
            self.rings[idx].spin += Rad(self.config.ring_spin);
            let distance = self.airplane.position.distance(self.rings[idx].position);
            if distance < self.config.collect_radius {
                self.rings[idx].position = self.respawn_position();
                self.score += self.config.points_per_ring;
                events.push(GameEvent::Score(self.score));
            }
        }

        if self.is_out_of_bounds() {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
        events
    }

    fn steer(&mut self, input: &impl InputSource) {
        let step = Rad(self.config.rotation_speed);
        let attitude = &mut self.airplane.attitude;
        if Control::PitchUp.is_held(input) {
            attitude.x -= step;
        }
        if Control::PitchDown.is_held(input) {
            attitude.x += step;
        }
        if Control::RollLeft.is_held(input) {
            attitude.z += step;
        }
        if Control::RollRight.is_held(input) {
            attitude.z -= step;
        }
    }

    /// Random x and y; z is always ahead along world -z, whatever the heading.
    fn respawn_position(&mut self) -> Vector3<f32> {
        let config = &self.config;
        Vector3::new(
            self.rng.gen_range(config.spawn_x.clone()),
            self.rng.gen_range(config.spawn_y.clone()),
            self.airplane.position.z
                - config.respawn_distance
                - self.rng.gen_range(0.0..config.respawn_spread),
        )
    }

    fn is_out_of_bounds(&self) -> bool {
        let bound = self.config.world_bound;
        let p = self.airplane.position;
        p.x.abs() > bound || p.y.abs() > bound || p.z.abs() > bound
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn airplane(&self) -> &Airplane {
        &self.airplane
    }

    /// Direct access for hosts that place the airplane themselves (and for tests).
    pub fn airplane_mut(&mut self) -> &mut Airplane {
        &mut self.airplane
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn rings(&self) -> &[Ring; RING_COUNT] {
        &self.rings
    }

    /// Rings can be moved but never added or removed.
    pub fn rings_mut(&mut self) -> &mut [Ring; RING_COUNT] {
        &mut self.rings
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoKeys;

    impl InputSource for NoKeys {
        fn is_pressed(&self, _key: winit::keyboard::KeyCode) -> bool {
            false
        }
    }

    #[test]
    fn same_seed_same_rings() {
        let a = GameSession::new(7);
        let b = GameSession::new(7);
        assert_eq!(a.rings(), b.rings());
    }

    #[test]
    fn initial_rings_inside_spawn_box() {
        let session = GameSession::new(42);
        let config = FlightConfig::default();
        for ring in session.rings() {
            assert!(config.spawn_x.contains(&ring.position.x));
            assert!(config.spawn_y.contains(&ring.position.y));
            assert!(config.spawn_z.contains(&ring.position.z));
        }
    }

    #[test]
    fn respawn_lands_ahead_of_the_airplane() {
        let mut session = GameSession::new(3);
        session.airplane_mut().position.z = -40.0;
        for _ in 0..100 {
            let p = session.respawn_position();
            assert!(p.z <= -140.0 && p.z > -190.0, "z = {}", p.z);
            assert!((10.0..60.0).contains(&p.y));
        }
    }

    #[test]
    fn camera_eases_a_tenth_of_the_way() {
        let mut session = GameSession::new(1);
        session.rings_mut().iter_mut().for_each(|ring| ring.position.y = 50.0);
        session.update(&NoKeys);
        // goal after one frame is (0, 3, 9.5); start is (0, 5, 10)
        let camera = session.camera();
        assert!((camera.position.y - 4.8).abs() < 1e-5);
        assert!((camera.position.z - 9.95).abs() < 1e-5);
        assert_eq!(camera.target, Point3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn rings_spin_every_frame() {
        let mut session = GameSession::new(1);
        session.rings_mut().iter_mut().for_each(|ring| ring.position.y = 50.0);
        session.update(&NoKeys);
        session.update(&NoKeys);
        assert!(
            session
                .rings()
                .iter()
                .all(|ring| (ring.spin.0 - 0.04).abs() < 1e-6)
        );
    }
}
