use std::ops::Range;

use cgmath::{Point3, Vector3};

/// Gameplay tuning. All rates are per frame, not per second.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightConfig {
    /// Distance travelled along the heading each frame.
    pub speed: f32,
    /// Radians added to pitch or roll per frame while a control is held.
    pub rotation_speed: f32,
    /// Camera goal relative to the airplane, in the airplane's frame.
    pub camera_offset: Vector3<f32>,
    /// Fraction of the remaining distance the camera covers each frame.
    pub camera_smoothing: f32,
    pub camera_start: Point3<f32>,
    /// Radians each ring spins about its vertical axis per frame.
    pub ring_spin: f32,
    /// A ring closer than this (strictly) is collected.
    pub collect_radius: f32,
    pub points_per_ring: u32,
    /// The game ends once any coordinate's magnitude exceeds this.
    pub world_bound: f32,
    pub spawn_x: Range<f32>,
    pub spawn_y: Range<f32>,
    /// Initial depth range; respawns are placed relative to the airplane instead.
    pub spawn_z: Range<f32>,
    /// A collected ring reappears this far beyond the airplane along -z...
    pub respawn_distance: f32,
    /// ...plus up to this much extra.
    pub respawn_spread: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            rotation_speed: 0.03,
            camera_offset: Vector3::new(0.0, 3.0, 10.0),
            camera_smoothing: 0.1,
            camera_start: Point3::new(0.0, 5.0, 10.0),
            ring_spin: 0.02,
            collect_radius: 5.0,
            points_per_ring: 10,
            world_bound: 100.0,
            spawn_x: -50.0..50.0,
            spawn_y: 10.0..60.0,
            spawn_z: -50.0..50.0,
            respawn_distance: 100.0,
            respawn_spread: 50.0,
        }
    }
}
