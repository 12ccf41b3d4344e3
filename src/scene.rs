//! Static scene construction: airplane, rings, ground, lights and sky.
//!
//! Everything here is built once. Per frame only the instance transforms of
//! the airplane and the rings change, copied over from the session by
//! [`Scene::sync`].

use std::f32::consts::FRAC_PI_2;

use cgmath::{Quaternion, Rad, Rotation3, Vector3};

use crate::{
    context::GPUResource,
    data_structures::{
        instance::Instance,
        model::MaterialUniform,
        scene_graph::{ContainerNode, ModelNode, SceneNode, mk_composite},
    },
    game::session::{GameSession, RING_COUNT},
    pipelines::light::LightUniform,
    render::Render,
    resources::{colour, mk_model, primitives::Geometry},
};

pub const SKY: u32 = 0x87ceeb;
const GROUND: u32 = 0x91c788;
const FUSELAGE: u32 = 0x3498db;
const WING: u32 = 0x2980b9;
const RING: u32 = 0xf1c40f;
const RING_GLOW: u32 = 0xf39c12;

pub fn sky_colour() -> wgpu::Color {
    colour::clear_colour(SKY)
}

/// Soft white ambient plus a white sun from (10, 20, 10).
pub fn light_rig() -> LightUniform {
    LightUniform::new(0xffffff, 0.6, Vector3::new(10.0, 20.0, 10.0), 0xffffff, 0.8)
}

fn plain(hex: u32) -> MaterialUniform {
    MaterialUniform::new(colour::linear_rgb(hex), [0.0; 3], 0.0)
}

/// Fuselage, wings and tail with their offsets relative to the airplane's origin.
pub fn airplane_parts() -> Vec<(&'static str, Geometry, MaterialUniform, Instance)> {
    vec![
        (
            "fuselage",
            Geometry::cone(0.5, 4.0, 8),
            plain(FUSELAGE),
            Instance::new().with_rotation(Quaternion::from_angle_x(Rad(FRAC_PI_2))),
        ),
        (
            "wings",
            Geometry::cuboid(6.0, 0.2, 1.0),
            plain(WING),
            Instance::from(Vector3::new(0.0, 0.3, 0.0)),
        ),
        (
            "tail",
            Geometry::cuboid(1.0, 1.0, 0.2),
            plain(WING),
            Instance::from(Vector3::new(0.0, 0.5, 1.5)),
        ),
    ]
}

pub fn ring_material() -> MaterialUniform {
    MaterialUniform::new(
        colour::linear_rgb(RING),
        colour::linear_rgb(RING_GLOW),
        0.5,
    )
}

/// A 1000 x 1000 ground plane lying flat 50 units below the origin.
pub fn ground_transform() -> Instance {
    Instance::from(Vector3::new(0.0, -50.0, 0.0))
        .with_rotation(Quaternion::from_angle_x(Rad(-FRAC_PI_2)))
}

pub struct Scene {
    pub airplane: ContainerNode,
    pub rings: ModelNode,
    pub ground: ModelNode,
}

impl Scene {
    pub fn build(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let parts = airplane_parts()
            .into_iter()
            .map(|(name, geometry, material, offset)| {
                (mk_model(device, name, &geometry, material), offset)
            })
            .collect();
        let airplane = mk_composite(1, parts, device, queue);

        let torus = mk_model(
            device,
            "ring",
            &Geometry::torus(3.0, 0.2, 16, 32),
            ring_material(),
        );
        let rings = ModelNode::from_model(RING_COUNT, device, torus);

        let plane = mk_model(
            device,
            "ground",
            &Geometry::plane(1000.0, 1000.0),
            plain(GROUND),
        );
        let mut ground = ModelNode::from_model(1, device, plane);
        ground.set_local_transform(0, ground_transform());
        ground.write_to_buffer(queue, device);

        Self {
            airplane,
            rings,
            ground,
        }
    }

    /// Copies airplane and ring transforms from the session and uploads them.
    pub fn sync(&mut self, session: &GameSession, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.airplane
            .set_local_transform(0, session.airplane().to_instance());
        for (idx, ring) in session.rings().iter().enumerate() {
            self.rings.set_local_transform(idx, ring.to_instance());
        }
        self.airplane.write_to_buffer(queue, device);
        self.rings.write_to_buffer(queue, device);
    }

    pub fn render<'a, 'pass>(&'a self) -> Render<'a, 'pass> {
        Render::Composed(vec![
            self.airplane.to_render(),
            self.rings.to_render(),
            Render::DoubleSideds(self.ground.get_render()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Rotation};

    use super::*;

    #[test]
    fn fuselage_lies_along_the_flight_axis() {
        let parts = airplane_parts();
        let (_, _, _, fuselage) = &parts[0];
        let axis = fuselage.rotation.rotate_vector(Vector3::unit_y());
        assert!((axis - Vector3::unit_z()).magnitude() < 1e-6);
    }

    #[test]
    fn tail_sits_behind_and_above_the_wings() {
        let parts = airplane_parts();
        let wings = &parts[1].3;
        let tail = &parts[2].3;
        assert!(tail.position.z > wings.position.z);
        assert!(tail.position.y > wings.position.y);
    }

    #[test]
    fn ground_faces_up() {
        let ground = ground_transform();
        let normal = ground.rotation.rotate_vector(Vector3::unit_z());
        assert!((normal - Vector3::unit_y()).magnitude() < 1e-6);
        assert_eq!(ground.position.y, -50.0);
    }

    #[test]
    fn rings_glow() {
        let material = ring_material();
        assert!(material.emissive[0] > 0.0 && material.emissive[0] <= 0.5);
        assert_eq!(material.colour[3], 1.0);
    }
}
