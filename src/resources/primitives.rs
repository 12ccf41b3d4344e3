//! Procedural geometry for the handful of shapes the game is built from.
//!
//! Conventions follow the usual web 3D toolkits so that the same placement
//! numbers produce the same picture: cones stand on the y axis with the apex at
//! `+height / 2`, tori lie in the xy plane with the hole along z, and planes lie
//! in the xy plane facing `+z`. Front faces wind counter-clockwise.

use std::f32::consts::TAU;

use cgmath::InnerSpace;

use crate::data_structures::model::ModelVertex;

/// CPU-side triangle list, uploaded with [`crate::resources::mesh::upload_mesh`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn push(&mut self, position: cgmath::Vector3<f32>, normal: cgmath::Vector3<f32>) -> u32 {
        self.vertices.push(ModelVertex {
            position: position.into(),
            normal: normal.into(),
        });
        self.vertices.len() as u32 - 1
    }

    /// A closed cone with a flat base, apex on `+y`.
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        let mut geometry = Self::default();
        let half_height = height / 2.0;
        let slope = radius / height;

        // side: row 0 is the apex ring (radius zero), row 1 the base ring
        let mut rows = [Vec::new(), Vec::new()];
        for (row, (ring_radius, y)) in [(0.0, half_height), (radius, -half_height)]
            .into_iter()
            .enumerate()
        {
            for x in 0..=radial_segments {
                let theta = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = cgmath::Vector3::new(ring_radius * sin, y, ring_radius * cos);
                let normal = cgmath::Vector3::new(sin, slope, cos).normalize();
                rows[row].push(geometry.push(position, normal));
            }
        }
        for x in 0..radial_segments as usize {
            let b = rows[1][x];
            let c = rows[1][x + 1];
            let d = rows[0][x + 1];
            geometry.indices.extend_from_slice(&[b, c, d]);
        }

        // base cap, facing down
        let down = -cgmath::Vector3::unit_y();
        let centers = (0..radial_segments)
            .map(|_| geometry.push(cgmath::Vector3::new(0.0, -half_height, 0.0), down))
            .collect::<Vec<_>>();
        let rim = (0..=radial_segments)
            .map(|x| {
                let theta = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                geometry.push(
                    cgmath::Vector3::new(radius * sin, -half_height, radius * cos),
                    down,
                )
            })
            .collect::<Vec<_>>();
        for x in 0..radial_segments as usize {
            geometry
                .indices
                .extend_from_slice(&[rim[x + 1], rim[x], centers[x]]);
        }

        geometry
    }

    /// An axis aligned box centred on the origin with flat-shaded faces.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let mut geometry = Self::default();
        let half = cgmath::Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
        let extent = |axis: cgmath::Vector3<f32>| {
            axis.x.abs() * half.x + axis.y.abs() * half.y + axis.z.abs() * half.z
        };
        let x = cgmath::Vector3::unit_x();
        let y = cgmath::Vector3::unit_y();
        let z = cgmath::Vector3::unit_z();
        // (normal, u, v) with u x v == normal so the quads wind outwards
        let faces = [(x, -z, y), (-x, z, y), (y, x, -z), (-y, x, z), (z, x, y), (-z, -x, y)];
        for (normal, u, v) in faces {
            let center = normal * extent(normal);
            let (u, v) = (u * extent(u), v * extent(v));
            let first = geometry.push(center - u - v, normal);
            geometry.push(center + u - v, normal);
            geometry.push(center + u + v, normal);
            geometry.push(center - u + v, normal);
            geometry.indices.extend_from_slice(&[
                first,
                first + 1,
                first + 2,
                first,
                first + 2,
                first + 3,
            ]);
        }
        geometry
    }

    /// A full torus in the xy plane around the origin.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let mut geometry = Self::default();
        for j in 0..=radial_segments {
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;
                let v = j as f32 / radial_segments as f32 * TAU;
                let position = cgmath::Vector3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let center = cgmath::Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
                geometry.push(position, (position - center).normalize());
            }
        }
        let stride = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        geometry
    }

    /// A single quad in the xy plane facing `+z`.
    pub fn plane(width: f32, height: f32) -> Self {
        let mut geometry = Self::default();
        let (hw, hh) = (width / 2.0, height / 2.0);
        let normal = cgmath::Vector3::unit_z();
        for (x, y) in [(-hw, hh), (hw, hh), (-hw, -hh), (hw, -hh)] {
            geometry.push(cgmath::Vector3::new(x, y, 0.0), normal);
        }
        geometry.indices.extend_from_slice(&[0, 2, 1, 2, 3, 1]);
        geometry
    }
}
