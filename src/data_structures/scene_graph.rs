//! Scene graph and hierarchical scene organization.
//!
//! A scene node owns a list of `(local, world)` transform pairs, one per
//! instance, and passes its world transforms down to its children. The
//! airplane is a [`ContainerNode`] whose three [`ModelNode`] children carry the
//! fixed offsets of fuselage, wings and tail; the ring field is a single
//! [`ModelNode`] with one instance per ring.

use std::ops::Range;

use log::warn;
use wgpu::{Device, Queue, util::DeviceExt};

use crate::{
    context::GPUResource,
    data_structures::{
        instance::{Instance, InstanceRaw},
        model,
    },
    render::{Instanced, Render},
};

pub trait SceneNode {
    fn get_world_transforms(&self) -> Vec<Instance>;

    fn set_local_transform(&mut self, idx: usize, instance: Instance);

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device);

    /**
     * Multiple instances of a parent can be passed down to multiple instances of multiple children.
     * The argument `parents_world_transform` with a matching `range` size provides control over which instances are transformed.
     */
    fn update_world_transforms(
        &mut self,
        range: Range<usize>,
        parents_world_transform: &Vec<Instance>,
    );

    fn update_world_transform_all(&mut self);

    fn get_render(&self) -> Vec<Instanced<'_>>;
}

impl<'a, 'pass, T> GPUResource<'a, 'pass> for T
where
    T: SceneNode,
{
    fn write_to_buffer(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.update_world_transform_all();
        self.write_to_buffers(queue, device);
    }

    fn to_render(&'a self) -> Render<'a, 'pass> {
        Render::Defaults(self.get_render())
    }
}

/// Shared world-transform propagation for both node kinds.
fn propagate(
    instances: &mut Vec<(Instance, Instance)>,
    children: &mut Vec<Box<dyn SceneNode>>,
    range: Range<usize>,
    parents_world_transform: &Vec<Instance>,
) {
    if parents_world_transform.len() > instances.len() {
        warn!(
            "You tried to transform with len {}, but there are only {} instances to transform.",
            parents_world_transform.len(),
            instances.len()
        );
        return;
    }
    if instances.get(range.clone()).is_none() {
        warn!(
            "You tried to transform range {}..{}, which is out of bounds for parent len {}.",
            range.start,
            range.end,
            instances.len(),
        );
        return;
    }
    let world_transforms = instances[range.clone()]
        .iter_mut()
        .zip(parents_world_transform.iter())
        .map(|((local, world), parent)| {
            *world = parent * &*local;
            world.clone()
        })
        .collect::<Vec<_>>();
    for child in children.iter_mut() {
        child.update_world_transforms(range.clone(), &world_transforms);
    }
}

/// A node without geometry of its own; it only groups and transforms children.
pub struct ContainerNode {
    pub children: Vec<Box<dyn SceneNode>>,
    pub instances: Vec<(Instance, Instance)>,
}

impl ContainerNode {
    pub fn new(amount: usize) -> Self {
        let instances = (0..amount)
            .map(|_| (Instance::default(), Instance::default()))
            .collect();
        Self {
            instances,
            children: vec![],
        }
    }
}

impl SceneNode for ContainerNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn update_world_transforms(
        &mut self,
        range: Range<usize>,
        parents_world_transform: &Vec<Instance>,
    ) {
        propagate(
            &mut self.instances,
            &mut self.children,
            range,
            parents_world_transform,
        );
    }

    fn update_world_transform_all(&mut self) {
        let range = 0..self.instances.len();
        let default_instances = range.clone().map(|_| Instance::default()).collect();
        self.update_world_transforms(range, &default_instances);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.get_children_mut()
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .collect()
    }
}

/// A node drawing one model once per instance.
pub struct ModelNode {
    children: Vec<Box<dyn SceneNode>>,
    instance_buffer: wgpu::Buffer,
    instances: Vec<(Instance, Instance)>,
    model: model::Model,
}

impl ModelNode {
    pub fn from_model(amount: usize, device: &Device, model: model::Model) -> Self {
        let instances = (0..amount)
            .map(|_| (Instance::default(), Instance::default()))
            .collect::<Vec<_>>();

        let instance_data = instances
            .iter()
            .map(|(_, world)| world)
            .map(Instance::to_raw)
            .collect::<Vec<_>>();

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            children: vec![],
            instance_buffer,
            instances,
            model,
        }
    }
}

impl SceneNode for ModelNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn update_world_transforms(
        &mut self,
        range: Range<usize>,
        parents_world_transform: &Vec<Instance>,
    ) {
        propagate(
            &mut self.instances,
            &mut self.children,
            range,
            parents_world_transform,
        );
    }

    fn update_world_transform_all(&mut self) {
        let range = 0..self.instances.len();
        let default_instances = range.clone().map(|_| Instance::default()).collect();
        self.update_world_transforms(range, &default_instances);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        let raw_instances: Vec<InstanceRaw> = self
            .instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect();
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&raw_instances),
        );
        self.get_children_mut()
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .chain([Instanced {
                instance: &self.instance_buffer,
                model: &self.model,
                amount: self.instances.len(),
            }])
            .collect()
    }
}

/// Groups several models under one container, each child placed at a fixed local offset.
///
/// Every child gets as many instances as the container so that instance `i`
/// of the container drives instance `i` of every part.
pub fn mk_composite(
    amount: usize,
    parts: Vec<(model::Model, Instance)>,
    device: &wgpu::Device,
    queue: &Queue,
) -> ContainerNode {
    let mut parent = ContainerNode::new(amount);
    for (model, offset) in parts {
        let mut child = ModelNode::from_model(amount, device, model);
        for idx in 0..amount {
            child.set_local_transform(idx, offset.clone());
        }
        parent.add_child(Box::new(child));
    }
    parent.update_world_transform_all();
    parent.write_to_buffers(queue, device);
    parent
}
