//! Scene graph and hierarchical scene organization.
//!
//! A map build produces a tree of [`SceneNode`]s: [`ContainerNode`]s group
//! other nodes, [`PrimitiveNode`]s carry one renderable [`Primitive`]. Every
//! node keeps a local transform and a cached world transform which is
//! refreshed through [`SceneNode::update_world_transforms`].

use std::fmt::Debug;

use crate::data_structures::{instance::Instance, model::Primitive};

pub trait SceneNode: Debug {
    fn name(&self) -> &str;

    /// The renderable carried by this node, `None` for pure containers.
    fn primitive(&self) -> Option<&Primitive>;

    fn get_local_transform(&self) -> &Instance;

    fn set_local_transform(&mut self, instance: Instance);

    fn get_world_transform(&self) -> &Instance;

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    /**
     * Recomputes this node's world transform from the parent's and passes it down to
     * all children.
     */
    fn update_world_transforms(&mut self, parents_world_transform: &Instance);

    /// Refreshes the whole subtree, treating this node as the root.
    fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&Instance::default());
    }
}

/// Calls `visit` on `node` and every descendant, parents before children.
pub fn walk<'a>(node: &'a dyn SceneNode, visit: &mut dyn FnMut(&'a dyn SceneNode)) {
    visit(node);
    for child in node.get_children() {
        walk(child.as_ref(), visit);
    }
}

/// All nodes of the subtree that carry a primitive, in depth-first order.
pub fn primitives(node: &dyn SceneNode) -> Vec<(&str, &Primitive)> {
    let mut found = Vec::new();
    walk(node, &mut |n| {
        if let Some(primitive) = n.primitive() {
            found.push((n.name(), primitive));
        }
    });
    found
}

pub fn find_by_name<'a>(node: &'a dyn SceneNode, name: &str) -> Option<&'a dyn SceneNode> {
    if node.name() == name {
        return Some(node);
    }
    node.get_children()
        .iter()
        .find_map(|child| find_by_name(child.as_ref(), name))
}

#[derive(Debug)]
pub struct ContainerNode {
    name: String,
    children: Vec<Box<dyn SceneNode>>,
    transform: (Instance, Instance),
}

impl ContainerNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: vec![],
            transform: (Instance::default(), Instance::default()),
        }
    }
}

impl SceneNode for ContainerNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn primitive(&self) -> Option<&Primitive> {
        None
    }

    fn get_local_transform(&self) -> &Instance {
        &self.transform.0
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.transform.0 = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.transform.1
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let (local, world) = &mut self.transform;
        *world = parents_world_transform * &*local;
        let world = world.clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }
}

#[derive(Debug)]
pub struct PrimitiveNode {
    name: String,
    primitive: Primitive,
    children: Vec<Box<dyn SceneNode>>,
    transform: (Instance, Instance),
}

impl PrimitiveNode {
    pub fn new(name: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            name: name.into(),
            primitive,
            children: vec![],
            transform: (Instance::default(), Instance::default()),
        }
    }

    /// Same as [`PrimitiveNode::new`] with an initial local transform.
    pub fn with_transform(name: impl Into<String>, primitive: Primitive, local: Instance) -> Self {
        let mut node = Self::new(name, primitive);
        node.transform.0 = local;
        node
    }

    pub fn boxed(self) -> Box<dyn SceneNode> {
        Box::new(self)
    }
}

impl SceneNode for PrimitiveNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn primitive(&self) -> Option<&Primitive> {
        Some(&self.primitive)
    }

    fn get_local_transform(&self) -> &Instance {
        &self.transform.0
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.transform.0 = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.transform.1
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let (local, world) = &mut self.transform;
        *world = parents_world_transform * &*local;
        let world = world.clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }
}
