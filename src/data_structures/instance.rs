//! Node transformation data.
//!
//! Each scene node keeps a local transform relative to its parent and a
//! cached world transform that is refreshed by walking the graph.

use std::ops::Mul;

use cgmath::{ElementWise, Matrix4, One, Point3, Quaternion, Transform, Vector3, Zero};

/// Translation, rotation and non-uniform scale, applied scale first.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// The identity transform.
    pub fn new() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn transform_point(&self, point: Point3<f32>) -> Point3<f32> {
        self.to_matrix().transform_point(point)
    }

    /// Rotates a direction; translation and scale do not apply to normals here.
    pub fn transform_normal(&self, normal: Vector3<f32>) -> Vector3<f32> {
        self.rotation * normal
    }
}

/// `parent * child` places the child in the parent's frame.
impl Mul<&Instance> for &Instance {
    type Output = Instance;

    fn mul(self, child: &Instance) -> Instance {
        Instance {
            position: self.position + self.rotation * self.scale.mul_element_wise(child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.mul_element_wise(child.scale),
        }
    }
}

impl Mul<Instance> for Instance {
    type Output = Self;

    fn mul(self, child: Instance) -> Self::Output {
        &self * &child
    }
}

impl From<Vector3<f32>> for Instance {
    fn from(position: Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}
