use cgmath::prelude::*;
use cgmath::{Deg, Rad, Vector3};

/// Direction of `v` with unit length, or `None` for a zero-length vector.
pub fn unit(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let length = v.magnitude();
    if length > 0. {
        Some(v / length)
    } else {
        None
    }
}

/// Rotates `v` about the vertical axis by `degrees`. Positive angles turn +X
/// toward +Z.
pub fn rotate_y(v: Vector3<f32>, degrees: f32) -> Vector3<f32> {
    let Rad(rad) = Rad::from(Deg(degrees));
    let (s, c) = rad.sin_cos();
    Vector3::new(c * v.x - s * v.z, v.y, s * v.x + c * v.z)
}

pub fn gravity(mass: f32, g: f32) -> Vector3<f32> {
    Vector3::new(0., -mass * g, 0.)
}
