//! 4x4 transforms for placing nodes on screen.
//!
//! Matrices are composed by left-multiplying onto the base matrix, so the
//! column-major storage of the result is what a GL-style uniform upload
//! expects without transposing.

use cgmath::prelude::*;
use cgmath::{Deg, Matrix4, Vector3};

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Applies a translation by `t` after `m`.
pub fn translate(m: Matrix4<f32>, t: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(t) * m
}

/// Applies a rotation about the vertical axis after `m`.
pub fn rotate_y(m: Matrix4<f32>, degrees: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(degrees)) * m
}

/// Orthographic-style projection for a viewport of the given size.
///
/// X is centred on the origin, Y runs from the bottom edge (0) to the top
/// (`height`), and Z is scaled by `depth`.
pub fn projection(width: f32, height: f32, depth: f32) -> Matrix4<f32> {
    Matrix4::new(
        2. / width, 0., 0., 0.,
        0., 2. / height, 0., 0.,
        0., 0., 2. / depth, 0.,
        0., -1., 0., 1.,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Vector4};

    fn close(a: Point3<f32>, b: Point3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn translate_moves_origin() {
        let m = translate(identity(), Vector3::new(1., 2., 3.));
        assert!(close(m.transform_point(Point3::origin()), Point3::new(1., 2., 3.)));
    }

    #[test]
    fn translation_is_stored_in_last_column() {
        let m = translate(identity(), Vector3::new(4., 5., 6.));
        assert_eq!(m.w, Vector4::new(4., 5., 6., 1.));
    }

    #[test]
    fn rotation_applies_after_translation() {
        let m = rotate_y(translate(identity(), Vector3::new(1., 0., 0.)), 90.);
        // A quarter turn about Y carries +X to -Z.
        assert!(close(m.transform_point(Point3::origin()), Point3::new(0., 0., -1.)));
    }

    #[test]
    fn projection_maps_viewport_to_clip_space() {
        let p = projection(200., 100., 200.);
        assert!(close(p.transform_point(Point3::new(100., 100., 0.)), Point3::new(1., 1., 0.)));
        assert!(close(p.transform_point(Point3::new(-100., 0., 0.)), Point3::new(-1., -1., 0.)));
        assert!(close(p.transform_point(Point3::new(0., 50., 100.)), Point3::new(0., 0., 1.)));
    }
}
