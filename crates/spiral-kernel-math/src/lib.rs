#![warn(missing_docs)]

//! Math types for the spiral staircase mesh kernel.
//!
//! Thin wrappers around nalgebra: points, vectors, directions, affine
//! transforms about arbitrary axes, and polar helpers about the Z axis.
//! Lengths are in metres, angles in radians.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Translation by a vector.
    pub fn translation_vec(v: &Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Rotation about the line through `center` along `axis` by `angle` radians.
    pub fn rotation_about_line(center: &Point3, axis: &Dir3, angle: f64) -> Self {
        let to_origin = Self::translation(-center.x, -center.y, -center.z);
        let back = Self::translation(center.x, center.y, center.z);
        back.then(&Self::rotation_about_axis(axis, angle))
            .then(&to_origin)
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

/// Distance of `p` from the vertical (Z) axis.
pub fn radial_distance(p: &Point3) -> f64 {
    p.x.hypot(p.y)
}

/// Polar angle of `p` about the vertical (Z) axis, in `(-π, π]`.
pub fn polar_angle(p: &Point3) -> f64 {
    p.y.atan2(p.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - Point3::new(11.0, 22.0, 33.0)).norm() < 1e-12);
        let same = Transform::translation_vec(&Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(same, t);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let t = Transform::rotation_z(PI / 2.0);
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.5));
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
        assert!((result.z - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_x_turns_z_normal_into_y() {
        // -90° about X turns a +Z facing circle into a +Y facing one
        let t = Transform::rotation_x(-PI / 2.0);
        let n = t.apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert!((n - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_about_axis_matches_rotation_z() {
        let axis = Dir3::new_normalize(Vec3::z());
        let a = Transform::rotation_about_axis(&axis, 0.3);
        let b = Transform::rotation_z(0.3);
        let p = Point3::new(0.7, -0.2, 1.5);
        assert!((a.apply_point(&p) - b.apply_point(&p)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_about_line_keeps_center_fixed() {
        let center = Point3::new(1.0, 1.0, 0.0);
        let axis = Dir3::new_normalize(Vec3::z());
        let t = Transform::rotation_about_line(&center, &axis, PI / 2.0);
        assert!((t.apply_point(&center) - center).norm() < 1e-12);
        // (2,1) is one unit +X of the center; a quarter turn puts it one unit +Y
        let r = t.apply_point(&Point3::new(2.0, 1.0, 3.0));
        assert!((r - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_then_applies_right_operand_first() {
        let rotate = Transform::rotation_z(PI / 2.0);
        let shift = Transform::translation(1.0, 0.0, 0.0);
        // shift first, then rotate: origin -> (1,0,0) -> (0,1,0)
        let r = rotate.then(&shift).apply_point(&Point3::origin());
        assert!((r - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_polar_helpers() {
        let p = Point3::new(0.0, 2.0, 7.0);
        assert!((radial_distance(&p) - 2.0).abs() < 1e-12);
        assert!((polar_angle(&p) - PI / 2.0).abs() < 1e-12);
    }
}
