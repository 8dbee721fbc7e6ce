//! Spin: repeated extrusion with a rotation (and optional axial shift)
//! per step, for arcs, lathes and helical sweeps.

use spiral_kernel_math::{Dir3, Point3, Transform, Vec3};
use tracing::debug;

use crate::elements::Geometry;
use crate::kernel::MeshKernel;
use crate::{KernelError, Result};

/// Parameters for [`MeshKernel::spin`].
#[derive(Debug, Clone)]
pub struct SpinParams {
    /// Rotation axis direction.
    pub axis: Dir3,
    /// A point on the rotation axis.
    pub center: Point3,
    /// Total rotation in radians. Negative values sweep clockwise about `axis`.
    pub angle: f64,
    /// Number of copies. Each is rotated by `angle / steps` from the previous.
    pub steps: u32,
    /// Translation applied per step after the rotation.
    pub dvec: Vec3,
}

impl SpinParams {
    /// Spin about the Z axis through the origin with no axial shift.
    pub fn about_z(angle: f64, steps: u32) -> Self {
        Self {
            axis: Vec3::z_axis(),
            center: Point3::origin(),
            angle,
            steps,
            dvec: Vec3::zeros(),
        }
    }

    /// Set the per-step translation, turning the spin into a helical sweep.
    pub fn with_dvec(mut self, dvec: Vec3) -> Self {
        self.dvec = dvec;
        self
    }

    /// Set the point the axis passes through.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    /// The transform carrying one copy to the next.
    pub fn step_transform(&self) -> Transform {
        let rotation = Transform::rotation_about_line(
            &self.center,
            &self.axis,
            self.angle / f64::from(self.steps),
        );
        Transform::translation_vec(&self.dvec).then(&rotation)
    }
}

/// Geometry produced by a spin.
#[derive(Debug, Clone, Default)]
pub struct SpinResult {
    /// Every element created by the spin that is still live.
    pub all: Geometry,
    /// The final copy of the input geometry.
    pub last: Geometry,
}

impl MeshKernel {
    /// Sweep `geom` around an axis, joining successive copies.
    ///
    /// Geometry containing faces is extruded as a face region each step, so
    /// a capped profile becomes a closed tube with no internal walls. Loose
    /// vertices and edges become chains and strips.
    ///
    /// # Errors
    ///
    /// Fails if `steps` is zero, `geom` is empty, or any handle is stale.
    pub fn spin(&mut self, geom: &Geometry, params: &SpinParams) -> Result<SpinResult> {
        if params.steps == 0 {
            return Err(KernelError::InvalidSteps);
        }
        if geom.is_empty() {
            return Err(KernelError::EmptyGeometry("spin"));
        }

        let step = params.step_transform();
        let mut current = geom.clone();
        let mut all = Geometry::new();

        for _ in 0..params.steps {
            let extrusion = if current.faces().is_empty() {
                self.extrude_loose(&current)?
            } else {
                self.extrude_face_region(&current)?
            };
            self.transform(&extrusion.rim.vertices(), &step)?;
            all.merge(&extrusion.all());
            current = extrusion.rim;
        }

        let all = self.prune(&all);
        debug!(
            steps = params.steps,
            angle = params.angle,
            created = all.len(),
            "spin complete"
        );
        Ok(SpinResult { all, last: current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_spin_vertex_traces_arc() {
        let mut kernel = MeshKernel::new();
        let start = kernel.create_vertex(Point3::new(2.0, 0.0, 0.0));

        let result = kernel
            .spin(&[start].into_iter().collect(), &SpinParams::about_z(-PI / 2.0, 8))
            .unwrap();

        assert_eq!(result.all.vertices().len(), 8);
        assert_eq!(result.all.edges().len(), 8);
        let last = result.last.vertices();
        assert_eq!(last.len(), 1);
        let p = kernel.point(last[0]).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, -2.0, epsilon = 1e-12);
        // every sample stays on the circle
        for v in result.all.vertices() {
            let q = kernel.point(v).unwrap();
            assert_relative_eq!(q.x.hypot(q.y), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_spin_with_center_offset() {
        let mut kernel = MeshKernel::new();
        let start = kernel.create_vertex(Point3::new(2.0, 1.0, 0.0));
        let params = SpinParams::about_z(PI, 4).with_center(Point3::new(1.0, 1.0, 0.0));
        let result = kernel.spin(&[start].into_iter().collect(), &params).unwrap();
        let p = kernel.point(result.last.vertices()[0]).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helical_spin_of_capped_circle_is_closed_tube() {
        let mut kernel = MeshKernel::new();
        let disc = kernel.create_circle(8, 0.1, true).unwrap();
        kernel
            .transform(&disc.vertices(), &Transform::rotation_x(-PI / 2.0))
            .unwrap();
        kernel
            .translate(&disc.vertices(), Vec3::new(1.0, 0.0, 0.0))
            .unwrap();

        let params = SpinParams::about_z(PI, 12).with_dvec(Vec3::new(0.0, 0.0, 0.05));
        let result = kernel.spin(&disc, &params).unwrap();

        // two caps plus 8 side quads per step
        assert_eq!(kernel.num_faces(), 2 + 8 * 12);
        assert!(kernel.is_closed());
        assert!(kernel.is_consistently_oriented());
        assert_eq!(result.last.faces().len(), 1);

        // the end cap sits half a turn round and 12 * 0.05 up
        let (lo, hi) = kernel.bounds_of(&result.last.vertices()).unwrap();
        assert_relative_eq!((lo.z + hi.z) / 2.0, 0.6, epsilon = 1e-9);
        assert_relative_eq!((lo.x + hi.x) / 2.0, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spin_rejects_zero_steps_and_empty_input() {
        let mut kernel = MeshKernel::new();
        let v = kernel.create_vertex(Point3::new(1.0, 0.0, 0.0));
        let geom: Geometry = [v].into_iter().collect();
        assert_eq!(
            kernel.spin(&geom, &SpinParams::about_z(1.0, 0)).unwrap_err(),
            KernelError::InvalidSteps
        );
        assert!(matches!(
            kernel.spin(&Geometry::new(), &SpinParams::about_z(1.0, 3)),
            Err(KernelError::EmptyGeometry(_))
        ));
    }
}
