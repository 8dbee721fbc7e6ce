//! Primitive construction.

use std::f64::consts::PI;

use spiral_kernel_math::Point3;

use crate::elements::Geometry;
use crate::kernel::MeshKernel;
use crate::{KernelError, Result};

impl MeshKernel {
    /// Build a regular polygon of `segments` vertices and `radius` in the XY
    /// plane, centred on the origin, starting on +X and winding
    /// counter-clockwise seen from +Z.
    ///
    /// With `cap_ends` the filling face is created too (normal +Z). The
    /// returned set holds the vertices, then the edges, then the face.
    ///
    /// # Errors
    ///
    /// Fails if `segments < 3` or `radius` is not positive and finite.
    pub fn create_circle(&mut self, segments: u32, radius: f64, cap_ends: bool) -> Result<Geometry> {
        if segments < 3 {
            return Err(KernelError::TooFewSegments(segments));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(KernelError::InvalidRadius(radius));
        }

        let n = segments as usize;
        let verts: Vec<_> = (0..n)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / n as f64;
                let (s, c) = theta.sin_cos();
                self.create_vertex(Point3::new(radius * c, radius * s, 0.0))
            })
            .collect();

        let mut geom: Geometry = verts.iter().copied().collect();
        if cap_ends {
            let face = self.create_face(&verts)?;
            geom.extend(self.faces[face].edges().to_vec());
            geom.push(face);
        } else {
            for i in 0..n {
                let e = self.ensure_edge(verts[i], verts[(i + 1) % n])?;
                geom.push(e);
            }
        }
        Ok(geom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElemKind;

    #[test]
    fn test_capped_circle() {
        let mut kernel = MeshKernel::new();
        let geom = kernel.create_circle(32, 0.075, true).unwrap();
        assert_eq!(geom.count(ElemKind::Vertex), 32);
        assert_eq!(geom.count(ElemKind::Edge), 32);
        assert_eq!(geom.count(ElemKind::Face), 1);
        for v in geom.vertices() {
            let p = kernel.point(v).unwrap();
            assert!((p.x.hypot(p.y) - 0.075).abs() < 1e-12);
            assert!(p.z.abs() < 1e-15);
        }
        let first = kernel.point(geom.vertices()[0]).unwrap();
        assert!((first.x - 0.075).abs() < 1e-15);
    }

    #[test]
    fn test_uncapped_circle_is_a_ring() {
        let mut kernel = MeshKernel::new();
        let geom = kernel.create_circle(12, 1.0, false).unwrap();
        assert_eq!(geom.count(ElemKind::Edge), 12);
        assert_eq!(geom.count(ElemKind::Face), 0);
        assert_eq!(kernel.num_faces(), 0);
    }

    #[test]
    fn test_circle_argument_checks() {
        let mut kernel = MeshKernel::new();
        assert_eq!(
            kernel.create_circle(2, 1.0, true).unwrap_err(),
            KernelError::TooFewSegments(2)
        );
        assert!(matches!(
            kernel.create_circle(8, 0.0, true),
            Err(KernelError::InvalidRadius(_))
        ));
        assert!(matches!(
            kernel.create_circle(8, f64::NAN, true),
            Err(KernelError::InvalidRadius(_))
        ));
        assert_eq!(kernel.num_vertices(), 0);
    }
}
