//! Topology and extent checks over the whole mesh.

use std::collections::{HashMap, HashSet};

use spiral_kernel_math::Point3;

use crate::elements::{FaceId, VertexId};
use crate::kernel::MeshKernel;
use crate::{KernelError, Result};

impl MeshKernel {
    /// Edges used by exactly one face.
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.faces.len() == 1).count()
    }

    /// Edges used by more than two faces.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.faces.len() > 2).count()
    }

    /// Edges used by no face.
    pub fn wire_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.faces.is_empty()).count()
    }

    /// Whether every edge is shared by exactly two faces and no vertex is
    /// left dangling.
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty()
            && self.edges.values().all(|e| e.faces.len() == 2)
            && self.vertices.values().all(|v| !v.edges.is_empty())
    }

    /// Whether every two-face edge is traversed in opposite directions by
    /// its two faces.
    pub fn is_consistently_oriented(&self) -> bool {
        let mut directed: HashMap<(VertexId, VertexId), FaceId> = HashMap::new();
        for (f, face) in &self.faces {
            for (from, to, _) in face.segments() {
                if directed.insert((from, to), f).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Vertex sets of the edge-connected components, in arena order.
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut seen: HashSet<VertexId> = HashSet::new();
        let mut components = Vec::new();
        for start in self.vertices.keys() {
            if !seen.insert(start) {
                continue;
            }
            let mut component = vec![start];
            let mut stack = vec![start];
            while let Some(v) = stack.pop() {
                for &e in &self.vertices[v].edges {
                    if let Some(next) = self.edges[e].other(v) {
                        if seen.insert(next) {
                            component.push(next);
                            stack.push(next);
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Axis-aligned bounds `(min, max)` of the given vertices.
    ///
    /// # Errors
    ///
    /// Fails if `verts` is empty or contains a stale handle.
    pub fn bounds_of(&self, verts: &[VertexId]) -> Result<(Point3, Point3)> {
        let mut points = verts.iter().map(|&v| self.point(v));
        let first = points
            .next()
            .ok_or(KernelError::EmptyGeometry("vertex"))??;
        points.try_fold((first, first), |(lo, hi), p| {
            let p = p?;
            Ok((lo.inf(&p), hi.sup(&p)))
        })
    }

    /// Axis-aligned bounds of the whole mesh, or `None` if it is empty.
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let verts: Vec<VertexId> = self.vertices.keys().collect();
        self.bounds_of(&verts).ok()
    }
}
