//! Flattened mesh output for sinks and file writers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::elements::VertexId;
use crate::kernel::MeshKernel;

/// An indexed polygon mesh: vertex positions plus face vertex loops.
///
/// This is what the kernel hands to the outside world; indices are 0-based
/// into `positions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    /// Vertex positions `[x, y, z]`.
    pub positions: Vec<[f64; 3]>,
    /// Faces as vertex-index loops in winding order.
    pub faces: Vec<Vec<u32>>,
}

impl PolyMesh {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Fan-triangulate every face.
    ///
    /// Faces are convex by construction, so a fan from the first vertex is
    /// sufficient.
    pub fn triangulate(&self) -> TriangleMesh {
        let vertices = self
            .positions
            .iter()
            .flat_map(|p| p.iter().map(|&c| c as f32))
            .collect();
        let mut indices = Vec::new();
        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
            }
        }
        TriangleMesh { vertices, indices }
    }
}

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl MeshKernel {
    /// Flatten the live mesh into a [`PolyMesh`], in arena order.
    pub fn to_poly_mesh(&self) -> PolyMesh {
        let mut index: HashMap<VertexId, u32> = HashMap::with_capacity(self.vertices.len());
        let mut positions = Vec::with_capacity(self.vertices.len());
        for (id, vertex) in &self.vertices {
            index.insert(id, positions.len() as u32);
            positions.push([vertex.point.x, vertex.point.y, vertex.point.z]);
        }
        let faces = self
            .faces
            .values()
            .map(|face| face.verts.iter().map(|v| index[v]).collect())
            .collect();
        PolyMesh { positions, faces }
    }
}
