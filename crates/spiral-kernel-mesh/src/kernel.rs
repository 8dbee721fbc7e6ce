//! The mesh arena and its elementary operations.

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;
use spiral_kernel_math::{Point3, Transform, Vec3};
use tracing::debug;

use crate::elements::{Edge, EdgeId, ElemRef, Face, FaceId, Geometry, Vertex, VertexId};
use crate::{KernelError, Result};

/// An in-memory, mutable polygonal mesh.
///
/// Elements live in slotmap arenas, so a handle to a deleted element is
/// detected as stale rather than aliasing a newer element.
#[derive(Debug, Clone, Default)]
pub struct MeshKernel {
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) faces: SlotMap<FaceId, Face>,
}

impl MeshKernel {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Look up a vertex.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices.get(id).ok_or(KernelError::StaleVertex(id))
    }

    /// Position of a vertex.
    pub fn point(&self, id: VertexId) -> Result<Point3> {
        self.vertex(id).map(|v| v.point)
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(id).ok_or(KernelError::StaleEdge(id))
    }

    /// Look up a face.
    pub fn face(&self, id: FaceId) -> Result<&Face> {
        self.faces.get(id).ok_or(KernelError::StaleFace(id))
    }

    /// Iterate over all live vertex handles.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }

    /// Iterate over all live face handles.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// Whether the referenced element still exists.
    pub fn is_live(&self, elem: ElemRef) -> bool {
        match elem {
            ElemRef::Vertex(v) => self.vertices.contains_key(v),
            ElemRef::Edge(e) => self.edges.contains_key(e),
            ElemRef::Face(f) => self.faces.contains_key(f),
        }
    }

    /// Fail with the matching stale-handle error if `elem` is gone.
    pub(crate) fn check_live(&self, elem: ElemRef) -> Result<()> {
        if self.is_live(elem) {
            return Ok(());
        }
        Err(match elem {
            ElemRef::Vertex(v) => KernelError::StaleVertex(v),
            ElemRef::Edge(e) => KernelError::StaleEdge(e),
            ElemRef::Face(f) => KernelError::StaleFace(f),
        })
    }

    /// Create a free-standing vertex.
    pub fn create_vertex(&mut self, point: Point3) -> VertexId {
        self.vertices.insert(Vertex {
            point,
            edges: Vec::new(),
        })
    }

    /// The edge joining `a` and `b`, if one exists.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let vertex = self.vertices.get(a)?;
        vertex
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges.get(e).and_then(|edge| edge.other(a)) == Some(b))
    }

    /// Return the edge joining `a` and `b`, creating it if needed.
    pub(crate) fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        self.check_live(a.into())?;
        self.check_live(b.into())?;
        if a == b {
            return Err(KernelError::DegenerateEdge(a));
        }
        if let Some(e) = self.find_edge(a, b) {
            return Ok(e);
        }
        let e = self.edges.insert(Edge {
            verts: [a, b],
            faces: Vec::new(),
        });
        self.vertices[a].edges.push(e);
        self.vertices[b].edges.push(e);
        Ok(e)
    }

    /// Create a face from an ordered vertex loop, adding any missing edges.
    ///
    /// # Errors
    ///
    /// Fails if any vertex is stale or the loop has fewer than three
    /// distinct vertices.
    pub fn create_face(&mut self, verts: &[VertexId]) -> Result<FaceId> {
        for &v in verts {
            self.check_live(v.into())?;
        }
        let distinct: HashSet<VertexId> = verts.iter().copied().collect();
        if distinct.len() < 3 || distinct.len() != verts.len() {
            return Err(KernelError::DegenerateFace {
                len: distinct.len(),
            });
        }

        let n = verts.len();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            edges.push(self.ensure_edge(verts[i], verts[(i + 1) % n])?);
        }
        let f = self.faces.insert(Face {
            verts: verts.to_vec(),
            edges: edges.clone(),
        });
        for e in edges {
            self.edges[e].faces.push(f);
        }
        Ok(f)
    }

    /// Reverse the winding of a face.
    pub(crate) fn flip_face(&mut self, f: FaceId) -> Result<()> {
        let face = self.faces.get_mut(f).ok_or(KernelError::StaleFace(f))?;
        face.verts.reverse();
        // edges[i] joined verts[i]..verts[i+1]; after reversal that edge
        // joins new verts[n-2-i]..verts[n-1-i]
        let n = face.edges.len();
        let old = face.edges.clone();
        for (j, slot) in face.edges.iter_mut().enumerate() {
            *slot = old[(2 * n - 2 - j) % n];
        }
        Ok(())
    }

    /// Translate the given vertices by `delta`.
    pub fn translate(&mut self, verts: &[VertexId], delta: Vec3) -> Result<()> {
        self.transform(verts, &Transform::translation_vec(&delta))
    }

    /// Apply `transform` to the given vertices in place.
    ///
    /// Either every vertex is moved or, if any handle is stale, none is.
    pub fn transform(&mut self, verts: &[VertexId], transform: &Transform) -> Result<()> {
        for &v in verts {
            self.check_live(v.into())?;
        }
        for &v in verts {
            let vertex = &mut self.vertices[v];
            vertex.point = transform.apply_point(&vertex.point);
        }
        Ok(())
    }

    /// Expand a geometry set with the edges and vertices bounding its faces
    /// and the endpoints of its edges.
    pub fn closure(&self, geom: &Geometry) -> Result<Geometry> {
        let mut out = Geometry::new();
        for elem in geom.iter() {
            self.check_live(elem)?;
        }
        for v in geom.vertices() {
            out.push(v);
        }
        for f in geom.faces() {
            for &v in &self.faces[f].verts {
                out.push(v);
            }
        }
        for e in geom.edges() {
            for v in self.edges[e].verts {
                out.push(v);
            }
        }
        for e in geom.edges() {
            out.push(e);
        }
        for f in geom.faces() {
            for &e in &self.faces[f].edges {
                out.push(e);
            }
        }
        for f in geom.faces() {
            out.push(f);
        }
        Ok(out)
    }

    /// Drop handles that no longer refer to live elements.
    pub fn prune(&self, geom: &Geometry) -> Geometry {
        geom.iter().filter(|&e| self.is_live(e)).collect()
    }

    /// Deep-copy the given geometry, preserving its topology.
    ///
    /// Bounding edges and vertices of the given faces are copied too. The
    /// returned set holds the new vertices, then edges, then faces.
    pub fn duplicate(&mut self, geom: &Geometry) -> Result<Geometry> {
        let source = self.closure(geom)?;
        let mut out = Geometry::new();
        let mut map: HashMap<VertexId, VertexId> = HashMap::new();

        for v in source.vertices() {
            let copy = self.create_vertex(self.vertices[v].point);
            map.insert(v, copy);
            out.push(copy);
        }
        let lookup = |map: &HashMap<VertexId, VertexId>, v: VertexId| {
            map.get(&v).copied().ok_or(KernelError::StaleVertex(v))
        };
        for e in source.edges() {
            let [a, b] = self.edges[e].verts;
            let copy = self.ensure_edge(lookup(&map, a)?, lookup(&map, b)?)?;
            out.push(copy);
        }
        for f in source.faces() {
            let loop_verts = self.faces[f]
                .verts
                .iter()
                .map(|&v| lookup(&map, v))
                .collect::<Result<Vec<_>>>()?;
            out.push(self.create_face(&loop_verts)?);
        }

        debug!(
            vertices = map.len(),
            faces = source.faces().len(),
            "duplicated geometry"
        );
        Ok(out)
    }

    /// Delete the given elements.
    ///
    /// Deleting a vertex removes its edges and faces; deleting an edge
    /// removes its faces. Edges left without faces and vertices left
    /// without edges by the deletion are removed as well.
    pub fn delete(&mut self, geom: &Geometry) -> Result<()> {
        for elem in geom.iter() {
            self.check_live(elem)?;
        }

        // Everything that goes away, so the orphan sweep can look at what
        // it left behind
        let mut doomed_edges: Vec<EdgeId> = geom.edges();
        for v in geom.vertices() {
            doomed_edges.extend(self.vertices[v].edges.iter().copied());
        }
        let mut doomed_faces: Vec<FaceId> = geom.faces();
        for &e in &doomed_edges {
            doomed_faces.extend(self.edges[e].faces.iter().copied());
        }

        let mut touched_edges: Vec<EdgeId> = Vec::new();
        let mut touched_verts: Vec<VertexId> = Vec::new();
        for &f in &doomed_faces {
            if let Some(face) = self.faces.get(f) {
                touched_edges.extend(face.edges.iter().copied());
            }
        }
        for &e in &doomed_edges {
            if let Some(edge) = self.edges.get(e) {
                touched_verts.extend(edge.verts);
            }
        }

        for f in doomed_faces {
            self.remove_face(f);
        }
        for e in doomed_edges {
            self.remove_edge(e);
        }
        for v in geom.vertices() {
            self.remove_vertex(v);
        }

        let removed = self.remove_orphans(touched_edges, touched_verts);
        debug!(
            requested = geom.len(),
            orphans = removed,
            "deleted geometry"
        );
        Ok(())
    }

    /// Remove faceless edges among `edges` and edgeless vertices among
    /// `verts` (plus endpoints of removed edges). Returns how many
    /// elements were removed.
    pub(crate) fn remove_orphans(
        &mut self,
        edges: Vec<EdgeId>,
        mut verts: Vec<VertexId>,
    ) -> usize {
        let mut removed = 0;
        for e in edges {
            let Some(edge) = self.edges.get(e) else {
                continue;
            };
            if edge.faces.is_empty() {
                verts.extend(edge.verts);
                self.remove_edge(e);
                removed += 1;
            }
        }
        for v in verts {
            let Some(vertex) = self.vertices.get(v) else {
                continue;
            };
            if vertex.edges.is_empty() {
                self.vertices.remove(v);
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn remove_face(&mut self, f: FaceId) {
        if let Some(face) = self.faces.remove(f) {
            for e in face.edges {
                if let Some(edge) = self.edges.get_mut(e) {
                    edge.faces.retain(|&x| x != f);
                }
            }
        }
    }

    pub(crate) fn remove_edge(&mut self, e: EdgeId) {
        let Some(edge) = self.edges.get(e) else {
            return;
        };
        for f in edge.faces.clone() {
            self.remove_face(f);
        }
        if let Some(edge) = self.edges.remove(e) {
            for v in edge.verts {
                if let Some(vertex) = self.vertices.get_mut(v) {
                    vertex.edges.retain(|&x| x != e);
                }
            }
        }
    }

    pub(crate) fn remove_vertex(&mut self, v: VertexId) {
        let Some(vertex) = self.vertices.get(v) else {
            return;
        };
        for e in vertex.edges.clone() {
            self.remove_edge(e);
        }
        self.vertices.remove(v);
    }
}
