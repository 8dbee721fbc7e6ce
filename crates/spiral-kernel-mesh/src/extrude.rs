//! Extrusion: offset copies of vertices, edges and face regions joined to
//! their originals.

use std::collections::{HashMap, HashSet};

use crate::elements::{FaceId, Geometry, VertexId};
use crate::kernel::MeshKernel;
use crate::{KernelError, Result};

/// New geometry produced by an extrusion.
///
/// The `rim` is the offset copy, still coincident with the source; callers
/// move it into place with [`MeshKernel::translate`] or
/// [`MeshKernel::transform`]. The `sides` join the source to the rim.
#[derive(Debug, Clone, Default)]
pub struct Extrusion {
    /// Copied vertices, edges and faces.
    pub rim: Geometry,
    /// Connecting edges and side faces.
    pub sides: Geometry,
}

impl Extrusion {
    /// Everything the extrusion created.
    pub fn all(&self) -> Geometry {
        let mut all = self.rim.clone();
        all.merge(&self.sides);
        all
    }
}

impl MeshKernel {
    /// Extrude a single vertex: create a coincident copy joined by an edge.
    ///
    /// # Errors
    ///
    /// Fails if `v` is not a live vertex.
    pub fn extrude_vert_indiv(&mut self, v: VertexId) -> Result<VertexId> {
        let copy = self.create_vertex(self.point(v)?);
        self.ensure_edge(v, copy)?;
        Ok(copy)
    }

    /// Extrude loose vertices and edges.
    ///
    /// Each vertex (including edge endpoints) gets a copy joined by an edge;
    /// each edge gets a copy joined by a quad. Faces in `geom` are ignored.
    pub fn extrude_loose(&mut self, geom: &Geometry) -> Result<Extrusion> {
        let mut verts: Vec<VertexId> = geom.vertices();
        for e in geom.edges() {
            verts.extend(self.edge(e)?.verts());
        }
        if verts.is_empty() {
            return Err(KernelError::EmptyGeometry("vertex or edge"));
        }

        let mut out = Extrusion::default();
        let mut map: HashMap<VertexId, VertexId> = HashMap::new();
        for v in verts {
            if map.contains_key(&v) {
                continue;
            }
            let copy = self.create_vertex(self.point(v)?);
            let link = self.ensure_edge(v, copy)?;
            map.insert(v, copy);
            out.rim.push(copy);
            out.sides.push(link);
        }
        for e in geom.edges() {
            let [a, b] = self.edges[e].verts();
            let (a2, b2) = (map[&a], map[&b]);
            out.rim.push(self.ensure_edge(a2, b2)?);
            out.sides.push(self.create_face(&[a, b, b2, a2])?);
        }
        Ok(out)
    }

    /// Extrude a face region.
    ///
    /// The faces of `geom` are copied with their winding, and every boundary
    /// edge of the region gets a quad joining it to its copy. If the region
    /// borders faces outside it, the original faces (and any edges and
    /// vertices only they used) are removed; an isolated region keeps its
    /// original faces with reversed winding, so the result is a closed,
    /// consistently wound solid once the rim is moved.
    ///
    /// # Errors
    ///
    /// Fails if `geom` has no faces or any face handle is stale.
    pub fn extrude_face_region(&mut self, geom: &Geometry) -> Result<Extrusion> {
        let region = geom.faces();
        if region.is_empty() {
            return Err(KernelError::EmptyGeometry("face"));
        }
        for &f in &region {
            self.check_live(f.into())?;
        }
        let in_region: HashSet<FaceId> = region.iter().copied().collect();

        // Boundary segments in the winding of the region face that owns them
        let mut boundary: Vec<(VertexId, VertexId)> = Vec::new();
        let mut touches_outside = false;
        for &f in &region {
            for (from, to, e) in self.faces[f].segments() {
                let faces = self.edges[e].faces();
                let inside = faces.iter().filter(|x| in_region.contains(*x)).count();
                if inside == 1 {
                    boundary.push((from, to));
                    touches_outside |= faces.len() > 1;
                }
            }
        }

        let mut out = Extrusion::default();
        let mut map: HashMap<VertexId, VertexId> = HashMap::new();
        for &f in &region {
            for i in 0..self.faces[f].verts().len() {
                let v = self.faces[f].verts()[i];
                if !map.contains_key(&v) {
                    let copy = self.create_vertex(self.vertices[v].point);
                    map.insert(v, copy);
                    out.rim.push(copy);
                }
            }
        }

        for &f in &region {
            let loop_verts: Vec<VertexId> = self.faces[f].verts().iter().map(|v| map[v]).collect();
            let copy = self.create_face(&loop_verts)?;
            out.rim.extend(self.faces[copy].edges().to_vec());
            out.rim.push(copy);
        }

        for &(from, to) in &boundary {
            out.sides.push(self.create_face(&[from, to, map[&to], map[&from]])?);
        }
        for &(from, _) in &boundary {
            if let Some(link) = self.find_edge(from, map[&from]) {
                out.sides.push(link);
            }
        }

        if touches_outside {
            let mut touched = Vec::new();
            for &f in &region {
                touched.extend(self.faces[f].edges().iter().copied());
                self.remove_face(f);
            }
            self.remove_orphans(touched, Vec::new());
        } else {
            for &f in &region {
                self.flip_face(f)?;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spiral_kernel_math::{Point3, Vec3};

    #[test]
    fn test_extrude_vert_indiv_links_copy() {
        let mut kernel = MeshKernel::new();
        let a = kernel.create_vertex(Point3::new(1.0, 2.0, 3.0));
        let b = kernel.extrude_vert_indiv(a).unwrap();
        assert_ne!(a, b);
        assert_eq!(kernel.point(b).unwrap(), Point3::new(1.0, 2.0, 3.0));
        assert!(kernel.find_edge(a, b).is_some());
    }

    #[test]
    fn test_extrude_vert_indiv_stale_vertex() {
        let mut kernel = MeshKernel::new();
        let a = kernel.create_vertex(Point3::origin());
        kernel.delete(&[a].into_iter().collect()).unwrap();
        assert_eq!(
            kernel.extrude_vert_indiv(a),
            Err(KernelError::StaleVertex(a))
        );
    }

    #[test]
    fn test_extrude_loose_edge_makes_quad() {
        let mut kernel = MeshKernel::new();
        let a = kernel.create_vertex(Point3::origin());
        let b = kernel.extrude_vert_indiv(a).unwrap();
        kernel.translate(&[b], Vec3::x()).unwrap();
        let e = kernel.find_edge(a, b).unwrap();

        let ext = kernel.extrude_loose(&[e].into_iter().collect()).unwrap();
        assert_eq!(ext.rim.vertices().len(), 2);
        assert_eq!(ext.rim.edges().len(), 1);
        assert_eq!(ext.sides.faces().len(), 1);
        assert_eq!(kernel.num_faces(), 1);
    }

    #[test]
    fn test_extrude_isolated_face_gives_closed_prism() {
        let mut kernel = MeshKernel::new();
        let tri = [
            kernel.create_vertex(Point3::new(0.0, 0.0, 0.0)),
            kernel.create_vertex(Point3::new(1.0, 0.0, 0.0)),
            kernel.create_vertex(Point3::new(0.0, 1.0, 0.0)),
        ];
        let f = kernel.create_face(&tri).unwrap();

        let ext = kernel.extrude_face_region(&[f].into_iter().collect()).unwrap();
        kernel
            .translate(&ext.rim.vertices(), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();

        // original kept (flipped), copy on top, three side quads
        assert!(kernel.is_live(f.into()));
        assert_eq!(kernel.num_faces(), 5);
        assert_eq!(kernel.num_edges(), 9);
        assert_eq!(ext.rim.vertices().len(), 3);
        assert_eq!(ext.rim.faces().len(), 1);
        assert_eq!(ext.sides.faces().len(), 3);
        assert_eq!(ext.sides.edges().len(), 3);
        assert!(kernel.is_closed());
        assert!(kernel.is_consistently_oriented());
    }

    #[test]
    fn test_extrude_region_with_neighbours_drops_original() {
        let mut kernel = MeshKernel::new();
        let tri = [
            kernel.create_vertex(Point3::new(0.0, 0.0, 0.0)),
            kernel.create_vertex(Point3::new(1.0, 0.0, 0.0)),
            kernel.create_vertex(Point3::new(0.0, 1.0, 0.0)),
        ];
        let f = kernel.create_face(&tri).unwrap();
        let first = kernel.extrude_face_region(&[f].into_iter().collect()).unwrap();
        kernel
            .translate(&first.rim.vertices(), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();

        // The copied face now borders the first set of side quads
        let second = kernel.extrude_face_region(&first.rim).unwrap();
        kernel
            .translate(&second.rim.vertices(), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();

        assert!(!kernel.is_live(first.rim.faces()[0].into()));
        // bottom + top + 2 * 3 sides, no internal wall
        assert_eq!(kernel.num_faces(), 8);
        assert!(kernel.is_closed());
        assert!(kernel.is_consistently_oriented());
    }

    #[test]
    fn test_extrude_face_region_requires_faces() {
        let mut kernel = MeshKernel::new();
        let a = kernel.create_vertex(Point3::origin());
        let err = kernel.extrude_face_region(&[a].into_iter().collect());
        assert!(matches!(err, Err(KernelError::EmptyGeometry(_))));
    }
}
