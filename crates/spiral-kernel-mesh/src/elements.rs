//! Mesh elements, their handles, and geometry-handle sets.

use std::collections::HashSet;

use slotmap::new_key_type;
use spiral_kernel_math::Point3;

new_key_type! {
    /// Handle to a vertex owned by a [`MeshKernel`](crate::MeshKernel).
    pub struct VertexId;
    /// Handle to an edge owned by a [`MeshKernel`](crate::MeshKernel).
    pub struct EdgeId;
    /// Handle to a face owned by a [`MeshKernel`](crate::MeshKernel).
    pub struct FaceId;
}

/// A mesh vertex: a position plus its incident edges.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position in model space.
    pub point: Point3,
    pub(crate) edges: Vec<EdgeId>,
}

impl Vertex {
    /// Edges incident to this vertex.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// An unordered vertex pair plus the faces that use it.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) verts: [VertexId; 2],
    pub(crate) faces: Vec<FaceId>,
}

impl Edge {
    /// The two endpoints, in creation order.
    pub fn verts(&self) -> [VertexId; 2] {
        self.verts
    }

    /// Faces that have this edge in their boundary loop.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        match self.verts {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }
}

/// A planar polygon given by an ordered vertex loop.
///
/// `edges[i]` joins `verts[i]` to `verts[(i + 1) % n]`.
#[derive(Debug, Clone)]
pub struct Face {
    pub(crate) verts: Vec<VertexId>,
    pub(crate) edges: Vec<EdgeId>,
}

impl Face {
    /// The vertex loop in winding order.
    pub fn verts(&self) -> &[VertexId] {
        &self.verts
    }

    /// The boundary edges, parallel to [`Face::verts`].
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Directed boundary segments `(from, to, edge)` in winding order.
    pub fn segments(&self) -> impl Iterator<Item = (VertexId, VertexId, EdgeId)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[i], self.verts[(i + 1) % n], self.edges[i]))
    }
}

/// The kind of a mesh element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElemKind {
    /// A vertex.
    Vertex,
    /// An edge.
    Edge,
    /// A face.
    Face,
}

/// A tagged reference to any mesh element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemRef {
    /// Vertex handle.
    Vertex(VertexId),
    /// Edge handle.
    Edge(EdgeId),
    /// Face handle.
    Face(FaceId),
}

impl ElemRef {
    /// The element kind of this reference.
    pub fn kind(&self) -> ElemKind {
        match self {
            ElemRef::Vertex(_) => ElemKind::Vertex,
            ElemRef::Edge(_) => ElemKind::Edge,
            ElemRef::Face(_) => ElemKind::Face,
        }
    }
}

impl From<VertexId> for ElemRef {
    fn from(id: VertexId) -> Self {
        ElemRef::Vertex(id)
    }
}

impl From<EdgeId> for ElemRef {
    fn from(id: EdgeId) -> Self {
        ElemRef::Edge(id)
    }
}

impl From<FaceId> for ElemRef {
    fn from(id: FaceId) -> Self {
        ElemRef::Face(id)
    }
}

/// An ordered set of element handles returned by and passed to kernel operations.
///
/// Insertion order is preserved and duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geometry {
    elems: Vec<ElemRef>,
    seen: HashSet<ElemRef>,
}

impl Geometry {
    /// Create an empty geometry set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Returns `false` if it was already present.
    pub fn push(&mut self, elem: impl Into<ElemRef>) -> bool {
        let elem = elem.into();
        if self.seen.insert(elem) {
            self.elems.push(elem);
            true
        } else {
            false
        }
    }

    /// Add every element of `other`.
    pub fn merge(&mut self, other: &Geometry) {
        for &elem in &other.elems {
            self.push(elem);
        }
    }

    /// Whether `elem` is in the set.
    pub fn contains(&self, elem: impl Into<ElemRef>) -> bool {
        self.seen.contains(&elem.into())
    }

    /// Number of elements of all kinds.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Iterate over all element references in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ElemRef> + '_ {
        self.elems.iter().copied()
    }

    /// Number of elements of the given kind.
    pub fn count(&self, kind: ElemKind) -> usize {
        self.elems.iter().filter(|e| e.kind() == kind).count()
    }

    /// The vertex handles in the set.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.elems
            .iter()
            .filter_map(|e| match e {
                ElemRef::Vertex(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// The edge handles in the set.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.elems
            .iter()
            .filter_map(|e| match e {
                ElemRef::Edge(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    /// The face handles in the set.
    pub fn faces(&self) -> Vec<FaceId> {
        self.elems
            .iter()
            .filter_map(|e| match e {
                ElemRef::Face(f) => Some(*f),
                _ => None,
            })
            .collect()
    }
}

impl<E: Into<ElemRef>> FromIterator<E> for Geometry {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut geom = Geometry::new();
        for elem in iter {
            geom.push(elem);
        }
        geom
    }
}

impl<E: Into<ElemRef>> Extend<E> for Geometry {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for elem in iter {
            self.push(elem);
        }
    }
}
