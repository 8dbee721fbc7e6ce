#![warn(missing_docs)]

//! Editable polygonal mesh kernel.
//!
//! [`MeshKernel`] owns vertices, edges and faces in slotmap arenas and
//! exposes a small set of editing operations: create vertex/face, extrude
//! (vertex, loose edges, face region), spin, duplicate, translate,
//! transform, create circle and delete. Every operation takes and returns
//! explicit [`Geometry`] handle sets; there is no implicit selection state.
//!
//! # Example
//!
//! ```
//! use spiral_kernel_mesh::MeshKernel;
//! use spiral_kernel_math::Vec3;
//!
//! let mut kernel = MeshKernel::new();
//! let disc = kernel.create_circle(16, 0.5, true).unwrap();
//! let rim = kernel.extrude_face_region(&disc).unwrap().rim;
//! kernel.translate(&rim.vertices(), Vec3::new(0.0, 0.0, 2.0)).unwrap();
//! assert!(kernel.is_closed());
//! assert_eq!(kernel.num_faces(), 16 + 2);
//! ```

mod audit;
mod elements;
mod export;
mod extrude;
mod kernel;
mod primitives;
mod spin;

pub use elements::{Edge, EdgeId, ElemKind, ElemRef, Face, FaceId, Geometry, Vertex, VertexId};
pub use export::{PolyMesh, TriangleMesh};
pub use extrude::Extrusion;
pub use kernel::MeshKernel;
pub use spin::{SpinParams, SpinResult};

use thiserror::Error;

/// Errors from mesh kernel operations.
///
/// These indicate a sequencing bug in the caller (stale handles) or
/// invalid primitive arguments; none of them are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Vertex handle does not refer to a live vertex.
    #[error("stale vertex handle {0:?}")]
    StaleVertex(VertexId),

    /// Edge handle does not refer to a live edge.
    #[error("stale edge handle {0:?}")]
    StaleEdge(EdgeId),

    /// Face handle does not refer to a live face.
    #[error("stale face handle {0:?}")]
    StaleFace(FaceId),

    /// A face needs at least three distinct vertices.
    #[error("degenerate face: {len} distinct vertices")]
    DegenerateFace {
        /// Number of distinct vertices supplied.
        len: usize,
    },

    /// An edge needs two distinct endpoints.
    #[error("degenerate edge: both endpoints are {0:?}")]
    DegenerateEdge(VertexId),

    /// A circle needs at least three segments.
    #[error("too few segments: {0} (need at least 3)")]
    TooFewSegments(u32),

    /// A circle radius must be positive and finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// Spin needs at least one step.
    #[error("spin requires at least one step")]
    InvalidSteps,

    /// The operation needs at least one element of a certain kind.
    #[error("operation requires {0} input geometry")]
    EmptyGeometry(&'static str),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
