//! Destinations for the finished mesh.

use std::collections::BTreeMap;

use spiral_kernel_mesh::PolyMesh;
use thiserror::Error;
use tracing::debug;

/// Errors raised by a [`MeshSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// No container with this name exists.
    #[error("unknown target container: {0}")]
    UnknownTarget(String),

    /// The output format could not be determined.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// The mesh has no faces.
    #[error("refusing to store an empty mesh in {0}")]
    EmptyMesh(String),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives the finished mesh under a target container name.
pub trait MeshSink {
    /// Take ownership of `mesh` for the container named `target`.
    fn receive(&mut self, target: &str, mesh: PolyMesh) -> Result<(), SinkError>;
}

/// An in-memory scene of named containers, each holding at most one mesh.
///
/// Only registered containers accept meshes; a later mesh replaces the
/// earlier one.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    containers: BTreeMap<String, Option<PolyMesh>>,
}

impl SceneStore {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene with one registered container.
    pub fn with_container(name: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.add_container(name);
        store
    }

    /// Register a container. Registering an existing name keeps its mesh.
    pub fn add_container(&mut self, name: impl Into<String>) {
        self.containers.entry(name.into()).or_insert(None);
    }

    /// The mesh stored in `name`, if any.
    pub fn get(&self, name: &str) -> Option<&PolyMesh> {
        self.containers.get(name).and_then(Option::as_ref)
    }

    /// Registered container names, sorted.
    pub fn container_names(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }
}

impl MeshSink for SceneStore {
    fn receive(&mut self, target: &str, mesh: PolyMesh) -> Result<(), SinkError> {
        if mesh.is_empty() {
            return Err(SinkError::EmptyMesh(target.to_string()));
        }
        let slot = self
            .containers
            .get_mut(target)
            .ok_or_else(|| SinkError::UnknownTarget(target.to_string()))?;
        debug!(
            target,
            vertices = mesh.num_vertices(),
            faces = mesh.num_faces(),
            replaced = slot.is_some(),
            "mesh stored"
        );
        *slot = Some(mesh);
        Ok(())
    }
}
