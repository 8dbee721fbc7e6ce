//! File output: Wavefront OBJ, binary STL and JSON.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spiral_kernel_mesh::PolyMesh;
use tracing::info;

use crate::{MeshSink, SinkError};

/// Supported file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Wavefront OBJ with one named object and polygon faces.
    #[default]
    Obj,
    /// Binary STL, fan-triangulated.
    Stl,
    /// The [`PolyMesh`] as JSON.
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Stl => "stl",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "obj" => Ok(ExportFormat::Obj),
            "stl" => Ok(ExportFormat::Stl),
            "json" => Ok(ExportFormat::Json),
            _ => Err(SinkError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write `mesh` as a Wavefront OBJ object called `name`.
pub fn write_obj<W: Write>(mesh: &PolyMesh, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "o {name}")?;
    for [x, y, z] in &mesh.positions {
        writeln!(out, "v {x} {y} {z}")?;
    }
    for face in &mesh.faces {
        write!(out, "f")?;
        for i in face {
            write!(out, " {}", i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Encode `mesh` as binary STL with `name` in the header.
pub fn stl_bytes(mesh: &PolyMesh, name: &str) -> Vec<u8> {
    let tris = mesh.triangulate();
    let num_triangles = tris.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    // 80-byte header
    let mut header = [b' '; 80];
    let label = format!("spiral-stair {name}");
    let len = label.len().min(80);
    header[..len].copy_from_slice(&label.as_bytes()[..len]);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    let vertices = &tris.vertices;
    for tri in tris.indices.chunks(3) {
        let corner = |i: u32| {
            let i = i as usize * 3;
            [vertices[i], vertices[i + 1], vertices[i + 2]]
        };
        let (v0, v1, v2) = (corner(tri[0]), corner(tri[1]), corner(tri[2]));

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let normal = if len > 1e-10 {
            [nx / len, ny / len, nz / len]
        } else {
            [0.0, 0.0, 1.0]
        };

        for v in [normal, v0, v1, v2] {
            data.extend_from_slice(&v[0].to_le_bytes());
            data.extend_from_slice(&v[1].to_le_bytes());
            data.extend_from_slice(&v[2].to_le_bytes());
        }
        // attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }
    data
}

/// Write `mesh` as pretty-printed JSON.
pub fn write_json<W: Write>(mesh: &PolyMesh, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, mesh)
}

/// A sink that writes each received mesh to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: ExportFormat,
}

impl FileSink {
    /// Write to `path` in `format`.
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Write to `path`, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// [`SinkError::UnknownFormat`] if the extension is missing or unsupported.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let format = ExportFormat::from_path(&path)
            .ok_or_else(|| SinkError::UnknownFormat(path.display().to_string()))?;
        Ok(Self { path, format })
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

impl FileSink {
    /// Sibling path the encoded mesh is written to before it replaces `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = std::ffi::OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".partial");
        self.path.with_file_name(name)
    }

    fn encode(&self, target: &str, mesh: &PolyMesh) -> Result<Vec<u8>, SinkError> {
        Ok(match self.format {
            ExportFormat::Obj => {
                let mut buf = Vec::new();
                write_obj(mesh, target, &mut buf)?;
                buf
            }
            ExportFormat::Stl => stl_bytes(mesh, target),
            ExportFormat::Json => serde_json::to_vec_pretty(mesh)?,
        })
    }
}

impl MeshSink for FileSink {
    /// Encode the mesh in memory, write it beside `path`, then rename it
    /// into place. A failed write leaves any existing file untouched.
    fn receive(&mut self, target: &str, mesh: PolyMesh) -> Result<(), SinkError> {
        if mesh.is_empty() {
            return Err(SinkError::EmptyMesh(target.to_string()));
        }
        let bytes = self.encode(target, &mesh)?;
        let staging = self.staging_path();
        fs::write(&staging, &bytes)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        info!(
            path = %self.path.display(),
            format = %self.format,
            bytes = bytes.len(),
            faces = mesh.num_faces(),
            "mesh written"
        );
        Ok(())
    }
}
