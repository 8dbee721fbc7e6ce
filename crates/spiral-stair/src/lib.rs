#![warn(missing_docs)]

//! Procedural spiral staircase generation.
//!
//! Builds the polygonal surface of a spiral staircase (treads, central
//! pole, helical handrail and balusters) from a handful of physical
//! parameters, using the editing operations of
//! [`spiral_kernel_mesh::MeshKernel`], and hands the finished mesh to a
//! [`MeshSink`].
//!
//! # Example
//!
//! ```
//! use spiral_stair::{build_staircase, BuildOptions, StairParameters};
//!
//! let stairs = build_staircase(&StairParameters::default(), &BuildOptions::default()).unwrap();
//! assert_eq!(stairs.constants.step_count, 20);
//! assert_eq!(stairs.parts.treads.len(), 20);
//! assert_eq!(stairs.parts.balusters.len(), 40);
//! ```

mod balusters;
mod config;
mod export;
mod generate;
mod options;
mod params;
mod pole;
mod profile;
mod railing;
mod sink;
mod steps;

pub use balusters::{build_balusters, Baluster, BalusterSide};
pub use config::{StaircaseConfig, DEFAULT_TARGET};
pub use export::{stl_bytes, write_json, write_obj, ExportFormat, FileSink};
pub use generate::{build_staircase, generate, GenerationReport, Staircase, StaircaseParts};
pub use options::BuildOptions;
pub use params::{DerivedConstants, StairParameters, RAILING_CLEARANCE};
pub use pole::build_pole;
pub use profile::{build_tread_profile, TreadProfile};
pub use railing::build_railing;
pub use sink::{MeshSink, SceneStore, SinkError};
pub use steps::array_steps;

use spiral_kernel_mesh::KernelError;
use thiserror::Error;

/// Errors from staircase generation.
#[derive(Debug, Error)]
pub enum StairError {
    /// An input parameter or build option is out of range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What is wrong with it.
        reason: String,
    },

    /// Valid inputs combine into geometry that cannot be built.
    #[error("degenerate geometry: `{name}` = {value}: {reason}")]
    DegenerateGeometry {
        /// Derived value name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What is wrong with it.
        reason: String,
    },

    /// A kernel operation was applied to stale or invalid geometry.
    #[error("mesh kernel operation failed: {0}")]
    Kernel(#[from] KernelError),

    /// The TOML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("cannot encode configuration: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// The mesh sink rejected the result.
    #[error("mesh sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Result type for staircase generation.
pub type Result<T> = std::result::Result<T, StairError>;
