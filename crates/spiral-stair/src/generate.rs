//! The staircase pipeline.

use std::f64::consts::TAU;

use serde::Serialize;
use spiral_kernel_mesh::{Geometry, MeshKernel, PolyMesh};
use tracing::{info, info_span, warn};

use crate::{
    array_steps, build_balusters, build_pole, build_railing, build_tread_profile, Baluster,
    BuildOptions, DerivedConstants, MeshSink, Result, StairParameters,
};

/// Handles to each part of a built staircase.
#[derive(Debug, Clone)]
pub struct StaircaseParts {
    /// One closed slab per step, lowest first.
    pub treads: Vec<Geometry>,
    /// The central pole.
    pub pole: Geometry,
    /// The handrail tube.
    pub rail: Geometry,
    /// Two balusters per step, leading then trailing.
    pub balusters: Vec<Baluster>,
}

/// A built staircase: the mesh and what it was built from.
#[derive(Debug, Clone)]
pub struct Staircase {
    /// The mesh holding every part.
    pub kernel: MeshKernel,
    /// The parameters it was built from.
    pub parameters: StairParameters,
    /// The constants derived from them.
    pub constants: DerivedConstants,
    /// Handles to each part.
    pub parts: StaircaseParts,
}

impl Staircase {
    /// Flatten the mesh for a sink.
    pub fn to_poly_mesh(&self) -> PolyMesh {
        self.kernel.to_poly_mesh()
    }

    /// Number of disconnected solids: treads, balusters, the pole and the
    /// rail.
    pub fn component_count(&self) -> usize {
        self.kernel.connected_components().len()
    }
}

/// Summary of a completed generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Container the mesh was delivered to.
    pub target: String,
    /// The derived constants.
    pub constants: DerivedConstants,
    /// Angle swept by the staircase.
    pub total_angle: f64,
    /// Tread solids built.
    pub treads: usize,
    /// Balusters built.
    pub balusters: usize,
    /// Vertices in the delivered mesh.
    pub vertices: usize,
    /// Faces in the delivered mesh.
    pub faces: usize,
    /// Disconnected solids in the mesh.
    pub components: usize,
}

/// Build the whole staircase into a fresh mesh.
///
/// Parts are built in order: tread profile, tread array, pole, handrail,
/// balusters. Everything is validated before any geometry is created.
///
/// # Errors
///
/// [`crate::StairError::InvalidParameter`] or
/// [`crate::StairError::DegenerateGeometry`] for unusable inputs.
pub fn build_staircase(params: &StairParameters, options: &BuildOptions) -> Result<Staircase> {
    let constants = params.resolve()?;
    options.validate()?;

    let span = info_span!(
        "build_staircase",
        step_count = constants.step_count,
        segments = constants.segments
    );
    let _enter = span.enter();

    if constants.total_angle() > TAU {
        warn!(
            revolutions = constants.revolutions(),
            "staircase turns more than once; treads and rail overlap in plan"
        );
    }

    let mut kernel = MeshKernel::new();
    let profile = build_tread_profile(&mut kernel, params, &constants, options)?;
    let treads = array_steps(&mut kernel, &profile.solid, &constants)?;
    let pole = build_pole(&mut kernel, params, options)?;
    let rail = build_railing(&mut kernel, &constants, options)?;
    let balusters = build_balusters(&mut kernel, params, &constants, options)?;

    info!(
        treads = treads.len(),
        balusters = balusters.len(),
        vertices = kernel.num_vertices(),
        faces = kernel.num_faces(),
        "staircase built"
    );

    Ok(Staircase {
        kernel,
        parameters: *params,
        constants,
        parts: StaircaseParts {
            treads,
            pole,
            rail,
            balusters,
        },
    })
}

/// Build a staircase and deliver it to `sink` under `target`.
///
/// Nothing reaches the sink unless the build succeeds.
///
/// # Errors
///
/// Build errors, or [`crate::StairError::Sink`] if the sink rejects the mesh.
pub fn generate(
    params: &StairParameters,
    options: &BuildOptions,
    target: &str,
    sink: &mut dyn MeshSink,
) -> Result<GenerationReport> {
    let staircase = build_staircase(params, options)?;
    let mesh = staircase.to_poly_mesh();
    let report = GenerationReport {
        target: target.to_string(),
        constants: staircase.constants,
        total_angle: staircase.constants.total_angle(),
        treads: staircase.parts.treads.len(),
        balusters: staircase.parts.balusters.len(),
        vertices: mesh.num_vertices(),
        faces: mesh.num_faces(),
        components: staircase.component_count(),
    };
    sink.receive(target, mesh)?;
    info!(target, faces = report.faces, "staircase delivered");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneStore, StairError};

    #[test]
    fn test_small_staircase() {
        let params = StairParameters {
            floor_height: 0.45,
            ..Default::default()
        };
        let stairs = build_staircase(&params, &BuildOptions::default()).unwrap();
        assert_eq!(stairs.constants.step_count, 3);
        assert_eq!(stairs.parts.treads.len(), 3);
        assert_eq!(stairs.parts.balusters.len(), 6);
        assert_eq!(stairs.component_count(), 3 * 3 + 2);
        assert!(stairs.kernel.is_closed());
        assert!(stairs.kernel.is_consistently_oriented());

        // 13 faces a tread, 34 for the pole, 14 a baluster, 3*4*16 + 2 rail
        let faces = 3 * 13 + 34 + 6 * 14 + (3 * 4 * 16 + 2);
        assert_eq!(stairs.kernel.num_faces(), faces);
    }

    #[test]
    fn test_invalid_input_reaches_no_sink() {
        let params = StairParameters {
            tread_depth: -1.0,
            ..Default::default()
        };
        let mut store = SceneStore::with_container("Staircase");
        let err = generate(&params, &BuildOptions::default(), "Staircase", &mut store).unwrap_err();
        assert!(matches!(err, StairError::InvalidParameter { name: "tread_depth", .. }));
        assert!(store.get("Staircase").is_none());
    }

    #[test]
    fn test_report_matches_mesh() {
        let params = StairParameters {
            floor_height: 0.6,
            ..Default::default()
        };
        let mut store = SceneStore::with_container("Staircase");
        let report =
            generate(&params, &BuildOptions::default(), "Staircase", &mut store).unwrap();
        let mesh = store.get("Staircase").unwrap();
        assert_eq!(report.faces, mesh.num_faces());
        assert_eq!(report.vertices, mesh.num_vertices());
        assert_eq!(report.components, 4 * 3 + 2);
        assert_eq!(report.constants.step_count, 4);
        assert_eq!(report.treads, 4);
        assert_eq!(report.balusters, 8);
    }
}
