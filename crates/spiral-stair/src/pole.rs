//! The central pole.

use spiral_kernel_math::Vec3;
use spiral_kernel_mesh::{Geometry, MeshKernel};
use tracing::info;

use crate::{BuildOptions, Result, StairParameters};

/// Build the pole: a capped cylinder of `pole_radius` on the Z axis from the
/// floor to `floor_height`.
///
/// # Errors
///
/// Fails if `pole_segments < 3`.
pub fn build_pole(
    kernel: &mut MeshKernel,
    params: &StairParameters,
    options: &BuildOptions,
) -> Result<Geometry> {
    let mut pole = kernel.create_circle(options.pole_segments, params.pole_radius, true)?;
    let shaft = kernel.extrude_face_region(&pole)?;
    kernel.translate(
        &shaft.rim.vertices(),
        Vec3::new(0.0, 0.0, params.floor_height),
    )?;
    pole.merge(&shaft.all());
    info!(
        segments = options.pole_segments,
        elements = pole.len(),
        "pole built"
    );
    Ok(pole)
}
