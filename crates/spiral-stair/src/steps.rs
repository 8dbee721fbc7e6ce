//! Arraying the seed tread into a rising, rotating flight.

use spiral_kernel_math::{Transform, Vec3};
use spiral_kernel_mesh::{Geometry, MeshKernel};
use tracing::info;

use crate::{DerivedConstants, Result};

/// Copy `seed` once per step and delete the seed.
///
/// Copy `i` (1-based) is raised by `i * tread_height` and turned by
/// `i * angle_pitch` about +Z, so the lowest tread already sits one rise
/// above the floor. Returns the copies in step order.
///
/// # Errors
///
/// Fails if `seed` holds stale handles.
pub fn array_steps(
    kernel: &mut MeshKernel,
    seed: &Geometry,
    constants: &DerivedConstants,
) -> Result<Vec<Geometry>> {
    let mut treads = Vec::with_capacity(constants.step_count as usize);
    for i in 1..=constants.step_count {
        let step = f64::from(i);
        let copy = kernel.duplicate(seed)?;
        let verts = copy.vertices();
        kernel.translate(&verts, Vec3::new(0.0, 0.0, step * constants.tread_height))?;
        kernel.transform(&verts, &Transform::rotation_z(step * constants.angle_pitch))?;
        treads.push(copy);
    }
    kernel.delete(seed)?;
    info!(treads = treads.len(), "treads arrayed");
    Ok(treads)
}
