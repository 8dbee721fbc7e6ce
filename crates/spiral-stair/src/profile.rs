//! The tread profile: one annular-sector slab built from a single vertex.

use spiral_kernel_math::{Point3, Transform, Vec3};
use spiral_kernel_mesh::{FaceId, Geometry, KernelError, MeshKernel, SpinParams, VertexId};
use tracing::info;

use crate::{BuildOptions, DerivedConstants, Result, StairParameters};

/// The seed tread built at the origin, before it is arrayed.
#[derive(Debug, Clone)]
pub struct TreadProfile {
    /// The four corners of the top face: inner leading `A`, outer leading
    /// `B`, outer trailing `C` and inner trailing `D`.
    pub corners: [VertexId; 4],
    /// The top face at `z = 0`. The outline is laid out clockwise seen from
    /// above, so the slab extrusion flips it to face up.
    pub top: FaceId,
    /// Every element of the closed slab.
    pub solid: Geometry,
}

/// Build the tread profile centred on the +X axis with its top at `z = 0`.
///
/// The inner edge runs at `pole_radius + pole_gap` as a straight chord, the
/// outer edge follows an `arc_substeps` arc at the stair radius, and the
/// sector spans `angle_pitch`. The face is then extruded down by
/// `tread_thickness` into a closed slab.
///
/// # Errors
///
/// Propagates kernel errors.
pub fn build_tread_profile(
    kernel: &mut MeshKernel,
    params: &StairParameters,
    constants: &DerivedConstants,
    options: &BuildOptions,
) -> Result<TreadProfile> {
    let pitch = constants.angle_pitch;
    let inner = params.pole_radius + params.pole_gap;

    let pos_a = Transform::rotation_z(pitch / 2.0).apply_point(&Point3::new(inner, 0.0, 0.0));
    let a = kernel.create_vertex(pos_a);

    let b = kernel.extrude_vert_indiv(a)?;
    let scale = (inner + params.stair_width) / inner;
    kernel.translate(&[b], pos_a.coords * (scale - 1.0))?;

    let arc = kernel.spin(
        &Geometry::from_iter([b]),
        &SpinParams::about_z(-pitch, options.arc_substeps),
    )?;
    let c = arc
        .last
        .vertices()
        .first()
        .copied()
        .ok_or(KernelError::EmptyGeometry("tread arc"))?;

    let d = kernel.extrude_vert_indiv(c)?;
    let pos_c = kernel.point(c)?;
    let pos_d = Point3::new(pos_a.x, -pos_a.y, pos_a.z);
    kernel.translate(&[d], pos_d - pos_c)?;

    let mut outline = vec![a, b];
    outline.extend(arc.all.vertices());
    outline.push(d);
    let top = kernel.create_face(&outline)?;

    let top_region = Geometry::from_iter([top]);
    let slab = kernel.extrude_face_region(&top_region)?;
    kernel.translate(
        &slab.rim.vertices(),
        Vec3::new(0.0, 0.0, -params.tread_thickness),
    )?;

    let mut solid = kernel.closure(&top_region)?;
    solid.merge(&slab.all());
    info!(
        outline = outline.len(),
        elements = solid.len(),
        "tread profile built"
    );

    Ok(TreadProfile {
        corners: [a, b, c, d],
        top,
        solid,
    })
}
