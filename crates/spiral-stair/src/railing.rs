//! The helical handrail.

use std::f64::consts::FRAC_PI_2;

use spiral_kernel_math::{Transform, Vec3};
use spiral_kernel_mesh::{Geometry, MeshKernel, SpinParams};
use tracing::info;

use crate::{BuildOptions, DerivedConstants, Result, StairError};

/// Sweep the handrail: a circular profile spun about +Z through
/// `total_angle` while rising one `tread_height` per `angle_pitch`.
///
/// The profile starts standing in the XZ plane at `railing_offset_radius`,
/// turned to the first tread's leading edge (`angle_pitch / 2`) at
/// `railing_height + tread_height`. Its start cap is kept and the sweep
/// closes the end, so the rail is a closed tube.
///
/// # Errors
///
/// [`StairError::DegenerateGeometry`] if `railing_offset_radius` is not
/// positive, [`StairError::InvalidParameter`] if the sweep step count
/// overflows, and kernel errors for bad segment counts or radii.
pub fn build_railing(
    kernel: &mut MeshKernel,
    constants: &DerivedConstants,
    options: &BuildOptions,
) -> Result<Geometry> {
    let radius = constants.railing_offset_radius;
    if radius.is_nan() || radius <= 0.0 {
        return Err(StairError::DegenerateGeometry {
            name: "railing_offset_radius",
            value: radius,
            reason: "the handrail needs a positive radius".into(),
        });
    }
    let substeps = options.rail_substeps_per_tread;
    let steps = constants
        .step_count
        .checked_mul(substeps)
        .ok_or_else(|| StairError::InvalidParameter {
            name: "rail_substeps_per_tread",
            value: f64::from(substeps),
            reason: format!("{} treads times {substeps} overflows", constants.step_count),
        })?;

    let profile = kernel.create_circle(options.rail_segments, options.rail_profile_radius, true)?;
    let verts = profile.vertices();
    kernel.transform(&verts, &Transform::rotation_x(-FRAC_PI_2))?;
    kernel.translate(
        &verts,
        Vec3::new(radius, 0.0, constants.rail_start_height),
    )?;
    kernel.transform(&verts, &Transform::rotation_z(constants.angle_pitch / 2.0))?;

    let sweep = SpinParams::about_z(constants.total_angle(), steps)
        .with_dvec(Vec3::new(0.0, 0.0, constants.tread_height / f64::from(substeps)));
    let swept = kernel.spin(&profile, &sweep)?;

    let mut rail = kernel.prune(&profile);
    rail.merge(&swept.all);
    info!(steps, elements = rail.len(), "railing swept");
    Ok(rail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StairParameters;
    use approx::assert_relative_eq;
    use spiral_kernel_math::{polar_angle, radial_distance};

    #[test]
    fn test_rail_is_a_closed_helix() {
        let params = StairParameters {
            floor_height: 0.6,
            ..Default::default()
        };
        let constants = params.resolve().unwrap();
        let options = BuildOptions::default();
        let mut kernel = MeshKernel::new();
        let rail = build_railing(&mut kernel, &constants, &options).unwrap();

        // 16 quads per sweep step plus both caps
        assert_eq!(rail.faces().len(), 4 * 4 * 16 + 2);
        assert_eq!(kernel.num_faces(), rail.faces().len());
        assert!(kernel.is_closed());
        assert!(kernel.is_consistently_oriented());
        assert_eq!(kernel.connected_components().len(), 1);

        let (lo, hi) = kernel.bounding_box().unwrap();
        assert_relative_eq!(lo.z, 0.875 + 0.15 - 0.025, epsilon = 1e-9);
        assert_relative_eq!(hi.z, 0.875 + 0.15 * 5.0 + 0.025, epsilon = 1e-9);
    }

    #[test]
    fn test_rail_centre_follows_helix() {
        let constants = StairParameters::default().resolve().unwrap();
        let options = BuildOptions::default();
        let mut kernel = MeshKernel::new();
        let rail = build_railing(&mut kernel, &constants, &options).unwrap();

        // every ring of the tube is centred on the helix
        let verts = rail.vertices();
        for ring in verts.chunks(options.rail_segments as usize) {
            let sum = ring
                .iter()
                .map(|v| kernel.point(*v).unwrap().coords)
                .fold(Vec3::zeros(), |acc, p| acc + p);
            let centre = spiral_kernel_math::Point3::from(sum / ring.len() as f64);
            assert_relative_eq!(
                radial_distance(&centre),
                constants.railing_offset_radius,
                epsilon = 1e-9
            );
            let mut angle = polar_angle(&centre);
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            assert_relative_eq!(centre.z, constants.rail_height_at(angle), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_non_positive_offset_is_degenerate() {
        let mut constants = StairParameters::default().resolve().unwrap();
        constants.railing_offset_radius = 0.0;
        let mut kernel = MeshKernel::new();
        let err = build_railing(&mut kernel, &constants, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, StairError::DegenerateGeometry { .. }));
        assert_eq!(kernel.num_vertices(), 0);
    }
}
