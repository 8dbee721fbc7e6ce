//! Vertical balusters joining each tread to the handrail.

use serde::Serialize;
use spiral_kernel_math::{Transform, Vec3};
use spiral_kernel_mesh::{Geometry, MeshKernel};
use tracing::info;

use crate::{BuildOptions, DerivedConstants, Result, StairParameters};

/// Which quarter of a tread a baluster stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BalusterSide {
    /// A quarter pitch ahead of the tread's centre line.
    Leading,
    /// A quarter pitch behind the tread's centre line.
    Trailing,
}

impl BalusterSide {
    /// Both sides, in build order.
    pub const BOTH: [BalusterSide; 2] = [BalusterSide::Leading, BalusterSide::Trailing];

    /// `+1` for leading, `-1` for trailing.
    pub fn sign(self) -> f64 {
        match self {
            BalusterSide::Leading => 1.0,
            BalusterSide::Trailing => -1.0,
        }
    }
}

/// One baluster and where it stands.
#[derive(Debug, Clone)]
pub struct Baluster {
    /// 1-based step the baluster stands on.
    pub step: u32,
    /// Side of the tread.
    pub side: BalusterSide,
    /// Polar angle of the baluster axis.
    pub angle: f64,
    /// Height of the top cap, on the handrail centre line.
    pub top_height: f64,
    /// Every element of the closed rod.
    pub geometry: Geometry,
}

/// Build two balusters per step at `railing_offset_radius`, a quarter pitch
/// either side of each tread's centre line.
///
/// A baluster on step `i` rises from the tread top at `i * tread_height`
/// by `railing_height + slope * (angle_pitch / 2 ± angle_pitch / 4)`, which
/// puts its top cap on the handrail centre line.
///
/// # Errors
///
/// Fails if `baluster_segments < 3` or the profile radius is not positive.
pub fn build_balusters(
    kernel: &mut MeshKernel,
    params: &StairParameters,
    constants: &DerivedConstants,
    options: &BuildOptions,
) -> Result<Vec<Baluster>> {
    let pitch = constants.angle_pitch;
    let angle_offset = pitch / 4.0;
    let mut balusters = Vec::with_capacity(2 * constants.step_count as usize);

    for step in 1..=constants.step_count {
        let base_height = f64::from(step) * constants.tread_height;
        for side in BalusterSide::BOTH {
            let mut geometry = kernel.create_circle(
                options.baluster_segments,
                options.baluster_profile_radius,
                true,
            )?;
            let base = geometry.vertices();
            kernel.translate(
                &base,
                Vec3::new(constants.railing_offset_radius, 0.0, base_height),
            )?;
            let angle = f64::from(step) * pitch + side.sign() * angle_offset;
            kernel.transform(&base, &Transform::rotation_z(angle))?;

            let height_offset = constants.slope * (pitch / 2.0 + side.sign() * angle_offset);
            let rod = kernel.extrude_face_region(&geometry)?;
            kernel.translate(
                &rod.rim.vertices(),
                Vec3::new(0.0, 0.0, params.railing_height + height_offset),
            )?;
            geometry.merge(&rod.all());

            balusters.push(Baluster {
                step,
                side,
                angle,
                top_height: base_height + params.railing_height + height_offset,
                geometry,
            });
        }
    }
    info!(balusters = balusters.len(), "balusters built");
    Ok(balusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spiral_kernel_math::{polar_angle, radial_distance};

    #[test]
    fn test_baluster_tops_meet_rail() {
        let params = StairParameters::default();
        let constants = params.resolve().unwrap();
        let mut kernel = MeshKernel::new();
        let balusters =
            build_balusters(&mut kernel, &params, &constants, &BuildOptions::default()).unwrap();

        assert_eq!(balusters.len(), 40);
        assert!(kernel.is_closed());
        assert!(kernel.is_consistently_oriented());

        for b in &balusters {
            assert_relative_eq!(b.top_height, constants.rail_height_at(b.angle), epsilon = 1e-9);
            let (lo, hi) = kernel.bounds_of(&b.geometry.vertices()).unwrap();
            assert_relative_eq!(hi.z, b.top_height, epsilon = 1e-9);
            assert_relative_eq!(lo.z, f64::from(b.step) * constants.tread_height, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_quarter_pitch_placement() {
        let params = StairParameters::default();
        let constants = params.resolve().unwrap();
        let mut kernel = MeshKernel::new();
        let balusters =
            build_balusters(&mut kernel, &params, &constants, &BuildOptions::default()).unwrap();

        let first = &balusters[..2];
        assert_eq!(first[0].side, BalusterSide::Leading);
        assert_eq!(first[1].side, BalusterSide::Trailing);
        assert_relative_eq!(first[0].angle, 1.25 * constants.angle_pitch, epsilon = 1e-12);
        assert_relative_eq!(first[1].angle, 0.75 * constants.angle_pitch, epsilon = 1e-12);

        // rod length is railing height plus the rail's rise from the tread edge
        let rise = first[0].top_height - constants.tread_height;
        assert_relative_eq!(
            rise,
            0.875 + constants.slope * 0.75 * constants.angle_pitch,
            epsilon = 1e-12
        );

        for b in &balusters {
            let verts = b.geometry.vertices();
            let sum = verts
                .iter()
                .map(|v| kernel.point(*v).unwrap().coords)
                .fold(Vec3::zeros(), |acc, p| acc + p);
            let centre = spiral_kernel_math::Point3::from(sum / verts.len() as f64);
            assert_relative_eq!(
                radial_distance(&centre),
                constants.railing_offset_radius,
                epsilon = 1e-9
            );
            let mut angle = polar_angle(&centre);
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            assert_relative_eq!(angle, b.angle, epsilon = 1e-9);
        }
    }
}
