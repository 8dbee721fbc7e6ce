//! Input parameters and the constants derived from them.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, StairError};

/// Gap kept between the handrail and the outer edge of the treads.
pub const RAILING_CLEARANCE: f64 = 0.05;

/// Physical parameters of a staircase, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StairParameters {
    /// Radial width of a tread, from its inner edge to its outer rim.
    pub stair_width: f64,
    /// Radius of the central pole.
    pub pole_radius: f64,
    /// Gap between the pole and the inner edge of the treads.
    pub pole_gap: f64,
    /// Desired tread depth along the walking line.
    pub tread_depth: f64,
    /// Thickness of each tread slab.
    pub tread_thickness: f64,
    /// Desired rise per step; the actual rise tiles `floor_height` exactly.
    pub target_tread_height: f64,
    /// Height between the two floors.
    pub floor_height: f64,
    /// Height of the handrail above each tread.
    pub railing_height: f64,
    /// Radius used to keep the handrail inside the stair footprint.
    pub railing_radius: f64,
}

impl Default for StairParameters {
    fn default() -> Self {
        Self {
            stair_width: 1.2,
            pole_radius: 0.075,
            pole_gap: 0.01,
            tread_depth: 0.25,
            tread_thickness: 0.05,
            target_tread_height: 0.15,
            floor_height: 3.0,
            railing_height: 0.875,
            railing_radius: 0.0375,
        }
    }
}

/// Constants derived once from [`StairParameters`] and shared by every builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedConstants {
    /// Number of treads.
    pub step_count: u32,
    /// Actual rise per tread; `step_count * tread_height == floor_height`.
    pub tread_height: f64,
    /// Radius of the walking line (two thirds out across the tread).
    pub usable_radius_reach: f64,
    /// Treads per full revolution.
    pub segments: u32,
    /// Rotation between consecutive treads, `2π / segments`.
    pub angle_pitch: f64,
    /// Outer radius of the treads.
    pub stair_diameter: f64,
    /// Radius at which the handrail and balusters run.
    pub railing_offset_radius: f64,
    /// Rise of the helix per radian, `tread_height / angle_pitch`.
    pub slope: f64,
    /// Height of the handrail centre where the sweep starts.
    pub rail_start_height: f64,
}

impl DerivedConstants {
    /// Angle swept by the staircase, `angle_pitch * step_count`.
    pub fn total_angle(&self) -> f64 {
        self.angle_pitch * f64::from(self.step_count)
    }

    /// Number of turns the staircase makes.
    pub fn revolutions(&self) -> f64 {
        self.total_angle() / TAU
    }

    /// Height of the handrail centre line above the polar angle `angle`
    /// (measured from +X, counter-clockwise).
    pub fn rail_height_at(&self, angle: f64) -> f64 {
        self.rail_start_height + self.slope * (angle - self.angle_pitch / 2.0)
    }
}

impl StairParameters {
    fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("stair_width", self.stair_width),
            ("pole_radius", self.pole_radius),
            ("pole_gap", self.pole_gap),
            ("tread_depth", self.tread_depth),
            ("tread_thickness", self.tread_thickness),
            ("target_tread_height", self.target_tread_height),
            ("floor_height", self.floor_height),
            ("railing_height", self.railing_height),
            ("railing_radius", self.railing_radius),
        ]
    }

    /// Validate the parameters and derive the shared constants.
    ///
    /// # Errors
    ///
    /// [`StairError::InvalidParameter`] if any input is not a positive
    /// finite number, if `floor_height / target_tread_height` rounds to
    /// zero steps, or if `tread_depth` leaves fewer than three treads per
    /// revolution. [`StairError::DegenerateGeometry`] if the handrail would
    /// not fit inside the stair footprint.
    pub fn resolve(&self) -> Result<DerivedConstants> {
        for (name, value) in self.fields() {
            if !(value.is_finite() && value > 0.0) {
                return Err(StairError::InvalidParameter {
                    name,
                    value,
                    reason: "must be a positive, finite number".into(),
                });
            }
        }

        let ratio = self.floor_height / self.target_tread_height;
        let step_count = round_count(ratio).ok_or_else(|| StairError::InvalidParameter {
            name: "target_tread_height",
            value: self.target_tread_height,
            reason: format!("floor_height / target_tread_height = {ratio:.4} gives no whole step"),
        })?;
        let tread_height = self.floor_height / f64::from(step_count);

        let usable_radius_reach = self.pole_radius + self.pole_gap + self.stair_width * 2.0 / 3.0;
        let per_turn = TAU * usable_radius_reach / self.tread_depth;
        let segments = round_count(per_turn)
            .filter(|&s| s >= 3)
            .ok_or_else(|| StairError::InvalidParameter {
                name: "tread_depth",
                value: self.tread_depth,
                reason: format!("walking line fits {per_turn:.4} treads per turn, need at least 3"),
            })?;
        let angle_pitch = TAU / f64::from(segments);

        let stair_diameter = self.pole_radius + self.pole_gap + self.stair_width;
        let railing_offset_radius = stair_diameter - self.railing_radius - RAILING_CLEARANCE;
        if railing_offset_radius <= 0.0 {
            return Err(StairError::DegenerateGeometry {
                name: "railing_offset_radius",
                value: railing_offset_radius,
                reason: format!(
                    "railing_radius + clearance {RAILING_CLEARANCE} exceeds the stair radius {stair_diameter}"
                ),
            });
        }

        let constants = DerivedConstants {
            step_count,
            tread_height,
            usable_radius_reach,
            segments,
            angle_pitch,
            stair_diameter,
            railing_offset_radius,
            slope: tread_height / angle_pitch,
            rail_start_height: self.railing_height + tread_height,
        };
        debug!(?constants, "resolved staircase parameters");
        Ok(constants)
    }
}

/// Round half to even and convert to a positive count.
fn round_count(value: f64) -> Option<u32> {
    let rounded = value.round_ties_even();
    if rounded >= 1.0 && rounded <= f64::from(u32::MAX) {
        Some(rounded as u32)
    } else {
        None
    }
}
