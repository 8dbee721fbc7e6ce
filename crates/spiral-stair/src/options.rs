//! Mesh resolution and profile sizes.

use serde::{Deserialize, Serialize};

use crate::{Result, StairError};

/// Resolution knobs that shape the mesh without changing the staircase's
/// physical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Arc subdivisions along each tread's outer edge.
    pub arc_substeps: u32,
    /// Polygon sides of the pole.
    pub pole_segments: u32,
    /// Polygon sides of the handrail profile.
    pub rail_segments: u32,
    /// Radius of the handrail profile.
    pub rail_profile_radius: f64,
    /// Sweep steps of the handrail per tread.
    pub rail_substeps_per_tread: u32,
    /// Polygon sides of each baluster.
    pub baluster_segments: u32,
    /// Radius of each baluster.
    pub baluster_profile_radius: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            arc_substeps: 8,
            pole_segments: 32,
            rail_segments: 16,
            rail_profile_radius: 0.025,
            rail_substeps_per_tread: 4,
            baluster_segments: 12,
            baluster_profile_radius: 0.0125,
        }
    }
}

impl BuildOptions {
    /// Check every knob is usable.
    ///
    /// # Errors
    ///
    /// [`StairError::InvalidParameter`] for polygons with fewer than three
    /// sides, zero subdivisions, or radii that are not positive and finite.
    pub fn validate(&self) -> Result<()> {
        let polygons = [
            ("pole_segments", self.pole_segments),
            ("rail_segments", self.rail_segments),
            ("baluster_segments", self.baluster_segments),
        ];
        for (name, sides) in polygons {
            if sides < 3 {
                return Err(invalid(name, f64::from(sides), "needs at least 3 sides"));
            }
        }

        let subdivisions = [
            ("arc_substeps", self.arc_substeps),
            ("rail_substeps_per_tread", self.rail_substeps_per_tread),
        ];
        for (name, steps) in subdivisions {
            if steps == 0 {
                return Err(invalid(name, 0.0, "needs at least 1 subdivision"));
            }
        }

        let radii = [
            ("rail_profile_radius", self.rail_profile_radius),
            ("baluster_profile_radius", self.baluster_profile_radius),
        ];
        for (name, radius) in radii {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(invalid(name, radius, "must be a positive, finite number"));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f64, reason: &str) -> StairError {
    StairError::InvalidParameter {
        name,
        value,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        BuildOptions::default().validate().unwrap();
    }

    #[test]
    fn test_two_sided_pole_is_rejected() {
        let options = BuildOptions {
            pole_segments: 2,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(StairError::InvalidParameter { name: "pole_segments", .. })
        ));
    }

    #[test]
    fn test_zero_substeps_are_rejected() {
        let options = BuildOptions {
            rail_substeps_per_tread: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(StairError::InvalidParameter { name: "rail_substeps_per_tread", .. })
        ));
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let options = BuildOptions {
            baluster_profile_radius: -0.01,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
