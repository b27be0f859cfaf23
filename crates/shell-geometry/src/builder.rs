use box_types::BoxConfiguration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::corrugation::apply_corrugation;
use crate::dimensions::BoxDimensions;
use crate::mesh::ShellMesh;
use crate::{ClearancePolicy, GeometryConfig, GeometryError};

/// Outer and inner shells derived from one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShells {
    pub outer: ShellMesh,
    pub inner: ShellMesh,
    pub dimensions: BoxDimensions,
}

/// Reject a configuration whose walls would meet or cross.
///
/// Returns the derived dimensions when every inner axis clears the minimum.
pub fn check_clearance(
    config: &BoxConfiguration,
    geometry: &GeometryConfig,
) -> Result<BoxDimensions, GeometryError> {
    config.validate()?;
    let dims = BoxDimensions::from_config(config, geometry);
    if let Some(&axis) = dims.clamped.first() {
        return Err(GeometryError::InnerCollapsed {
            axis,
            outer: axis.component(&dims.outer),
            wall: dims.wall,
        });
    }
    Ok(dims)
}

/// Derive the outer and inner shells for a configuration.
///
/// Pure: the same configuration always yields the same meshes. Under
/// `ClearancePolicy::Clamp` an inner axis that would collapse is floored at
/// `min_inner_dimension`; under `Reject` it is an error.
#[instrument(skip_all, fields(material = %config.material))]
pub fn build_shells(
    config: &BoxConfiguration,
    geometry: &GeometryConfig,
) -> Result<BoxShells, GeometryError> {
    let dims = match geometry.clearance {
        ClearancePolicy::Reject => check_clearance(config, geometry)?,
        ClearancePolicy::Clamp => {
            config.validate()?;
            let dims = BoxDimensions::from_config(config, geometry);
            for axis in &dims.clamped {
                warn!(%axis, wall = dims.wall, "inner dimension floored at minimum");
            }
            dims
        }
    };
    debug!(wall = dims.wall, inner = ?dims.inner.to_array(), "derived dimensions");

    let mut outer = ShellMesh::axis_aligned_box(dims.outer);
    if let Some(flute) = config.active_flute() {
        apply_corrugation(&mut outer, flute, geometry);
        debug!(flute, "applied corrugation");
    }
    let inner = ShellMesh::axis_aligned_box(dims.inner);

    info!(
        outer = ?dims.outer.to_array(),
        clamped = dims.is_clamped(),
        "built box shells"
    );

    Ok(BoxShells {
        outer,
        inner,
        dimensions: dims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_types::{Material, Ply};

    #[test]
    fn flat_stock_is_not_displaced() {
        let config = BoxConfiguration {
            material: Material::Kraft,
            ..BoxConfiguration::default()
        };
        let shells = build_shells(&config, &GeometryConfig::default()).unwrap();
        assert_eq!(
            shells.outer,
            ShellMesh::axis_aligned_box(shells.dimensions.outer)
        );
    }

    #[test]
    fn corrugated_outer_is_displaced_inner_is_not() {
        let config = BoxConfiguration::default();
        let shells = build_shells(&config, &GeometryConfig::default()).unwrap();
        assert_ne!(
            shells.outer,
            ShellMesh::axis_aligned_box(shells.dimensions.outer)
        );
        assert_eq!(
            shells.inner,
            ShellMesh::axis_aligned_box(shells.dimensions.inner)
        );
    }

    #[test]
    fn ply_ignored_for_flat_stock() {
        let three = BoxConfiguration {
            material: Material::Duplex,
            ply: Ply::ThreePly,
            ..BoxConfiguration::default()
        };
        let seven = BoxConfiguration {
            ply: Ply::SevenPly,
            ..three.clone()
        };
        let g = GeometryConfig::default();
        assert_eq!(
            build_shells(&three, &g).unwrap(),
            build_shells(&seven, &g).unwrap()
        );
    }
}
