//! Procedural box shells for the packaging configurator.
//!
//! A configuration is turned into an outer and an inner axis-aligned shell,
//! in meters, with length on x, height on y and width on z. Corrugated board
//! gets a deterministic fluted ripple on the outer shell.

pub mod builder;
pub mod corrugation;
pub mod dimensions;
pub mod mesh;
pub mod vector;

pub use builder::{build_shells, check_clearance, BoxShells};
pub use dimensions::{effective_thickness, Axis, BoxDimensions};
pub use mesh::{FaceSide, QuadFace, ShellMesh};
pub use vector::Vec3;

use box_types::ValidationError;

/// What to do when the walls leave no room inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearancePolicy {
    /// Floor the inner axis at `min_inner_dimension` and carry on.
    Clamp,
    /// Fail with `GeometryError::InnerCollapsed`.
    Reject,
}

/// Tunables for shell derivation.
#[derive(Debug, Clone, Copy)]
pub struct GeometryConfig {
    /// Smallest inner size along any axis (meters).
    pub min_inner_dimension: f64,
    /// Base angular frequency of the flute ripple (radians per meter).
    pub corrugation_frequency: f64,
    /// Base amplitude of the flute ripple (meters).
    pub corrugation_amplitude: f64,
    pub clearance: ClearancePolicy,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_inner_dimension: 0.001,
            corrugation_frequency: 50.0,
            corrugation_amplitude: 0.0005,
            clearance: ClearancePolicy::Clamp,
        }
    }
}

impl GeometryConfig {
    /// Defaults, but refuse configurations that would need clamping.
    pub fn strict() -> Self {
        Self {
            clearance: ClearancePolicy::Reject,
            ..Self::default()
        }
    }
}

/// Errors from shell derivation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("walls of {wall} m leave no room along {axis} (outer {outer} m)")]
    InnerCollapsed { axis: Axis, outer: f64, wall: f64 },
}
