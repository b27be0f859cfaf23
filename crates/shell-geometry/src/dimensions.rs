use std::fmt;

use box_types::BoxConfiguration;
use serde::{Deserialize, Serialize};

use crate::vector::Vec3;
use crate::GeometryConfig;

const CM_TO_M: f64 = 0.01;
const MM_TO_M: f64 = 0.001;

/// Box axis. Length runs along x, height along y, width along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Length,
    Height,
    Width,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Height, Axis::Width];

    pub fn component(&self, v: &Vec3) -> f64 {
        match self {
            Axis::Length => v.x,
            Axis::Height => v.y,
            Axis::Width => v.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Length => "length",
            Axis::Height => "height",
            Axis::Width => "width",
        })
    }
}

/// Wall thickness after the ply multiplier, in meters.
///
/// Ply only counts for corrugated board.
pub fn effective_thickness(config: &BoxConfiguration) -> f64 {
    let nominal = config.thickness * MM_TO_M;
    match config.active_ply() {
        Some(ply) => nominal * ply.thickness_factor(),
        None => nominal,
    }
}

/// Outer, wall and inner measurements of a box, all in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    /// External size (length, height, width).
    pub outer: Vec3,
    /// Effective wall thickness.
    pub wall: f64,
    /// Internal size after subtracting both walls, floored at the minimum.
    pub inner: Vec3,
    /// Axes whose inner size had to be floored.
    pub clamped: Vec<Axis>,
}

impl BoxDimensions {
    pub fn from_config(config: &BoxConfiguration, geometry: &GeometryConfig) -> Self {
        let outer = Vec3::new(
            config.length * CM_TO_M,
            config.height * CM_TO_M,
            config.width * CM_TO_M,
        );
        let wall = effective_thickness(config);

        let mut clamped = Vec::new();
        let mut floor = |axis: Axis| {
            let raw = axis.component(&outer) - 2.0 * wall;
            if raw < geometry.min_inner_dimension {
                clamped.push(axis);
                geometry.min_inner_dimension
            } else {
                raw
            }
        };
        let inner = Vec3::new(floor(Axis::Length), floor(Axis::Height), floor(Axis::Width));

        Self {
            outer,
            wall,
            inner,
            clamped,
        }
    }

    pub fn inner_length(&self) -> f64 {
        self.inner.x
    }

    pub fn inner_height(&self) -> f64 {
        self.inner.y
    }

    pub fn inner_width(&self) -> f64 {
        self.inner.z
    }

    pub fn is_clamped(&self) -> bool {
        !self.clamped.is_empty()
    }

    /// Usable internal volume in liters.
    pub fn internal_volume_liters(&self) -> f64 {
        self.inner.x * self.inner.y * self.inner.z * 1000.0
    }
}
