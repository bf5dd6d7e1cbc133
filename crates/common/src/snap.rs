//! Snapping policies applied when a warp is created.
//!
//! Both policies truncate toward zero (`as i32`), not floor. A coordinate of
//! -3.9 snaps to -3.0 on the block corner and -2.5 on the block center.

use glam::DVec3;
use std::fmt;
use std::str::FromStr;

/// How x and z are rounded. y is always kept exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionSnap {
    #[default]
    Exact,
    BlockCorner,
    BlockCenter,
}

/// How yaw and pitch are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationSnap {
    #[default]
    Exact,
    FortyFive,
    Cardinal,
}

/// Unrecognised policy token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown snapping policy: {0}")]
pub struct UnknownPolicy(pub String);

impl PositionSnap {
    pub const ALL: [Self; 3] = [Self::Exact, Self::BlockCorner, Self::BlockCenter];

    /// Snap a single coordinate.
    pub fn apply(self, coord: f64) -> f64 {
        match self {
            Self::Exact => coord,
            Self::BlockCorner => f64::from(coord as i32),
            Self::BlockCenter => f64::from(coord as i32) + 0.5,
        }
    }

    /// Snap the horizontal components of a position.
    pub fn apply_horizontal(self, pos: DVec3) -> DVec3 {
        DVec3::new(self.apply(pos.x), pos.y, self.apply(pos.z))
    }

    /// Command literal, e.g. `pos-block-center`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Exact => "pos-exact",
            Self::BlockCorner => "pos-block-corner",
            Self::BlockCenter => "pos-block-center",
        }
    }
}

impl RotationSnap {
    pub const ALL: [Self; 3] = [Self::Exact, Self::FortyFive, Self::Cardinal];

    /// Snap an angle in degrees.
    pub fn apply(self, degrees: f32) -> f32 {
        match self {
            Self::Exact => degrees,
            Self::FortyFive => truncate_to_step(degrees, 45),
            Self::Cardinal => truncate_to_step(degrees, 90),
        }
    }

    /// Command literal, e.g. `rot-cardinal`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Exact => "rot-exact",
            Self::FortyFive => "rot-45",
            Self::Cardinal => "rot-cardinal",
        }
    }
}

fn truncate_to_step(degrees: f32, step: i32) -> f32 {
    ((degrees as i32 / step) * step) as f32
}

impl FromStr for PositionSnap {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.token() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

impl FromStr for RotationSnap {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.token() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

impl fmt::Display for PositionSnap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for RotationSnap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
