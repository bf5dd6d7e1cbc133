//! Shared warp types: dimension ids, positions, snapping policies and errors.

pub mod error;
pub mod snap;
pub mod types;

pub use error::WarpError;
pub use snap::{PositionSnap, RotationSnap, UnknownPolicy};
pub use types::{DimensionId, DimensionParseError, NamedWarp, WarpPosition, validate_name};
