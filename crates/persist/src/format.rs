//! The `warps.ini` line format.
//!
//! ```text
//! ; comment lines start with a semicolon
//! <name>=<dimension>,<x>,<y>,<z>,<yaw>,<pitch>
//! ```
//!
//! The name is everything before the last `=`, so names may contain `=`.
//! Numbers are written with the `Debug` float form, which is locale
//! independent, round-trips exactly and keeps a fractional part (`64.0`).

use glam::DVec3;
use qdwarp_common::{DimensionId, DimensionParseError, NamedWarp, WarpPosition};

/// Errors from parsing a single warp line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("missing '=' between name and position")]
    MissingSeparator,
    #[error("warp name is empty")]
    EmptyName,
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unexpected fields after pitch")]
    TrailingFields,
    #[error("invalid {field} value: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid dimension: {0}")]
    InvalidDimension(#[from] DimensionParseError),
}

/// A malformed line found by [`check_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: usize,
    pub error: FormatError,
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with(';')
}

/// Parse `name=dimension,x,y,z,yaw,pitch`.
pub fn parse_line(line: &str) -> Result<NamedWarp, FormatError> {
    let (name, serialized) = line.rsplit_once('=').ok_or(FormatError::MissingSeparator)?;
    if name.is_empty() {
        return Err(FormatError::EmptyName);
    }
    Ok(NamedWarp {
        name: name.to_string(),
        position: parse_position(serialized)?,
    })
}

/// Parse the `dimension,x,y,z,yaw,pitch` half of a line.
pub fn parse_position(s: &str) -> Result<WarpPosition, FormatError> {
    let mut fields = s.split(',');
    let mut next = |field: &'static str| fields.next().ok_or(FormatError::MissingField(field));

    let dimension: DimensionId = next("dimension")?.parse()?;
    let x = parse_number::<f64>("x", next("x")?)?;
    let y = parse_number::<f64>("y", next("y")?)?;
    let z = parse_number::<f64>("z", next("z")?)?;
    let yaw = parse_number::<f32>("yaw", next("yaw")?)?;
    let pitch = parse_number::<f32>("pitch", next("pitch")?)?;

    if fields.next().is_some() {
        return Err(FormatError::TrailingFields);
    }
    Ok(WarpPosition::new(dimension, DVec3::new(x, y, z), yaw, pitch))
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, FormatError> {
    value.trim().parse().map_err(|_| FormatError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Render one entry as a line, without the trailing newline.
pub fn format_line(name: &str, pos: &WarpPosition) -> String {
    format!(
        "{name}={},{:?},{:?},{:?},{:?},{:?}",
        pos.dimension, pos.position.x, pos.position.y, pos.position.z, pos.yaw, pos.pitch
    )
}

/// Validate every non-comment, non-blank line of a document.
pub fn check_document(text: &str) -> Vec<LineIssue> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !is_comment(line))
        .filter_map(|(idx, line)| {
            parse_line(line).err().map(|error| LineIssue {
                line: idx + 1,
                error,
            })
        })
        .collect()
}
