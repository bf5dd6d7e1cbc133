use crate::WarpError;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace used when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced identifier of a world/level, written `namespace:path`.
///
/// Only the character set is validated. Whether the dimension actually exists
/// is decided by the host when a warp is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionId {
    namespace: String,
    path: String,
}

/// Errors from parsing a [`DimensionId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionParseError {
    #[error("empty dimension identifier")]
    Empty,
    #[error("non [a-z0-9_.-] character in namespace of identifier: {0}")]
    InvalidNamespace(String),
    #[error("non [a-z0-9/._-] character in path of identifier: {0}")]
    InvalidPath(String),
}

impl DimensionId {
    /// Build an identifier from already separated parts. An empty namespace
    /// means [`DEFAULT_NAMESPACE`].
    pub fn new(
        namespace: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, DimensionParseError> {
        let mut namespace = namespace.into();
        if namespace.is_empty() {
            namespace = DEFAULT_NAMESPACE.into();
        }
        let path = path.into();
        let full = format!("{namespace}:{path}");
        if path.is_empty() {
            return Err(DimensionParseError::Empty);
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(DimensionParseError::InvalidNamespace(full));
        }
        if !path.chars().all(is_path_char) {
            return Err(DimensionParseError::InvalidPath(full));
        }
        Ok(Self { namespace, path })
    }

    pub fn overworld() -> Self {
        Self::vanilla("overworld")
    }

    pub fn the_nether() -> Self {
        Self::vanilla("the_nether")
    }

    pub fn the_end() -> Self {
        Self::vanilla("the_end")
    }

    fn vanilla(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.into(),
            path: path.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl FromStr for DimensionId {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DimensionParseError::Empty);
        }
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl TryFrom<String> for DimensionId {
    type Error = DimensionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DimensionId> for String {
    fn from(id: DimensionId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// A saved location: dimension, coordinates and view angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpPosition {
    pub dimension: DimensionId,
    pub position: DVec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl WarpPosition {
    pub fn new(dimension: DimensionId, position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            dimension,
            position,
            yaw,
            pitch,
        }
    }
}

/// A warp position together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWarp {
    pub name: String,
    pub position: WarpPosition,
}

/// Check that `name` can be written to the warps file and read back.
///
/// A leading `;` would be read as a comment and a line break would split
/// the entry, so both are refused along with the empty name.
pub fn validate_name(name: &str) -> Result<(), WarpError> {
    if name.is_empty() || name.starts_with(';') || name.contains(['\n', '\r']) {
        return Err(WarpError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl fmt::Display for WarpPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1}",
            self.dimension,
            self.position.x,
            self.position.y,
            self.position.z,
            self.yaw,
            self.pitch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_parses_namespaced_form() {
        let id: DimensionId = "mymod:sky/islands".parse().unwrap();
        assert_eq!(id.namespace(), "mymod");
        assert_eq!(id.path(), "sky/islands");
        assert_eq!(id.to_string(), "mymod:sky/islands");
    }

    #[test]
    fn dimension_without_namespace_defaults_to_minecraft() {
        let id: DimensionId = "the_nether".parse().unwrap();
        assert_eq!(id, DimensionId::the_nether());
    }

    #[test]
    fn dimension_empty_namespace_round_trips() {
        let id = DimensionId::new("", "x").unwrap();
        assert_eq!(id.to_string(), "minecraft:x");
        assert_eq!(id.to_string().parse::<DimensionId>().unwrap(), id);
        assert_eq!(":x".parse::<DimensionId>().unwrap(), id);
    }

    #[test]
    fn dimension_rejects_bad_characters() {
        assert!(matches!(
            "Minecraft:overworld".parse::<DimensionId>(),
            Err(DimensionParseError::InvalidNamespace(_))
        ));
        assert!(matches!(
            "minecraft:over world".parse::<DimensionId>(),
            Err(DimensionParseError::InvalidPath(_))
        ));
        assert_eq!("".parse::<DimensionId>(), Err(DimensionParseError::Empty));
    }

    #[test]
    fn dimension_serde_as_string() {
        let json = serde_json::to_string(&DimensionId::the_end()).unwrap();
        assert_eq!(json, "\"minecraft:the_end\"");
        let back: DimensionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DimensionId::the_end());
    }

    #[test]
    fn names_that_cannot_round_trip_are_refused() {
        for bad in ["", ";base", "a\nb", "a\r\nb", "trailing\r"] {
            assert!(
                matches!(validate_name(bad), Err(WarpError::InvalidName(ref n)) if n == bad),
                "{bad:?}"
            );
        }
        for good in ["home", "a=b", "old town; east", " ;spaced", "x;"] {
            assert!(validate_name(good).is_ok(), "{good:?}");
        }
    }

    #[test]
    fn warp_position_display() {
        let pos = WarpPosition::new(
            DimensionId::overworld(),
            DVec3::new(10.5, 64.0, -3.0),
            90.0,
            0.0,
        );
        let s = pos.to_string();
        assert!(s.starts_with("minecraft:overworld (10.50, 64.00, -3.00)"));
    }
}
