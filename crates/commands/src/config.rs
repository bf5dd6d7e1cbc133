use qdwarp_persist::WARPS_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Permission level needed for `/warpother`.
pub const DEFAULT_WARP_OTHER_LEVEL: u8 = 2;
/// Permission level needed for `/rmwarp` and `/mkwarp`.
pub const DEFAULT_ADMIN_LEVEL: u8 = 4;

/// Errors from reading the plugin config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Plugin settings, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// File name inside the world save directory.
    pub file_name: String,
    pub warp_other_level: u8,
    pub remove_level: u8,
    pub create_level: u8,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            file_name: WARPS_FILE_NAME.into(),
            warp_other_level: DEFAULT_WARP_OTHER_LEVEL,
            remove_level: DEFAULT_ADMIN_LEVEL,
            create_level: DEFAULT_ADMIN_LEVEL,
        }
    }
}

impl WarpConfig {
    /// Read a config file. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::File::open(path) {
            Ok(file) => Ok(serde_json::from_reader(file)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Location of the warps file for a world.
    pub fn warps_path(&self, world_root: &Path) -> PathBuf {
        world_root.join(&self.file_name)
    }
}
