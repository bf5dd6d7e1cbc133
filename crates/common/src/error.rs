use crate::DimensionId;

/// Errors from warp lookups, mutations and persistence.
///
/// The `Display` text is what the invoking user sees.
#[derive(Debug, thiserror::Error)]
pub enum WarpError {
    #[error("That warp doesn't exist")]
    WarpNotFound(String),
    #[error("That name is taken, use /rmwarp {0} first if you want to replace it")]
    NameTaken(String),
    #[error("Warp names must not be empty, start with ';' or contain line breaks")]
    InvalidName(String),
    #[error("That warp refers to a nonexistent dimension")]
    DimensionMissing(DimensionId),
    #[error("warp persistence failed: {0}")]
    Persistence(#[from] std::io::Error),
}
