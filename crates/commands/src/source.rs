use glam::DVec3;
use qdwarp_common::{DimensionId, WarpPosition};

/// What the host server exposes to warp commands.
///
/// One value represents whoever ran the command (a player, the console, a
/// command block) plus the server it runs on.
pub trait CommandSource {
    /// Host handle for an online player.
    type Player;

    fn has_permission_level(&self, level: u8) -> bool;

    /// The player that ran the command, if it was a player.
    fn player(&self) -> Option<Self::Player>;

    /// Look up an online player by name.
    fn find_player(&self, name: &str) -> Option<Self::Player>;

    fn player_name(&self, player: &Self::Player) -> String;

    /// Dimension the source is in.
    fn dimension(&self) -> DimensionId;

    fn position(&self) -> DVec3;

    /// `(yaw, pitch)` of the source entity. `None` without an entity.
    fn rotation(&self) -> Option<(f32, f32)>;

    /// Whether the running server has this dimension loaded.
    fn has_dimension(&self, dimension: &DimensionId) -> bool;

    /// Move `player` to `target`. Only called once the dimension is known
    /// to exist.
    fn teleport(&mut self, player: &Self::Player, target: &WarpPosition);
}

/// Message sent back after a command succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    /// Also shown to other operators.
    pub broadcast: bool,
}

impl Feedback {
    pub fn broadcast(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            broadcast: true,
        }
    }
}
