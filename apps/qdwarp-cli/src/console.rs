use glam::DVec3;
use qdwarp_commands::CommandSource;
use qdwarp_common::{DimensionId, WarpPosition};
use qdwarp_persist::format::{FormatError, parse_position};

/// The server console, run offline against a world directory.
///
/// It has full permissions but no player, so `/warp` is refused and
/// `/warpother` finds nobody online.
pub struct ConsoleSource {
    at: WarpPosition,
    has_rotation: bool,
    dimensions: Vec<DimensionId>,
}

impl ConsoleSource {
    pub fn new(at: WarpPosition, has_rotation: bool, extra_dimensions: Vec<DimensionId>) -> Self {
        let mut dimensions = vec![
            DimensionId::overworld(),
            DimensionId::the_nether(),
            DimensionId::the_end(),
        ];
        dimensions.extend(extra_dimensions);
        Self {
            at,
            has_rotation,
            dimensions,
        }
    }

    /// Parse `DIM,X,Y,Z` or `DIM,X,Y,Z,YAW,PITCH`.
    pub fn parse_at(s: &str) -> Result<(WarpPosition, bool), FormatError> {
        if s.split(',').count() == 4 {
            Ok((parse_position(&format!("{s},0,0"))?, false))
        } else {
            Ok((parse_position(s)?, true))
        }
    }

    /// Console sitting at the overworld origin.
    pub fn at_origin(extra_dimensions: Vec<DimensionId>) -> Self {
        let origin = WarpPosition::new(DimensionId::overworld(), DVec3::ZERO, 0.0, 0.0);
        Self::new(origin, false, extra_dimensions)
    }
}

impl CommandSource for ConsoleSource {
    type Player = String;

    fn has_permission_level(&self, _level: u8) -> bool {
        true
    }

    fn player(&self) -> Option<String> {
        None
    }

    fn find_player(&self, _name: &str) -> Option<String> {
        None
    }

    fn player_name(&self, player: &String) -> String {
        player.clone()
    }

    fn dimension(&self) -> DimensionId {
        self.at.dimension.clone()
    }

    fn position(&self) -> DVec3 {
        self.at.position
    }

    fn rotation(&self) -> Option<(f32, f32)> {
        self.has_rotation.then_some((self.at.yaw, self.at.pitch))
    }

    fn has_dimension(&self, dimension: &DimensionId) -> bool {
        self.dimensions.contains(dimension)
    }

    fn teleport(&mut self, player: &String, target: &WarpPosition) {
        tracing::warn!(%player, %target, "console cannot teleport players offline");
    }
}
