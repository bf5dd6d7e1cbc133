use crate::command::{CommandError, CommandKind, WarpCommand, split_command};
use crate::config::WarpConfig;
use crate::source::{CommandSource, Feedback};
use qdwarp_common::{PositionSnap, RotationSnap, WarpError, WarpPosition};
use qdwarp_persist::WarpStore;
use std::path::Path;
use std::sync::Arc;

/// The warp plugin: owns the store and handles the four commands.
///
/// The host calls [`WarpPlugin::on_server_starting`] once per server start
/// and [`WarpPlugin::dispatch`] for every command line.
#[derive(Debug)]
pub struct WarpPlugin {
    config: WarpConfig,
    store: Arc<WarpStore>,
}

impl WarpPlugin {
    pub fn new(config: WarpConfig) -> Self {
        Self::with_store(config, Arc::new(WarpStore::new()))
    }

    /// Use an existing store, e.g. one shared with other handlers.
    pub fn with_store(config: WarpConfig, store: Arc<WarpStore>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &Arc<WarpStore> {
        &self.store
    }

    /// Reload all warps from the world's save directory.
    pub fn on_server_starting(&self, world_root: &Path) -> usize {
        self.store.load(self.config.warps_path(world_root))
    }

    /// Permission level `kind` requires.
    pub fn required_level(&self, kind: CommandKind) -> u8 {
        match kind {
            CommandKind::Warp => 0,
            CommandKind::WarpOther => self.config.warp_other_level,
            CommandKind::RemoveWarp => self.config.remove_level,
            CommandKind::MakeWarp => self.config.create_level,
        }
    }

    fn permits<S: CommandSource>(&self, source: &S, kind: CommandKind) -> bool {
        match self.required_level(kind) {
            0 => true,
            level => source.has_permission_level(level),
        }
    }

    /// Parse and run one command line.
    pub fn dispatch<S: CommandSource>(
        &self,
        source: &mut S,
        input: &str,
    ) -> Result<Option<Feedback>, CommandError> {
        let (kind, args) = split_command(input)?;
        if !self.permits(source, kind) {
            return Err(CommandError::PermissionDenied(kind.literal()));
        }
        let command = WarpCommand::parse_args(kind, args)?;
        self.run(source, command)
    }

    /// Run an already parsed command.
    pub fn execute<S: CommandSource>(
        &self,
        source: &mut S,
        command: WarpCommand,
    ) -> Result<Option<Feedback>, CommandError> {
        let kind = command.kind();
        if !self.permits(source, kind) {
            return Err(CommandError::PermissionDenied(kind.literal()));
        }
        self.run(source, command)
    }

    /// Run a command whose permission has already been checked.
    fn run<S: CommandSource>(
        &self,
        source: &mut S,
        command: WarpCommand,
    ) -> Result<Option<Feedback>, CommandError> {
        match command {
            WarpCommand::Warp { name } => {
                let player = source.player().ok_or(CommandError::PlayerRequired)?;
                self.warp(source, &player, &name)?;
                Ok(None)
            }
            WarpCommand::WarpOther { player, name } => {
                let target = source
                    .find_player(&player)
                    .ok_or(CommandError::PlayerNotFound(player))?;
                self.warp(source, &target, &name)?;
                let shown = source.player_name(&target);
                Ok(Some(Feedback::broadcast(format!("Warped {shown} to {name}"))))
            }
            WarpCommand::RemoveWarp { name } => {
                self.store
                    .remove(&name)
                    .ok_or_else(|| WarpError::WarpNotFound(name.clone()))?;
                Ok(Some(Feedback::broadcast(format!("Deleted warp {name}"))))
            }
            WarpCommand::MakeWarp {
                position,
                rotation,
                name,
            } => {
                let pos = snapped_position(source, position, rotation);
                self.store.create(name.clone(), pos)?;
                Ok(Some(Feedback::broadcast(format!("Created warp {name}"))))
            }
        }
    }

    fn warp<S: CommandSource>(
        &self,
        source: &mut S,
        player: &S::Player,
        name: &str,
    ) -> Result<(), WarpError> {
        let target = self
            .store
            .get(name)
            .ok_or_else(|| WarpError::WarpNotFound(name.to_string()))?;
        if !source.has_dimension(&target.dimension) {
            return Err(WarpError::DimensionMissing(target.dimension));
        }
        tracing::debug!(warp = %name, target = %target, "teleporting");
        source.teleport(player, &target);
        Ok(())
    }

    /// Completions for the argument currently being typed in `input`.
    pub fn suggest<S: CommandSource>(&self, source: &S, input: &str) -> Vec<String> {
        let line = input.strip_prefix('/').unwrap_or(input);
        let Some((literal, args)) = line.split_once(' ') else {
            return CommandKind::ALL
                .into_iter()
                .filter(|k| k.literal().starts_with(line) && self.permits(source, *k))
                .map(|k| k.literal().to_string())
                .collect();
        };
        let Some(kind) = CommandKind::from_literal(literal) else {
            return Vec::new();
        };
        if !self.permits(source, kind) {
            return Vec::new();
        }
        match kind {
            CommandKind::Warp | CommandKind::RemoveWarp => self.store.suggest(args),
            // player names are completed by the host
            CommandKind::WarpOther => match args.split_once(' ') {
                Some((_, partial)) => self.store.suggest(partial),
                None => Vec::new(),
            },
            CommandKind::MakeWarp => {
                let parts: Vec<&str> = args.splitn(3, ' ').collect();
                match parts.as_slice() {
                    [pos] => matching_tokens(PositionSnap::ALL.map(PositionSnap::token), pos),
                    [_, rot] => matching_tokens(RotationSnap::ALL.map(RotationSnap::token), rot),
                    _ => Vec::new(),
                }
            }
        }
    }
}

fn matching_tokens<const N: usize>(tokens: [&'static str; N], prefix: &str) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| t.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

/// Where `/mkwarp` puts a warp: the source's location with x/z and rotation
/// snapped. Sources without an entity get a rotation of zero.
pub fn snapped_position<S: CommandSource>(
    source: &S,
    position: PositionSnap,
    rotation: RotationSnap,
) -> WarpPosition {
    let (yaw, pitch) = source
        .rotation()
        .map(|(yaw, pitch)| (rotation.apply(yaw), rotation.apply(pitch)))
        .unwrap_or((0.0, 0.0));
    WarpPosition::new(
        source.dimension(),
        position.apply_horizontal(source.position()),
        yaw,
        pitch,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use qdwarp_common::DimensionId;
    use std::cell::Cell;

    /// In-memory host with a fixed set of players and dimensions.
    struct FakeServer {
        level: u8,
        me: Option<String>,
        online: Vec<String>,
        dimension: DimensionId,
        position: DVec3,
        rotation: Option<(f32, f32)>,
        dimensions: Vec<DimensionId>,
        teleports: Vec<(String, WarpPosition)>,
        permission_checks: Cell<u32>,
    }

    impl FakeServer {
        fn player(name: &str, level: u8) -> Self {
            Self {
                level,
                me: Some(name.to_string()),
                online: vec![name.to_string(), "Alex".to_string()],
                dimension: DimensionId::overworld(),
                position: DVec3::new(10.7, 64.3, -3.9),
                rotation: Some((100.0, -10.0)),
                dimensions: vec![DimensionId::overworld(), DimensionId::the_nether()],
                teleports: Vec::new(),
                permission_checks: Cell::new(0),
            }
        }

        fn console() -> Self {
            Self {
                me: None,
                rotation: None,
                ..Self::player("unused", 4)
            }
        }
    }

    impl CommandSource for FakeServer {
        type Player = String;

        fn has_permission_level(&self, level: u8) -> bool {
            self.permission_checks.set(self.permission_checks.get() + 1);
            self.level >= level
        }

        fn player(&self) -> Option<String> {
            self.me.clone()
        }

        fn find_player(&self, name: &str) -> Option<String> {
            self.online.iter().find(|p| *p == name).cloned()
        }

        fn player_name(&self, player: &String) -> String {
            player.clone()
        }

        fn dimension(&self) -> DimensionId {
            self.dimension.clone()
        }

        fn position(&self) -> DVec3 {
            self.position
        }

        fn rotation(&self) -> Option<(f32, f32)> {
            self.rotation
        }

        fn has_dimension(&self, dimension: &DimensionId) -> bool {
            self.dimensions.contains(dimension)
        }

        fn teleport(&mut self, player: &String, target: &WarpPosition) {
            self.teleports.push((player.clone(), target.clone()));
        }
    }

    fn plugin() -> WarpPlugin {
        WarpPlugin::new(WarpConfig::default())
    }

    fn home() -> WarpPosition {
        WarpPosition::new(
            DimensionId::overworld(),
            DVec3::new(10.5, 64.0, -3.0),
            90.0,
            0.0,
        )
    }

    #[test]
    fn server_start_loads_world_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("warps.ini"),
            ";comment\nhome=minecraft:overworld,10.5,64.0,-3.0,90.0,0.0\n",
        )
        .unwrap();

        let plugin = plugin();
        plugin.store().put("stale", home()).unwrap();
        assert_eq!(plugin.on_server_starting(tmp.path()), 1);
        assert_eq!(plugin.store().list(), ["home"]);
    }

    #[test]
    fn warp_teleports_invoking_player() {
        let plugin = plugin();
        plugin.store().put("home", home()).unwrap();
        let mut src = FakeServer::player("Steve", 0);

        let out = plugin.dispatch(&mut src, "/warp home").unwrap();
        assert_eq!(out, None);
        assert_eq!(src.teleports, vec![("Steve".to_string(), home())]);
    }

    #[test]
    fn warp_errors() {
        let plugin = plugin();
        let mut end = home();
        end.dimension = DimensionId::the_end();
        plugin.store().put("end", end).unwrap();

        let mut src = FakeServer::player("Steve", 0);
        let err = plugin.dispatch(&mut src, "/warp nowhere").unwrap_err();
        assert_eq!(err.to_string(), "That warp doesn't exist");

        let err = plugin.dispatch(&mut src, "/warp end").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Warp(WarpError::DimensionMissing(ref d)) if *d == DimensionId::the_end()
        ));
        assert_eq!(err.to_string(), "That warp refers to a nonexistent dimension");

        let mut console = FakeServer::console();
        assert!(matches!(
            plugin.dispatch(&mut console, "/warp end"),
            Err(CommandError::PlayerRequired)
        ));
        assert!(src.teleports.is_empty());
    }

    #[test]
    fn warpother_needs_level_two() {
        let plugin = plugin();
        plugin.store().put("home", home()).unwrap();

        let mut low = FakeServer::player("Steve", 1);
        assert!(matches!(
            plugin.dispatch(&mut low, "/warpother Alex home"),
            Err(CommandError::PermissionDenied("warpother"))
        ));

        let mut op = FakeServer::player("Steve", 2);
        let out = plugin.dispatch(&mut op, "/warpother Alex home").unwrap();
        assert_eq!(out, Some(Feedback::broadcast("Warped Alex to home")));
        assert_eq!(op.teleports, vec![("Alex".to_string(), home())]);

        assert!(matches!(
            plugin.dispatch(&mut op, "/warpother Herobrine home"),
            Err(CommandError::PlayerNotFound(ref p)) if p == "Herobrine"
        ));
    }

    #[test]
    fn permission_checked_before_arguments() {
        let plugin = plugin();
        let mut src = FakeServer::player("Steve", 0);
        assert!(matches!(
            plugin.dispatch(&mut src, "/mkwarp"),
            Err(CommandError::PermissionDenied("mkwarp"))
        ));
    }

    #[test]
    fn permission_checked_once_per_command() {
        let plugin = plugin();
        plugin.store().put("home", home()).unwrap();
        let mut op = FakeServer::player("Steve", 2);

        plugin.dispatch(&mut op, "/warpother Alex home").unwrap();
        assert_eq!(op.permission_checks.get(), 1);

        let cmd = WarpCommand::parse("/warpother Alex home").unwrap();
        plugin.execute(&mut op, cmd).unwrap();
        assert_eq!(op.permission_checks.get(), 2);
    }

    #[test]
    fn rmwarp_deletes_and_saves() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin();
        plugin.on_server_starting(tmp.path());
        plugin.store().put("home", home()).unwrap();
        plugin.store().put("mine", home()).unwrap();

        let mut op = FakeServer::player("Steve", 4);
        let out = plugin.dispatch(&mut op, "/rmwarp home").unwrap();
        assert_eq!(out, Some(Feedback::broadcast("Deleted warp home")));

        let text = std::fs::read_to_string(tmp.path().join("warps.ini")).unwrap();
        assert!(!text.contains("home="));
        assert!(text.contains("mine="));

        let err = plugin.dispatch(&mut op, "/rmwarp home").unwrap_err();
        assert!(matches!(err, CommandError::Warp(WarpError::WarpNotFound(_))));
    }

    #[test]
    fn mkwarp_snaps_player_location() {
        let plugin = plugin();
        let mut op = FakeServer::player("Steve", 4);

        let out = plugin
            .dispatch(&mut op, "/mkwarp pos-block-center rot-45 spawn")
            .unwrap();
        assert_eq!(out, Some(Feedback::broadcast("Created warp spawn")));

        let warp = plugin.store().get("spawn").unwrap();
        assert_eq!(warp.dimension, DimensionId::overworld());
        assert_eq!(warp.position, DVec3::new(10.5, 64.3, -2.5));
        assert_eq!(warp.yaw, 90.0);
        assert_eq!(warp.pitch, 0.0);
    }

    #[test]
    fn mkwarp_from_console_has_zero_rotation() {
        let plugin = plugin();
        let mut console = FakeServer::console();
        plugin
            .dispatch(&mut console, "/mkwarp pos-exact rot-exact here")
            .unwrap();
        let warp = plugin.store().get("here").unwrap();
        assert_eq!(warp.position, DVec3::new(10.7, 64.3, -3.9));
        assert_eq!((warp.yaw, warp.pitch), (0.0, 0.0));
    }

    #[test]
    fn mkwarp_rejects_taken_name() {
        let plugin = plugin();
        plugin.store().put("spawn", home()).unwrap();
        let mut op = FakeServer::player("Steve", 4);

        let err = plugin
            .dispatch(&mut op, "/mkwarp pos-exact rot-exact spawn")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "That name is taken, use /rmwarp spawn first if you want to replace it"
        );
        assert_eq!(plugin.store().get("spawn"), Some(home()));
    }

    #[test]
    fn mkwarp_refuses_unsaveable_names() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = plugin();
        plugin.on_server_starting(tmp.path());
        let mut op = FakeServer::player("Steve", 4);

        for line in [
            "/mkwarp pos-exact rot-exact ;base",
            "/mkwarp pos-exact rot-exact a\nb",
            "/mkwarp pos-exact rot-exact a\rb",
        ] {
            let err = plugin.dispatch(&mut op, line).unwrap_err();
            assert!(
                matches!(err, CommandError::Warp(WarpError::InvalidName(_))),
                "{line:?}"
            );
        }
        assert!(plugin.store().list().is_empty());
        assert!(!tmp.path().join("warps.ini").exists());
    }

    #[test]
    fn suggestions() {
        let plugin = plugin();
        for name in ["home", "old home", "mine"] {
            plugin.store().put(name, home()).unwrap();
        }
        let player = FakeServer::player("Steve", 0);
        let op = FakeServer::player("Steve", 4);

        assert_eq!(plugin.suggest(&player, "/warp ho"), ["home", "old home"]);
        assert_eq!(plugin.suggest(&player, "/warp"), ["warp"]);
        assert_eq!(plugin.suggest(&op, "/warp"), ["warp", "warpother"]);
        assert!(plugin.suggest(&player, "/rmwarp ho").is_empty());
        assert_eq!(plugin.suggest(&op, "/rmwarp in"), ["mine"]);
        assert_eq!(plugin.suggest(&op, "/warpother Alex old"), ["old home"]);
        assert!(plugin.suggest(&op, "/warpother Al").is_empty());
        assert_eq!(
            plugin.suggest(&op, "/mkwarp pos-block"),
            ["pos-block-corner", "pos-block-center"]
        );
        assert_eq!(
            plugin.suggest(&op, "/mkwarp pos-exact rot-"),
            ["rot-exact", "rot-45", "rot-cardinal"]
        );
        assert!(plugin.suggest(&op, "/mkwarp pos-exact rot-exact ho").is_empty());
    }
}
