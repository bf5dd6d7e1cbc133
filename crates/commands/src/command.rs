use qdwarp_common::{PositionSnap, RotationSnap, UnknownPolicy, WarpError, validate_name};

/// Errors surfaced to whoever ran a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("You do not have permission to use /{0}")]
    PermissionDenied(&'static str),
    #[error("A player is required to run this command here")]
    PlayerRequired,
    #[error("No player was found")]
    PlayerNotFound(String),
    #[error(transparent)]
    InvalidPolicy(#[from] UnknownPolicy),
    #[error(transparent)]
    Warp(#[from] WarpError),
}

/// The four registered command literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Warp,
    WarpOther,
    RemoveWarp,
    MakeWarp,
}

impl CommandKind {
    pub const ALL: [Self; 4] = [Self::Warp, Self::WarpOther, Self::RemoveWarp, Self::MakeWarp];

    pub fn literal(self) -> &'static str {
        match self {
            Self::Warp => "warp",
            Self::WarpOther => "warpother",
            Self::RemoveWarp => "rmwarp",
            Self::MakeWarp => "mkwarp",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Self::Warp => "/warp <name>",
            Self::WarpOther => "/warpother <player> <name>",
            Self::RemoveWarp => "/rmwarp <name>",
            Self::MakeWarp => {
                "/mkwarp pos-<exact|block-corner|block-center> rot-<exact|45|cardinal> <name>"
            }
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.literal() == s)
    }
}

/// A parsed warp command.
///
/// Names are greedy: everything after the preceding argument, spaces
/// included.
#[derive(Debug, Clone, PartialEq)]
pub enum WarpCommand {
    /// Teleport the invoking player.
    Warp { name: String },
    /// Teleport another player.
    WarpOther { player: String, name: String },
    RemoveWarp { name: String },
    /// Create a warp at the invoker's location.
    MakeWarp {
        position: PositionSnap,
        rotation: RotationSnap,
        name: String,
    },
}

impl WarpCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Warp { .. } => CommandKind::Warp,
            Self::WarpOther { .. } => CommandKind::WarpOther,
            Self::RemoveWarp { .. } => CommandKind::RemoveWarp,
            Self::MakeWarp { .. } => CommandKind::MakeWarp,
        }
    }

    /// Parse a full command line such as `/warp home`.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let (kind, args) = split_command(input)?;
        Self::parse_args(kind, args)
    }

    /// Parse the arguments following a command literal.
    pub fn parse_args(kind: CommandKind, args: &str) -> Result<Self, CommandError> {
        let usage = || CommandError::Usage(kind.usage());
        match kind {
            CommandKind::Warp => Ok(Self::Warp {
                name: greedy(args).ok_or_else(usage)?,
            }),
            CommandKind::RemoveWarp => Ok(Self::RemoveWarp {
                name: greedy(args).ok_or_else(usage)?,
            }),
            CommandKind::WarpOther => {
                let (player, rest) = args.split_once(' ').ok_or_else(usage)?;
                if player.is_empty() {
                    return Err(usage());
                }
                Ok(Self::WarpOther {
                    player: player.to_string(),
                    name: greedy(rest).ok_or_else(usage)?,
                })
            }
            CommandKind::MakeWarp => {
                let mut parts = args.splitn(3, ' ');
                let (Some(pos), Some(rot), Some(name)) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(usage());
                };
                let name = greedy(name).ok_or_else(usage)?;
                validate_name(&name)?;
                Ok(Self::MakeWarp {
                    position: pos.parse()?,
                    rotation: rot.parse()?,
                    name,
                })
            }
        }
    }
}

/// Strip an optional leading `/` and split off the command literal.
pub fn split_command(input: &str) -> Result<(CommandKind, &str), CommandError> {
    let line = input.strip_prefix('/').unwrap_or(input);
    let (literal, args) = line.split_once(' ').unwrap_or((line, ""));
    let kind = CommandKind::from_literal(literal)
        .ok_or_else(|| CommandError::UnknownCommand(literal.to_string()))?;
    Ok((kind, args))
}

fn greedy(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
