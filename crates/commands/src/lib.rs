//! Warp commands: `/warp`, `/warpother`, `/rmwarp` and `/mkwarp`.
//!
//! The host server implements [`CommandSource`] and forwards command lines
//! and the server-starting event to a [`WarpPlugin`].
//!
//! # Invariants
//! - Permission is checked before arguments are validated.
//! - A failed command never mutates the store.

pub mod command;
pub mod config;
pub mod plugin;
pub mod source;

pub use command::{CommandError, CommandKind, WarpCommand};
pub use config::{ConfigError, WarpConfig};
pub use plugin::{WarpPlugin, snapped_position};
pub use source::{CommandSource, Feedback};
