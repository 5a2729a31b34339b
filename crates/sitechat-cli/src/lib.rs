// Library interface for sitechat-cli so integration tests can reach the
// command parser and transcript rendering.

#[path = "commands.rs"]
pub mod commands;

#[path = "render.rs"]
pub mod render;

pub use commands::{handle_command, CommandResult};
