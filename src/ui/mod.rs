pub mod app;
pub mod command;
pub mod render;

pub use app::{Effect, Session, Theme};
pub use command::{Command, CommandError};
pub use render::{render, HELP_TEXT};
