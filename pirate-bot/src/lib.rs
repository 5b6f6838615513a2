//! # pirate-bot
//!
//! Telegram front end for the pirate bot: CLI, env config, adapters from teloxide types
//! to core types, [`bot_core::Bot`] implementation, and the REPL runner that wires the
//! gateway, command handlers, and router together.

mod adapters;
mod bot_adapter;
mod cli;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use runner::{build_router, run_bot};
