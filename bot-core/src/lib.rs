//! # bot-core
//!
//! Core types and traits for the pirate bot: [`Bot`], [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by bot-router, command-handlers,
//! and pirate-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
