//! Command implementations for the NBA Intel CLI

pub mod averages;
pub mod common;
pub mod defense;
pub mod history;
pub mod outlook;
pub mod predict;
pub mod roster;
pub mod teams;

pub use common::{resolve_player, CommandContext};
