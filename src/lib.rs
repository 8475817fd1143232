// Library exports for the multiplayer chess AI
// This allows the server, the replay tool and the tests to share the engine

#[macro_use]
extern crate rocket;

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod eval;
pub mod handler;
pub mod movegen;
pub mod replay;
pub mod search;
pub mod simulator;
pub mod types;
