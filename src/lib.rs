pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod moves;
pub mod notify;
pub mod piece;
pub mod selection;
pub mod snapshot;
pub mod special_moves;
pub mod square;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use error::Error;
pub use game::Game;
