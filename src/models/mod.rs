//! Core data models: games, draws and frequency ratios.

mod draw;
mod game;
mod ids;
mod ratio;

pub use draw::*;
pub use game::*;
pub use ids::*;
pub use ratio::*;
