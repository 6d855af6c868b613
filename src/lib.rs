// Tick-driven maze chase: one runner, four hunters, a fixed maze.

pub mod components;
pub mod config;
pub mod game;
pub mod ghost;
pub mod level;
pub mod mode;
pub mod pathfinding;
pub mod player;
pub mod render;

pub use components::{Dir, Glyph, Pos, Tile};
pub use config::{ConfigError, RunSettings, SimConfig};
pub use game::Simulation;
pub use ghost::{Hunter, Personality};
pub use level::{Grid, Level, LevelError};
pub use mode::{Mode, Schedule};
pub use player::Runner;
