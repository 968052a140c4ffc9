//! Grid snake: the simulation, its drawing contract, and the services the
//! window wires around it.

pub mod engine;
pub mod entity;
pub mod food;
pub mod grid;
pub mod input;
pub mod palette;
pub mod settings;
pub mod snake;
pub mod sound;
pub mod surface;

pub use engine::{GameEngine, GameEvent, GameState, HighScore, Input};
pub use food::Food;
pub use grid::{Direction, GridSize, Position};
pub use snake::{Segment, Snake};
