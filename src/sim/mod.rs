//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed update order within a tick (player, ghosts, projectiles, pickups,
//!   collisions, win check)
//! - Seeded RNG only, carried inside [`GameState`]
//! - Stable iteration order (entity vec order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod ghost;
pub mod grid;
pub mod maze;
pub mod movement;
pub mod state;
pub mod tick;

pub use ghost::choose_direction;
pub use grid::{Direction, manhattan};
pub use maze::{DEFAULT_MAZE, Maze, MazeError, Tile};
pub use movement::StepTimer;
pub use state::{
    GameEvent, GamePhase, GameState, Ghost, GhostColor, GhostMode, Pickup, Player, Projectile,
};
pub use tick::{TickInput, tick};
