//! Maze Chase - a grid-maze chase arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, entities, AI, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, HUD and input binding are external collaborators: they feed
//! [`sim::TickInput`]s into [`sim::tick`] and read `&GameState` between ticks.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for external drivers (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Upper bound on a single frame delta; larger deltas are clamped so a
    /// stalled tab or debugger pause cannot produce a catch-up burst
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Exactly this many ghosts per session
    pub const GHOST_COUNT: usize = 4;

    /// Player speed in cells per second
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Ghost step interval range, sampled once per ghost at construction
    pub const GHOST_STEP_MIN: f32 = 0.160;
    pub const GHOST_STEP_MAX: f32 = 0.220;

    /// Power mode duration after collecting a pickup (seconds)
    pub const POWER_DURATION: f32 = 5.0;
    /// Invulnerability window granted after losing a life (seconds)
    pub const INVULN_DURATION: f32 = 1.0;
    /// How long a defeated ghost stays frozen at its spawn (seconds)
    pub const GHOST_RESPAWN_DELAY: f32 = 2.0;
    /// Seconds of power-mode time between projectile shots
    pub const FIRE_INTERVAL: f32 = 0.2;

    /// Pickup spawn delay range, re-sampled once per spawn cycle (seconds)
    pub const PICKUP_DELAY_MIN: f32 = 8.0;
    pub const PICKUP_DELAY_MAX: f32 = 15.0;
    /// Bounded retry count for pickup placement sampling
    pub const PICKUP_SAMPLE_ATTEMPTS: u32 = 20;

    /// Scoring
    pub const PELLET_POINTS: u64 = 10;
    pub const PICKUP_POINTS: u64 = 50;
    pub const GHOST_POINTS: u64 = 50;

    pub const STARTING_LIVES: u8 = 3;

    /// Mouth animation speed (radians per second, cosmetic only)
    pub const ANIM_RATE: f32 = 6.0;
}
