//! Game state and core simulation types
//!
//! Entities are pure data; all mutation happens inside [`crate::sim::tick`]
//! and the collision resolver. External collaborators (renderer, HUD) read
//! `&GameState` between ticks; a shared borrow is the read-only snapshot.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ghost::random_direction;
use super::grid::Direction;
use super::maze::{Maze, MazeError};
use super::movement::StepTimer;
use crate::tuning::Tuning;

/// Top-level session state.
///
/// `GameOver` and `Won` are terminal: only an explicit reset returns to
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Awaiting the start signal
    Idle,
    /// Active gameplay
    Running,
    /// All lives lost
    GameOver,
    /// Every pellet eaten
    Won,
}

/// Ghost identity, assigned in spawn scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostColor {
    Crimson,
    Pink,
    Cyan,
    Amber,
}

impl GhostColor {
    pub const ALL: [GhostColor; 4] = [
        GhostColor::Crimson,
        GhostColor::Pink,
        GhostColor::Cyan,
        GhostColor::Amber,
    ];
}

/// Ghost sub-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GhostMode {
    /// Moving and able to collide with the player
    Active,
    /// Frozen at the spawn cell after a projectile hit; ignores and is
    /// ignored by all collision checks until the countdown elapses
    Respawning { remaining: f32 },
}

/// The player-controlled agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub spawn: IVec2,
    pub dir: Direction,
    /// Turn request, adopted as soon as it becomes walkable
    pub queued_dir: Direction,
    pub step: StepTimer,
    /// Seconds of post-capture invulnerability left (0 = none)
    pub invuln_remaining: f32,
    /// Seconds of power mode left (0 = not powered)
    pub power_remaining: f32,
    /// Power-mode time banked toward the next projectile
    pub fire_timer: f32,
    /// Mouth animation phase, cosmetic only
    pub anim_phase: f32,
}

impl Player {
    fn new(spawn: IVec2, speed: f32) -> Self {
        Self {
            pos: spawn,
            spawn,
            dir: Direction::Right,
            queued_dir: Direction::Right,
            step: StepTimer::from_rate(speed),
            invuln_remaining: 0.0,
            power_remaining: 0.0,
            fire_timer: 0.0,
            anim_phase: 0.0,
        }
    }

    #[inline]
    pub fn is_powered(&self) -> bool {
        self.power_remaining > 0.0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_remaining > 0.0
    }
}

/// An autonomous pursuer. Four exist for the lifetime of a session; they are
/// reset, never destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub pos: IVec2,
    pub spawn: IVec2,
    pub color: GhostColor,
    pub dir: Direction,
    pub last_dir: Direction,
    /// Per-instance cadence, randomized once at construction
    pub step: StepTimer,
    pub mode: GhostMode,
}

impl Ghost {
    fn new<R: Rng>(spawn: IVec2, color: GhostColor, tuning: &Tuning, rng: &mut R) -> Self {
        let dir = random_direction(rng);
        let interval = rng.random_range(tuning.ghost_step_min..=tuning.ghost_step_max);
        Self {
            pos: spawn,
            spawn,
            color,
            dir,
            last_dir: dir,
            step: StepTimer::new(interval),
            mode: GhostMode::Active,
        }
    }

    /// Transition to Respawning: freeze at the spawn cell for `delay` seconds.
    pub fn defeat(&mut self, delay: f32) {
        self.pos = self.spawn;
        self.mode = GhostMode::Respawning { remaining: delay };
        self.step.reset();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.mode, GhostMode::Active)
    }
}

/// Short-lived offensive entity fired while powered up. One cell per tick,
/// fixed direction, no accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: IVec2,
    pub dir: Direction,
}

/// The single optional power pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: IVec2,
}

/// Edge-triggered notifications emitted during a tick, cleared at the start
/// of the next. HUD and audio consumers read these instead of diffing state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten { pos: IVec2 },
    PickupSpawned { pos: IVec2 },
    PickupCollected { pos: IVec2 },
    ProjectileFired { pos: IVec2 },
    GhostDefeated { color: GhostColor },
    LifeLost { remaining: u8 },
    GameOver,
    Won,
}

/// Complete session state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; reset reseeds the RNG from this
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub maze: Maze,
    pub player: Player,
    /// Stable order: spawn scan order, never reordered
    pub ghosts: Vec<Ghost>,
    pub projectiles: Vec<Projectile>,
    pub pickup: Option<Pickup>,
    /// Time accumulated while no pickup exists
    pub pickup_timer: f32,
    /// Current spawn threshold, re-sampled once per cycle
    pub pickup_delay: f32,
    pub score: u64,
    pub lives: u8,
    pub pellets_eaten: u32,
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a session from a maze template with default tuning.
    pub fn new(template: &str, seed: u64) -> Result<Self, MazeError> {
        Self::with_tuning(template, seed, Tuning::default())
    }

    /// Build a session with explicit tuning.
    pub fn with_tuning(template: &str, seed: u64, tuning: Tuning) -> Result<Self, MazeError> {
        let maze = Maze::parse(template)?;
        let lives = tuning.starting_lives;
        let player_speed = tuning.player_speed;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            player: Player::new(maze.player_spawn(), player_speed),
            maze,
            ghosts: Vec::new(),
            projectiles: Vec::new(),
            pickup: None,
            pickup_timer: 0.0,
            pickup_delay: 0.0,
            score: 0,
            lives,
            pellets_eaten: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.spawn_entities();
        Ok(state)
    }

    /// Atomically reinitialize the session: pristine maze, fresh entities,
    /// zeroed score and timers, RNG reseeded from the session seed. Identical
    /// to a fresh construction with the same template, seed and tuning.
    pub fn reset(&mut self) {
        self.maze.restore();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Idle;
        self.player = Player::new(self.maze.player_spawn(), self.tuning.player_speed);
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.pellets_eaten = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.spawn_entities();
    }

    /// (Re)create ghosts, clear projectiles and pickup, arm the pickup
    /// spawner. Draw order from the RNG is fixed so reset replays the exact
    /// construction sequence.
    fn spawn_entities(&mut self) {
        self.ghosts = self
            .maze
            .ghost_spawns()
            .into_iter()
            .zip(GhostColor::ALL)
            .map(|(spawn, color)| Ghost::new(spawn, color, &self.tuning, &mut self.rng))
            .collect();
        self.projectiles.clear();
        self.pickup = None;
        self.pickup_timer = 0.0;
        self.pickup_delay = self
            .rng
            .random_range(self.tuning.pickup_delay_min..=self.tuning.pickup_delay_max);
    }
}
