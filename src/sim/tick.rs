//! Fixed-order tick pipeline
//!
//! One call advances the whole simulation by `dt` seconds. The update order
//! is part of the determinism contract and never varies:
//! input, player, ghosts, projectiles, pickup spawner, collision, firing,
//! win check. Newly fired projectiles are inert until the next tick.

use std::f32::consts::TAU;

use glam::IVec2;
use rand::Rng;

use super::collision;
use super::ghost::{choose_direction, random_direction};
use super::grid::Direction;
use super::maze::Tile;
use super::state::{GameEvent, GamePhase, GameState, GhostMode, Pickup, Projectile};
use crate::consts::{ANIM_RATE, MAX_FRAME_DT};

/// Per-tick external input. All fields are edge signals sampled by the
/// caller; `Default` is "no input".
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested heading; becomes the queued turn
    pub direction: Option<Direction>,
    /// Begin a session from `Idle`
    pub start: bool,
    /// Restart after `GameOver` or `Won`
    pub reset: bool,
    /// Let the built-in pellet-seeking pilot steer (demo mode)
    pub autopilot: bool,
}

/// Advance the simulation by `dt` seconds.
///
/// `dt` is clamped to [`MAX_FRAME_DT`] so a stalled frame cannot teleport
/// entities; lost wall-clock time slows the simulation instead.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.events.clear();

    match state.phase {
        GamePhase::Idle => {
            if input.start || input.autopilot {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::GameOver | GamePhase::Won => {
            if input.reset {
                state.reset();
            }
            return;
        }
        GamePhase::Running => {}
    }

    if let Some(dir) = input.direction {
        state.player.queued_dir = dir;
    }
    if input.autopilot {
        let dir = autopilot_direction(state);
        state.player.queued_dir = dir;
    }

    state.time_ticks += 1;

    update_player(state, dt);
    update_ghosts(state, dt);
    update_projectiles(state);
    update_pickup_spawner(state, dt);
    collision::resolve(state);
    fire_projectiles(state, dt);

    if state.phase == GamePhase::Running && state.pellets_eaten == state.maze.total_pellets() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
    }
}

/// Continuous movement with a queued turn: the requested direction is
/// adopted the moment it becomes walkable, otherwise the current heading is
/// kept. Pellets and the pickup are consumed per discrete step.
fn update_player(state: &mut GameState, dt: f32) {
    let GameState {
        player,
        maze,
        tuning,
        events,
        score,
        pellets_eaten,
        pickup,
        ..
    } = state;

    // Adopt the queued turn once per tick so facing (and therefore aim)
    // updates even on ticks with no step due, and again before every step so
    // multi-step frames corner correctly.
    if maze.is_walkable(player.pos + player.queued_dir.offset()) {
        player.dir = player.queued_dir;
    }
    let steps = player.step.advance(dt);
    for _ in 0..steps {
        if maze.is_walkable(player.pos + player.queued_dir.offset()) {
            player.dir = player.queued_dir;
        }
        let next = player.pos + player.dir.offset();
        if !maze.is_walkable(next) {
            break;
        }
        player.pos = next;

        if maze.eat_pellet(player.pos) {
            *score += tuning.pellet_points;
            *pellets_eaten += 1;
            events.push(GameEvent::PelletEaten { pos: player.pos });
        }
        if pickup.is_some_and(|p| p.pos == player.pos) {
            *pickup = None;
            *score += tuning.pickup_points;
            player.power_remaining = tuning.power_duration;
            events.push(GameEvent::PickupCollected { pos: player.pos });
        }
    }

    player.invuln_remaining = (player.invuln_remaining - dt).max(0.0);
    if player.is_powered() {
        player.power_remaining -= dt;
        if player.power_remaining <= 0.0 {
            player.power_remaining = 0.0;
            player.fire_timer = 0.0;
        }
    }
    player.anim_phase = (player.anim_phase + ANIM_RATE * dt) % TAU;
}

/// Respawning ghosts count down frozen at their spawn cell; active ghosts
/// step on their own cadence, re-picking a heading before every step.
fn update_ghosts(state: &mut GameState, dt: f32) {
    let GameState {
        ghosts,
        maze,
        player,
        rng,
        ..
    } = state;

    for ghost in ghosts.iter_mut() {
        match ghost.mode {
            GhostMode::Respawning { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    ghost.mode = GhostMode::Active;
                    ghost.dir = random_direction(rng);
                    ghost.last_dir = ghost.dir;
                    ghost.step.reset();
                } else {
                    ghost.mode = GhostMode::Respawning { remaining };
                }
            }
            GhostMode::Active => {
                let steps = ghost.step.advance(dt);
                for _ in 0..steps {
                    let dir = choose_direction(ghost, maze, player.pos, rng);
                    ghost.dir = dir;
                    let next = ghost.pos + dir.offset();
                    if maze.is_walkable(next) {
                        ghost.pos = next;
                        ghost.last_dir = dir;
                    }
                }
            }
        }
    }
}

/// Projectiles advance one cell per tick and die against walls and bounds.
fn update_projectiles(state: &mut GameState) {
    let GameState {
        projectiles, maze, ..
    } = state;
    projectiles.retain_mut(|projectile| {
        let next = projectile.pos + projectile.dir.offset();
        if maze.is_walkable(next) {
            projectile.pos = next;
            true
        } else {
            false
        }
    });
}

/// At most one pickup exists. While absent, a timer runs toward a randomized
/// threshold; on expiry a bounded number of uniform cells are sampled and the
/// first walkable non-player cell gets the pickup. All attempts failing
/// simply restarts the cycle.
fn update_pickup_spawner(state: &mut GameState, dt: f32) {
    if state.pickup.is_some() {
        return;
    }
    state.pickup_timer += dt;
    if state.pickup_timer < state.pickup_delay {
        return;
    }
    state.pickup_timer = 0.0;
    state.pickup_delay = state
        .rng
        .random_range(state.tuning.pickup_delay_min..=state.tuning.pickup_delay_max);

    for _ in 0..state.tuning.pickup_sample_attempts {
        let pos = IVec2::new(
            state.rng.random_range(0..state.maze.width()),
            state.rng.random_range(0..state.maze.height()),
        );
        if state.maze.is_walkable(pos) && pos != state.player.pos {
            state.pickup = Some(Pickup { pos });
            state.events.push(GameEvent::PickupSpawned { pos });
            return;
        }
    }
}

/// While powered the player fires automatically on a fixed cadence. The
/// projectile appears one cell ahead and first moves on the next tick, so it
/// cannot hit anything in the tick that spawned it. A shot whose spawn cell
/// is not walkable is skipped (the cadence timer still resets), keeping
/// every live projectile on a walkable cell.
fn fire_projectiles(state: &mut GameState, dt: f32) {
    if !state.player.is_powered() {
        return;
    }
    state.player.fire_timer += dt;
    if state.player.fire_timer < state.tuning.fire_interval {
        return;
    }
    state.player.fire_timer = 0.0;

    let dir = state.player.dir;
    let pos = state.player.pos + dir.offset();
    if state.maze.is_walkable(pos) {
        state.projectiles.push(Projectile { pos, dir });
        state.events.push(GameEvent::ProjectileFired { pos });
    }
}

/// Demo steering: turn toward an adjacent pellet when one exists (never a
/// reversal), otherwise keep the current heading while it is open, otherwise
/// the first open non-reversing direction.
fn autopilot_direction(state: &GameState) -> Direction {
    let player = &state.player;
    let maze = &state.maze;
    let reverse = player.dir.opposite();

    for dir in Direction::ALL {
        if dir != reverse && maze.tile(player.pos + dir.offset()) == Some(Tile::Pellet) {
            return dir;
        }
    }
    if maze.is_walkable(player.pos + player.dir.offset()) {
        return player.dir;
    }
    for dir in Direction::ALL {
        if dir != reverse && maze.is_walkable(player.pos + dir.offset()) {
            return dir;
        }
    }
    reverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::maze::DEFAULT_MAZE;

    // A straight pellet corridor; ghosts are sealed in their own chamber so
    // the player can never be caught.
    const CORRIDOR: &str = "\
#########
#P..... #
#########
#G G G G#
#########";

    // Same layout without reachable pellets (the one pellet is sealed in
    // with the ghosts), so the session never ends on its own.
    const PEN: &str = "\
#########
#P      #
#########
#G G G.G#
#########";

    // An L-shaped corridor: right along the top row, then down at (4, 1).
    // The pellet and the ghosts are sealed off.
    const ELBOW: &str = "\
######
#P   #
#### #
##.# #
#### #
#GG# #
#GG# #
######";

    fn start(template: &str, seed: u64) -> GameState {
        let mut state = GameState::new(template, seed).unwrap();
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: u32) {
        for _ in 0..ticks {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_idle_until_start() {
        let mut state = GameState::new(DEFAULT_MAZE, 1).unwrap();
        let spawn = state.player.pos;
        run(&mut state, &TickInput::default(), 30);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.pos, spawn);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_eating_every_pellet_wins() {
        let mut state = start(CORRIDOR, 9);
        assert_eq!(state.maze.total_pellets(), 5);
        // Player heads right by default; two seconds is plenty for five cells
        // at six cells per second.
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.pellets_eaten, 5);
        assert_eq!(state.score, 50);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_won_is_terminal_until_reset() {
        let mut state = start(CORRIDOR, 9);
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.phase, GamePhase::Won);
        let ticks = state.time_ticks;
        run(&mut state, &TickInput::default(), 30);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.time_ticks, ticks);

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..TickInput::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.maze.total_pellets(), 5);
    }

    #[test]
    fn test_wall_stops_player() {
        let mut state = start(PEN, 9);
        // Corridor ends at x=7; the player coasts there and stays.
        run(&mut state, &TickInput::default(), 300);
        assert_eq!(state.player.pos, IVec2::new(7, 1));
    }

    #[test]
    fn test_queued_turn_waits_for_an_opening() {
        let mut state = start(PEN, 9);
        // Down is walled along the whole corridor: the queued turn never
        // applies and the player keeps heading right.
        let input = TickInput {
            direction: Some(Direction::Down),
            ..TickInput::default()
        };
        run(&mut state, &input, 60);
        assert_eq!(state.player.pos.y, 1);
        assert_eq!(state.player.dir, Direction::Right);
        assert_eq!(state.player.queued_dir, Direction::Down);
    }

    #[test]
    fn test_ghost_contact_costs_a_life_and_grants_invulnerability() {
        let mut state = start(PEN, 9);
        state.ghosts[0].pos = state.player.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, 2);
        assert!(state.player.is_invulnerable());
        assert_eq!(state.player.pos, state.player.spawn);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::LifeLost { remaining: 2 })));
    }

    #[test]
    fn test_losing_last_life_freezes_the_session() {
        let mut state = start(PEN, 9);
        state.lives = 1;
        state.ghosts[0].pos = state.player.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.player.pos;
        let input = TickInput {
            direction: Some(Direction::Right),
            ..TickInput::default()
        };
        run(&mut state, &input, 60);
        assert_eq!(state.player.pos, frozen);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_pickup_collection_powers_up() {
        let mut state = start(PEN, 9);
        state.pickup = Some(Pickup {
            pos: IVec2::new(3, 1),
        });
        // Two cells to the right at six cells per second.
        run(&mut state, &TickInput::default(), 30);

        assert_eq!(state.pickup, None);
        assert_eq!(state.score, state.tuning.pickup_points);
        assert!(state.player.is_powered());
        assert!(state.player.power_remaining > 4.0);
    }

    #[test]
    fn test_powered_player_fires_on_cadence() {
        let mut state = start(PEN, 9);
        state.player.power_remaining = state.tuning.power_duration;
        // 0.5s: cadence 0.2s yields two shots.
        let mut fired = 0;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            fired += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ProjectileFired { .. }))
                .count();
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_blocked_powered_player_holds_fire() {
        let mut state = start(PEN, 9);
        // Coast to the east wall, then stay powered while facing it.
        run(&mut state, &TickInput::default(), 300);
        assert_eq!(state.player.pos, IVec2::new(7, 1));
        state.player.power_remaining = 30.0;

        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(!state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileFired { .. })));
            for projectile in &state.projectiles {
                assert!(state.maze.is_walkable(projectile.pos));
            }
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_turn_request_updates_facing_between_steps() {
        let mut state = start(ELBOW, 9);
        // Coast into the corner.
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.player.pos, IVec2::new(4, 1));
        assert_eq!(state.player.dir, Direction::Right);

        // A walkable turn request changes facing on the tick it arrives,
        // even though no step is due yet.
        state.player.step.reset();
        let input = TickInput {
            direction: Some(Direction::Down),
            ..TickInput::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.dir, Direction::Down);
        assert_eq!(state.player.pos, IVec2::new(4, 1));
    }

    #[test]
    fn test_power_expires() {
        let mut state = start(PEN, 9);
        state.player.power_remaining = 0.3;
        run(&mut state, &TickInput::default(), 30);
        assert!(!state.player.is_powered());
        assert_eq!(state.player.fire_timer, 0.0);
    }

    #[test]
    fn test_projectile_dies_at_the_wall() {
        let mut state = start(PEN, 9);
        state.projectiles.push(Projectile {
            pos: IVec2::new(5, 1),
            dir: Direction::Right,
        });
        // Two cells to the wall at one cell per tick, then gone.
        run(&mut state, &TickInput::default(), 3);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_defeated_ghost_returns_after_the_delay() {
        let mut state = start(PEN, 9);
        state.ghosts[0].defeat(state.tuning.ghost_respawn_delay);
        let spawn = state.ghosts[0].spawn;

        // Still frozen short of the two-second delay.
        run(&mut state, &TickInput::default(), 115);
        assert!(!state.ghosts[0].is_active());
        assert_eq!(state.ghosts[0].pos, spawn);

        run(&mut state, &TickInput::default(), 10);
        assert!(state.ghosts[0].is_active());
        assert_eq!(state.ghosts[0].pos, spawn);
    }

    #[test]
    fn test_pickup_spawns_on_walkable_cell_after_delay() {
        let mut state = start(PEN, 9);
        // 32 seconds covers the 8-15s delay range twice over, enough even if
        // one sampling cycle finds no free cell.
        run(&mut state, &TickInput::default(), 1920);
        let pickup = state.pickup.expect("pickup should have spawned");
        assert!(state.maze.is_walkable(pickup.pos));
        assert_ne!(pickup.pos, state.player.pos);
    }

    #[test]
    fn test_oversized_dt_is_clamped() {
        let mut state = start(PEN, 9);
        let before = state.player.pos;
        // 10 simulated seconds in one call would cross the whole corridor;
        // clamped to 50ms it is not even one step.
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_ghosts_stay_on_walkable_cells() {
        let mut state = start(DEFAULT_MAZE, 4);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            for ghost in &state.ghosts {
                assert!(state.maze.is_walkable(ghost.pos));
            }
        }
    }

    #[test]
    fn test_autopilot_starts_and_eats() {
        let mut state = GameState::new(CORRIDOR, 2).unwrap();
        let input = TickInput {
            autopilot: true,
            ..TickInput::default()
        };
        run(&mut state, &input, 240);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let mut a = start(DEFAULT_MAZE, 77);
        let mut b = start(DEFAULT_MAZE, 77);
        let input = TickInput {
            direction: Some(Direction::Down),
            ..TickInput::default()
        };
        run(&mut a, &input, 300);
        run(&mut b, &input, 300);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
