//! Collision resolution
//!
//! Runs once per tick after all movement has settled, so every check sees the
//! same snapshot of positions. Grid collision is exact cell equality; there
//! are no hitboxes. Order matters: projectile hits resolve before player
//! contact, so a ghost defeated this tick cannot also cost a life.

use super::state::{GameEvent, GamePhase, GameState, GhostMode};

/// Resolve all entity contacts for the current tick.
pub fn resolve(state: &mut GameState) {
    resolve_projectile_hits(state);
    resolve_player_contact(state);
}

/// Each projectile defeats at most one ghost (first active ghost in spawn
/// order sharing its cell) and is consumed by the hit.
fn resolve_projectile_hits(state: &mut GameState) {
    let GameState {
        ghosts,
        projectiles,
        tuning,
        events,
        score,
        ..
    } = state;

    projectiles.retain(|projectile| {
        let hit = ghosts
            .iter_mut()
            .find(|ghost| ghost.is_active() && ghost.pos == projectile.pos);
        match hit {
            Some(ghost) => {
                ghost.defeat(tuning.ghost_respawn_delay);
                *score += tuning.ghost_points;
                events.push(GameEvent::GhostDefeated { color: ghost.color });
                false
            }
            None => true,
        }
    });
}

/// Player touching any active ghost costs one life. Multiple ghosts on the
/// player's cell in the same tick still cost exactly one.
fn resolve_player_contact(state: &mut GameState) {
    if state.player.is_invulnerable() {
        return;
    }
    let contact = state
        .ghosts
        .iter()
        .any(|ghost| ghost.is_active() && ghost.pos == state.player.pos);
    if !contact {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        return;
    }

    // Soft respawn: entities return to spawn, maze and score are untouched.
    state.player.pos = state.player.spawn;
    state.player.step.reset();
    state.player.invuln_remaining = state.tuning.invuln_duration;
    for ghost in &mut state.ghosts {
        ghost.pos = ghost.spawn;
        ghost.mode = GhostMode::Active;
        ghost.step.reset();
    }
}
