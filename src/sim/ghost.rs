//! Ghost pursuit heuristic
//!
//! Greedy and myopic by design: each eligible step picks the neighboring cell
//! that minimizes Manhattan distance to the player, with no path planning.
//! Reversals are forbidden unless the current heading is blocked, and ties
//! among minimal-distance candidates resolve uniformly at random so pursuit
//! never becomes fully predictable.

use glam::IVec2;
use rand::Rng;

use super::grid::{Direction, manhattan};
use super::maze::Maze;
use super::state::Ghost;

/// Uniformly random direction (initial headings, dead ends).
pub fn random_direction<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Pick the ghost's next heading.
///
/// - Heading still open: keep it in a corridor; at an intersection, consider
///   every walkable direction except the reverse and take the one whose
///   target cell is Manhattan-closest to `target`.
/// - Heading blocked: reconsider all four directions, reverse included.
/// - Nothing walkable: a random direction (the caller's wall check will then
///   leave the ghost in place).
pub fn choose_direction<R: Rng>(
    ghost: &Ghost,
    maze: &Maze,
    target: IVec2,
    rng: &mut R,
) -> Direction {
    let pos = ghost.pos;

    if maze.is_walkable(pos + ghost.dir.offset()) {
        let reverse = ghost.dir.opposite();
        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| dir != reverse && maze.is_walkable(pos + dir.offset()))
            .collect();
        // More than one way forward means this is an intersection.
        if candidates.len() > 1 {
            return closest_candidate(&candidates, pos, target, rng);
        }
        return ghost.dir;
    }

    let open: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&dir| maze.is_walkable(pos + dir.offset()))
        .collect();
    if open.is_empty() {
        return random_direction(rng);
    }
    closest_candidate(&open, pos, target, rng)
}

/// Minimal-Manhattan-distance candidate; ties resolve uniformly among all
/// minimal candidates.
fn closest_candidate<R: Rng>(
    candidates: &[Direction],
    pos: IVec2,
    target: IVec2,
    rng: &mut R,
) -> Direction {
    let distance = |dir: &Direction| manhattan(pos + dir.offset(), target);
    let best = candidates.iter().map(distance).min().unwrap_or(0);
    let minimal: Vec<Direction> = candidates
        .iter()
        .copied()
        .filter(|dir| distance(dir) == best)
        .collect();
    if minimal.len() == 1 {
        minimal[0]
    } else {
        minimal[rng.random_range(0..minimal.len())]
    }
}
