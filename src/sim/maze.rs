//! Static maze occupancy model
//!
//! Parsed once from a textual template at session start and fully restored on
//! restart. The only mutation after parsing is pellet consumption.
//!
//! Template glyphs: `#` wall, `.` pellet, space floor, `P` the single player
//! spawn, `G` one of exactly four ghost spawns. Spawn glyphs are cleared to
//! floor after their coordinates are recorded. Short rows are padded with
//! walls so every index inside `width x height` is defined.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GHOST_COUNT;

/// The maze the demo binary and tests run on (21 rows).
pub const DEFAULT_MAZE: &str = "\
#############################
#P ........ #.......... G   #
# ## ##### # ####### ## ### #
# #  #   # #       #  # #  G#
# # ## # # ### #### ## # ## #
#     #     #       #  #    #
### ### ### # ##### ## #### #
#   #   # # #   #     #     #
# ### # # # ### # ##### ### #
#   # # #       #     # #   #
### # # ### ##### ### # # # ##
#   #     #   #   #   # # # #
# ##### # # # # # # ### # # #
#       # # #     #       # #
####### # # ### ##### #######
#   #   # # #   #           #
# # # ### # # # # ########## #
# #   #   #     #            G
# ### # ### ##### ### ########
#  G  #     #   #     #      #
##############################";

/// One cell of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    Pellet,
}

/// Template validation failures. All of these fail fast at load time; there
/// are no recoverable parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze template is empty")]
    Empty,
    #[error("unknown glyph {glyph:?} at column {col}, row {row}")]
    UnknownGlyph { glyph: char, col: usize, row: usize },
    #[error("expected exactly 1 player spawn, found {0}")]
    PlayerSpawnCount(usize),
    #[error("expected exactly {GHOST_COUNT} ghost spawns, found {0}")]
    GhostSpawnCount(usize),
}

/// Fixed-size 2D occupancy grid with pellet accounting and spawn coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    /// Pristine copy taken at parse time, used by [`Maze::restore`].
    pristine: Vec<Tile>,
    pellet_total: u32,
    player_spawn: IVec2,
    ghost_spawns: [IVec2; GHOST_COUNT],
}

impl Maze {
    /// Parse and validate a template.
    pub fn parse(template: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = template
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        if rows.is_empty() || rows.iter().all(|row| row.is_empty()) {
            return Err(MazeError::Empty);
        }

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut pellet_total = 0u32;
        let mut player_spawns = Vec::new();
        let mut ghost_spawns = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let mut cols = 0;
            for (x, glyph) in row.chars().enumerate() {
                let tile = match glyph {
                    '#' => Tile::Wall,
                    '.' => {
                        pellet_total += 1;
                        Tile::Pellet
                    }
                    ' ' => Tile::Floor,
                    'P' => {
                        player_spawns.push(IVec2::new(x as i32, y as i32));
                        Tile::Floor
                    }
                    'G' => {
                        ghost_spawns.push(IVec2::new(x as i32, y as i32));
                        Tile::Floor
                    }
                    other => {
                        return Err(MazeError::UnknownGlyph {
                            glyph: other,
                            col: x,
                            row: y,
                        });
                    }
                };
                tiles.push(tile);
                cols += 1;
            }
            // Normalize ragged rows: pad with walls, same as out-of-bounds.
            tiles.resize(tiles.len() + (width - cols), Tile::Wall);
        }

        if player_spawns.len() != 1 {
            return Err(MazeError::PlayerSpawnCount(player_spawns.len()));
        }
        let ghost_count = ghost_spawns.len();
        let ghost_spawns: [IVec2; GHOST_COUNT] = ghost_spawns
            .try_into()
            .map_err(|_| MazeError::GhostSpawnCount(ghost_count))?;

        Ok(Self {
            width: width as i32,
            height: height as i32,
            pristine: tiles.clone(),
            tiles,
            pellet_total,
            player_spawn: player_spawns[0],
            ghost_spawns,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of pellet cells at parse time. Fixed for the maze's lifetime.
    pub fn total_pellets(&self) -> u32 {
        self.pellet_total
    }

    /// The single player spawn cell.
    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }

    /// The four ghost spawn cells, in template scan order.
    pub fn ghost_spawns(&self) -> [IVec2; GHOST_COUNT] {
        self.ghost_spawns
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Tile at `pos`, or `None` when out of bounds.
    #[inline]
    pub fn tile(&self, pos: IVec2) -> Option<Tile> {
        if self.in_bounds(pos) {
            Some(self.tiles[(pos.y * self.width + pos.x) as usize])
        } else {
            None
        }
    }

    /// False outside the grid or on a wall.
    #[inline]
    pub fn is_walkable(&self, pos: IVec2) -> bool {
        !matches!(self.tile(pos), None | Some(Tile::Wall))
    }

    /// Clear a pellet at `pos` to floor. Returns whether one was present.
    pub fn eat_pellet(&mut self, pos: IVec2) -> bool {
        if self.tile(pos) == Some(Tile::Pellet) {
            self.tiles[(pos.y * self.width + pos.x) as usize] = Tile::Floor;
            true
        } else {
            false
        }
    }

    /// Restore the pristine parsed grid (all pellets back).
    pub fn restore(&mut self) {
        self.tiles.copy_from_slice(&self.pristine);
    }

    /// Row-major tile slice for renderers.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
