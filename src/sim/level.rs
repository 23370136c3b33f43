//! Tile grid and level plan parsing
//!
//! A plan is a rectangular block of text, one character per cell:
//!
//! | char | meaning                         |
//! |------|---------------------------------|
//! | `.`  | empty                           |
//! | `#`  | wall                            |
//! | `+`  | lava tile                       |
//! | `@`  | player spawn                    |
//! | `o`  | collectible spawn               |
//! | `=`  | hazard moving horizontally      |
//! | `\|` | hazard moving vertically        |
//! | `v`  | dripping hazard                 |
//! | `M`  | chaser spawn                    |
//!
//! Spawn cells are recorded as empty terrain.

use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Chaser, Collectible, Hazard, Player};
use super::error::LevelFormatError;
use super::geom::Aabb;
use crate::consts::*;

/// Static terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Wall,
    Lava,
}

/// Actor spawn characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spawn {
    Player,
    Collectible,
    HazardHorizontal,
    HazardVertical,
    HazardDrip,
    Chaser,
}

impl Spawn {
    fn create(self, id: u32, cell: Vec2, rng: &mut Pcg32) -> Actor {
        match self {
            Spawn::Player => Actor::Player(Player::spawn(id, cell)),
            Spawn::Collectible => {
                let phase = rng.random_range(0.0..std::f32::consts::TAU);
                Actor::Collectible(Collectible::spawn(id, cell, phase))
            }
            Spawn::HazardHorizontal => Actor::Hazard(Hazard::bouncing(
                id,
                cell,
                Vec2::new(HAZARD_HORIZONTAL_SPEED, 0.0),
            )),
            Spawn::HazardVertical => Actor::Hazard(Hazard::bouncing(
                id,
                cell,
                Vec2::new(0.0, HAZARD_VERTICAL_SPEED),
            )),
            Spawn::HazardDrip => {
                Actor::Hazard(Hazard::dripping(id, cell, Vec2::new(0.0, HAZARD_DRIP_SPEED)))
            }
            Spawn::Chaser => Actor::Chaser(Chaser::spawn(id, cell)),
        }
    }
}

enum Tile {
    Terrain(CellKind),
    Spawn(Spawn),
}

fn legend(ch: char) -> Option<Tile> {
    let tile = match ch {
        '.' => Tile::Terrain(CellKind::Empty),
        '#' => Tile::Terrain(CellKind::Wall),
        '+' => Tile::Terrain(CellKind::Lava),
        '@' => Tile::Spawn(Spawn::Player),
        'o' => Tile::Spawn(Spawn::Collectible),
        '=' => Tile::Spawn(Spawn::HazardHorizontal),
        '|' => Tile::Spawn(Spawn::HazardVertical),
        'v' => Tile::Spawn(Spawn::HazardDrip),
        'M' => Tile::Spawn(Spawn::Chaser),
        _ => return None,
    };
    Some(tile)
}

/// Parsed level: terrain grid plus the actors it starts with
#[derive(Debug, Clone, PartialEq)]
pub struct GridLevel {
    width: usize,
    height: usize,
    rows: Vec<Vec<CellKind>>,
    start_actors: Vec<Actor>,
}

impl GridLevel {
    /// Parse a plan, seeding collectible phases with `DEFAULT_LEVEL_SEED`
    pub fn parse(plan: &str) -> Result<Self, LevelFormatError> {
        Self::parse_seeded(plan, DEFAULT_LEVEL_SEED)
    }

    /// Parse a plan with an explicit seed for collectible phases
    pub fn parse_seeded(plan: &str, seed: u64) -> Result<Self, LevelFormatError> {
        let lines: Vec<&str> = plan.trim().lines().collect();
        let Some(first) = lines.first() else {
            return Err(LevelFormatError::Empty);
        };
        let width = first.chars().count();

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut start_actors = Vec::new();
        let mut next_id = 1;
        let mut rows = Vec::with_capacity(lines.len());

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelFormatError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            let mut row = Vec::with_capacity(width);
            for (x, ch) in line.chars().enumerate() {
                match legend(ch) {
                    Some(Tile::Terrain(kind)) => row.push(kind),
                    Some(Tile::Spawn(spawn)) => {
                        let cell = Vec2::new(x as f32, y as f32);
                        start_actors.push(spawn.create(next_id, cell, &mut rng));
                        next_id += 1;
                        row.push(CellKind::Empty);
                    }
                    None => return Err(LevelFormatError::UnknownTile { ch, row: y, col: x }),
                }
            }
            rows.push(row);
        }

        let players = start_actors
            .iter()
            .filter(|a| a.kind() == ActorKind::Player)
            .count();
        match players {
            0 => return Err(LevelFormatError::MissingPlayer),
            1 => {}
            count => return Err(LevelFormatError::MultiplePlayers { count }),
        }

        log::debug!(
            "Parsed level {}x{} with {} actors",
            width,
            rows.len(),
            start_actors.len()
        );

        Ok(Self {
            width,
            height: rows.len(),
            rows,
            start_actors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.rows
    }

    /// Actors in plan order, ids starting at 1
    pub fn start_actors(&self) -> &[Actor] {
        &self.start_actors
    }

    /// Terrain at a cell; anything outside the grid is wall
    pub fn cell(&self, x: i64, y: i64) -> CellKind {
        self.cell_in_bounds(x, y).unwrap_or(CellKind::Wall)
    }

    fn cell_in_bounds(&self, x: i64, y: i64) -> Option<CellKind> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Whether the box `[pos, pos + size]` covers any cell of `kind`.
    ///
    /// Cells outside the grid are solid border and match every kind.
    pub fn touches(&self, pos: Vec2, size: Vec2, kind: CellKind) -> bool {
        let (xs, ys) = Aabb::new(pos, size).cell_span();
        for y in ys {
            for x in xs.clone() {
                match self.cell_in_bounds(x, y) {
                    None => return true,
                    Some(here) if here == kind => return true,
                    Some(_) => {}
                }
            }
        }
        false
    }
}

impl FromStr for GridLevel {
    type Err = LevelFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
