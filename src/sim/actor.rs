//! Actors and their per-tick motion
//!
//! Four closed variants. Each one is a plain record plus a pure `update`
//! that returns the actor's next version; nothing is mutated in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::input::InputSnapshot;
use super::level::{CellKind, GridLevel};
use super::state::WorldState;
use crate::consts::*;

/// Actor kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Hazard,
    Collectible,
    Chaser,
}

impl ActorKind {
    /// Box extent, fixed per kind
    pub const fn size(self) -> Vec2 {
        match self {
            ActorKind::Player => Vec2::new(0.8, 1.5),
            ActorKind::Hazard => Vec2::new(1.0, 1.0),
            ActorKind::Collectible => Vec2::new(0.6, 0.6),
            ActorKind::Chaser => Vec2::new(1.2, 2.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Player => "player",
            ActorKind::Hazard => "hazard",
            ActorKind::Collectible => "collectible",
            ActorKind::Chaser => "chaser",
        }
    }
}

/// The controllable agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    /// Current velocity (cells/s)
    pub speed: Vec2,
}

impl Player {
    pub const SIZE: Vec2 = ActorKind::Player.size();

    pub fn new(id: u32, pos: Vec2, speed: Vec2) -> Self {
        Self { id, pos, speed }
    }

    /// Player standing in the plan cell with top-left `cell`
    pub fn spawn(id: u32, cell: Vec2) -> Self {
        Self::new(id, cell + Vec2::new(0.0, -0.5), Vec2::ZERO)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    /// Walk, fall and jump. The x axis resolves before y; each axis is
    /// blocked on its own.
    pub fn update(&self, dt: f32, level: &GridLevel, input: &InputSnapshot) -> Self {
        let x_speed = input.horizontal() * PLAYER_X_SPEED;
        let mut pos = self.pos;

        let moved_x = pos + Vec2::new(x_speed * dt, 0.0);
        if !level.touches(moved_x, Self::SIZE, CellKind::Wall) {
            pos = moved_x;
        }

        let mut y_speed = self.speed.y + dt * GRAVITY;
        let moved_y = pos + Vec2::new(0.0, y_speed * dt);
        if !level.touches(moved_y, Self::SIZE, CellKind::Wall) {
            pos = moved_y;
        } else if input.up && y_speed > 0.0 {
            y_speed = -JUMP_SPEED;
        } else {
            y_speed = 0.0;
        }

        Self::new(self.id, pos, Vec2::new(x_speed, y_speed))
    }
}

/// Moving lava blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub speed: Vec2,
    /// Drip origin. `None` means the hazard bounces instead.
    pub reset: Option<Vec2>,
}

impl Hazard {
    pub const SIZE: Vec2 = ActorKind::Hazard.size();

    /// Hazard that reverses when it hits a wall
    pub fn bouncing(id: u32, pos: Vec2, speed: Vec2) -> Self {
        Self {
            id,
            pos,
            speed,
            reset: None,
        }
    }

    /// Hazard that jumps back to `pos` when it hits a wall
    pub fn dripping(id: u32, pos: Vec2, speed: Vec2) -> Self {
        Self {
            id,
            pos,
            speed,
            reset: Some(pos),
        }
    }

    pub fn is_dripping(&self) -> bool {
        self.reset.is_some()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    pub fn update(&self, dt: f32, level: &GridLevel) -> Self {
        let new_pos = self.pos + self.speed * dt;
        if !level.touches(new_pos, Self::SIZE, CellKind::Wall) {
            Self {
                pos: new_pos,
                ..self.clone()
            }
        } else if let Some(reset) = self.reset {
            Self {
                pos: reset,
                ..self.clone()
            }
        } else {
            Self {
                speed: -self.speed,
                ..self.clone()
            }
        }
    }
}

/// Wobbling coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    /// Rest position; `pos` oscillates vertically around it
    pub base: Vec2,
    /// Oscillation angle (radians)
    pub phase: f32,
}

impl Collectible {
    pub const SIZE: Vec2 = ActorKind::Collectible.size();

    pub fn new(id: u32, base: Vec2, phase: f32) -> Self {
        Self {
            id,
            pos: base + wobble_offset(phase),
            base,
            phase,
        }
    }

    /// Coin in the plan cell with top-left `cell`
    pub fn spawn(id: u32, cell: Vec2, phase: f32) -> Self {
        Self::new(id, cell + Vec2::new(0.2, 0.1), phase)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    pub fn update(&self, dt: f32) -> Self {
        Self::new(self.id, self.base, self.phase + dt * WOBBLE_SPEED)
    }
}

#[inline]
fn wobble_offset(phase: f32) -> Vec2 {
    Vec2::new(0.0, phase.sin() * WOBBLE_DIST)
}

/// Monster that walks toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chaser {
    pub id: u32,
    pub pos: Vec2,
}

impl Chaser {
    pub const SIZE: Vec2 = ActorKind::Chaser.size();

    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos }
    }

    /// Chaser standing on the floor of the plan cell with top-left `cell`
    pub fn spawn(id: u32, cell: Vec2) -> Self {
        Self::new(id, cell + Vec2::new(0.0, -1.0))
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    /// Step horizontally toward `target_x`. Walls stop it for the tick.
    pub fn update(&self, dt: f32, level: &GridLevel, target_x: f32) -> Self {
        let dir = if target_x < self.pos.x { -1.0 } else { 1.0 };
        let new_pos = Vec2::new(self.pos.x + dir * CHASER_SPEED * dt, self.pos.y);
        if level.touches(new_pos, Self::SIZE, CellKind::Wall) {
            self.clone()
        } else {
            Self::new(self.id, new_pos)
        }
    }
}

/// Any dynamic entity in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    Player(Player),
    Hazard(Hazard),
    Collectible(Collectible),
    Chaser(Chaser),
}

impl Actor {
    pub fn id(&self) -> u32 {
        match self {
            Actor::Player(p) => p.id,
            Actor::Hazard(h) => h.id,
            Actor::Collectible(c) => c.id,
            Actor::Chaser(m) => m.id,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Player(_) => ActorKind::Player,
            Actor::Hazard(_) => ActorKind::Hazard,
            Actor::Collectible(_) => ActorKind::Collectible,
            Actor::Chaser(_) => ActorKind::Chaser,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Actor::Player(p) => p.pos,
            Actor::Hazard(h) => h.pos,
            Actor::Collectible(c) => c.pos,
            Actor::Chaser(m) => m.pos,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.kind().size()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos(), self.size())
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Actor::Player(p) => Some(p),
            _ => None,
        }
    }

    /// Advance one tick against the previous world state. Only the player reads `input`.
    pub fn update(&self, dt: f32, state: &WorldState, input: &InputSnapshot) -> Actor {
        let level = state.level();
        match self {
            Actor::Player(p) => Actor::Player(p.update(dt, level, input)),
            Actor::Hazard(h) => Actor::Hazard(h.update(dt, level)),
            Actor::Collectible(c) => Actor::Collectible(c.update(dt)),
            Actor::Chaser(m) => match state.player() {
                Some(player) => Actor::Chaser(m.update(dt, level, player.pos.x)),
                None => self.clone(),
            },
        }
    }
}
