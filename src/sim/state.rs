//! World snapshot
//!
//! A `WorldState` is never modified after construction. Every tick and every
//! collision response builds a new one that shares the same `GridLevel`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Player};
use super::error::StepError;
use super::input::InputSnapshot;
use super::level::GridLevel;
use super::tick::tick;

/// Outcome classification of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn is_playing(&self) -> bool {
        matches!(self, Status::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }
}

/// Immutable world snapshot
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    #[serde(skip)]
    level: Arc<GridLevel>,
    actors: Vec<Actor>,
    status: Status,
}

impl WorldState {
    /// First snapshot of a level
    pub fn start(level: Arc<GridLevel>) -> Self {
        let actors = level.start_actors().to_vec();
        Self::new(level, actors, Status::Playing)
    }

    pub fn new(level: Arc<GridLevel>, actors: Vec<Actor>, status: Status) -> Self {
        Self {
            level,
            actors,
            status,
        }
    }

    pub fn level(&self) -> &GridLevel {
        &self.level
    }

    /// Shared handle to the level, for building follow-up states
    pub fn level_handle(&self) -> Arc<GridLevel> {
        Arc::clone(&self.level)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn player(&self) -> Option<&Player> {
        self.actors.iter().find_map(Actor::as_player)
    }

    pub fn count(&self, kind: ActorKind) -> usize {
        self.actors.iter().filter(|a| a.kind() == kind).count()
    }

    /// Same actors, different status
    pub fn with_status(&self, status: Status) -> Self {
        Self::new(self.level_handle(), self.actors.clone(), status)
    }

    /// Same status, actor `id` removed
    pub fn without_actor(&self, id: u32) -> Self {
        let actors = self
            .actors
            .iter()
            .filter(|a| a.id() != id)
            .cloned()
            .collect();
        Self::new(self.level_handle(), actors, self.status)
    }

    /// Advance by `dt` seconds under `input`
    pub fn update(&self, dt: f32, input: &InputSnapshot) -> Result<WorldState, StepError> {
        tick(self, input, dt)
    }
}
