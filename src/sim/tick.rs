//! Simulation step
//!
//! Advances a world snapshot by one host frame and resolves contacts.

use super::actor::{Actor, ActorKind};
use super::collision::{collide, overlap};
use super::error::StepError;
use super::input::InputSnapshot;
use super::level::CellKind;
use super::state::{Status, WorldState};

/// Advance `state` by `dt` seconds.
///
/// Every actor moves against the previous snapshot. Then, while the world is
/// still playing, lava terrain under the player ends the run; otherwise each
/// actor overlapping the player applies its collision response. The first
/// response that ends the run stops the loop, so later contacts in the same
/// tick are ignored.
pub fn tick(state: &WorldState, input: &InputSnapshot, dt: f32) -> Result<WorldState, StepError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(StepError::InvalidDelta(dt));
    }
    if state.player().is_none() {
        return Err(StepError::MissingPlayer);
    }

    let actors: Vec<Actor> = state
        .actors()
        .iter()
        .map(|actor| actor.update(dt, state, input))
        .collect();
    let next = WorldState::new(state.level_handle(), actors, state.status());
    if !next.status().is_playing() {
        return Ok(next);
    }

    let Some(player) = next
        .actors()
        .iter()
        .find(|a| a.kind() == ActorKind::Player)
    else {
        return Err(StepError::MissingPlayer);
    };

    if next
        .level()
        .touches(player.pos(), player.size(), CellKind::Lava)
    {
        log::debug!(
            "Player touched lava at ({:.2}, {:.2})",
            player.pos().x,
            player.pos().y
        );
        return Ok(next.with_status(Status::Lost));
    }

    let mut running = next.clone();
    for actor in next.actors() {
        if actor.kind() == ActorKind::Player || !overlap(actor, player) {
            continue;
        }
        running = collide(actor, &running);
        if !running.status().is_playing() {
            break;
        }
    }

    if running.status() != state.status() {
        log::debug!(
            "World status {} -> {}",
            state.status().as_str(),
            running.status().as_str()
        );
    }
    log::trace!(
        "Tick dt={:.4} actors={} status={}",
        dt,
        running.actors().len(),
        running.status().as_str()
    );

    Ok(running)
}
