//! Actor overlap and collision response
//!
//! When an actor's box overlaps the player's, the actor's kind decides what
//! happens to the world: hazards end the run, collectibles are picked up,
//! chasers are either stomped or fatal.

use super::actor::{Actor, Chaser, Collectible, Hazard, Player};
use super::state::{Status, WorldState};
use crate::consts::STOMP_TOLERANCE;

/// Strict box intersection between two actors. Symmetric.
pub fn overlap(a: &Actor, b: &Actor) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Apply `actor`'s response to touching the player
pub fn collide(actor: &Actor, state: &WorldState) -> WorldState {
    match actor {
        Actor::Player(_) => state.clone(),
        Actor::Hazard(h) => hazard_contact(h, state),
        Actor::Collectible(c) => collect(c, state),
        Actor::Chaser(m) => chaser_contact(m, state),
    }
}

fn hazard_contact(hazard: &Hazard, state: &WorldState) -> WorldState {
    log::debug!("Hazard {} hit the player", hazard.id);
    state.with_status(Status::Lost)
}

fn collect(coin: &Collectible, state: &WorldState) -> WorldState {
    let next = state.without_actor(coin.id);
    let remaining = next
        .actors()
        .iter()
        .any(|a| matches!(a, Actor::Collectible(_)));
    if remaining {
        next
    } else {
        log::debug!("Last collectible {} picked up", coin.id);
        next.with_status(Status::Won)
    }
}

fn chaser_contact(chaser: &Chaser, state: &WorldState) -> WorldState {
    let Some(player) = state.player() else {
        return state.clone();
    };
    if is_stomp(player, chaser) {
        log::debug!("Chaser {} stomped", chaser.id);
        state.without_actor(chaser.id)
    } else {
        log::debug!("Chaser {} caught the player", chaser.id);
        state.with_status(Status::Lost)
    }
}

/// Player's feet are above the chaser's head, give or take `STOMP_TOLERANCE`
fn is_stomp(player: &Player, chaser: &Chaser) -> bool {
    player.bounds().bottom() < chaser.bounds().top() + STOMP_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ActorKind;
    use crate::sim::level::GridLevel;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn world(actors: Vec<Actor>) -> WorldState {
        let level = GridLevel::parse("..........\n.@........\n..........\n##########").unwrap();
        WorldState::new(Arc::new(level), actors, Status::Playing)
    }

    fn player_at(x: f32, y: f32) -> Actor {
        Actor::Player(Player::new(1, Vec2::new(x, y), Vec2::ZERO))
    }

    #[test]
    fn test_overlap_open_edges() {
        let player = player_at(1.0, 0.5);
        // Sharing the player's bottom edge
        let below = Actor::Hazard(Hazard::bouncing(2, Vec2::new(1.0, 2.0), Vec2::ZERO));
        assert!(!overlap(&player, &below));
        // Sharing the player's left edge
        let left = Actor::Hazard(Hazard::bouncing(3, Vec2::new(0.0, 1.0), Vec2::ZERO));
        assert!(!overlap(&player, &left));

        let inside = Actor::Hazard(Hazard::bouncing(4, Vec2::new(1.0, 1.5), Vec2::ZERO));
        assert!(overlap(&player, &inside));
    }

    #[test]
    fn test_hazard_contact_loses() {
        let hazard = Actor::Hazard(Hazard::bouncing(2, Vec2::new(1.5, 1.0), Vec2::ZERO));
        let state = world(vec![player_at(1.0, 1.0), hazard.clone()]);
        let next = collide(&hazard, &state);
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.actors(), state.actors());
    }

    #[test]
    fn test_collect_last_coin_wins() {
        let coin = Actor::Collectible(Collectible::new(2, Vec2::new(1.2, 1.0), 0.0));
        let state = world(vec![player_at(1.0, 1.0), coin.clone()]);
        let next = collide(&coin, &state);
        assert_eq!(next.status(), Status::Won);
        assert_eq!(next.count(ActorKind::Collectible), 0);
        assert_eq!(next.actors().len(), 1);
    }

    #[test]
    fn test_collect_with_coins_left_keeps_playing() {
        let coin = Actor::Collectible(Collectible::new(2, Vec2::new(1.2, 1.0), 0.0));
        let other = Actor::Collectible(Collectible::new(3, Vec2::new(6.0, 1.0), 0.0));
        let state = world(vec![player_at(1.0, 1.0), coin.clone(), other]);
        let next = collide(&coin, &state);
        assert_eq!(next.status(), Status::Playing);
        let ids: Vec<u32> = next.actors().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_chaser_stomped_from_above() {
        // Player's feet 0.03 below the chaser's head
        let chaser = Actor::Chaser(Chaser::new(2, Vec2::new(1.0, 2.0)));
        let state = world(vec![player_at(1.2, 0.53), chaser.clone()]);
        assert!(overlap(&state.actors()[0], &chaser));

        let next = collide(&chaser, &state);
        assert_eq!(next.status(), Status::Playing);
        assert_eq!(next.count(ActorKind::Chaser), 0);
    }

    #[test]
    fn test_chaser_stomp_tolerance_is_exclusive() {
        let chaser = Actor::Chaser(Chaser::new(2, Vec2::new(1.0, 2.0)));
        // Feet exactly at the chaser's head plus the tolerance
        let feet = 2.0 + STOMP_TOLERANCE;
        let state = world(vec![player_at(1.2, feet - Player::SIZE.y), chaser.clone()]);
        assert_eq!(state.player().unwrap().bounds().bottom(), feet);
        assert!(overlap(&state.actors()[0], &chaser));

        let next = collide(&chaser, &state);
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.count(ActorKind::Chaser), 1);
    }

    #[test]
    fn test_chaser_from_the_side_loses() {
        let chaser = Actor::Chaser(Chaser::new(2, Vec2::new(1.5, 0.5)));
        let state = world(vec![player_at(1.0, 0.5), chaser.clone()]);
        let next = collide(&chaser, &state);
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.count(ActorKind::Chaser), 1);
    }

    #[test]
    fn test_player_collide_is_noop() {
        let player = player_at(1.0, 1.0);
        let state = world(vec![player.clone()]);
        let next = collide(&player, &state);
        assert_eq!(next.status(), Status::Playing);
        assert_eq!(next.actors(), state.actors());
    }

    fn any_actor() -> impl Strategy<Value = Actor> {
        let pos = (-20.0f32..20.0, -20.0f32..20.0).prop_map(|(x, y)| Vec2::new(x, y));
        (0u8..4, pos).prop_map(|(kind, pos)| match kind {
            0 => Actor::Player(Player::new(1, pos, Vec2::ZERO)),
            1 => Actor::Hazard(Hazard::bouncing(2, pos, Vec2::ZERO)),
            2 => Actor::Collectible(Collectible::new(3, pos, 0.0)),
            _ => Actor::Chaser(Chaser::new(4, pos)),
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in any_actor(), b in any_actor()) {
            prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
        }
    }
}
