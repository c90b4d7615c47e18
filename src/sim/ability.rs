//! Ability effects
//!
//! At most one ability is active. Collecting a pickup replaces whatever was
//! active, and player speed is always re-derived from the active ability so
//! it cannot drift.

use glam::Vec2;

use super::state::{AbilityKind, ActiveAbility, GameEvent, GameState, Projectile};

/// Make `kind` the active ability, replacing any previous one
pub fn grant(state: &mut GameState, kind: AbilityKind, events: &mut Vec<GameEvent>) {
    state.ability = Some(ActiveAbility {
        kind,
        remaining_ticks: kind.duration_ticks(&state.tuning),
        granted_tick: state.time_ticks,
    });
    apply_speed(state);
    log::info!("Ability collected: {}", kind.as_str());
    events.push(GameEvent::AbilityCollected { kind });
}

/// Clear the active ability and restore base speed
pub fn clear(state: &mut GameState) {
    state.ability = None;
    apply_speed(state);
}

/// Player speed for the current ability
pub fn apply_speed(state: &mut GameState) {
    let player = &mut state.player;
    player.speed = match state.ability.map(|a| a.kind) {
        Some(AbilityKind::Speed) => player.base_speed * state.tuning.speed_boost,
        _ => player.base_speed,
    };
}

/// Handle a fire input. With the gun armed this launches a projectile from the
/// player's top-center and consumes the gun; otherwise it does nothing.
pub fn fire(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.active_ability_kind() != Some(AbilityKind::Gun) {
        return false;
    }

    let id = state.next_entity_id();
    let player = &state.player;
    state.projectiles.push(Projectile {
        id,
        pos: Vec2::new(player.pos.x + player.width / 2.0, player.pos.y),
        speed: state.tuning.projectile_speed,
    });
    clear(state);
    log::debug!("Projectile {} fired", id);
    events.push(GameEvent::ProjectileFired { id });
    true
}

/// Count the active ability down by one tick, expiring it at zero.
/// Abilities granted during this tick are not counted down yet.
pub fn countdown(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(ability) = state.ability.as_mut() else {
        return;
    };
    if ability.granted_tick == state.time_ticks {
        return;
    }
    let Some(remaining) = ability.remaining_ticks.as_mut() else {
        return;
    };

    *remaining = remaining.saturating_sub(1);
    if *remaining == 0 {
        let kind = ability.kind;
        clear(state);
        log::debug!("Ability expired: {}", kind.as_str());
        events.push(GameEvent::AbilityExpired { kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_doubles_and_reverts() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();

        grant(&mut state, AbilityKind::Speed, &mut events);
        assert_eq!(state.player.speed, 6.0);

        for _ in 0..599 {
            state.time_ticks += 1;
            countdown(&mut state, &mut events);
        }
        assert_eq!(state.player.speed, 6.0);

        state.time_ticks += 1;
        countdown(&mut state, &mut events);
        assert_eq!(state.player.speed, 3.0);
        assert!(state.ability.is_none());
        assert!(events.contains(&GameEvent::AbilityExpired {
            kind: AbilityKind::Speed
        }));
    }

    #[test]
    fn test_not_counted_down_on_grant_tick() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grant(&mut state, AbilityKind::Shield, &mut events);
        countdown(&mut state, &mut events);
        assert_eq!(state.ability.and_then(|a| a.remaining_ticks), Some(300));
    }

    #[test]
    fn test_new_pickup_replaces_old() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grant(&mut state, AbilityKind::Speed, &mut events);
        grant(&mut state, AbilityKind::Shield, &mut events);
        assert_eq!(state.active_ability_kind(), Some(AbilityKind::Shield));
        assert_eq!(state.player.speed, state.player.base_speed);
    }

    #[test]
    fn test_gun_never_expires_by_time() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grant(&mut state, AbilityKind::Gun, &mut events);
        for _ in 0..10_000 {
            state.time_ticks += 1;
            countdown(&mut state, &mut events);
        }
        assert_eq!(state.active_ability_kind(), Some(AbilityKind::Gun));
    }

    #[test]
    fn test_fire_consumes_gun() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grant(&mut state, AbilityKind::Gun, &mut events);

        assert!(fire(&mut state, &mut events));
        assert!(state.ability.is_none());
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec2::new(300.0, 740.0));
        assert_eq!(p.speed, 8.0);

        assert!(!fire(&mut state, &mut events));
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_fire_without_gun_does_nothing() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grant(&mut state, AbilityKind::Shield, &mut events);
        assert!(!fire(&mut state, &mut events));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.active_ability_kind(), Some(AbilityKind::Shield));
    }
}
