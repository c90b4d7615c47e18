//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::ability;
use super::behavior::step_hazard;
use super::spawn::{check_milestones, run_timed_spawns};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::FIELD_HEIGHT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire the gun (one-shot; the caller clears it after the tick)
    pub fire: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the events that happened during the tick. Once the session is
/// over this is a no-op until `GameState::restart`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    if input.fire {
        ability::fire(state, &mut events);
    }

    move_player(state, input);

    run_timed_spawns(state, dt, &mut events);

    let target = state.player.center();
    for hazard in state.hazards.iter_mut() {
        step_hazard(hazard, target, &state.tuning, &mut state.rng);
    }

    advance_projectiles(state, &mut events);

    if resolve_player_hits(state) {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {} (seed {})", state.score, state.seed);
        events.push(GameEvent::GameOver { score: state.score });
        return events;
    }

    award_dodges(state, &mut events);
    collect_pickups(state, &mut events);

    state.hazards.retain(|h| !h.has_exited());

    ability::countdown(state, &mut events);

    check_milestones(state, &mut events);
    state.baseline_speed = state.tuning.baseline_for_score(state.score);

    events
}

/// Apply directional input and clamp to the field
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= player.speed;
    }
    if input.right {
        delta.x += player.speed;
    }
    if input.up {
        delta.y -= player.speed;
    }
    if input.down {
        delta.y += player.speed;
    }
    player.pos += delta;
    player.clamp_to_field();
}

/// Move projectiles up; each destroys the first hazard its tip passed through.
/// The tip's path is measured relative to each hazard's own movement this
/// tick, so fast hazards cannot slip past a shot between ticks.
fn advance_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.projectiles.len() {
        let projectile = &mut state.projectiles[i];
        let start_y = projectile.pos.y;
        projectile.pos.y -= projectile.speed;
        let tip = projectile.pos;
        let projectile_id = projectile.id;

        let hit = state.hazards.iter().position(|h| {
            let swept_from = start_y + (h.pos.y - h.prev_pos.y);
            h.rect().crossed_vertically(tip.x, tip.y, swept_from)
        });
        if let Some(idx) = hit {
            let hazard = state.hazards.remove(idx);
            state.projectiles.remove(i);
            state.score += state.tuning.shot_reward;
            log::debug!("Projectile {} destroyed hazard {}", projectile_id, hazard.id);
            events.push(GameEvent::HazardShot {
                hazard_id: hazard.id,
                projectile_id,
            });
            continue;
        }

        if tip.y < 0.0 {
            state.projectiles.remove(i);
            continue;
        }
        i += 1;
    }
}

/// Check hazards against the player. Returns true on a lethal hit; shielded
/// contacts only mark the hazard as grazed.
fn resolve_player_hits(state: &mut GameState) -> bool {
    let player_rect = state.player.rect();
    let shielded = state.shield_active();

    for hazard in state.hazards.iter_mut() {
        if hazard.rect().overlaps(&player_rect) {
            if !shielded {
                return true;
            }
            hazard.grazed = true;
        }
    }
    false
}

/// One point per hazard, the first tick it is below the field
fn award_dodges(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for hazard in state.hazards.iter_mut() {
        if hazard.dodged || hazard.pos.y <= FIELD_HEIGHT {
            continue;
        }
        hazard.dodged = true;
        if !hazard.grazed {
            state.score += state.tuning.dodge_reward;
            events.push(GameEvent::Dodged { id: hazard.id });
        }
    }
}

/// Move pickups, collect the ones touching the player, drop the ones that left
fn collect_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();

    for pickup in state.pickups.iter_mut() {
        pickup.pos.y += pickup.speed_y;
    }
    state.pickups.retain(|p| {
        if p.rect().overlaps(&player_rect) {
            collected.push(p.kind);
            false
        } else {
            !p.has_exited()
        }
    });

    for kind in collected {
        ability::grant(state, kind, events);
    }
}
