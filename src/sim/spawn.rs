//! Entity spawning
//!
//! Timed spawns run off accumulators advanced inside `tick`, so the spawn
//! schedule is part of the deterministic state instead of living in
//! independent timers. Milestone spawns are driven by score.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{AbilityKind, GameEvent, GameState, Hazard, HazardKind, Pickup};
use crate::consts::FIELD_WIDTH;
use crate::tuning::Tuning;

/// Time accumulated toward the next timed spawns (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnClock {
    pub hazard_elapsed: f32,
    pub ability_elapsed: f32,
}

impl SpawnClock {
    /// Advance both timers by `dt` and return how many hazards and pickups are due.
    /// Remainders carry over to the next call.
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> (u32, u32) {
        self.hazard_elapsed += dt;
        self.ability_elapsed += dt;

        let mut hazards = 0;
        while self.hazard_elapsed >= tuning.hazard_interval {
            self.hazard_elapsed -= tuning.hazard_interval;
            hazards += 1;
        }

        let mut pickups = 0;
        while self.ability_elapsed >= tuning.ability_interval {
            self.ability_elapsed -= tuning.ability_interval;
            pickups += 1;
        }

        (hazards, pickups)
    }
}

/// Map a uniform roll in [0, 1) to a hazard variant using the tuning cut points
pub fn pick_hazard_kind(roll: f32, tuning: &Tuning) -> HazardKind {
    if roll < tuning.chaser_cut {
        HazardKind::Chaser
    } else if roll < tuning.random_walk_cut {
        HazardKind::RandomWalk
    } else {
        HazardKind::Normal
    }
}

/// Horizontal position keeping an entity of width `size` on the field
fn random_x(rng: &mut Pcg32, size: f32) -> f32 {
    rng.random::<f32>() * (FIELD_WIDTH - size).max(0.0)
}

/// Random-walk drift: magnitude in [0, max) with a random sign
pub fn random_drift(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let magnitude = rng.random::<f32>() * tuning.walk_max_speed_x;
    if rng.random_bool(0.5) { -magnitude } else { magnitude }
}

/// Ticks to hold a random-walk drift before re-rolling
pub fn random_hold(rng: &mut Pcg32, tuning: &Tuning) -> u32 {
    rng.random_range(tuning.walk_hold_min..tuning.walk_hold_max)
}

/// Spawn one timed hazard just above the field
pub fn spawn_hazard(state: &mut GameState) -> GameEvent {
    let id = state.next_entity_id();
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let size_span = tuning.hazard_max_size - tuning.hazard_min_size;
    let size = tuning.hazard_min_size + rng.random::<f32>() * size_span;
    let x = random_x(rng, size);
    let speed_y = state.baseline_speed + rng.random::<f32>() * tuning.hazard_speed_bonus;
    let speed_x = random_drift(rng, tuning);
    let hold = random_hold(rng, tuning);
    let kind = pick_hazard_kind(rng.random::<f32>(), tuning);

    let mut hazard = Hazard::new(id, kind, Vec2::new(x, -size), size, speed_y);
    if kind == HazardKind::RandomWalk {
        hazard = hazard.with_walk(speed_x, hold);
    }

    log::debug!("Spawned {:?} hazard {} (size {:.1}, speed {:.2})", kind, id, size, speed_y);
    state.hazards.push(hazard);
    GameEvent::HazardSpawned { id, kind }
}

/// Spawn the slow homing block awarded at score milestones
pub fn spawn_undodgeable(state: &mut GameState) -> GameEvent {
    let id = state.next_entity_id();
    let size = state.tuning.undodgeable_size;
    let x = random_x(&mut state.rng, size);

    let hazard = Hazard::new(id, HazardKind::Undodgeable, Vec2::new(x, -size), size, 0.0);
    log::debug!("Spawned undodgeable hazard {} at x={:.1}", id, x);
    state.hazards.push(hazard);
    GameEvent::HazardSpawned {
        id,
        kind: HazardKind::Undodgeable,
    }
}

/// Spawn one ability pickup just above the field
pub fn spawn_pickup(state: &mut GameState) -> GameEvent {
    let id = state.next_entity_id();
    let size = state.tuning.pickup_size;
    let x = random_x(&mut state.rng, size);
    let kind = AbilityKind::ALL[state.rng.random_range(0..AbilityKind::ALL.len())];

    log::debug!("Spawned {} pickup {}", kind.as_str(), id);
    state.pickups.push(Pickup {
        id,
        kind,
        pos: Vec2::new(x, -size),
        size,
        speed_y: state.tuning.pickup_fall_speed,
    });
    GameEvent::PickupSpawned { id, kind }
}

/// Advance the spawn clock and create whatever is due
pub fn run_timed_spawns(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let (hazards, pickups) = state.spawn_clock.advance(dt, &state.tuning);
    for _ in 0..hazards {
        events.push(spawn_hazard(state));
    }
    for _ in 0..pickups {
        events.push(spawn_pickup(state));
    }
}

/// Spawn one Undodgeable per newly crossed score milestone
pub fn check_milestones(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let reached = state.score / state.tuning.milestone_step;
    while state.last_milestone < reached {
        state.last_milestone += 1;
        let milestone = state.last_milestone * state.tuning.milestone_step;
        log::info!("Score milestone {} reached", milestone);
        events.push(GameEvent::MilestoneReached { milestone });
        events.push(spawn_undodgeable(state));
    }
}
