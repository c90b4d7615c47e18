//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod ability;
pub mod behavior;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::{SpawnClock, pick_hazard_kind, spawn_hazard, spawn_pickup, spawn_undodgeable};
pub use state::{
    AbilityKind, ActiveAbility, GameEvent, GamePhase, GameState, Hazard, HazardKind, Pickup,
    Player, Projectile,
};
pub use tick::{TickInput, tick};
