//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; there are no
//! globals. Entity collections keep spawn order, which doubles as id order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::SpawnClock;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Speed without ability modifiers (pixels per tick)
    pub base_speed: f32,
    /// Current speed (pixels per tick)
    pub speed: f32,
}

impl Player {
    pub fn new(base_speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_START_MARGIN,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            base_speed,
            speed: base_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Keep the avatar fully inside the play field
    pub fn clamp_to_field(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, FIELD_WIDTH - self.width);
        self.pos.y = self.pos.y.clamp(0.0, FIELD_HEIGHT - self.height);
    }
}

/// Hazard variants. A hazard's variant never changes after it is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Straight vertical fall
    Normal,
    /// Falls while steering toward the player every tick
    Chaser,
    /// Falls with a horizontal drift that is re-rolled periodically
    RandomWalk,
    /// Slow homing block spawned at score milestones; ignores gravity
    Undodgeable,
}

/// A falling hazard (square)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    kind: HazardKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Top-left corner before this tick's movement
    pub prev_pos: Vec2,
    /// Side length
    pub size: f32,
    /// Fall speed assigned at spawn (pixels per tick)
    pub speed_y: f32,
    /// Horizontal drift (RandomWalk only)
    pub speed_x: f32,
    /// Ticks since the drift was last re-rolled
    pub walk_timer: u32,
    /// Ticks to hold the current drift
    pub hold_ticks: u32,
    /// Dodge point already awarded
    pub dodged: bool,
    /// Touched the shielded player; no dodge point will be awarded
    pub grazed: bool,
}

impl Hazard {
    pub fn new(id: u32, kind: HazardKind, pos: Vec2, size: f32, speed_y: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            prev_pos: pos,
            size,
            speed_y,
            speed_x: 0.0,
            walk_timer: 0,
            hold_ticks: 0,
            dodged: false,
            grazed: false,
        }
    }

    /// Set the random-walk drift parameters
    pub fn with_walk(mut self, speed_x: f32, hold_ticks: u32) -> Self {
        self.speed_x = speed_x;
        self.hold_ticks = hold_ticks;
        self
    }

    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Fully below the field bottom
    pub fn has_exited(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT + self.size
    }
}

/// Ability types granted by pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Shield,
    Speed,
    Gun,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 3] = [AbilityKind::Shield, AbilityKind::Speed, AbilityKind::Gun];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityKind::Shield => "shield",
            AbilityKind::Speed => "speed",
            AbilityKind::Gun => "gun",
        }
    }

    /// Lifetime in ticks; `None` means held until used (the gun)
    pub fn duration_ticks(&self, tuning: &Tuning) -> Option<u32> {
        match self {
            AbilityKind::Shield => Some(tuning.shield_ticks),
            AbilityKind::Speed => Some(tuning.speed_ticks),
            AbilityKind::Gun => None,
        }
    }
}

/// A collectible ability pickup (drawn as a circle, collides as a square)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: AbilityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed_y: f32,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn has_exited(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT + self.size
    }
}

/// A gun projectile; `pos` is its tip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Upward speed (pixels per tick)
    pub speed: f32,
}

/// The single ability currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbility {
    pub kind: AbilityKind,
    /// Ticks left; `None` for abilities held until used
    pub remaining_ticks: Option<u32>,
    /// Tick on which it was collected (not counted down on that tick)
    pub granted_tick: u64,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardSpawned { id: u32, kind: HazardKind },
    PickupSpawned { id: u32, kind: AbilityKind },
    MilestoneReached { milestone: u64 },
    Dodged { id: u32 },
    HazardShot { hazard_id: u32, projectile_id: u32 },
    ProjectileFired { id: u32 },
    AbilityCollected { kind: AbilityKind },
    AbilityExpired { kind: AbilityKind },
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Fall-speed baseline for newly spawned hazards
    pub baseline_speed: f32,
    /// Highest score milestone (score / milestone_step) already handled
    pub last_milestone: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Spawn timers
    pub spawn_clock: SpawnClock,
    pub player: Player,
    /// Active hazards (spawn order)
    pub hazards: Vec<Hazard>,
    /// Active pickups (spawn order)
    pub pickups: Vec<Pickup>,
    /// Active projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Ability in effect, if any
    pub ability: Option<ActiveAbility>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with the given seed and tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            baseline_speed: tuning.base_fall_speed,
            last_milestone: 0,
            time_ticks: 0,
            spawn_clock: SpawnClock::default(),
            player: Player::new(tuning.player_speed),
            hazards: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            ability: None,
            next_id: 1,
            tuning,
        }
    }

    /// Reinitialize everything except tuning for a fresh run
    pub fn restart(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(seed, tuning);
        log::info!("Session restarted with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn active_ability_kind(&self) -> Option<AbilityKind> {
        self.ability.map(|a| a.kind)
    }

    pub fn shield_active(&self) -> bool {
        self.active_ability_kind() == Some(AbilityKind::Shield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running_and_empty() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.baseline_speed, 2.0);
        assert!(state.hazards.is_empty());
        assert!(state.pickups.is_empty());
        assert!(state.projectiles.is_empty());
        assert!(state.ability.is_none());
    }

    #[test]
    fn test_player_starts_bottom_center() {
        let player = Player::new(3.0);
        assert_eq!(player.pos, Vec2::new(280.0, 740.0));
        assert_eq!(player.speed, 3.0);
    }

    #[test]
    fn test_player_clamp() {
        let mut player = Player::new(3.0);
        player.pos = Vec2::new(-15.0, 9000.0);
        player.clamp_to_field();
        assert_eq!(player.pos, Vec2::new(0.0, FIELD_HEIGHT - PLAYER_HEIGHT));

        player.pos = Vec2::new(FIELD_WIDTH, -1.0);
        player.clamp_to_field();
        assert_eq!(player.pos, Vec2::new(FIELD_WIDTH - PLAYER_WIDTH, 0.0));
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_hazard_exit_threshold() {
        let mut hazard = Hazard::new(1, HazardKind::Normal, Vec2::new(0.0, 0.0), 30.0, 2.0);
        hazard.pos.y = FIELD_HEIGHT + 29.0;
        assert!(!hazard.has_exited());
        hazard.pos.y = FIELD_HEIGHT + 30.0;
        assert!(hazard.has_exited());
    }

    #[test]
    fn test_gun_has_no_timer() {
        let tuning = Tuning::default();
        assert_eq!(AbilityKind::Gun.duration_ticks(&tuning), None);
        assert_eq!(AbilityKind::Shield.duration_ticks(&tuning), Some(300));
        assert_eq!(AbilityKind::Speed.duration_ticks(&tuning), Some(600));
    }

    #[test]
    fn test_restart_records_new_seed() {
        let mut state = GameState::new(7);
        assert_eq!(state.seed, 7);
        state.score = 12;
        state.restart(99);
        assert_eq!(state.seed, 99);
        assert_eq!(state.score, 0);
        let mut fresh = GameState::new(99);
        assert_eq!(state.next_entity_id(), fresh.next_entity_id());
    }
}
