//! Per-variant hazard motion
//!
//! `step_hazard` matches exhaustively on `HazardKind`, so a new variant does
//! not compile until it has a motion rule.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::spawn::{random_drift, random_hold};
use super::state::{Hazard, HazardKind};
use crate::consts::FIELD_WIDTH;
use crate::heading;
use crate::tuning::Tuning;

/// Advance one hazard by one tick. `target` is the player's center.
pub fn step_hazard(hazard: &mut Hazard, target: Vec2, tuning: &Tuning, rng: &mut Pcg32) {
    hazard.prev_pos = hazard.pos;
    match hazard.kind() {
        HazardKind::Normal => {
            hazard.pos.y += hazard.speed_y;
        }
        HazardKind::Chaser => {
            hazard.pos.y += hazard.speed_y;
            // Re-aimed every tick from the post-fall position
            let dir = heading(hazard.center(), target);
            hazard.pos += dir * tuning.chaser_speed;
        }
        HazardKind::RandomWalk => {
            hazard.pos.y += hazard.speed_y;
            random_walk(hazard, tuning, rng);
        }
        HazardKind::Undodgeable => {
            let dir = heading(hazard.center(), target);
            hazard.pos += dir * tuning.undodgeable_speed;
        }
    }
}

/// Horizontal drift with periodic re-roll and edge reflection
fn random_walk(hazard: &mut Hazard, tuning: &Tuning, rng: &mut Pcg32) {
    hazard.pos.x += hazard.speed_x;

    hazard.walk_timer += 1;
    if hazard.walk_timer >= hazard.hold_ticks {
        hazard.speed_x = random_drift(rng, tuning);
        hazard.hold_ticks = random_hold(rng, tuning);
        hazard.walk_timer = 0;
    }

    let max_x = FIELD_WIDTH - hazard.size;
    if hazard.pos.x <= 0.0 {
        hazard.pos.x = 0.0;
        hazard.speed_x = hazard.speed_x.abs();
    } else if hazard.pos.x >= max_x {
        hazard.pos.x = max_x;
        hazard.speed_x = -hazard.speed_x.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(11)
    }

    #[test]
    fn test_normal_falls_straight() {
        let tuning = Tuning::default();
        let mut hazard = Hazard::new(1, HazardKind::Normal, Vec2::new(100.0, 0.0), 30.0, 2.5);
        step_hazard(&mut hazard, Vec2::new(500.0, 700.0), &tuning, &mut rng());
        assert_eq!(hazard.pos, Vec2::new(100.0, 2.5));
    }

    #[test]
    fn test_chaser_steers_toward_player() {
        let tuning = Tuning::default();
        let mut hazard = Hazard::new(1, HazardKind::Chaser, Vec2::new(100.0, 100.0), 20.0, 2.0);
        // Player directly to the right of the post-fall center
        let target = Vec2::new(400.0, 112.0);
        step_hazard(&mut hazard, target, &tuning, &mut rng());
        assert!((hazard.pos.x - 101.5).abs() < 1e-4);
        assert!((hazard.pos.y - 102.0).abs() < 1e-4);
    }

    #[test]
    fn test_chaser_retargets_every_tick() {
        let tuning = Tuning::default();
        let mut hazard = Hazard::new(1, HazardKind::Chaser, Vec2::new(300.0, 100.0), 20.0, 0.0);

        step_hazard(&mut hazard, Vec2::new(0.0, 110.0), &tuning, &mut rng());
        assert!(hazard.pos.x < 300.0);
        let after_left = hazard.pos.x;

        step_hazard(&mut hazard, Vec2::new(600.0, 110.0), &tuning, &mut rng());
        assert!(hazard.pos.x > after_left);
    }

    #[test]
    fn test_undodgeable_ignores_gravity() {
        let tuning = Tuning::default();
        let mut hazard = Hazard::new(1, HazardKind::Undodgeable, Vec2::new(100.0, 100.0), 50.0, 9.0);
        // Target straight up: no fall means y decreases
        step_hazard(&mut hazard, Vec2::new(125.0, 0.0), &tuning, &mut rng());
        assert!((hazard.pos.y - 99.5).abs() < 1e-4);
        assert!((hazard.pos.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_undodgeable_moves_at_fixed_speed() {
        let tuning = Tuning::default();
        let start = Vec2::new(50.0, -50.0);
        let mut hazard = Hazard::new(1, HazardKind::Undodgeable, start, 50.0, 0.0);
        step_hazard(&mut hazard, Vec2::new(400.0, 600.0), &tuning, &mut rng());
        assert!(((hazard.pos - start).length() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_random_walk_holds_then_rerolls() {
        let tuning = Tuning::default();
        let mut hazard =
            Hazard::new(1, HazardKind::RandomWalk, Vec2::new(300.0, 0.0), 30.0, 1.0).with_walk(1.0, 3);
        let mut rng = rng();

        step_hazard(&mut hazard, Vec2::ZERO, &tuning, &mut rng);
        step_hazard(&mut hazard, Vec2::ZERO, &tuning, &mut rng);
        assert_eq!(hazard.speed_x, 1.0);
        assert_eq!(hazard.walk_timer, 2);

        step_hazard(&mut hazard, Vec2::ZERO, &tuning, &mut rng);
        assert_eq!(hazard.walk_timer, 0);
        assert!((30..90).contains(&hazard.hold_ticks));
        assert!(hazard.speed_x.abs() <= 1.5);
        assert_eq!(hazard.pos, Vec2::new(303.0, 3.0));
    }

    #[test]
    fn test_random_walk_reflects_at_edges() {
        let tuning = Tuning::default();
        let mut rng = rng();

        let mut left =
            Hazard::new(1, HazardKind::RandomWalk, Vec2::new(0.5, 0.0), 30.0, 1.0).with_walk(-1.0, 60);
        step_hazard(&mut left, Vec2::ZERO, &tuning, &mut rng);
        assert_eq!(left.pos.x, 0.0);
        assert_eq!(left.speed_x, 1.0);

        let mut right = Hazard::new(2, HazardKind::RandomWalk, Vec2::new(569.5, 0.0), 30.0, 1.0)
            .with_walk(1.2, 60);
        step_hazard(&mut right, Vec2::ZERO, &tuning, &mut rng);
        assert_eq!(right.pos.x, FIELD_WIDTH - 30.0);
        assert_eq!(right.speed_x, -1.2);
    }

    #[test]
    fn test_variant_never_changes() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let kinds = [
            HazardKind::Normal,
            HazardKind::Chaser,
            HazardKind::RandomWalk,
            HazardKind::Undodgeable,
        ];
        for kind in kinds {
            let mut hazard = Hazard::new(1, kind, Vec2::new(200.0, 0.0), 30.0, 2.0).with_walk(1.0, 30);
            for _ in 0..200 {
                step_hazard(&mut hazard, Vec2::new(300.0, 760.0), &tuning, &mut rng);
            }
            assert_eq!(hazard.kind(), kind);
        }
    }
}
