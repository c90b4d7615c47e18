//! Scene description
//!
//! Converts a `GameState` into an ordered list of draw commands in field
//! coordinates (origin top-left, y down). Later commands draw on top.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::PROJECTILE_RADIUS;
use crate::sim::{AbilityKind, GamePhase, GameState, HazardKind};

/// HUD text lines, so the platform layer can route each to its own element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Score,
    Ability,
    GameOverTitle,
    FinalScore,
}

/// A single primitive to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle anchored at its top-left corner
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Text anchored at its baseline-left point. Drawn by the HUD overlay,
    /// which positions and colors each slot's element from these fields.
    Text {
        slot: TextSlot,
        text: String,
        pos: Vec2,
        font_px: f32,
        color: [f32; 4],
    },
}

pub fn hazard_color(kind: HazardKind) -> [f32; 4] {
    match kind {
        HazardKind::Normal => colors::HAZARD_NORMAL,
        HazardKind::Chaser => colors::HAZARD_CHASER,
        HazardKind::RandomWalk => colors::HAZARD_RANDOM_WALK,
        HazardKind::Undodgeable => colors::HAZARD_UNDODGEABLE,
    }
}

pub fn pickup_color(kind: AbilityKind) -> [f32; 4] {
    match kind {
        AbilityKind::Shield => colors::PICKUP_SHIELD,
        AbilityKind::Speed => colors::PICKUP_SPEED,
        AbilityKind::Gun => colors::PICKUP_GUN,
    }
}

/// CSS color string for a linear `[r, g, b, a]` color in 0..=1
pub fn css_rgba(color: [f32; 4]) -> String {
    let [r, g, b, a] = color;
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a)
}

fn text(slot: TextSlot, text: String, x: f32, y: f32, font_px: f32) -> DrawCommand {
    DrawCommand::Text {
        slot,
        text,
        pos: Vec2::new(x, y),
        font_px,
        color: colors::TEXT,
    }
}

/// Build the draw list for the current frame
pub fn build_scene(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        state.projectiles.len() + state.hazards.len() + state.pickups.len() + 5,
    );

    for projectile in &state.projectiles {
        commands.push(DrawCommand::Circle {
            center: projectile.pos,
            radius: PROJECTILE_RADIUS,
            color: colors::PROJECTILE,
        });
    }

    let player = &state.player;
    commands.push(DrawCommand::Rect {
        pos: player.pos,
        size: Vec2::new(player.width, player.height),
        color: colors::PLAYER,
    });

    for hazard in &state.hazards {
        commands.push(DrawCommand::Rect {
            pos: hazard.pos,
            size: Vec2::splat(hazard.size),
            color: hazard_color(hazard.kind()),
        });
    }

    for pickup in &state.pickups {
        commands.push(DrawCommand::Circle {
            center: pickup.center(),
            radius: pickup.size / 2.0,
            color: pickup_color(pickup.kind),
        });
    }

    commands.push(text(TextSlot::Score, format!("Score: {}", state.score), 10.0, 30.0, 20.0));
    if let Some(kind) = state.active_ability_kind() {
        commands.push(text(
            TextSlot::Ability,
            format!("Ability: {}", kind.as_str()),
            10.0,
            60.0,
            20.0,
        ));
    }

    if state.phase == GamePhase::GameOver {
        commands.push(text(TextSlot::GameOverTitle, "GAME OVER".to_string(), 160.0, 400.0, 40.0));
        commands.push(text(
            TextSlot::FinalScore,
            format!("Final Score: {}", state.score),
            230.0,
            440.0,
            20.0,
        ));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Hazard, Pickup, Projectile};

    fn texts(commands: &[DrawCommand]) -> Vec<(TextSlot, String)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { slot, text, .. } => Some((*slot, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hazard_colors() {
        assert_eq!(hazard_color(HazardKind::Chaser), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(hazard_color(HazardKind::Normal), colors::hex(0xf44336));
        assert_eq!(hazard_color(HazardKind::RandomWalk), colors::hex(0xff9800));
        assert_eq!(hazard_color(HazardKind::Undodgeable), colors::hex(0x800080));
    }

    #[test]
    fn test_pickup_colors() {
        assert_eq!(pickup_color(AbilityKind::Shield), colors::hex(0xffd700));
        assert_eq!(pickup_color(AbilityKind::Speed), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(pickup_color(AbilityKind::Gun), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scene_contents() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .hazards
            .push(Hazard::new(id, HazardKind::Chaser, Vec2::new(10.0, 20.0), 30.0, 2.0));
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            kind: AbilityKind::Shield,
            pos: Vec2::new(100.0, 100.0),
            size: 20.0,
            speed_y: 2.0,
        });
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(50.0, 50.0),
            speed: 8.0,
        });

        let commands = build_scene(&state);
        assert!(commands.contains(&DrawCommand::Rect {
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::splat(30.0),
            color: colors::HAZARD_CHASER,
        }));
        assert!(commands.contains(&DrawCommand::Circle {
            center: Vec2::new(110.0, 110.0),
            radius: 10.0,
            color: colors::PICKUP_SHIELD,
        }));
        assert!(commands.contains(&DrawCommand::Circle {
            center: Vec2::new(50.0, 50.0),
            radius: PROJECTILE_RADIUS,
            color: colors::PROJECTILE,
        }));
        assert_eq!(texts(&commands), vec![(TextSlot::Score, "Score: 0".to_string())]);
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(1);
        state.score = 42;
        state.phase = GamePhase::GameOver;
        let lines = texts(&build_scene(&state));
        assert!(lines.contains(&(TextSlot::GameOverTitle, "GAME OVER".to_string())));
        assert!(lines.contains(&(TextSlot::FinalScore, "Final Score: 42".to_string())));
    }

    #[test]
    fn test_text_layout() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        let commands = build_scene(&state);
        let layout: Vec<(TextSlot, Vec2, f32)> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    slot, pos, font_px, ..
                } => Some((*slot, *pos, *font_px)),
                _ => None,
            })
            .collect();
        assert_eq!(
            layout,
            vec![
                (TextSlot::Score, Vec2::new(10.0, 30.0), 20.0),
                (TextSlot::GameOverTitle, Vec2::new(160.0, 400.0), 40.0),
                (TextSlot::FinalScore, Vec2::new(230.0, 440.0), 20.0),
            ]
        );
    }

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba(colors::TEXT), "rgba(255, 255, 255, 1)");
        assert_eq!(css_rgba(colors::PLAYER), "rgba(76, 175, 80, 1)");
    }

    #[test]
    fn test_ability_line() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        crate::sim::ability::grant(&mut state, AbilityKind::Gun, &mut events);
        let lines = texts(&build_scene(&state));
        assert!(lines.contains(&(TextSlot::Ability, "Ability: gun".to_string())));
    }
}
