//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::DrawCommand;
use super::vertex::Vertex;

/// Segments used for every circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Triangles for every shape command, in draw order. Text is skipped.
pub fn scene_vertices(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match command {
            DrawCommand::Rect { pos, size, color } => vertices.extend(rect(*pos, *size, *color)),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, CIRCLE_SEGMENTS)),
            DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::TextSlot;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        for corner in [[10.0, 20.0], [40.0, 20.0], [10.0, 60.0], [40.0, 60.0]] {
            assert!(verts.iter().any(|v| v.position == corner));
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(5.0, 5.0);
        let verts = circle(center, 3.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        for v in &verts {
            let p = Vec2::new(v.position[0], v.position[1]);
            assert!((p - center).length() <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn test_scene_vertices_skip_text() {
        let commands = vec![
            DrawCommand::Rect {
                pos: Vec2::ZERO,
                size: Vec2::ONE,
                color: [1.0; 4],
            },
            DrawCommand::Text {
                slot: TextSlot::Score,
                text: "Score: 0".into(),
                pos: Vec2::ZERO,
                font_px: 20.0,
                color: [1.0; 4],
            },
            DrawCommand::Circle {
                center: Vec2::ZERO,
                radius: 1.0,
                color: [1.0; 4],
            },
        ];
        assert_eq!(scene_vertices(&commands).len(), 6 + 3 * CIRCLE_SEGMENTS as usize);
    }
}
