//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad([min, min + Vec2::new(size.x, 0.0), min + size, min + Vec2::new(0.0, size.y)], color)
}

/// Generate vertices for a rectangle given in a local frame around `center`,
/// rotated clockwise (screen space, y down) by `quarter_turns`
pub fn turned_rect(
    center: Vec2,
    local_min: Vec2,
    size: Vec2,
    quarter_turns: u32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let corners = [
        local_min,
        local_min + Vec2::new(size.x, 0.0),
        local_min + size,
        local_min + Vec2::new(0.0, size.y),
    ];
    quad(corners.map(|c| center + rotate_quarters(c, quarter_turns)), color)
}

/// Rotate a point by clockwise quarter turns in y-down coordinates
pub fn rotate_quarters(p: Vec2, quarter_turns: u32) -> Vec2 {
    match quarter_turns % 4 {
        0 => p,
        1 => Vec2::new(-p.y, p.x),
        2 => -p,
        _ => Vec2::new(p.y, -p.x),
    }
}

fn quad(c: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    [c[0], c[1], c[2], c[0], c[2], c[3]]
        .iter()
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Closed outline of a circle: `segments + 1` points, the last repeating the first
fn rim(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let step = TAU / segments.max(1) as f32;
    (0..=segments)
        .map(|i| center + Vec2::from_angle(i as f32 * step) * radius)
        .collect()
}

/// Filled circle as a triangle fan around `center`
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    rim(center, radius, segments)
        .windows(2)
        .flat_map(|edge| [center, edge[0], edge[1]])
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Hollow circle between two radii, one quad per segment
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner = rim(center, inner_radius, segments);
    let outer = rim(center, outer_radius, segments);
    inner
        .windows(2)
        .zip(outer.windows(2))
        .flat_map(|(i, o)| quad([i[0], o[0], o[1], i[1]], color))
        .collect()
}
