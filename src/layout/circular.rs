//! Single-ring placement.

use std::f64::consts::TAU;

use crate::geometry::Position;

/// Ring radius for `count` nodes: large enough that neighbors on the ring
/// are one spacing apart along the arc, and never below one spacing.
pub fn radius(count: usize, spacing: f64) -> f64 {
    (spacing * count as f64 / TAU).max(spacing)
}

/// Place `count` nodes on a ring centered at the origin.
///
/// Node `i` sits at angle `2π·i/n`, starting due east and turning clockwise
/// on screen. A lone node sits on the center.
pub fn place(count: usize, spacing: f64) -> Vec<Position> {
    if count == 1 {
        return vec![Position::ORIGIN];
    }
    let r = radius(count, spacing);
    (0..count)
        .map(|i| Position::polar(r, TAU * i as f64 / count as f64))
        .collect()
}
