//! Component packing and canvas fitting.
//!
//! Components come out of the strategies in their own local frames. They
//! are packed on shelves: `ceil(sqrt(k))` components per row, left to
//! right, each box one spacing after the previous one, each row one spacing
//! below the tallest box of the row above. Boxes on one shelf are separated
//! horizontally and shelves are separated vertically, so no two component
//! boxes overlap.

use crate::geometry::{Bounds, Position};

use super::grid;

/// Offsets that move each component's box onto its shelf slot.
///
/// The first box's top-left corner lands on the origin.
pub fn pack(boxes: &[Bounds], spacing: f64) -> Vec<Position> {
    let per_row = grid::columns(boxes.len()).max(1);
    let mut offsets = Vec::with_capacity(boxes.len());
    let mut row_top = 0.0;

    for row in boxes.chunks(per_row) {
        let mut cursor = 0.0;
        let mut row_height: f64 = 0.0;
        for bounds in row {
            offsets.push(Position::new(cursor, row_top).sub(bounds.min()));
            cursor += bounds.width() + spacing;
            row_height = row_height.max(bounds.height());
        }
        row_top += row_height + spacing;
    }

    offsets
}

/// Uniform factor that brings an extent inside the canvas. `1.0` when it
/// already fits; never above `1.0`.
pub fn fit_scale(bounds: &Bounds, width: f64, height: f64) -> f64 {
    shrink(bounds.width(), width).min(shrink(bounds.height(), height))
}

/// Uniform factor, applied about `pivot`, that keeps the extent inside the
/// canvas once `pivot` sits on the canvas center.
pub fn fit_scale_around(bounds: &Bounds, pivot: Position, width: f64, height: f64) -> f64 {
    let reach_x = (pivot.x - bounds.min_x).max(bounds.max_x - pivot.x);
    let reach_y = (pivot.y - bounds.min_y).max(bounds.max_y - pivot.y);
    shrink(2.0 * reach_x, width).min(shrink(2.0 * reach_y, height))
}

fn shrink(extent: f64, room: f64) -> f64 {
    if extent > room { room / extent } else { 1.0 }
}

/// Translation that centers `bounds` on the canvas.
pub fn center_offset(bounds: &Bounds, width: f64, height: f64) -> Position {
    Position::new(width / 2.0, height / 2.0).sub(bounds.center())
}

/// Clamp a position into `[0, width] x [0, height]`. A NaN coordinate maps
/// to zero.
#[inline]
pub fn clamp(position: Position, width: f64, height: f64) -> Position {
    // f64::max drops a NaN operand, f64::clamp would keep it
    Position::new(position.x.max(0.0).min(width), position.y.max(0.0).min(height))
}
