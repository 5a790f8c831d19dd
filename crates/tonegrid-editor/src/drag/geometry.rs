//! Pointer geometry for the drag handler.
//!
//! The engine only deals in axis indices. Hosts describe their layout
//! through [`CellLocator`], and pointer positions are mapped to pulse
//! indices by proportional division of the container width.

/// Axis-aligned rectangle in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns true if the point lies inside the rectangle (right and bottom edges excluded).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Host-side lookup of grid cells.
pub trait CellLocator {
    /// Bounds of the cell at `(note, pulse)`, or `None` if the host has no such cell.
    fn cell_bounds(&self, note: i32, pulse: i32) -> Option<Rect>;

    /// Bounds of the whole grid container.
    fn container_bounds(&self) -> Rect;
}

/// Maps a horizontal pointer position to a pulse index.
///
/// The result is clamped to `[0, total_spaces - 1]`. Returns `None` when
/// there are no spaces, the container has no width, or `x` is not finite.
pub fn space_at(x: f64, bounds: Rect, total_spaces: usize) -> Option<i32> {
    if total_spaces == 0 || !x.is_finite() || !(bounds.width > 0.0) {
        return None;
    }
    let last = total_spaces.min(i32::MAX as usize) as i32 - 1;
    let fraction = (x - bounds.left) / bounds.width;
    let index = (fraction * total_spaces as f64).floor();
    Some(index.clamp(0.0, last as f64) as i32)
}
