//! Axis-aligned rectangle primitives
//!
//! Every collision in the game reduces to an AABB overlap test between
//! square entities. Overlap is strict: rects that merely share an edge do
//! not collide, and every call site relies on that convention.

use glam::IVec2;

/// An axis-aligned box, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// A square rect of the given side length at `pos`.
    pub fn square(pos: IVec2, side: i32) -> Self {
        Self {
            pos,
            size: IVec2::splat(side),
        }
    }

    /// Strict AABB intersection (edge-touching rects do not overlap).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }

    /// Center point.
    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }
}

/// True if `r` overlaps any rect in `others`.
pub fn any_overlap(r: &Rect, others: &[Rect]) -> bool {
    others.iter().any(|o| r.overlaps(o))
}
