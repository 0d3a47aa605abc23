//! Axis-aligned rectangles
//!
//! Screen space: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict intersection test.
    ///
    /// Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn adjacent_rects_never_overlap(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(a.right(), y, w, h);
            prop_assert!(!a.overlaps(&b));
        }
    }
}
