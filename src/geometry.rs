//! Boxes, centers and the snapshots taken of them when a transition starts.

use std::fmt;

use crate::dom::{Document, NodeId};
use crate::error::MorphResult;

/// A point in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.width, self.height)
    }
}

/// Geometry of one element captured at a point in time.
///
/// Taken once when a transition is armed and never refreshed while it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub rect: Rect,
    pub center: Point,
}

impl GeometrySnapshot {
    pub fn new(rect: Rect) -> Self {
        Self { rect, center: rect.center() }
    }

    /// Captures the element's rendered box as it is right now.
    pub fn capture(document: &Document, id: NodeId) -> MorphResult<Self> {
        Ok(Self::new(document.rendered_box(id)?))
    }

    /// Box at `ratio` between `self` and `to`.
    ///
    /// Every edge moves linearly, so the center follows the straight line
    /// between both centers. `ratio = 0` yields `self` and `ratio = 1` yields
    /// `to`, bit for bit.
    pub fn interpolate(&self, to: &GeometrySnapshot, ratio: f32) -> Rect {
        let (from, to) = (&self.rect, &to.rect);
        Rect::new(
            lerp(from.left, to.left, ratio),
            lerp(from.top, to.top, ratio),
            lerp(from.width, to.width, ratio),
            lerp(from.height, to.height, ratio),
        )
    }
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from * (1.0 - t) + to * t
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect() -> impl Strategy<Value = Rect> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, 0.0f32..1000.0, 0.0f32..1000.0)
            .prop_map(|(l, t, w, h)| Rect::new(l, t, w, h))
    }

    proptest! {
        /// Ratio 0 reproduces the source box, ratio 1 the destination box
        #[test]
        fn interpolation_endpoints(a in rect(), b in rect()) {
            let from = GeometrySnapshot::new(a);
            let to = GeometrySnapshot::new(b);

            prop_assert_eq!(from.interpolate(&to, 0.0), a);
            prop_assert_eq!(from.interpolate(&to, 1.0), b);
        }

        /// Interpolated sizes stay between the two endpoints
        #[test]
        fn interpolation_bounded(a in rect(), b in rect(), t in 0.0f32..=1.0) {
            let from = GeometrySnapshot::new(a);
            let to = GeometrySnapshot::new(b);
            let mid = from.interpolate(&to, t);
            let (lo, hi) = if a.width <= b.width { (a.width, b.width) } else { (b.width, a.width) };
            prop_assert!(mid.width >= lo - 1e-2 && mid.width <= hi + 1e-2);
        }
    }
}
