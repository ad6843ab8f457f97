//! Integer rectangles: point containment and intersection

use serde::{Deserialize, Serialize};

/// Rectangle with integer bounds; `right` and `bottom` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of `width` x `height` with its top-left corner at (x, y).
    /// Far edges saturate at `i32::MAX`.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Swap inverted bounds so `left <= right` and `top <= bottom`
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        point_in_rect(x, y, self)
    }

    /// See [`intersect_rects`]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        intersect_rects(self, other)
    }

    fn corners(&self) -> [(i32, i32); 4] {
        [
            (self.left, self.top),
            (self.left, self.bottom),
            (self.right, self.top),
            (self.right, self.bottom),
        ]
    }
}

/// True when `left <= x < right` and `top <= y < bottom`
#[inline]
pub fn point_in_rect(x: i32, y: i32, r: &Rect) -> bool {
    x >= r.left && x < r.right && y >= r.top && y < r.bottom
}

/// Overlap of two rectangles.
///
/// Two rectangles are considered intersecting when a corner of either one
/// lies inside the other, which also covers one rectangle sitting entirely
/// inside the other. Corners use the raw (exclusive) right/bottom values, so
/// rectangles that merely touch report a zero-area overlap. Two rectangles
/// crossing like a plus sign, with no corner inside the other, report `None`.
pub fn intersect_rects(r1: &Rect, r2: &Rect) -> Option<Rect> {
    let hit = r1.corners().iter().any(|&(x, y)| point_in_rect(x, y, r2))
        || r2.corners().iter().any(|&(x, y)| point_in_rect(x, y, r1));

    hit.then(|| Rect {
        left: r1.left.max(r2.left),
        top: r1.top.max(r2.top),
        right: r1.right.min(r2.right),
        bottom: r1.bottom.min(r2.bottom),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(point_in_rect(10, 10, &r));
        assert!(point_in_rect(19, 19, &r));
        assert!(!point_in_rect(20, 15, &r));
        assert!(!point_in_rect(15, 20, &r));
        assert!(!point_in_rect(9, 15, &r));
        assert!(r.contains(15, 15));
    }

    #[test]
    fn test_intersect_overlapping() {
        let sect = intersect_rects(&Rect::new(40, 75, 100, 100), &Rect::new(20, 85, 60, 105));
        assert_eq!(sect, Some(Rect::new(40, 85, 60, 100)));
    }

    #[test]
    fn test_intersect_disjoint() {
        assert_eq!(intersect_rects(&Rect::new(10, 10, 20, 20), &Rect::new(30, 30, 40, 40)), None);
    }

    #[test]
    fn test_intersect_containment_both_ways() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(10, 20, 30, 40);
        assert_eq!(outer.intersect(&inner), Some(inner));
        assert_eq!(inner.intersect(&outer), Some(inner));
    }

    #[test]
    fn test_intersect_plus_shape_has_no_corner_hit() {
        let wide = Rect::new(0, 10, 100, 20);
        let tall = Rect::new(40, 0, 50, 100);
        assert_eq!(intersect_rects(&wide, &tall), None);
    }

    #[test]
    fn test_normalized_and_size() {
        let r = Rect::new(50, 40, 10, 20).normalized();
        assert_eq!(r, Rect::new(10, 20, 50, 40));
        assert_eq!((r.width(), r.height()), (40, 20));
        assert!(!r.is_empty());
        assert!(Rect::from_size(5, 5, 0, 10).is_empty());
    }

    #[test]
    fn test_extreme_bounds_saturate() {
        let r = Rect::new(i32::MIN, 0, i32::MAX, 1);
        assert_eq!(r.width(), i32::MAX);
        assert_eq!(r.height(), 1);
        assert_eq!(Rect::new(0, i32::MIN, 1, i32::MAX).height(), i32::MAX);
        assert_eq!(Rect::new(i32::MAX, 0, i32::MIN, 0).width(), i32::MIN);

        let r = Rect::from_size(i32::MAX - 5, i32::MAX - 1, 100, 100);
        assert_eq!((r.right, r.bottom), (i32::MAX, i32::MAX));
        assert_eq!((r.width(), r.height()), (5, 1));
    }
}
