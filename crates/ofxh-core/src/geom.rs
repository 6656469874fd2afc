use serde::{Deserialize, Serialize};

/// Integer rectangle in pixel coordinates.
///
/// Half-open: `x1 <= x < x2`, `y1 <= y < y2`. The wire order is `x1, y1, x2, y2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Saturates at `i32::MAX` for rectangles spanning the whole integer range.
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// True when `other` lies entirely inside `self` (bounds within an ROD, say).
    pub fn encloses(&self, other: &RectI) -> bool {
        other.is_empty()
            || (other.x1 >= self.x1
                && other.y1 >= self.y1
                && other.x2 <= self.x2
                && other.y2 <= self.y2)
    }

    pub fn to_array(self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn from_array(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Rectangle in canonical (double) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectD {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectD {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for PointD {
    /// Full-resolution render scale.
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let r = RectI::new(0, 0, 4, 2);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 2);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 1));
        assert!(!r.contains(4, 1));
        assert!(!r.contains(3, 2));
    }

    #[test]
    fn inverted_rect_is_empty() {
        let r = RectI::new(10, 10, 5, 20);
        assert_eq!(r.width(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn full_range_rect_saturates() {
        let r = RectI::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(r.width(), i32::MAX);
        assert_eq!(r.height(), i32::MAX);
        assert!(!r.is_empty());
        assert_eq!(RectI::new(i32::MAX, 0, i32::MIN, 1).width(), 0);
    }

    #[test]
    fn encloses_checks_all_edges() {
        let rod = RectI::new(0, 0, 100, 50);
        assert!(rod.encloses(&RectI::new(10, 10, 20, 20)));
        assert!(rod.encloses(&rod));
        assert!(!rod.encloses(&RectI::new(-1, 0, 10, 10)));
        assert!(!rod.encloses(&RectI::new(0, 0, 101, 10)));
    }

    #[test]
    fn array_order_is_x1_y1_x2_y2() {
        let r = RectI::new(1, 2, 3, 4);
        assert_eq!(r.to_array(), [1, 2, 3, 4]);
        assert_eq!(RectI::from_array([1, 2, 3, 4]), r);
    }
}
