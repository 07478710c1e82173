//! Track occupancy and the finish-line region.

use image::RgbaImage;

use crate::mask::SpriteMask;

/// Integer rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered_on(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self {
            x: cx - w / 2,
            y: cy - h / 2,
            w,
            h,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Immutable occupancy grid over the course bitmap. Built once at load time;
/// opaque pixels are walls. Shared read-only by collision and sensors.
pub struct TrackMask {
    occupancy: SpriteMask,
}

impl TrackMask {
    pub fn from_image(img: &RgbaImage) -> Self {
        Self {
            occupancy: SpriteMask::from_alpha(img),
        }
    }

    #[cfg(test)]
    pub fn from_mask(occupancy: SpriteMask) -> Self {
        Self { occupancy }
    }

    pub fn width(&self) -> u32 {
        self.occupancy.width()
    }

    pub fn height(&self) -> u32 {
        self.occupancy.height()
    }

    /// Track-local coordinates; anything off the bitmap is open space.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.occupancy.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection_is_symmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersects(&b) && b.intersects(&a));
        // Touching edges do not intersect.
        assert!(!a.intersects(&c) && !c.intersects(&a));
    }

    #[test]
    fn centered_rect_matches_reference_layout() {
        let r = Rect::centered_on(400, 300, 500, 500);
        assert_eq!(r, Rect::new(150, 50, 500, 500));
    }

    #[test]
    fn off_bitmap_is_not_a_wall() {
        let track = TrackMask::from_mask(SpriteMask::from_rows(&[&[true, false]]));
        assert!(track.is_wall(0, 0));
        assert!(!track.is_wall(1, 0));
        assert!(!track.is_wall(-1, 0));
        assert!(!track.is_wall(0, 5));
    }
}
