//! Bit masks over sprite/bitmap alpha channels, plus arbitrary-angle rotation.

use image::RgbaImage;

/// Alpha above this marks a pixel as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Clone, Debug)]
pub struct SpriteMask {
    w: u32,
    h: u32,
    bits: Vec<bool>,
}

impl SpriteMask {
    pub fn from_alpha(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let bits = img.pixels().map(|p| p.0[3] > ALPHA_THRESHOLD).collect();
        Self { w, h, bits }
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        let h = rows.len() as u32;
        let w = rows.first().map_or(0, |r| r.len()) as u32;
        let bits = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self { w, h, bits }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    /// Out-of-bounds reads are empty, never an error.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return false;
        }
        self.bits[(y as u32 * self.w + x as u32) as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotate about the center, producing a mask sized to the rotated
    /// bounding box. Each destination cell samples the source by inverse
    /// rotation, nearest-neighbor.
    pub fn rotated(&self, angle_deg: f32) -> SpriteMask {
        let (nw, nh) = rotated_dims(self.w, self.h, angle_deg);
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let (cx, cy) = (self.w as f32 / 2.0, self.h as f32 / 2.0);
        let (ncx, ncy) = (nw as f32 / 2.0, nh as f32 / 2.0);

        let mut bits = vec![false; (nw * nh) as usize];
        for dy in 0..nh {
            for dx in 0..nw {
                let u = dx as f32 + 0.5 - ncx;
                let v = dy as f32 + 0.5 - ncy;
                // Screen-space rotation (y down, positive angle CCW on
                // screen); this is the inverse map dest -> source.
                let sx = u * cos - v * sin + cx;
                let sy = u * sin + v * cos + cy;
                bits[(dy * nw + dx) as usize] = self.get(sx.floor() as i32, sy.floor() as i32);
            }
        }
        SpriteMask { w: nw, h: nh, bits }
    }
}

/// Bounding box of a w x h rectangle rotated by `angle_deg`.
pub fn rotated_dims(w: u32, h: u32, angle_deg: f32) -> (u32, u32) {
    let rad = angle_deg.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    // Shave float noise off right angles (cos(90deg) != 0 exactly) before
    // rounding up.
    let nw = (w as f32 * cos + h as f32 * sin - 1e-4).ceil() as u32;
    let nh = (w as f32 * sin + h as f32 * cos - 1e-4).ceil() as u32;
    (nw.max(1), nh.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_zero_keeps_dims() {
        let m = SpriteMask::from_rows(&[&[true, true, true, true], &[true, true, true, true]]);
        let r = m.rotated(0.0);
        assert_eq!((r.width(), r.height()), (4, 2));
        assert_eq!(r.solid_count(), 8);
    }

    #[test]
    fn quarter_turn_swaps_dims() {
        let m = SpriteMask::from_rows(&[&[true, true, true, true], &[true, true, true, true]]);
        let r = m.rotated(90.0);
        assert_eq!((r.width(), r.height()), (2, 4));
        assert_eq!(r.solid_count(), 8);
    }

    #[test]
    fn diagonal_rotation_grows_bounding_box() {
        let (w, h) = rotated_dims(40, 20, 45.0);
        assert!(w >= 40 && h >= 40);
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let m = SpriteMask::from_rows(&[&[true]]);
        assert!(!m.get(-1, 0));
        assert!(!m.get(0, 1));
        assert!(m.get(0, 0));
    }
}
