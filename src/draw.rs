//! Software rendering into the `pixels` RGBA frame: clear/blend/rect
//! primitives, a tiny 5x7 glyph font for the HUD, sensor lines, and sprite
//! blitting with arbitrary rotation.

use image::RgbaImage;

use crate::config::{HEIGHT, WIDTH};
use crate::mask::rotated_dims;

pub fn clear_rgba(frame: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
    for px in frame.chunks_exact_mut(4) {
        px[0] = r;
        px[1] = g;
        px[2] = b;
        px[3] = a;
    }
}

pub fn blend_pixel(frame: &mut [u8], x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
    if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
        return;
    }
    let idx = ((y as u32 * WIDTH + x as u32) * 4) as usize;
    if idx + 3 >= frame.len() {
        return;
    }
    let ar = a as u16;
    let iar = (255 - a) as u16;
    frame[idx] = (((r as u16) * ar + frame[idx] as u16 * iar) / 255) as u8;
    frame[idx + 1] = (((g as u16) * ar + frame[idx + 1] as u16 * iar) / 255) as u8;
    frame[idx + 2] = (((b as u16) * ar + frame[idx + 2] as u16 * iar) / 255) as u8;
    frame[idx + 3] = 255;
}

pub fn fill_rect_rgba(frame: &mut [u8], x: i32, y: i32, w: i32, h: i32, r: u8, g: u8, b: u8, a: u8) {
    for py in y..y + h {
        for px in x..x + w {
            blend_pixel(frame, px, py, r, g, b, a);
        }
    }
}

pub fn stroke_rect_rgba(
    frame: &mut [u8],
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    for px in x..x + w {
        blend_pixel(frame, px, y, r, g, b, a);
        blend_pixel(frame, px, y + h - 1, r, g, b, a);
    }
    for py in y..y + h {
        blend_pixel(frame, x, py, r, g, b, a);
        blend_pixel(frame, x + w - 1, py, r, g, b, a);
    }
}

/// Bresenham; used for the sensor rays.
pub fn draw_line(frame: &mut [u8], x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend_pixel(frame, x, y, r, g, b, 255);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Per-pixel alpha blit of an RGBA sprite at (x, y).
pub fn blit(frame: &mut [u8], img: &RgbaImage, x: i32, y: i32) {
    for (px, py, p) in img.enumerate_pixels() {
        let [r, g, b, a] = p.0;
        if a > 0 {
            blend_pixel(frame, x + px as i32, y + py as i32, r, g, b, a);
        }
    }
}

/// Rotate an RGBA sprite about its center into the rotated bounding box,
/// nearest-neighbor, matching the silhouette mask rotation so the drawn car
/// and the collision footprint agree.
pub fn rotate_sprite(img: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = rotated_dims(w, h, angle_deg);
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let (ncx, ncy) = (nw as f32 / 2.0, nh as f32 / 2.0);

    let mut out = RgbaImage::new(nw, nh);
    for (dx, dy, p) in out.enumerate_pixels_mut() {
        let u = dx as f32 + 0.5 - ncx;
        let v = dy as f32 + 0.5 - ncy;
        let sx = (u * cos - v * sin + cx).floor() as i32;
        let sy = (u * sin + v * cos + cy).floor() as i32;
        if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
            *p = *img.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    let c = ch.to_ascii_uppercase();
    Some(match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => return None,
    })
}

fn draw_char(frame: &mut [u8], ch: char, x: i32, y: i32, scale: i32, col: (u8, u8, u8, u8)) -> i32 {
    if let Some(rows) = glyph_5x7(ch) {
        for (ry, row) in rows.iter().enumerate() {
            for rx in 0..5i32 {
                if (row >> (4 - rx)) & 1 == 1 {
                    for sy in 0..scale {
                        for sx in 0..scale {
                            blend_pixel(
                                frame,
                                x + rx * scale + sx,
                                y + ry as i32 * scale + sy,
                                col.0,
                                col.1,
                                col.2,
                                col.3,
                            );
                        }
                    }
                }
            }
        }
    }
    5 * scale + scale
}

pub fn draw_text(frame: &mut [u8], text: &str, x: i32, y: i32, scale: i32, col: (u8, u8, u8, u8)) {
    let mut cx = x;
    for ch in text.chars() {
        cx += draw_char(frame, ch, cx, y, scale, col);
    }
}
