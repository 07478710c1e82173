//! Asset loading. Both rasters are rescaled to the fixed reference sizes;
//! a missing or corrupt file is fatal and surfaces as a non-zero exit.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use image::imageops::FilterType;

use crate::config::{CAR_HEIGHT, CAR_WIDTH, SessionConfig, TRACK_HEIGHT, TRACK_WIDTH};

pub struct Assets {
    /// Vehicle sprite, 40x20 after rescale.
    pub car: RgbaImage,
    /// Course bitmap, 500x500 after rescale; opaque pixels are walls.
    pub track: RgbaImage,
}

pub fn load(cfg: &SessionConfig) -> Result<Assets> {
    Ok(Assets {
        car: load_scaled(&cfg.car_sprite, CAR_WIDTH, CAR_HEIGHT)?,
        track: load_scaled(&cfg.track_bitmap, TRACK_WIDTH, TRACK_HEIGHT)?,
    })
}

fn load_scaled(path: &Path, w: u32, h: u32) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to load asset {}", path.display()))?
        .to_rgba8();
    if img.dimensions() == (w, h) {
        return Ok(img);
    }
    Ok(image::imageops::resize(&img, w, h, FilterType::Nearest))
}
