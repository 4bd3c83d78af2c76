//! Turning frames into pixels and pixels into an animation file.

mod export;

pub use export::AnimationExporter;

use std::str::FromStr;

use crate::domain::Frame;

/// 8-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const LIME: Rgb = Rgb(0, 255, 0);
}

impl FromStr for Rgb {
    type Err = String;

    /// Parses `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| format!("invalid colour '{s}'; expected #rrggbb"))
        };
        if hex.len() != 6 {
            return Err(format!("invalid colour '{s}'; expected #rrggbb"));
        }
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Two-colour palette: index 0 is dead, index 1 is alive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub dead: Rgb,
    pub alive: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dead: Rgb::BLACK,
            alive: Rgb::LIME,
        }
    }
}

impl Palette {
    pub const DEAD_INDEX: u8 = 0;
    pub const ALIVE_INDEX: u8 = 1;

    /// PLTE chunk bytes in index order
    pub fn to_plte(&self) -> Vec<u8> {
        let Rgb(dr, dg, db) = self.dead;
        let Rgb(ar, ag, ab) = self.alive;
        vec![dr, dg, db, ar, ag, ab]
    }
}

/// Rasterises frames into palette-indexed pixels, one `scale`-sized square per cell
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer {
    scale: u32,
}

impl FrameRenderer {
    /// A zero `scale` is treated as 1
    pub fn new(scale: u32) -> Self {
        Self { scale: scale.max(1) }
    }

    /// Pixel `(width, height)` of a rendered frame
    pub fn image_size(&self, frame: &Frame) -> (u32, u32) {
        let (w, h) = frame.dimensions();
        (w as u32 * self.scale, h as u32 * self.scale)
    }

    /// Row-major palette indices, one byte per pixel
    pub fn render(&self, frame: &Frame) -> Vec<u8> {
        let scale = self.scale as usize;
        let (width, height) = frame.dimensions();
        let row_len = width * scale;
        let mut pixels = Vec::with_capacity(row_len * height * scale);

        for row in frame.rows() {
            let line: Vec<u8> = row
                .iter()
                .flat_map(|cell| {
                    let index = if cell.is_alive() { Palette::ALIVE_INDEX } else { Palette::DEAD_INDEX };
                    std::iter::repeat_n(index, scale)
                })
                .collect();
            for _ in 0..scale {
                pixels.extend_from_slice(&line);
            }
        }
        pixels
    }
}
