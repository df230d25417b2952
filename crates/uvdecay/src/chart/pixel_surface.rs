//! CPU-based RGBA pixel buffer surface
//!
//! Used for headless chart export; needs no GPU or window.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;

use super::mapping::SurfaceDims;
use super::surface::{ChartSurface, Rgba, TextOrientation};

/// Glyph cell size of the built-in bitmap font
const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;

/// Chart surface that rasterizes into an RGBA buffer
pub struct PixelSurface {
    /// Width of the buffer in pixels
    pub width: usize,
    /// Height of the buffer in pixels
    pub height: usize,
    /// RGBA pixel buffer (4 bytes per pixel), row-major from the top-left
    pub buffer: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; width * height * 4],
        }
    }

    /// Resize the buffer, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.buffer = vec![0u8; width * height * 4];
    }

    /// Color at a pixel, if inside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.buffer[idx],
            self.buffer[idx + 1],
            self.buffer[idx + 2],
            self.buffer[idx + 3],
        ])
    }

    /// Set a single pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.buffer[idx..idx + 4].copy_from_slice(&color);
        }
    }

    fn fill_disc(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn fill_block(&mut self, x: i32, y: i32, size: i32, color: Rgba) {
        for dy in 0..size {
            for dx in 0..size {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Bresenham line; thicker lines stamp a disc at every step
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, color: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if radius > 0 {
                self.fill_disc(x, y, radius, color);
            } else {
                self.set_pixel(x, y, color);
            }
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

    /// Encode the buffer as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let image =
            image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.buffer.clone())
                .context("Pixel buffer does not match surface size")?;
        image
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl ChartSurface for PixelSurface {
    fn dims(&self) -> SurfaceDims {
        SurfaceDims::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let radius = ((width - 1.0) / 2.0).round().max(0.0) as i32;
        self.draw_line(
            from.x.round() as i32,
            from.y.round() as i32,
            to.x.round() as i32,
            to.y.round() as i32,
            radius,
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.fill_disc(
            center.x.round() as i32,
            center.y.round() as i32,
            radius.round() as i32,
            color,
        );
    }

    fn text(
        &mut self,
        pos: Vec2,
        text: &str,
        font_size: f32,
        color: Rgba,
        orientation: TextOrientation,
    ) {
        let scale = (font_size / GLYPH_HEIGHT as f32).round().max(1.0) as i32;
        let advance = (GLYPH_WIDTH + 1) * scale;
        let (x, y) = (pos.x.round() as i32, pos.y.round() as i32);

        for (i, c) in text.chars().enumerate() {
            let glyph = glyph(c.to_ascii_uppercase());
            let offset = i as i32 * advance;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    // Glyph-local coordinates relative to the baseline start
                    let gx = offset + col * scale;
                    let gy = (row as i32 - GLYPH_HEIGHT) * scale;
                    match orientation {
                        TextOrientation::Horizontal => {
                            self.fill_block(x + gx, y + gy, scale, color)
                        }
                        TextOrientation::Vertical => {
                            self.fill_block(x + gy, y - gx - scale, scale, color)
                        }
                    }
                }
            }
        }
    }
}

/// 5x7 bitmap glyph; each byte is one row, bits 4-0 are columns left-to-right
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [
            0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
        ],
        '1' => [
            0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ],
        '2' => [
            0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111,
        ],
        '3' => [
            0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110,
        ],
        '4' => [
            0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
        ],
        '5' => [
            0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
        ],
        '6' => [
            0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110,
        ],
        '7' => [
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
        ],
        '8' => [
            0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
        ],
        '9' => [
            0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100,
        ],
        'A' => [
            0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001,
        ],
        'E' => [
            0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111,
        ],
        'G' => [
            0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110,
        ],
        'I' => [
            0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ],
        'M' => [
            0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001,
        ],
        'N' => [
            0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001,
        ],
        'S' => [
            0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110,
        ],
        'T' => [
            0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100,
        ],
        '.' => [
            0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100,
        ],
        '-' => [
            0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000,
        ],
        '(' => [
            0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010,
        ],
        ')' => [
            0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000,
        ],
        ' ' => [0; 7],
        _ => [
            0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const WHITE: Rgba = [255, 255, 255, 255];

    #[test]
    fn test_surface_creation() {
        let surface = PixelSurface::new(128, 64);
        assert_eq!(surface.buffer.len(), 128 * 64 * 4);
        assert_eq!(surface.dims(), SurfaceDims::new(128.0, 64.0));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut surface = PixelSurface::new(4, 3);
        surface.clear(WHITE);
        assert!(surface.buffer.chunks_exact(4).all(|p| p == WHITE));
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut surface = PixelSurface::new(20, 20);
        surface.clear(WHITE);
        surface.line(Vec2::new(2.0, 3.0), Vec2::new(15.0, 11.0), 1.0, RED);
        assert_eq!(surface.pixel(2, 3), Some(RED));
        assert_eq!(surface.pixel(15, 11), Some(RED));
        assert_eq!(surface.pixel(15, 3), Some(WHITE));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut surface = PixelSurface::new(8, 8);
        surface.fill_circle(Vec2::new(-20.0, 50.0), 3.0, RED);
        surface.line(Vec2::new(-5.0, -5.0), Vec2::new(20.0, -4.0), 3.0, RED);
        assert!(surface.buffer.iter().all(|b| *b == 0));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_text_sits_above_baseline() {
        let mut surface = PixelSurface::new(40, 20);
        surface.clear(WHITE);
        surface.text(Vec2::new(2.0, 10.0), "1", 7.0, RED, TextOrientation::Horizontal);

        let inked: Vec<(usize, usize)> = (0..20)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .filter(|(x, y)| surface.pixel(*x, *y) == Some(RED))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|(_, y)| *y >= 3 && *y < 10));
    }

    #[test]
    fn test_vertical_text_runs_upward() {
        let mut surface = PixelSurface::new(20, 40);
        surface.clear(WHITE);
        surface.text(Vec2::new(10.0, 30.0), "11", 7.0, RED, TextOrientation::Vertical);

        let inked: Vec<(usize, usize)> = (0..40)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|(x, y)| surface.pixel(*x, *y) == Some(RED))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|(x, y)| *x < 10 && *y < 30));
    }
}
