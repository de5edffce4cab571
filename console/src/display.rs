//! Byte-per-pixel indexed colour surfaces.

use ndarray::Array2;

use crate::palette::ColorIndex;

/// A linear, row-major, byte-per-pixel surface.
///
/// Implementors only provide in-bounds access; the provided methods take
/// signed coordinates and silently clip everything outside the surface.
pub trait Display {
    fn width(&self) -> u16;

    fn height(&self) -> u16;

    /// Caller guarantees `x < width` and `y < height`.
    fn write(&mut self, x: u16, y: u16, color: ColorIndex);

    /// Caller guarantees `x < width` and `y < height`.
    fn read(&self, x: u16, y: u16) -> ColorIndex;

    fn contains(&self, x: i32, y: i32) -> bool {
        (0..i32::from(self.width())).contains(&x) && (0..i32::from(self.height())).contains(&y)
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: ColorIndex) {
        if self.contains(x, y) {
            self.write(x as u16, y as u16, color);
        }
    }

    /// Read back a pixel, `None` when off-surface.
    fn pixel(&self, x: i32, y: i32) -> Option<ColorIndex> {
        self.contains(x, y).then(|| self.read(x as u16, y as u16))
    }

    fn xor_pixel(&mut self, x: i32, y: i32, mask: u8) {
        if self.contains(x, y) {
            let (x, y) = (x as u16, y as u16);
            let value = self.read(x, y);
            self.write(x, y, value ^ mask);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + w).min(i32::from(self.width()));
        let y_end = (y + h).min(i32::from(self.height()));
        for py in y_start..y_end {
            for px in x_start..x_end {
                self.write(px as u16, py as u16, color);
            }
        }
    }

    fn clear(&mut self, color: ColorIndex) {
        self.fill_rect(0, 0, self.width().into(), self.height().into(), color);
    }
}

/// In-memory surface, used for simulation and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Array2<ColorIndex>,
}

impl Framebuffer {
    pub const VGA_WIDTH: u16 = 320;
    pub const VGA_HEIGHT: u16 = 200;

    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pixels: Array2::zeros((usize::from(height), usize::from(width))),
        }
    }

    /// The 320×200 mode 13h surface.
    pub fn vga() -> Self {
        Self::new(Self::VGA_WIDTH, Self::VGA_HEIGHT)
    }

    /// Row-major pixel bytes, exactly as scanned out.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels
            .as_slice()
            .expect("framebuffer layout should be standard")
    }

    pub fn pixels(&self) -> &Array2<ColorIndex> {
        &self.pixels
    }
}

impl Display for Framebuffer {
    fn width(&self) -> u16 {
        self.pixels.ncols() as u16
    }

    fn height(&self) -> u16 {
        self.pixels.nrows() as u16
    }

    fn write(&mut self, x: u16, y: u16, color: ColorIndex) {
        self.pixels[[usize::from(y), usize::from(x)]] = color;
    }

    fn read(&self, x: u16, y: u16) -> ColorIndex {
        self.pixels[[usize::from(y), usize::from(x)]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_pixel_clips_silently() {
        let mut fb = Framebuffer::new(4, 3);
        fb.put_pixel(-1, 0, 9);
        fb.put_pixel(0, -1, 9);
        fb.put_pixel(4, 0, 9);
        fb.put_pixel(0, 3, 9);
        assert!(fb.as_bytes().iter().all(|&p| p == 0));

        fb.put_pixel(3, 2, 9);
        assert_eq!(fb.as_bytes()[2 * 4 + 3], 9);
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(-2, 2, 4, 10, 5);

        for y in 0..4 {
            for x in 0..4 {
                let expected = if x < 2 && y >= 2 { 5 } else { 0 };
                assert_eq!(fb.read(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn xor_pixel_is_self_inverse() {
        let mut fb = Framebuffer::new(2, 2);
        fb.write(1, 1, 0x07);
        fb.xor_pixel(1, 1, 0xFF);
        assert_eq!(fb.read(1, 1), 0xF8);
        fb.xor_pixel(1, 1, 0xFF);
        assert_eq!(fb.read(1, 1), 0x07);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = Framebuffer::vga();
        fb.clear(3);
        assert_eq!(fb.as_bytes().len(), 320 * 200);
        assert!(fb.as_bytes().iter().all(|&p| p == 3));
        assert_eq!(fb.pixel(319, 199), Some(3));
        assert_eq!(fb.pixel(320, 0), None);
    }
}
