//! XOR crosshair pointer.
//!
//! Painting is its own inverse: drawing the crosshair a second time at the
//! same position restores whatever was underneath, as long as nothing else
//! touched those pixels in between.

use crate::display::Display;

/// Arm length on each side of the centre.
pub const ARM: i32 = 4;

pub const XOR_MASK: u8 = 0xFF;

/// Toggles the crosshair centred on `(x, y)`.
///
/// The horizontal and vertical arms both cover the centre, which therefore
/// ends up unchanged.
pub fn toggle<D: Display + ?Sized>(display: &mut D, x: i32, y: i32) {
    for i in -ARM..=ARM {
        display.xor_pixel(x + i, y, XOR_MASK);
        display.xor_pixel(x, y + i, XOR_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Framebuffer;

    fn patterned(width: u16, height: u16) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                fb.write(x, y, (x * 7 + y * 13) as u8);
            }
        }
        fb
    }

    #[test]
    fn paint_then_erase_restores_pixels() {
        let original = patterned(32, 32);
        let mut fb = original.clone();

        toggle(&mut fb, 10, 12);
        assert_ne!(fb, original);
        toggle(&mut fb, 10, 12);

        assert_eq!(fb, original);
    }

    #[test]
    fn paint_then_erase_restores_pixels_at_edges() {
        let original = patterned(16, 16);
        for &(x, y) in &[(0, 0), (15, 15), (0, 15), (2, 7)] {
            let mut fb = original.clone();
            toggle(&mut fb, x, y);
            toggle(&mut fb, x, y);
            assert_eq!(fb, original, "cursor at ({}, {})", x, y);
        }
    }

    #[test]
    fn crosshair_shape() {
        let mut fb = Framebuffer::new(16, 16);
        toggle(&mut fb, 8, 8);

        assert_eq!(fb.read(8, 8), 0, "centre is toggled twice");
        for i in 1..=ARM {
            let i = i as u16;
            assert_eq!(fb.read(8 - i, 8), XOR_MASK);
            assert_eq!(fb.read(8 + i, 8), XOR_MASK);
            assert_eq!(fb.read(8, 8 - i), XOR_MASK);
            assert_eq!(fb.read(8, 8 + i), XOR_MASK);
        }
        assert_eq!(fb.read(3, 8), 0);
        assert_eq!(fb.read(9, 9), 0);
        let lit = fb.as_bytes().iter().filter(|&&p| p != 0).count();
        assert_eq!(lit, 4 * ARM as usize);
    }
}
