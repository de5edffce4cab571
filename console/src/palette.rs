//! Colour indices into the default VGA 256-colour palette.

/// Index into the hardware palette.
pub type ColorIndex = u8;

pub mod color {
    use super::ColorIndex;

    pub const BLACK: ColorIndex = 0x00;
    pub const BLUE: ColorIndex = 0x01;
    pub const GREEN: ColorIndex = 0x02;
    pub const CYAN: ColorIndex = 0x03;
    pub const RED: ColorIndex = 0x04;
    pub const MAGENTA: ColorIndex = 0x05;
    pub const BROWN: ColorIndex = 0x06;
    pub const GRAY_LIGHT: ColorIndex = 0x07;
    pub const GRAY_DARK: ColorIndex = 0x08;
    pub const WHITE: ColorIndex = 0x0F;
    pub const YELLOW: ColorIndex = 0x2C;

    pub const BACKGROUND: ColorIndex = CYAN;
    pub const TILE_FACE: ColorIndex = GRAY_LIGHT;
    pub const BEVEL_LIGHT: ColorIndex = WHITE;
    pub const BEVEL_DARK: ColorIndex = GRAY_DARK;
}

/// Digit colour by neighbour count; index 0 is never drawn.
pub const NUMBER_COLORS: [ColorIndex; 9] = [
    color::BLACK,
    color::BLUE,
    color::GREEN,
    color::RED,
    color::MAGENTA,
    color::BROWN,
    color::CYAN,
    color::BLACK,
    color::GRAY_DARK,
];

/// 6-bit DAC components of the 16 CGA/EGA compatible entries.
const STANDARD_16: [[u8; 3]; 16] = [
    [0, 0, 0],
    [0, 0, 42],
    [0, 42, 0],
    [0, 42, 42],
    [42, 0, 0],
    [42, 0, 42],
    [42, 21, 0],
    [42, 42, 42],
    [21, 21, 21],
    [21, 21, 63],
    [21, 63, 21],
    [21, 63, 63],
    [63, 21, 21],
    [63, 21, 63],
    [63, 63, 21],
    [63, 63, 63],
];

/// RGB888 lookup for every colour index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [[u8; 3]; 256],
}

impl Palette {
    /// The procedural default mode 13h palette: 16 standard colours, a 16 step
    /// grey ramp, 216 hue ramp entries and a black remainder.
    pub fn vga256() -> Self {
        let mut dac = [[0u8; 3]; 256];

        dac[..16].copy_from_slice(&STANDARD_16);

        for i in 0..16 {
            let level = ((i as f64 / 15.0) * 63.0) as u8;
            dac[16 + i] = [level; 3];
        }

        let mut index = 32;
        for saturation in 0..3u8 {
            for hue in 0..24u8 {
                for intensity in 0..3u8 {
                    let v = (intensity + 1) * 21;
                    let half = v / 2;
                    let (r, g, b) = match hue {
                        0..8 => (
                            if hue >= 4 { v } else { half },
                            if hue < 4 { v } else { half },
                            0,
                        ),
                        8..16 => (
                            0,
                            if hue >= 12 { v } else { half },
                            if hue < 12 { v } else { half },
                        ),
                        _ => (
                            if hue >= 20 { v } else { half },
                            0,
                            if hue < 20 { v } else { half },
                        ),
                    };
                    let lift = saturation * 21;
                    let desaturate = |c: u8| if c < 63 { c + lift } else { 63 };
                    dac[index] = [desaturate(r), desaturate(g), desaturate(b)];
                    index += 1;
                }
            }
        }

        let mut entries = [[0u8; 3]; 256];
        for (rgb, components) in entries.iter_mut().zip(dac.iter()) {
            *rgb = components.map(scale_dac);
        }
        Self { entries }
    }

    pub fn rgb(&self, index: ColorIndex) -> [u8; 3] {
        self.entries[usize::from(index)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::vga256()
    }
}

/// 6-bit DAC level to 8-bit, rounded, saturating.
fn scale_dac(level: u8) -> u8 {
    let scaled = (u16::from(level) * 255 + 31) / 63;
    scaled.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_entries_scale_to_full_range() {
        let palette = Palette::vga256();
        assert_eq!(palette.rgb(color::BLACK), [0, 0, 0]);
        assert_eq!(palette.rgb(color::WHITE), [255, 255, 255]);
        assert_eq!(palette.rgb(color::RED), [170, 0, 0]);
        assert_eq!(palette.rgb(color::BROWN), [170, 85, 0]);
        assert_eq!(palette.rgb(color::GRAY_DARK), [85, 85, 85]);
    }

    #[test]
    fn grey_ramp_is_monotonic() {
        let palette = Palette::vga256();
        let ramp: [[u8; 3]; 16] = core::array::from_fn(|i| palette.rgb(16 + i as u8));
        assert_eq!(ramp[0], [0, 0, 0]);
        assert_eq!(ramp[15], [255, 255, 255]);
        assert!(ramp.windows(2).all(|pair| pair[0][0] <= pair[1][0]));
    }

    #[test]
    fn remainder_is_black() {
        let palette = Palette::vga256();
        for index in 248..=255 {
            assert_eq!(palette.rgb(index), [0, 0, 0]);
        }
    }

    #[test]
    fn pastel_entries_saturate() {
        // third saturation group, first hue, brightest intensity
        let palette = Palette::vga256();
        let index = 32 + 2 * 72 + 2;
        assert_eq!(palette.rgb(index), [scale_dac(31 + 42), 255, scale_dac(42)]);
    }
}
