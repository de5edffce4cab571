//! Framebuffer export formats.

use std::io::{self, Write};

use sweeper_console::{Display, Palette};

/// Binary PPM (`P6`), each index looked up in `palette`.
pub fn write_ppm<D: Display, W: Write>(display: &D, palette: &Palette, mut out: W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", display.width(), display.height())?;
    for y in 0..display.height() {
        for x in 0..display.width() {
            out.write_all(&palette.rgb(display.read(x, y)))?;
        }
    }
    out.flush()
}

/// One byte per pixel, row-major.
pub fn write_raw<D: Display, W: Write>(display: &D, mut out: W) -> io::Result<()> {
    for y in 0..display.height() {
        let row: Vec<u8> = (0..display.width()).map(|x| display.read(x, y)).collect();
        out.write_all(&row)?;
    }
    out.flush()
}

/// `$readmemh` text: one two-digit hex byte per line, row-major.
pub fn write_hex<D: Display, W: Write>(display: &D, mut out: W) -> io::Result<()> {
    for y in 0..display.height() {
        for x in 0..display.width() {
            writeln!(out, "{:02x}", display.read(x, y))?;
        }
    }
    out.flush()
}
