//! Board rendering, pointer input and the frame loop for a 320×200
//! palette-indexed console.
//!
//! Everything here is generic over [`Display`] and [`InputDevice`]; the
//! [`mmio`] module binds them to memory-mapped hardware while
//! [`Framebuffer`] and [`ScriptedInput`] run the same code in memory.

#![no_std]

extern crate alloc;

pub mod cursor;
pub mod display;
pub mod frame;
pub mod glyph;
pub mod input;
pub mod mmio;
pub mod palette;
pub mod pointer;
pub mod render;

pub use display::{Display, Framebuffer};
pub use frame::{FrameLoop, Redraw, Settings};
pub use input::{InputDevice, ScriptedInput};
pub use mmio::MmioMap;
pub use palette::{ColorIndex, Palette};
pub use pointer::{Buttons, Packet, PointerState};
pub use render::{Geometry, Renderer};
