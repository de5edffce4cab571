//! Memory-mapped display and pointer hardware.

use core::ptr::{read_volatile, write_volatile};

use crate::display::{Display, Framebuffer};
use crate::frame::FrameLoop;
use crate::input::InputDevice;
use crate::palette::ColorIndex;
use crate::pointer::{Packet, PacketAssembler};

const MOUSE_STATUS: usize = 0x00;
const MOUSE_DATA: usize = 0x04;
const MOUSE_CMD: usize = 0x08;
const MOUSE_STATUS_RX_READY: u32 = 1 << 0;
/// PS/2 "enable data reporting".
const MOUSE_ENABLE_REPORTING: u32 = 0xF4;

const VIDEO_STATUS_VBLANK: u32 = 1 << 0;

/// Base addresses of the memory-mapped peripherals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MmioMap {
    pub framebuffer: usize,
    pub video_status: usize,
    pub mouse: usize,
}

impl MmioMap {
    pub const DEFAULT: Self = Self {
        framebuffer: 0xA000_0000,
        video_status: 0xB000_0000,
        mouse: 0xC000_0000,
    };
}

impl Default for MmioMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Linear byte-per-pixel framebuffer in device memory.
#[derive(Debug)]
pub struct MmioFramebuffer {
    base: *mut u8,
    width: u16,
    height: u16,
}

impl MmioFramebuffer {
    /// # Safety
    ///
    /// `base` must point to `width * height` bytes of writable video memory
    /// that nothing else accesses while this value exists.
    pub unsafe fn new(base: usize, width: u16, height: u16) -> Self {
        Self {
            base: base as *mut u8,
            width,
            height,
        }
    }

    fn offset(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }
}

impl Display for MmioFramebuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn write(&mut self, x: u16, y: u16, color: ColorIndex) {
        debug_assert!(x < self.width && y < self.height);
        // SAFETY: in bounds per the trait contract, region owned per `new`
        unsafe { write_volatile(self.base.add(self.offset(x, y)), color) }
    }

    fn read(&self, x: u16, y: u16) -> ColorIndex {
        debug_assert!(x < self.width && y < self.height);
        // SAFETY: in bounds per the trait contract, region owned per `new`
        unsafe { read_volatile(self.base.add(self.offset(x, y))) }
    }
}

/// PS/2 pointer data port plus the vertical blank status bit.
#[derive(Debug)]
pub struct MmioInput {
    mouse: *mut u32,
    video_status: *const u32,
    assembler: PacketAssembler,
}

impl MmioInput {
    /// # Safety
    ///
    /// `map.mouse` and `map.video_status` must address the pointer controller
    /// and video status registers, with no other user of either.
    pub unsafe fn new(map: MmioMap) -> Self {
        Self {
            mouse: map.mouse as *mut u32,
            video_status: map.video_status as *const u32,
            assembler: PacketAssembler::new(),
        }
    }

    fn register(&self, offset: usize) -> *mut u32 {
        self.mouse.wrapping_byte_add(offset)
    }

    /// Asks the device to start streaming movement packets.
    pub fn enable_reporting(&mut self) {
        // SAFETY: register addresses valid per `new`
        unsafe { write_volatile(self.register(MOUSE_CMD), MOUSE_ENABLE_REPORTING) }
    }

    fn vblank(&self) -> bool {
        // SAFETY: register address valid per `new`
        unsafe { read_volatile(self.video_status) & VIDEO_STATUS_VBLANK != 0 }
    }

    fn read_byte(&self) -> Option<u8> {
        // SAFETY: register addresses valid per `new`
        unsafe {
            if read_volatile(self.register(MOUSE_STATUS)) & MOUSE_STATUS_RX_READY == 0 {
                return None;
            }
            Some((read_volatile(self.register(MOUSE_DATA)) & 0xFF) as u8)
        }
    }
}

impl InputDevice for MmioInput {
    /// Waits out any blank already in progress, then for a full rising and
    /// falling edge of the next one.
    fn wait_frame(&mut self) {
        while self.vblank() {
            core::hint::spin_loop();
        }
        while !self.vblank() {
            core::hint::spin_loop();
        }
        while self.vblank() {
            core::hint::spin_loop();
        }
    }

    fn next_packet(&mut self) -> Option<Packet> {
        while let Some(byte) = self.read_byte() {
            if let Some(packet) = self.assembler.push(byte) {
                return Some(packet);
            }
        }
        None
    }
}

/// Boots the game on the peripherals described by `map`.
///
/// # Safety
///
/// `map` must describe the machine's real peripherals, with a
/// [`Framebuffer::VGA_WIDTH`]×[`Framebuffer::VGA_HEIGHT`] surface, and the
/// caller must not access them afterwards.
pub unsafe fn run(map: MmioMap, seed: u64) -> ! {
    // SAFETY: forwarded from the caller
    let display = unsafe {
        MmioFramebuffer::new(map.framebuffer, Framebuffer::VGA_WIDTH, Framebuffer::VGA_HEIGHT)
    };
    // SAFETY: forwarded from the caller
    let mut input = unsafe { MmioInput::new(map) };
    input.enable_reporting();
    log::info!("Pointer reporting enabled");
    FrameLoop::new(display, input, seed).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::Buttons;

    #[test]
    fn framebuffer_writes_row_major() {
        let mut memory = [0u8; 6 * 4];
        let base = memory.as_mut_ptr() as usize;
        // SAFETY: `memory` outlives the framebuffer and is not touched meanwhile
        let mut fb = unsafe { MmioFramebuffer::new(base, 6, 4) };

        fb.put_pixel(5, 2, 0x0F);
        fb.put_pixel(6, 2, 0x0F);
        fb.xor_pixel(0, 1, 0xFF);
        assert_eq!(fb.pixel(5, 2), Some(0x0F));
        drop(fb);

        assert_eq!(memory[2 * 6 + 5], 0x0F);
        assert_eq!(memory[6], 0xFF);
        assert_eq!(memory.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn input_drains_ready_bytes() {
        // status, data, command
        let mut mouse = [MOUSE_STATUS_RX_READY, 0, 0];
        let video = [VIDEO_STATUS_VBLANK];
        let map = MmioMap {
            framebuffer: 0,
            video_status: video.as_ptr() as usize,
            mouse: mouse.as_mut_ptr() as usize,
        };
        // SAFETY: both arrays outlive the device
        let mut input = unsafe { MmioInput::new(map) };

        let packet = Packet::encode(7, -7, Buttons::SECONDARY);
        let mut received = None;
        for byte in packet.to_bytes() {
            // SAFETY: the data register is the second word of `mouse`
            unsafe { write_volatile(input.register(MOUSE_DATA), u32::from(byte)) };
            let byte = input.read_byte().unwrap();
            received = input.assembler.push(byte);
        }
        assert_eq!(received, Some(packet));
        assert!(input.vblank());

        // SAFETY: the status register is the first word of `mouse`
        unsafe { write_volatile(input.register(MOUSE_STATUS), 0) };
        assert_eq!(input.read_byte(), None);
        assert_eq!(input.next_packet(), None);

        input.enable_reporting();
        // SAFETY: the command register is the third word of `mouse`
        assert_eq!(unsafe { read_volatile(input.register(MOUSE_CMD)) }, MOUSE_ENABLE_REPORTING);
    }
}
