//! PS/2 style relative pointer decoding.
//!
//! A packet is three bytes: a header with buttons, sync and sign bits, then
//! the X and Y movement. Bytes arrive one at a time and are reassembled by
//! [`PacketAssembler`]; [`Pointer`] applies complete packets to an absolute,
//! clamped position.

use bitflags::bitflags;

bitflags! {
    /// Header byte of a movement packet.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct PacketFlags: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE = 1 << 2;
        /// Always set in a well-formed header.
        const SYNC = 1 << 3;
        const X_SIGN = 1 << 4;
        const Y_SIGN = 1 << 5;
        const X_OVERFLOW = 1 << 6;
        const Y_OVERFLOW = 1 << 7;
    }
}

pub const PACKET_LEN: usize = 3;

/// Button levels as reported by a packet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub primary: bool,
    pub secondary: bool,
}

impl Buttons {
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
    };
    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
    };
    pub const SECONDARY: Self = Self {
        primary: false,
        secondary: true,
    };

    /// Buttons that are down now but were up in `previous`.
    pub fn pressed_since(self, previous: Self) -> Self {
        Self {
            primary: self.primary && !previous.primary,
            secondary: self.secondary && !previous.secondary,
        }
    }
}

/// One raw movement packet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Packet {
    pub flags: PacketFlags,
    pub dx: u8,
    pub dy: u8,
}

impl Packet {
    /// Largest motion a single packet can carry on one axis.
    pub const MAX_DELTA: i16 = 255;
    pub const MIN_DELTA: i16 = -256;

    pub const fn from_bytes([header, dx, dy]: [u8; PACKET_LEN]) -> Self {
        Self {
            flags: PacketFlags::from_bits_retain(header),
            dx,
            dy,
        }
    }

    pub const fn to_bytes(self) -> [u8; PACKET_LEN] {
        [self.flags.bits(), self.dx, self.dy]
    }

    /// Encodes a well-formed packet. Deltas are clamped to what 9 bits hold;
    /// `dy` is positive upwards, as the device reports it.
    pub fn encode(dx: i16, dy: i16, buttons: Buttons) -> Self {
        let dx = dx.clamp(Self::MIN_DELTA, Self::MAX_DELTA);
        let dy = dy.clamp(Self::MIN_DELTA, Self::MAX_DELTA);

        let mut flags = PacketFlags::SYNC;
        flags.set(PacketFlags::PRIMARY, buttons.primary);
        flags.set(PacketFlags::SECONDARY, buttons.secondary);
        flags.set(PacketFlags::X_SIGN, dx < 0);
        flags.set(PacketFlags::Y_SIGN, dy < 0);

        Self {
            flags,
            dx: dx as u8,
            dy: dy as u8,
        }
    }

    pub fn is_synced(&self) -> bool {
        self.flags.contains(PacketFlags::SYNC)
    }

    /// Sign-extended `(dx, dy)` in device orientation.
    pub fn delta(&self) -> (i16, i16) {
        (
            sign_extend(self.dx, self.flags.contains(PacketFlags::X_SIGN)),
            sign_extend(self.dy, self.flags.contains(PacketFlags::Y_SIGN)),
        )
    }

    pub fn buttons(&self) -> Buttons {
        Buttons {
            primary: self.flags.contains(PacketFlags::PRIMARY),
            secondary: self.flags.contains(PacketFlags::SECONDARY),
        }
    }
}

fn sign_extend(low: u8, negative: bool) -> i16 {
    let value = i16::from(low);
    if negative { value | !0xFF } else { value }
}

/// Collects the bytes of one packet.
#[derive(Clone, Debug, Default)]
pub struct PacketAssembler {
    bytes: [u8; PACKET_LEN],
    len: usize,
}

impl PacketAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte; returns the packet once its last byte arrives.
    pub fn push(&mut self, byte: u8) -> Option<Packet> {
        self.bytes[self.len] = byte;
        self.len += 1;
        if self.len < PACKET_LEN {
            return None;
        }
        self.len = 0;
        Some(Packet::from_bytes(self.bytes))
    }

    pub fn pending(&self) -> usize {
        self.len
    }
}

/// Absolute pointer position and button levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub buttons: Buttons,
}

/// Applies packets to a position clamped to `[0, width) × [0, height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pointer {
    state: PointerState,
    width: u16,
    height: u16,
}

impl Pointer {
    /// Starts in the middle of the surface with no buttons held.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            state: PointerState {
                x: i32::from(width / 2),
                y: i32::from(height / 2),
                buttons: Buttons::NONE,
            },
            width,
            height,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Applies one packet. Packets without the sync bit are dropped and leave
    /// the state untouched; returns whether the packet was accepted.
    pub fn apply(&mut self, packet: Packet) -> bool {
        if !packet.is_synced() {
            log::trace!("Dropped unsynced packet {:02x?}", packet.to_bytes());
            return false;
        }

        let (dx, dy) = packet.delta();
        let max_x = i32::from(self.width.max(1)) - 1;
        let max_y = i32::from(self.height.max(1)) - 1;
        self.state.x = (self.state.x + i32::from(dx)).clamp(0, max_x);
        // device Y grows upwards, the surface grows downwards
        self.state.y = (self.state.y - i32::from(dy)).clamp(0, max_y);
        self.state.buttons = packet.buttons();
        true
    }
}
