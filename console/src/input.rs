use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::pointer::{Packet, PacketAssembler};

/// Source of frame timing and pointer packets.
pub trait InputDevice {
    /// Blocks until the next start-of-frame edge.
    fn wait_frame(&mut self);

    /// Next complete packet received so far, `None` once drained.
    fn next_packet(&mut self) -> Option<Packet>;
}

/// Replays a prepared byte stream, one batch of bytes per frame.
///
/// Frames past the end of the script are idle.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    assembler: PacketAssembler,
    frames_waited: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame delivering `packets`.
    pub fn push_frame(&mut self, packets: &[Packet]) -> &mut Self {
        let bytes = packets.iter().flat_map(|packet| packet.to_bytes()).collect();
        self.frames.push_back(bytes);
        self
    }

    /// Queues a frame delivering raw bytes, not necessarily packet aligned.
    pub fn push_raw_frame(&mut self, bytes: &[u8]) -> &mut Self {
        self.frames.push_back(bytes.to_vec());
        self
    }

    pub fn push_idle(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.frames.push_back(Vec::new());
        }
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty() && self.pending.is_empty()
    }

    pub fn frames_waited(&self) -> u64 {
        self.frames_waited
    }
}

impl InputDevice for ScriptedInput {
    fn wait_frame(&mut self) {
        self.frames_waited += 1;
        if let Some(bytes) = self.frames.pop_front() {
            self.pending.extend(bytes);
        }
    }

    fn next_packet(&mut self) -> Option<Packet> {
        while let Some(byte) = self.pending.pop_front() {
            if let Some(packet) = self.assembler.push(byte) {
                return Some(packet);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::Buttons;

    #[test]
    fn packets_are_released_per_frame() {
        let mut input = ScriptedInput::new();
        input
            .push_frame(&[Packet::encode(1, 0, Buttons::NONE)])
            .push_idle(1)
            .push_frame(&[
                Packet::encode(2, 0, Buttons::NONE),
                Packet::encode(3, 0, Buttons::NONE),
            ]);

        assert_eq!(input.next_packet(), None);

        input.wait_frame();
        assert_eq!(input.next_packet().map(|p| p.delta()), Some((1, 0)));
        assert_eq!(input.next_packet(), None);

        input.wait_frame();
        assert_eq!(input.next_packet(), None);

        input.wait_frame();
        assert_eq!(input.next_packet().map(|p| p.delta()), Some((2, 0)));
        assert_eq!(input.next_packet().map(|p| p.delta()), Some((3, 0)));
        assert!(input.is_exhausted());
        assert_eq!(input.frames_waited(), 3);
    }

    #[test]
    fn partial_packet_spans_frames() {
        let bytes = Packet::encode(5, 5, Buttons::PRIMARY).to_bytes();
        let mut input = ScriptedInput::new();
        input.push_raw_frame(&bytes[..2]).push_raw_frame(&bytes[2..]);

        input.wait_frame();
        assert_eq!(input.next_packet(), None);
        input.wait_frame();
        assert_eq!(input.next_packet(), Some(Packet::from_bytes(bytes)));
    }
}
