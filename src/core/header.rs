//! # Radio Header
//!
//! Link-layer header carried at the front of every envelope.
//! All multi-byte fields are stored in network byte order.
//!
//! ## Header Format (12 bytes)
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0x00    2B    length   (payload bytes in use)
//! 0x02    2B    fcf      (frame control word)
//! 0x04    1B    dsn      (data sequence number)
//! 0x05    2B    dest_pan (destination PAN, doubles as AM group)
//! 0x07    2B    dest     (destination short address)
//! 0x09    2B    src      (source short address)
//! 0x0B    1B    am_type  (active message dispatch id)
//! ```
//!
//! ## Frame Control Layout
//!
//! ```text
//! Bits 0-2:    frame type (1 = data, 2 = ack)
//! Bit 5:       ack request
//! Bit 6:       PAN id compression
//! Bits 10-11:  destination addressing mode (2 = short)
//! Bits 14-15:  source addressing mode (2 = short)
//! ```

use super::nx::NxU16;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Radio header size in bytes
pub const HEADER_SIZE: usize = 12;

/// Destination address accepted by every node
pub const BROADCAST_ADDR: u16 = 0xFFFF;

/// Frame control word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameControl(u16);

impl FrameControl {
    pub const TYPE_DATA: u8 = 1;
    pub const TYPE_ACK: u8 = 2;
    pub const ADDR_MODE_SHORT: u8 = 2;

    const TYPE_MASK: u16 = 0x0007;
    const ACK_REQUEST: u16 = 1 << 5;
    const PAN_COMPRESSION: u16 = 1 << 6;
    const DEST_MODE_SHIFT: u16 = 10;
    const DEST_MODE_MASK: u16 = 0x03 << 10;
    const SRC_MODE_SHIFT: u16 = 14;
    const SRC_MODE_MASK: u16 = 0x03 << 14;

    /// Create an empty frame control word
    pub fn new() -> Self {
        Self(0)
    }

    /// Data frame with PAN id compression and short addressing on both ends
    pub fn data() -> Self {
        let mut fcf = Self::new();
        fcf.set_frame_type(Self::TYPE_DATA);
        fcf.set_pan_compression(true);
        fcf.set_dest_addr_mode(Self::ADDR_MODE_SHORT);
        fcf.set_src_addr_mode(Self::ADDR_MODE_SHORT);
        fcf
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Get frame type (bits 0-2)
    pub fn frame_type(&self) -> u8 {
        (self.0 & Self::TYPE_MASK) as u8
    }

    /// Set frame type (0-7)
    pub fn set_frame_type(&mut self, frame_type: u8) {
        self.0 = (self.0 & !Self::TYPE_MASK) | (u16::from(frame_type) & Self::TYPE_MASK);
    }

    pub fn ack_request(&self) -> bool {
        (self.0 & Self::ACK_REQUEST) != 0
    }

    pub fn set_ack_request(&mut self, want: bool) {
        if want {
            self.0 |= Self::ACK_REQUEST;
        } else {
            self.0 &= !Self::ACK_REQUEST;
        }
    }

    pub fn pan_compression(&self) -> bool {
        (self.0 & Self::PAN_COMPRESSION) != 0
    }

    pub fn set_pan_compression(&mut self, on: bool) {
        if on {
            self.0 |= Self::PAN_COMPRESSION;
        } else {
            self.0 &= !Self::PAN_COMPRESSION;
        }
    }

    /// Destination addressing mode (bits 10-11)
    pub fn dest_addr_mode(&self) -> u8 {
        ((self.0 & Self::DEST_MODE_MASK) >> Self::DEST_MODE_SHIFT) as u8
    }

    pub fn set_dest_addr_mode(&mut self, mode: u8) {
        self.0 = (self.0 & !Self::DEST_MODE_MASK)
            | ((u16::from(mode) << Self::DEST_MODE_SHIFT) & Self::DEST_MODE_MASK);
    }

    /// Source addressing mode (bits 14-15)
    pub fn src_addr_mode(&self) -> u8 {
        ((self.0 & Self::SRC_MODE_MASK) >> Self::SRC_MODE_SHIFT) as u8
    }

    pub fn set_src_addr_mode(&mut self, mode: u8) {
        self.0 = (self.0 & !Self::SRC_MODE_MASK)
            | ((u16::from(mode) << Self::SRC_MODE_SHIFT) & Self::SRC_MODE_MASK);
    }
}

/// Link-layer radio header (12 bytes, network byte order)
///
/// Fields are private; every access goes through a typed accessor so the
/// width of a read or write always matches the field it targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct RadioHeader {
    length: NxU16,
    fcf: NxU16,
    dsn: u8,
    dest_pan: NxU16,
    dest: NxU16,
    src: NxU16,
    am_type: u8,
}

const _: () = assert!(std::mem::size_of::<RadioHeader>() == HEADER_SIZE);

impl RadioHeader {
    /// Header size in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Payload bytes in use
    pub fn length(&self) -> u16 {
        self.length.get()
    }

    pub fn set_length(&mut self, length: u16) {
        self.length.set(length);
    }

    pub fn fcf(&self) -> u16 {
        self.fcf.get()
    }

    pub fn set_fcf(&mut self, fcf: u16) {
        self.fcf.set(fcf);
    }

    pub fn frame_control(&self) -> FrameControl {
        FrameControl::from_bits(self.fcf())
    }

    pub fn set_frame_control(&mut self, fcf: FrameControl) {
        self.set_fcf(fcf.bits());
    }

    pub fn dsn(&self) -> u8 {
        self.dsn
    }

    pub fn set_dsn(&mut self, dsn: u8) {
        self.dsn = dsn;
    }

    pub fn dest_pan(&self) -> u16 {
        self.dest_pan.get()
    }

    pub fn set_dest_pan(&mut self, pan: u16) {
        self.dest_pan.set(pan);
    }

    pub fn dest(&self) -> u16 {
        self.dest.get()
    }

    pub fn set_dest(&mut self, dest: u16) {
        self.dest.set(dest);
    }

    pub fn src(&self) -> u16 {
        self.src.get()
    }

    pub fn set_src(&mut self, src: u16) {
        self.src.set(src);
    }

    pub fn am_type(&self) -> u8 {
        self.am_type
    }

    pub fn set_am_type(&mut self, am_type: u8) {
        self.am_type = am_type;
    }

    /// Check if this frame is addressed to every node
    pub fn is_broadcast(&self) -> bool {
        self.dest() == BROADCAST_ADDR
    }
}

impl Default for RadioHeader {
    fn default() -> Self {
        Self::new_zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_control_data() {
        let fcf = FrameControl::data();

        assert_eq!(fcf.frame_type(), FrameControl::TYPE_DATA);
        assert!(fcf.pan_compression());
        assert!(!fcf.ack_request());
        assert_eq!(fcf.dest_addr_mode(), FrameControl::ADDR_MODE_SHORT);
        assert_eq!(fcf.src_addr_mode(), FrameControl::ADDR_MODE_SHORT);
        assert_eq!(fcf.bits(), 0x8841);
    }

    #[test]
    fn test_frame_control_bits_are_independent() {
        let mut fcf = FrameControl::new();

        fcf.set_ack_request(true);
        fcf.set_frame_type(FrameControl::TYPE_ACK);
        fcf.set_src_addr_mode(3);
        assert!(fcf.ack_request());
        assert_eq!(fcf.frame_type(), FrameControl::TYPE_ACK);
        assert_eq!(fcf.src_addr_mode(), 3);
        assert_eq!(fcf.dest_addr_mode(), 0);

        fcf.set_ack_request(false);
        assert!(!fcf.ack_request());
        assert_eq!(fcf.frame_type(), FrameControl::TYPE_ACK);

        // Out of range values are masked, not spilled into neighbours
        fcf.set_frame_type(0xFF);
        assert_eq!(fcf.frame_type(), 7);
        assert!(!fcf.ack_request());
    }

    #[test]
    fn test_header_size() {
        assert_eq!(RadioHeader::SIZE, 12);
        assert_eq!(RadioHeader::default().as_bytes().len(), HEADER_SIZE);
    }

    #[test]
    fn test_header_field_offsets() {
        let mut header = RadioHeader::default();
        header.set_length(0x1234);
        header.set_fcf(0x8841);
        header.set_dsn(0x07);
        header.set_dest_pan(0x0022);
        header.set_dest(0xABCD);
        header.set_src(0x0102);
        header.set_am_type(0x99);

        assert_eq!(
            header.as_bytes(),
            &[0x12, 0x34, 0x88, 0x41, 0x07, 0x00, 0x22, 0xAB, 0xCD, 0x01, 0x02, 0x99]
        );
    }

    #[test]
    fn test_header_boundary_values() {
        let mut header = RadioHeader::default();
        for value in [0u16, u16::MAX, u16::MAX / 2] {
            header.set_length(value);
            header.set_dest_pan(value);
            header.set_dest(value);
            header.set_src(value);
            header.set_fcf(value);
            assert_eq!(header.length(), value);
            assert_eq!(header.dest_pan(), value);
            assert_eq!(header.dest(), value);
            assert_eq!(header.src(), value);
            assert_eq!(header.fcf(), value);
        }
    }

    #[test]
    fn test_header_writes_do_not_touch_neighbours() {
        let mut header = RadioHeader::default();
        header.set_dest(0xFFFF);

        let bytes = header.as_bytes();
        assert_eq!(&bytes[..7], &[0u8; 7]);
        assert_eq!(&bytes[7..9], &[0xFF, 0xFF]);
        assert_eq!(&bytes[9..], &[0u8; 3]);
    }

    #[test]
    fn test_header_reinterpret_from_bytes() {
        let raw = [0x00, 0x05, 0x88, 0x41, 0x10, 0x00, 0x22, 0xFF, 0xFF, 0x00, 0x01, 0x06];
        let header = RadioHeader::ref_from_bytes(&raw[..]).unwrap();

        assert_eq!(header.length(), 5);
        assert_eq!(header.frame_control(), FrameControl::data());
        assert_eq!(header.dsn(), 0x10);
        assert_eq!(header.dest_pan(), 0x22);
        assert!(header.is_broadcast());
        assert_eq!(header.src(), 1);
        assert_eq!(header.am_type(), 6);
    }
}
