//! # Radio Metadata
//!
//! Local annotations attached to an envelope while it is held in memory.
//! Metadata is never placed on the medium: it sits after the footer, outside
//! the wire prefix, and is written by the receiving stack after a frame lands.
//!
//! ## Metadata Format (10 bytes)
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0x00    1B    rssi        (signed dBm)
//! 0x01    1B    lqi         (link quality indication)
//! 0x02    1B    tx_power    (transmit power setting)
//! 0x03    1B    flags       (crc_ok:1 | ack_requested:1 | acked:1 | timestamp_valid:1)
//! 0x04    4B    timestamp   (radio ticks)
//! 0x08    2B    rx_interval (low-power-listening interval)
//! ```

use super::nx::{NxU16, NxU32};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Radio metadata size in bytes
pub const METADATA_SIZE: usize = 10;

/// Metadata flag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetadataFlags(u8);

impl MetadataFlags {
    const CRC_OK: u8 = 0x01;
    const ACK_REQUESTED: u8 = 0x02;
    const ACKED: u8 = 0x04;
    const TIMESTAMP_VALID: u8 = 0x08;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub fn as_byte(&self) -> u8 {
        self.0
    }

    fn set(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Frame check sequence matched on reception
    pub fn crc_ok(&self) -> bool {
        (self.0 & Self::CRC_OK) != 0
    }

    pub fn set_crc_ok(&mut self, ok: bool) {
        self.set(Self::CRC_OK, ok);
    }

    pub fn ack_requested(&self) -> bool {
        (self.0 & Self::ACK_REQUESTED) != 0
    }

    pub fn set_ack_requested(&mut self, requested: bool) {
        self.set(Self::ACK_REQUESTED, requested);
    }

    pub fn acked(&self) -> bool {
        (self.0 & Self::ACKED) != 0
    }

    pub fn set_acked(&mut self, acked: bool) {
        self.set(Self::ACKED, acked);
    }

    pub fn timestamp_valid(&self) -> bool {
        (self.0 & Self::TIMESTAMP_VALID) != 0
    }

    pub fn set_timestamp_valid(&mut self, valid: bool) {
        self.set(Self::TIMESTAMP_VALID, valid);
    }
}

/// Local-only packet annotations (10 bytes)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct RadioMetadata {
    rssi: i8,
    lqi: u8,
    tx_power: u8,
    flags: u8,
    timestamp: NxU32,
    rx_interval: NxU16,
}

const _: () = assert!(std::mem::size_of::<RadioMetadata>() == METADATA_SIZE);

impl RadioMetadata {
    pub const SIZE: usize = METADATA_SIZE;

    pub fn rssi(&self) -> i8 {
        self.rssi
    }

    pub fn set_rssi(&mut self, rssi: i8) {
        self.rssi = rssi;
    }

    pub fn lqi(&self) -> u8 {
        self.lqi
    }

    pub fn set_lqi(&mut self, lqi: u8) {
        self.lqi = lqi;
    }

    pub fn tx_power(&self) -> u8 {
        self.tx_power
    }

    pub fn set_tx_power(&mut self, power: u8) {
        self.tx_power = power;
    }

    pub fn flags(&self) -> MetadataFlags {
        MetadataFlags::from_byte(self.flags)
    }

    pub fn set_flags(&mut self, flags: MetadataFlags) {
        self.flags = flags.as_byte();
    }

    /// Apply `f` to the flag byte in place
    pub fn update_flags(&mut self, f: impl FnOnce(&mut MetadataFlags)) {
        let mut flags = self.flags();
        f(&mut flags);
        self.set_flags(flags);
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp.get()
    }

    pub fn set_timestamp(&mut self, timestamp: u32) {
        self.timestamp.set(timestamp);
    }

    pub fn rx_interval(&self) -> u16 {
        self.rx_interval.get()
    }

    pub fn set_rx_interval(&mut self, interval: u16) {
        self.rx_interval.set(interval);
    }

    /// Reset every annotation to zero
    pub fn clear(&mut self) {
        *self = Self::new_zeroed();
    }
}

impl Default for RadioMetadata {
    fn default() -> Self {
        Self::new_zeroed()
    }
}
