//! # Frame Check Sequence
//!
//! CRC-16 over the transmitted bytes of an envelope (header and payload).
//!
//! Uses the IEEE 802.15.4 FCS parameters (CRC-16/KERMIT: polynomial 0x1021,
//! reflected, zero init). The checksum value is a logical `u16`; it is stored
//! in the footer through the same canonical-order accessor as every other
//! multi-byte field.

use crc::{Crc, CRC_16_KERMIT};

/// Shared CRC engine with a precomputed table
pub const FCS: Crc<u16> = Crc::<u16>::new(&CRC_16_KERMIT);

/// Compute the frame check sequence over `data`
pub fn fcs(data: &[u8]) -> u16 {
    FCS.checksum(data)
}
