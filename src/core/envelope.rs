//! # Packet Envelope
//!
//! Fixed-size radio packet buffer: header, payload, footer and metadata
//! concatenated in that order with no padding.
//!
//! ```text
//! [Header(12)] [Payload(PAYLOAD_CAPACITY)] [Footer(2)] [Metadata(10)]
//! |<------------------ wire prefix ------------------>|
//! ```
//!
//! The envelope reserves the full payload capacity at all times. How many
//! payload bytes are in use is recorded in the header length field and is
//! the business of the layer above; the envelope neither checks nor zeroes
//! the unused tail.
//!
//! Because every sub-block is built from alignment-1 canonical-order fields,
//! the bytes returned by [`Envelope::wire_bytes`] are already the on-air
//! representation. No conversion step runs when a frame is handed to the
//! radio, and a received frame is reinterpreted in place.

use super::footer::{RadioFooter, FOOTER_SIZE};
use super::header::{RadioHeader, HEADER_SIZE};
use super::metadata::{RadioMetadata, METADATA_SIZE};
use super::PAYLOAD_CAPACITY;
use crate::error::{EnvelopeError, Result};
use crate::utils::checksum;
use bytes::Bytes;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Byte offset of the payload region
pub const PAYLOAD_OFFSET: usize = HEADER_SIZE;

/// Byte offset of the footer
pub const FOOTER_OFFSET: usize = PAYLOAD_OFFSET + PAYLOAD_CAPACITY;

/// Byte offset of the metadata block
pub const METADATA_OFFSET: usize = FOOTER_OFFSET + FOOTER_SIZE;

/// Bytes placed on the medium: header, payload and footer
pub const WIRE_SIZE: usize = HEADER_SIZE + PAYLOAD_CAPACITY + FOOTER_SIZE;

/// Total in-memory size including metadata
pub const ENVELOPE_SIZE: usize = WIRE_SIZE + METADATA_SIZE;

#[derive(
    Debug, Clone, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct Envelope {
    header: RadioHeader,
    payload: [u8; PAYLOAD_CAPACITY],
    footer: RadioFooter,
    metadata: RadioMetadata,
}

const _: () = assert!(std::mem::size_of::<Envelope>() == ENVELOPE_SIZE);
const _: () = assert!(std::mem::offset_of!(Envelope, payload) == PAYLOAD_OFFSET);
const _: () = assert!(std::mem::offset_of!(Envelope, footer) == FOOTER_OFFSET);
const _: () = assert!(std::mem::offset_of!(Envelope, metadata) == METADATA_OFFSET);

impl Envelope {
    /// Payload capacity in bytes
    pub const CAPACITY: usize = PAYLOAD_CAPACITY;

    /// Allocate a zero-filled envelope
    pub fn new() -> Self {
        Self::new_zeroed()
    }

    /// Allocate a zero-filled envelope directly on the heap
    pub fn new_boxed() -> Result<Box<Self>> {
        Self::new_box_zeroed().map_err(|_| EnvelopeError::AllocFailed)
    }

    /// Reinterpret a buffer-pool slot as an envelope without copying
    pub fn from_slot(slot: &[u8]) -> Result<&Self> {
        Self::ref_from_bytes(slot).map_err(|_| EnvelopeError::SlotSize {
            expected: ENVELOPE_SIZE,
            actual: slot.len(),
        })
    }

    /// Mutable in-place view of a buffer-pool slot
    pub fn from_slot_mut(slot: &mut [u8]) -> Result<&mut Self> {
        let actual = slot.len();
        Self::mut_from_bytes(slot).map_err(|_| EnvelopeError::SlotSize {
            expected: ENVELOPE_SIZE,
            actual,
        })
    }

    pub fn header(&self) -> &RadioHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut RadioHeader {
        &mut self.header
    }

    pub fn footer(&self) -> &RadioFooter {
        &self.footer
    }

    pub fn footer_mut(&mut self) -> &mut RadioFooter {
        &mut self.footer
    }

    pub fn metadata(&self) -> &RadioMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut RadioMetadata {
        &mut self.metadata
    }

    /// The full payload region, independent of the logical length
    pub fn payload(&self) -> &[u8; PAYLOAD_CAPACITY] {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut [u8; PAYLOAD_CAPACITY] {
        &mut self.payload
    }

    /// Single payload byte; `None` past the capacity
    pub fn payload_byte(&self, index: usize) -> Option<u8> {
        self.payload.get(index).copied()
    }

    /// Every byte of the envelope, metadata included
    pub fn as_raw(&self) -> &[u8] {
        self.as_bytes()
    }

    /// The bytes a radio puts on the medium
    pub fn wire_bytes(&self) -> &[u8] {
        &self.as_bytes()[..WIRE_SIZE]
    }

    /// Owned copy of the wire bytes for handing across a queue
    pub fn to_wire(&self) -> Bytes {
        Bytes::copy_from_slice(self.wire_bytes())
    }

    /// Copy a received frame into the wire prefix
    ///
    /// The frame must be exactly [`WIRE_SIZE`] bytes. Metadata is left as it
    /// was; the receiver stamps it afterwards.
    pub fn load_wire(&mut self, frame: &[u8]) -> Result<()> {
        Self::check_wire_length(frame)?;
        self.as_mut_bytes()[..WIRE_SIZE].copy_from_slice(frame);
        Ok(())
    }

    /// Reject frames that are not exactly [`WIRE_SIZE`] bytes
    pub fn check_wire_length(frame: &[u8]) -> Result<()> {
        if frame.len() < WIRE_SIZE {
            return Err(EnvelopeError::TruncatedFrame {
                expected: WIRE_SIZE,
                actual: frame.len(),
            });
        }
        if frame.len() > WIRE_SIZE {
            return Err(EnvelopeError::OversizedFrame {
                expected: WIRE_SIZE,
                actual: frame.len(),
            });
        }
        Ok(())
    }

    /// Frame check sequence over the header and the full payload region
    pub fn compute_fcs(&self) -> u16 {
        checksum::fcs(&self.as_bytes()[..FOOTER_OFFSET])
    }

    /// Write the frame check sequence into the footer
    pub fn seal(&mut self) -> u16 {
        let fcs = self.compute_fcs();
        self.footer.set_fcs(fcs);
        fcs
    }

    /// Compare the stored frame check sequence with a fresh computation
    pub fn verify_fcs(&self) -> Result<()> {
        let expected = self.footer.fcs();
        let actual = self.compute_fcs();
        if expected == actual {
            Ok(())
        } else {
            Err(EnvelopeError::ChecksumMismatch { expected, actual })
        }
    }

    /// Reset header, footer and metadata; the payload region keeps its bytes
    pub fn clear(&mut self) {
        self.header = RadioHeader::new_zeroed();
        self.footer = RadioFooter::new_zeroed();
        self.metadata.clear();
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
