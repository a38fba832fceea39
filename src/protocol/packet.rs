//! Access interfaces implemented by the active-message layer.
//!
//! These traits are the "caller" side of the envelope contract: they decide
//! how many payload bytes are in use, fill in addressing, and refuse
//! logical lengths above the platform capacity before the envelope is touched.

use crate::core::envelope::Envelope;
use crate::error::Result;

/// Payload bookkeeping
pub trait Packet {
    /// Reset header, footer and metadata of `envelope`
    fn clear(&self, envelope: &mut Envelope);

    /// Payload bytes in use, as recorded in the header
    fn payload_length(&self, envelope: &Envelope) -> usize;

    /// Record the number of payload bytes in use
    ///
    /// Fails with `OversizedPayload` when `len` exceeds the capacity.
    fn set_payload_length(&self, envelope: &mut Envelope, len: usize) -> Result<()>;

    fn max_payload_length(&self) -> usize;

    /// Writable view of the first `len` payload bytes, `None` past capacity
    fn payload<'a>(&self, envelope: &'a mut Envelope, len: usize) -> Option<&'a mut [u8]>;
}

/// Active-message addressing
pub trait AmPacket {
    /// Address of the local node
    fn address(&self) -> u16;

    fn destination(&self, envelope: &Envelope) -> u16;
    fn set_destination(&self, envelope: &mut Envelope, addr: u16);

    fn source(&self, envelope: &Envelope) -> u16;
    fn set_source(&self, envelope: &mut Envelope, addr: u16);

    fn am_type(&self, envelope: &Envelope) -> u8;
    fn set_am_type(&self, envelope: &mut Envelope, am_type: u8);

    fn group(&self, envelope: &Envelope) -> u16;
    fn set_group(&self, envelope: &mut Envelope, group: u16);

    /// Group of the local node
    fn local_group(&self) -> u16;

    /// Addressed to this node (or broadcast) within the local group
    fn is_for_me(&self, envelope: &Envelope) -> bool;
}

/// Link-layer acknowledgement requests and results
pub trait PacketAcknowledgements {
    fn request_ack(&self, envelope: &mut Envelope);
    fn no_ack(&self, envelope: &mut Envelope);
    fn was_acked(&self, envelope: &Envelope) -> bool;
}

/// Local timestamps recorded in metadata
pub trait PacketTimeStamp {
    /// Timestamp if one has been recorded
    fn timestamp(&self, envelope: &Envelope) -> Option<u32>;
    fn is_timestamp_valid(&self, envelope: &Envelope) -> bool;
    fn set_timestamp(&self, envelope: &mut Envelope, ticks: u32);
    fn clear_timestamp(&self, envelope: &mut Envelope);
}
