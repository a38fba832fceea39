use crate::config::{RadioConfig, StackConfig};
use crate::core::envelope::{Envelope, FOOTER_OFFSET, WIRE_SIZE};
use crate::core::footer::RadioFooter;
use crate::core::header::{FrameControl, RadioHeader, HEADER_SIZE};
use crate::core::PAYLOAD_CAPACITY;
use crate::error::{EnvelopeError, Result};
use crate::protocol::packet::{AmPacket, Packet, PacketAcknowledgements, PacketTimeStamp};
use crate::utils::checksum;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, instrument, warn};
use zerocopy::FromBytes;

/// Link measurements reported by the radio for a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxInfo {
    pub rssi: i8,
    pub lqi: u8,
    pub timestamp: Option<u32>,
}

/// Active-message layer for one node.
///
/// Fills outgoing envelopes from the node identity and checks incoming ones
/// against it. One instance per node; the sequence counter is shared by every
/// envelope it prepares.
#[derive(Debug)]
pub struct ActiveMessageLayer {
    address: u16,
    group: u16,
    tx_power: u8,
    radio: RadioConfig,
    dsn: AtomicU8,
}

impl ActiveMessageLayer {
    pub fn new(config: &StackConfig) -> Self {
        Self {
            address: config.node.address,
            group: config.node.group,
            tx_power: config.node.tx_power,
            radio: config.radio.clone(),
            dsn: AtomicU8::new(0),
        }
    }

    /// Validate `config` before building the layer
    ///
    /// Advisories such as disabled frame checking are logged, not refused.
    pub fn try_new(config: &StackConfig) -> Result<Self> {
        config.validate_strict()?;
        for advisory in config.warnings() {
            warn!(node = config.node.address, "{advisory}");
        }
        Ok(Self::new(config))
    }

    /// Sequence number the next prepared frame will carry
    pub fn next_dsn(&self) -> u8 {
        self.dsn.load(Ordering::Relaxed)
    }

    /// Fill `envelope` for transmission and return its wire bytes
    ///
    /// Payloads longer than the capacity are rejected here, before the
    /// envelope is modified. Payload bytes past `payload.len()` are left as
    /// they were.
    #[instrument(skip(self, envelope, payload), fields(len = payload.len()), level = "debug")]
    pub fn prepare_send<'a>(
        &self,
        envelope: &'a mut Envelope,
        dest: u16,
        am_type: u8,
        payload: &[u8],
    ) -> Result<&'a [u8]> {
        if payload.len() > PAYLOAD_CAPACITY {
            warn!(
                len = payload.len(),
                capacity = PAYLOAD_CAPACITY,
                "Rejecting oversized payload"
            );
            return Err(EnvelopeError::OversizedPayload(payload.len()));
        }

        self.clear(envelope);
        envelope.payload_mut()[..payload.len()].copy_from_slice(payload);
        self.set_payload_length(envelope, payload.len())?;

        let dsn = self.dsn.fetch_add(1, Ordering::Relaxed);
        let header = envelope.header_mut();
        header.set_frame_control(FrameControl::data());
        header.set_dsn(dsn);
        header.set_dest_pan(self.group);
        header.set_dest(dest);
        header.set_src(self.address);
        header.set_am_type(am_type);

        let metadata = envelope.metadata_mut();
        metadata.set_tx_power(self.tx_power);
        metadata.set_rx_interval(self.radio.lpl_interval_ms());

        let fcs = envelope.seal();
        debug!(dest, am_type, dsn, fcs, "Prepared frame");

        Ok(envelope.wire_bytes())
    }

    /// Load a received frame and stamp its metadata
    ///
    /// The frame is checked before anything is copied: a rejected frame
    /// leaves `envelope` exactly as it was. Returns whether the frame should
    /// be delivered upwards: addressed to this node or broadcast within the
    /// local group, or any intact frame when the layer is promiscuous.
    #[instrument(skip(self, envelope, frame), fields(len = frame.len()), level = "debug")]
    pub fn accept_frame(&self, envelope: &mut Envelope, frame: &[u8], rx: RxInfo) -> Result<bool> {
        if let Err(e) = Envelope::check_wire_length(frame) {
            warn!(error = %e, "Dropping frame with bad length");
            return Err(e);
        }

        let header = RadioHeader::ref_from_bytes(&frame[..HEADER_SIZE])
            .map_err(|_| EnvelopeError::InvalidHeader)?;
        let length = usize::from(header.length());
        if length > PAYLOAD_CAPACITY {
            warn!(length, capacity = PAYLOAD_CAPACITY, "Dropping frame with corrupt length");
            return Err(EnvelopeError::InvalidHeader);
        }

        let footer = RadioFooter::ref_from_bytes(&frame[FOOTER_OFFSET..WIRE_SIZE])
            .map_err(|_| EnvelopeError::InvalidHeader)?;
        let expected = footer.fcs();
        let actual = checksum::fcs(&frame[..FOOTER_OFFSET]);
        let crc_ok = expected == actual;
        if !crc_ok && self.radio.verify_fcs {
            let e = EnvelopeError::ChecksumMismatch { expected, actual };
            warn!(error = %e, "Dropping frame with bad frame check");
            return Err(e);
        }

        let ack_requested = header.frame_control().ack_request();
        envelope.load_wire(frame)?;

        let metadata = envelope.metadata_mut();
        metadata.clear();
        metadata.set_rssi(rx.rssi);
        metadata.set_lqi(rx.lqi);
        metadata.update_flags(|f| {
            f.set_crc_ok(crc_ok);
            f.set_ack_requested(ack_requested);
        });
        if let Some(ticks) = rx.timestamp {
            self.set_timestamp(envelope, ticks);
        }

        let for_me = self.is_for_me(envelope);
        debug!(
            src = envelope.header().src(),
            dest = envelope.header().dest(),
            am_type = envelope.header().am_type(),
            for_me,
            "Accepted frame"
        );

        Ok(for_me || self.radio.promiscuous)
    }

    /// Record whether the link-layer acknowledgement for `envelope` arrived
    pub fn record_ack(&self, envelope: &mut Envelope, acked: bool) {
        envelope.metadata_mut().update_flags(|f| f.set_acked(acked));
    }
}

impl Packet for ActiveMessageLayer {
    fn clear(&self, envelope: &mut Envelope) {
        envelope.clear();
    }

    fn payload_length(&self, envelope: &Envelope) -> usize {
        usize::from(envelope.header().length())
    }

    fn set_payload_length(&self, envelope: &mut Envelope, len: usize) -> Result<()> {
        if len > PAYLOAD_CAPACITY {
            return Err(EnvelopeError::OversizedPayload(len));
        }
        let length = u16::try_from(len).map_err(|_| EnvelopeError::OversizedPayload(len))?;
        envelope.header_mut().set_length(length);
        Ok(())
    }

    fn max_payload_length(&self) -> usize {
        PAYLOAD_CAPACITY
    }

    fn payload<'a>(&self, envelope: &'a mut Envelope, len: usize) -> Option<&'a mut [u8]> {
        envelope.payload_mut().get_mut(..len)
    }
}

impl AmPacket for ActiveMessageLayer {
    fn address(&self) -> u16 {
        self.address
    }

    fn destination(&self, envelope: &Envelope) -> u16 {
        envelope.header().dest()
    }

    fn set_destination(&self, envelope: &mut Envelope, addr: u16) {
        envelope.header_mut().set_dest(addr);
    }

    fn source(&self, envelope: &Envelope) -> u16 {
        envelope.header().src()
    }

    fn set_source(&self, envelope: &mut Envelope, addr: u16) {
        envelope.header_mut().set_src(addr);
    }

    fn am_type(&self, envelope: &Envelope) -> u8 {
        envelope.header().am_type()
    }

    fn set_am_type(&self, envelope: &mut Envelope, am_type: u8) {
        envelope.header_mut().set_am_type(am_type);
    }

    fn group(&self, envelope: &Envelope) -> u16 {
        envelope.header().dest_pan()
    }

    fn set_group(&self, envelope: &mut Envelope, group: u16) {
        envelope.header_mut().set_dest_pan(group);
    }

    fn local_group(&self) -> u16 {
        self.group
    }

    fn is_for_me(&self, envelope: &Envelope) -> bool {
        let header = envelope.header();
        (header.dest() == self.address || header.is_broadcast()) && self.group(envelope) == self.group
    }
}

impl PacketAcknowledgements for ActiveMessageLayer {
    fn request_ack(&self, envelope: &mut Envelope) {
        let mut fcf = envelope.header().frame_control();
        fcf.set_ack_request(true);
        envelope.header_mut().set_frame_control(fcf);
        envelope
            .metadata_mut()
            .update_flags(|f| f.set_ack_requested(true));
        envelope.seal();
    }

    fn no_ack(&self, envelope: &mut Envelope) {
        let mut fcf = envelope.header().frame_control();
        fcf.set_ack_request(false);
        envelope.header_mut().set_frame_control(fcf);
        envelope
            .metadata_mut()
            .update_flags(|f| f.set_ack_requested(false));
        envelope.seal();
    }

    fn was_acked(&self, envelope: &Envelope) -> bool {
        envelope.metadata().flags().acked()
    }
}

impl PacketTimeStamp for ActiveMessageLayer {
    fn timestamp(&self, envelope: &Envelope) -> Option<u32> {
        self.is_timestamp_valid(envelope)
            .then(|| envelope.metadata().timestamp())
    }

    fn is_timestamp_valid(&self, envelope: &Envelope) -> bool {
        envelope.metadata().flags().timestamp_valid()
    }

    fn set_timestamp(&self, envelope: &mut Envelope, ticks: u32) {
        let metadata = envelope.metadata_mut();
        metadata.set_timestamp(ticks);
        metadata.update_flags(|f| f.set_timestamp_valid(true));
    }

    fn clear_timestamp(&self, envelope: &mut Envelope) {
        let metadata = envelope.metadata_mut();
        metadata.set_timestamp(0);
        metadata.update_flags(|f| f.set_timestamp_valid(false));
    }
}
