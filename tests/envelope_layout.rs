//! Layout tests: block placement, golden wire frames and in-place slot views

#![allow(clippy::expect_used, clippy::unwrap_used)]

use radio_envelope::config::StackConfig;
use radio_envelope::core::envelope::{
    Envelope, ENVELOPE_SIZE, FOOTER_OFFSET, METADATA_OFFSET, PAYLOAD_OFFSET, WIRE_SIZE,
};
use radio_envelope::core::footer::FOOTER_SIZE;
use radio_envelope::core::header::HEADER_SIZE;
use radio_envelope::core::metadata::METADATA_SIZE;
use radio_envelope::core::PAYLOAD_CAPACITY;
use radio_envelope::error::EnvelopeError;
use radio_envelope::protocol::{ActiveMessageLayer, RxInfo};
use radio_envelope::utils::checksum;

#[test]
fn test_blocks_are_contiguous() {
    assert_eq!(HEADER_SIZE, 12);
    assert_eq!(FOOTER_SIZE, 2);
    assert_eq!(METADATA_SIZE, 10);
    assert_eq!(PAYLOAD_OFFSET, HEADER_SIZE);
    assert_eq!(FOOTER_OFFSET, HEADER_SIZE + PAYLOAD_CAPACITY);
    assert_eq!(METADATA_OFFSET, FOOTER_OFFSET + FOOTER_SIZE);
    assert_eq!(
        ENVELOPE_SIZE,
        HEADER_SIZE + PAYLOAD_CAPACITY + FOOTER_SIZE + METADATA_SIZE
    );
    assert_eq!(std::mem::size_of::<Envelope>(), ENVELOPE_SIZE);
    assert_eq!(std::mem::align_of::<Envelope>(), 1);
}

#[test]
fn test_golden_data_frame() {
    let layer = ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
        c.node.address = 0x0001;
        c.node.group = 0x0022;
    }));

    let mut envelope = Envelope::new();
    let wire = layer
        .prepare_send(&mut envelope, 0x0002, 0x06, b"hi")
        .unwrap()
        .to_vec();

    let mut expected = vec![
        0x00, 0x02, // length
        0x88, 0x41, // frame control: data, PAN compression, short addressing
        0x00, // sequence number
        0x00, 0x22, // destination PAN
        0x00, 0x02, // destination
        0x00, 0x01, // source
        0x06, // AM type
        b'h', b'i',
    ];
    expected.resize(FOOTER_OFFSET, 0);
    let fcs = checksum::fcs(&expected);
    expected.extend_from_slice(&fcs.to_be_bytes());

    assert_eq!(wire, expected);
    assert_eq!(envelope.footer().fcs(), fcs);
}

#[test]
fn test_metadata_stays_off_the_wire() {
    let layer = ActiveMessageLayer::new(&StackConfig::default());
    let mut envelope = Envelope::new();
    let wire_len = layer.prepare_send(&mut envelope, 2, 1, b"m").unwrap().len();
    assert_eq!(wire_len, WIRE_SIZE);
    assert_eq!(envelope.to_wire().len(), WIRE_SIZE);
    assert_eq!(envelope.as_raw().len(), ENVELOPE_SIZE);
}

#[test]
fn test_slot_view_is_zero_copy() {
    let mut slot = vec![0u8; ENVELOPE_SIZE];
    slot[0] = 0x00;
    slot[1] = 0x03;
    slot[METADATA_OFFSET] = 0xF6; // rssi -10

    let slot_ptr = slot.as_ptr();
    let envelope = Envelope::from_slot(&slot).unwrap();
    assert_eq!(envelope.as_raw().as_ptr(), slot_ptr);
    assert_eq!(envelope.header().length(), 3);
    assert_eq!(envelope.metadata().rssi(), -10);
}

#[test]
fn test_slot_writes_land_in_buffer() {
    let mut slot = vec![0u8; ENVELOPE_SIZE];
    {
        let envelope = Envelope::from_slot_mut(&mut slot).unwrap();
        envelope.header_mut().set_dest(0x0A0B);
        envelope.metadata_mut().set_timestamp(0x0102_0304);
    }
    assert_eq!(&slot[7..9], &[0x0A, 0x0B]);
    assert_eq!(
        &slot[METADATA_OFFSET + 4..METADATA_OFFSET + 8],
        &[0x01, 0x02, 0x03, 0x04]
    );
}

#[test]
fn test_slot_of_wrong_size_rejected() {
    let slot = vec![0u8; ENVELOPE_SIZE - 1];
    assert!(matches!(
        Envelope::from_slot(&slot),
        Err(EnvelopeError::SlotSize { expected: ENVELOPE_SIZE, actual }) if actual == ENVELOPE_SIZE - 1
    ));

    let mut slot = vec![0u8; ENVELOPE_SIZE + 1];
    assert!(Envelope::from_slot_mut(&mut slot).is_err());
}

#[test]
fn test_receive_into_pool_slot() {
    let sender = ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
        c.node.address = 5;
    }));
    let receiver = ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
        c.node.address = 6;
    }));

    let mut tx = Envelope::new();
    let frame = sender.prepare_send(&mut tx, 6, 9, b"pool").unwrap().to_vec();

    let mut pool = vec![0u8; ENVELOPE_SIZE * 4];
    let slot = &mut pool[ENVELOPE_SIZE..ENVELOPE_SIZE * 2];
    let rx = Envelope::from_slot_mut(slot).unwrap();
    let rx_info = RxInfo {
        rssi: -40,
        lqi: 105,
        timestamp: Some(77),
    };
    assert!(receiver.accept_frame(rx, &frame, rx_info).unwrap());

    assert_eq!(&pool[ENVELOPE_SIZE..ENVELOPE_SIZE + WIRE_SIZE], frame.as_slice());
    assert_eq!(pool[ENVELOPE_SIZE + METADATA_OFFSET] as i8, -40);
    assert!(pool[..ENVELOPE_SIZE].iter().all(|&b| b == 0));
}

#[test]
fn test_boxed_envelope_matches_stack_envelope() {
    let boxed = Envelope::new_boxed().unwrap();
    assert_eq!(*boxed, Envelope::new());
    assert!(boxed.as_raw().iter().all(|&b| b == 0));
}
