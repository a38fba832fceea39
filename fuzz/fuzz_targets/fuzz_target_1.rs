#![no_main]

use libfuzzer_sys::fuzz_target;
use radio_envelope::core::envelope::Envelope;
use radio_envelope::{ActiveMessageLayer, RxInfo, StackConfig};

fuzz_target!(|data: &[u8]| {
    // Arbitrary frames must be rejected or accepted, never panic
    let layer = ActiveMessageLayer::new(&StackConfig::default());
    let mut envelope = Envelope::new();
    let _ = layer.accept_frame(&mut envelope, data, RxInfo::default());

    // Arbitrary slots must reinterpret in place or report a size error
    if let Ok(view) = Envelope::from_slot(data) {
        let _ = view.header().length();
        let _ = view.verify_fcs();
    }
});
