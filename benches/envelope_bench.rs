use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use radio_envelope::core::envelope::{Envelope, ENVELOPE_SIZE, WIRE_SIZE};
use radio_envelope::core::PAYLOAD_CAPACITY;
use radio_envelope::{ActiveMessageLayer, RxInfo, StackConfig};

fn layer(address: u16) -> ActiveMessageLayer {
    ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
        c.node.address = address;
    }))
}

#[allow(clippy::unwrap_used)]
fn bench_send_receive(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_send_receive");
    let sender = layer(1);
    let receiver = layer(2);
    let payload_sizes = [0usize, 8, PAYLOAD_CAPACITY];

    for &size in &payload_sizes {
        let payload = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(WIRE_SIZE as u64));

        group.bench_function(format!("prepare_send_{size}b"), |b| {
            let mut envelope = Envelope::new();
            b.iter(|| {
                let wire = sender
                    .prepare_send(&mut envelope, 2, 6, black_box(&payload))
                    .unwrap();
                black_box(wire.len());
            })
        });

        group.bench_function(format!("accept_frame_{size}b"), |b| {
            let mut tx = Envelope::new();
            let frame = sender.prepare_send(&mut tx, 2, 6, &payload).unwrap().to_vec();
            let mut rx = Envelope::new();
            b.iter(|| {
                let deliver = receiver
                    .accept_frame(&mut rx, black_box(&frame), RxInfo::default())
                    .unwrap();
                assert!(deliver);
            })
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_envelope_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_ops");

    group.bench_function("seal", |b| {
        let mut envelope = Envelope::new();
        envelope.payload_mut().fill(0x3C);
        b.iter(|| black_box(envelope.seal()))
    });

    group.bench_function("header_accessors", |b| {
        let mut envelope = Envelope::new();
        b.iter(|| {
            let header = envelope.header_mut();
            header.set_length(black_box(0x1234));
            header.set_dest(black_box(0xBEEF));
            black_box(header.length().wrapping_add(header.dest()))
        })
    });

    group.bench_function("from_slot", |b| {
        let slot = vec![0u8; ENVELOPE_SIZE];
        b.iter(|| {
            let envelope = Envelope::from_slot(black_box(&slot)).unwrap();
            black_box(envelope.header().length())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_send_receive, bench_envelope_ops);
criterion_main!(benches);
