#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use bencode::{encoding::ser::SerializerExt, prelude::*};

const N_KEYS: usize = 5_000;

// keys inserted in descending order, so every encode has to reorder them all
fn unsorted_dict() -> Value {
    let m: VecMap<Bytes, Value> = (0..N_KEYS)
        .rev()
        .map(|i| (Bytes::from(format!("key-{:08}", i)), Value::from(i as i64)))
        .collect();
    Value::from(m)
}

fn sorted_dict() -> Value {
    let m: VecMap<Bytes, Value> = (0..N_KEYS)
        .map(|i| (Bytes::from(format!("key-{:08}", i)), Value::from(i as i64)))
        .collect();
    Value::from(m)
}

const N_PIECES: usize = 2_000;

fn piece_hashes() -> Value {
    let pieces: Vec<Value> = (0..N_PIECES)
        .map(|i| Value::from(Bytes::from(vec![(i % 251) as u8; 20])))
        .collect();
    Value::from(pieces)
}

fn bench_unsorted(c: &mut Criterion) {
    let dict = unsorted_dict();
    c.bench_function(
        &format!("Encoding a dictionary of {} keys in reverse order", N_KEYS),
        move |b| b.iter(|| encode_full(black_box(&dict))),
    );
}

fn bench_sorted(c: &mut Criterion) {
    let dict = sorted_dict();
    c.bench_function(
        &format!("Encoding a dictionary of {} keys already in order", N_KEYS),
        move |b| b.iter(|| encode_full(black_box(&dict))),
    );
}

fn bench_pieces_preallocated(c: &mut Criterion) {
    let pieces = piece_hashes();
    let len = encode_full(&pieces).len();
    c.bench_function(
        &format!("Encoding {} piece hashes into a preallocated buffer", N_PIECES),
        move |b| {
            b.iter(|| {
                let mut out: Vec<u8> = Vec::with_capacity(len);
                out.put_value(black_box(&pieces))
            })
        },
    );
}

fn bench_native(c: &mut Criterion) {
    let files: Vec<Vec<u32>> = (0..200).map(|i| (0..i).collect()).collect();
    c.bench_function("Converting and writing nested native vectors", move |b| {
        b.iter(|| {
            let mut enc = Encoder::new(Vec::new());
            enc.write(black_box(&files)).unwrap();
            enc.into_inner()
        })
    });
}

criterion_group!(
    benches,
    bench_unsorted,
    bench_sorted,
    bench_pieces_preallocated,
    bench_native
);
criterion_main!(benches);
