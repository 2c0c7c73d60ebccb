#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use std::io::BufReader;

use bencode::prelude::*;

const N_FILES: usize = 500;

fn metainfo() -> Vec<u8> {
    let files: Vec<Value> = (0..N_FILES)
        .map(|i| {
            let f = VecMap::from(vec![
                (Bytes::from("length"), Value::from(i as i64 * 4096)),
                (
                    Bytes::from("path"),
                    Value::from(vec![Value::from("data"), Value::from(format!("part-{}.bin", i))]),
                ),
            ]);
            Value::from(f)
        })
        .collect();
    let info = VecMap::from(vec![
        (Bytes::from("files"), Value::from(files)),
        (Bytes::from("name"), Value::from("dataset")),
        (Bytes::from("piece length"), Value::from(262_144)),
        (Bytes::from("pieces"), Value::from(Bytes::from(vec![0xabu8; 20 * 1024]))),
    ]);
    let root = VecMap::from(vec![
        (Bytes::from("announce"), Value::from("http://tracker.example/announce")),
        (Bytes::from("info"), Value::from(info)),
    ]);
    encode_full(&Value::from(root))
}

const N_MESSAGES: usize = 10_000;

// a stream of small peer-protocol style dictionaries, back to back
fn message_stream() -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    for i in 0..N_MESSAGES {
        let msg = VecMap::from(vec![
            (Bytes::from("msg_type"), Value::from(i as i64 % 3)),
            (Bytes::from("piece"), Value::from(i as i64)),
        ]);
        enc.write_value(&Value::from(msg)).unwrap();
    }
    enc.into_inner()
}

fn bench_metainfo(c: &mut Criterion) {
    let enc = metainfo();
    c.bench_function(
        &format!("Decoding a metainfo dictionary of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc)).unwrap()),
    );
}

fn bench_metainfo_strict(c: &mut Criterion) {
    let enc = metainfo();
    c.bench_function("Decoding a metainfo dictionary, strict key order", move |b| {
        b.iter(|| {
            Decoder::new(black_box(enc.as_slice()))
                .strict()
                .read()
                .unwrap()
        })
    });
}

fn bench_stream(c: &mut Criterion) {
    let enc = message_stream();
    c.bench_function(
        &format!("Reading {} messages through a BufReader", N_MESSAGES),
        move |b| {
            b.iter(|| {
                let mut dec = Decoder::new(BufReader::new(black_box(enc.as_slice())));
                let mut n = 0;
                while let Some(v) = dec.read().unwrap() {
                    black_box(v);
                    n += 1;
                }
                n
            })
        },
    );
}

fn bench_decode_all(c: &mut Criterion) {
    let enc = message_stream();
    c.bench_function(
        &format!("Collecting {} messages with decode_all", N_MESSAGES),
        move |b| b.iter(|| decode_all(black_box(&enc)).unwrap()),
    );
}

criterion_group!(
    benches,
    bench_metainfo,
    bench_metainfo_strict,
    bench_stream,
    bench_decode_all
);
criterion_main!(benches);
