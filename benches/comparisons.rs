#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use bencode::{encoding::ser::SerializerExt, prelude::*};

fn bencode_i64_encode(c: &mut Criterion) {
    c.bench_function("bencode i64 encode", |b| {
        let v = Value::from(1_000_000i64);
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn bencode_i64_ser(c: &mut Criterion) {
    c.bench_function("bencode i64 ser", |b| {
        b.iter(|| {
            let mut out: Vec<u8> = Vec::with_capacity(128);
            out.put_int(black_box(1_000_000))
        })
    });
}

fn json_i64_encode(c: &mut Criterion) {
    c.bench_function("JSON i64 encode", |b| {
        b.iter(|| serde_json::to_string(&black_box(1_000_000i64)))
    });
}

fn bencode_i64_decode(c: &mut Criterion) {
    c.bench_function("bencode i64 decode", |b| {
        let enc = encode_full(&Value::from(1_000_000i64));
        b.iter(|| decode_full(black_box(&enc)))
    });
}

fn json_i64_decode(c: &mut Criterion) {
    c.bench_function("JSON i64 decode", |b| {
        b.iter(|| serde_json::from_str::<i64>(black_box("1000000")))
    });
}

fn bencode_str_encode(c: &mut Criterion) {
    c.bench_function("bencode string encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let v = Value::from(Bytes::from(s));
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn json_str_encode(c: &mut Criterion) {
    c.bench_function("JSON string encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        b.iter(|| serde_json::to_string(&black_box(&s)))
    });
}

criterion_group!(
    benches,
    bencode_i64_encode,
    bencode_i64_ser,
    json_i64_encode,
    bencode_i64_decode,
    json_i64_decode,
    bencode_str_encode,
    json_str_encode,
);

criterion_main!(benches);
