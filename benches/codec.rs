use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::io::Cursor;

use tiff16::decoder::Decoder;
use tiff16::encoder::encode_to_vec;
use tiff16::PixelBuffer;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let samples = (0..u64::from(width) * u64::from(height))
        .map(|i| (i % 65536) as u16)
        .collect();
    PixelBuffer::new(width, height, samples).unwrap()
}

fn bench_codec(c: &mut Criterion) {
    let image = gradient(512, 512);
    let bytes = encode_to_vec(&image).unwrap();

    let mut group = c.benchmark_group("gray16");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("encode-512x512", |b| {
        b.iter(|| encode_to_vec(black_box(&image)).unwrap())
    });
    group.bench_function("decode-512x512", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new(Cursor::new(black_box(&bytes[..]))).unwrap();
            decoder.read_image().unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
