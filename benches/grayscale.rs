use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pixel_filter::PixelBuffer;
use pixel_filter::with_options::grayscale_with;
use pixel_filter::{FilterOptions, grayscale};

fn test_image(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for i in 0..width * height {
        data.extend_from_slice(&[(i % 251) as u8, (i % 127) as u8, (i % 61) as u8]);
    }
    PixelBuffer::from_rgb(width, height, data).expect("valid bench image")
}

fn bench_grayscale_small(c: &mut Criterion) {
    let image = test_image(100, 100);
    c.bench_function("grayscale_100x100", |b| {
        b.iter(|| grayscale(black_box(&image)))
    });
}

fn bench_grayscale_medium(c: &mut Criterion) {
    let image = test_image(640, 480);
    c.bench_function("grayscale_640x480", |b| {
        b.iter(|| grayscale(black_box(&image)))
    });
}

fn bench_grayscale_serial_large(c: &mut Criterion) {
    let image = test_image(1920, 1080);
    c.bench_function("grayscale_serial_1920x1080", |b| {
        b.iter(|| grayscale_with(black_box(&image), FilterOptions::serial()))
    });
}

fn bench_grayscale_parallel_large(c: &mut Criterion) {
    let image = test_image(1920, 1080);
    c.bench_function("grayscale_parallel_1920x1080", |b| {
        b.iter(|| grayscale_with(black_box(&image), FilterOptions::parallel()))
    });
}

criterion_group!(
    benches,
    bench_grayscale_small,
    bench_grayscale_medium,
    bench_grayscale_serial_large,
    bench_grayscale_parallel_large
);
criterion_main!(benches);
