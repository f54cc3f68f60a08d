use criterion::{criterion_group, criterion_main, Criterion};
use pixmatch::{average_hash, Bitmap, Candidate, MatchConfig, Matcher};
use std::hint::black_box;
use std::io::Cursor;

fn make_bitmap(width: usize, height: usize, seed: usize) -> Bitmap {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y) ^ seed) & 0xFF;
            data.extend_from_slice(&[value as u8, (value >> 1) as u8, (value >> 2) as u8]);
        }
    }
    Bitmap::from_rgb8(data, width, height).unwrap()
}

fn png_bytes(bitmap: &Bitmap) -> Vec<u8> {
    let img = image::RgbImage::from_raw(
        bitmap.width() as u32,
        bitmap.height() as u32,
        bitmap.as_rgb8().to_vec(),
    )
    .unwrap();
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn bench_matcher(c: &mut Criterion) {
    let query = make_bitmap(512, 512, 0);

    c.bench_function("average_hash_512", |b| {
        b.iter(|| black_box(average_hash(&query)));
    });

    let decoded: Vec<Candidate> = (0..100)
        .map(|i| {
            Candidate::decoded(
                format!("c{i}"),
                format!("c{i}"),
                make_bitmap(256, 256, i),
                "link",
            )
        })
        .collect();
    let matcher = Matcher::new();

    c.bench_function("rank_100_decoded", |b| {
        b.iter(|| black_box(matcher.rank(&query, &decoded)));
    });

    let encoded: Vec<Candidate> = (0..100)
        .map(|i| {
            Candidate::encoded(
                format!("c{i}"),
                format!("c{i}.png"),
                png_bytes(&make_bitmap(256, 256, i)),
                "link",
            )
        })
        .collect();

    c.bench_function("rank_100_encoded_png", |b| {
        b.iter(|| black_box(matcher.rank(&query, &encoded)));
    });

    if cfg!(feature = "rayon") {
        let matcher_par = Matcher::new().with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        });

        c.bench_function("rank_100_decoded_parallel", |b| {
            b.iter(|| black_box(matcher_par.rank(&query, &decoded)));
        });

        c.bench_function("rank_100_encoded_png_parallel", |b| {
            b.iter(|| black_box(matcher_par.rank(&query, &encoded)));
        });
    }
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
