#![cfg(feature = "rayon")]

use std::io::Cursor;

use pixmatch::{Bitmap, Candidate, MatchConfig, Matcher, RankOrder};

fn pattern(width: usize, height: usize, seed: usize) -> Bitmap {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y) ^ seed) & 0xFF;
            data.extend_from_slice(&[value as u8, (value / 2) as u8, (255 - value) as u8]);
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

fn mixed_candidates() -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = (0..24)
        .map(|i| Candidate::decoded(format!("dec{i}"), format!("dec{i}"), pattern(60, 40, i), "l"))
        .collect();
    candidates.push(Candidate::encoded(
        "enc",
        "enc.png",
        png_bytes(&pattern(60, 40, 99)),
        "l",
    ));
    candidates.push(Candidate::encoded("bad", "bad", vec![1, 2, 3], "l"));
    // Duplicate of an earlier image to exercise tie ordering.
    candidates.push(Candidate::decoded("dup0", "dup0", pattern(60, 40, 0), "l"));
    candidates
}

#[test]
fn parallel_ranking_matches_sequential_ascending() {
    let query = pattern(60, 40, 7);
    let candidates = mixed_candidates();

    let seq = Matcher::new()
        .with_config(MatchConfig {
            parallel: false,
            ..MatchConfig::default()
        })
        .rank(&query, &candidates);
    let par = Matcher::new()
        .with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        })
        .rank(&query, &candidates);

    assert_eq!(seq, par);
}

#[test]
fn parallel_ranking_matches_sequential_descending() {
    let query = pattern(60, 40, 7);
    let candidates = mixed_candidates();

    let seq = Matcher::new()
        .with_config(MatchConfig {
            rank_order: RankOrder::Descending,
            parallel: false,
        })
        .rank(&query, &candidates);
    let par = Matcher::new()
        .with_config(MatchConfig {
            rank_order: RankOrder::Descending,
            parallel: true,
        })
        .rank(&query, &candidates);

    assert_eq!(seq, par);
}
