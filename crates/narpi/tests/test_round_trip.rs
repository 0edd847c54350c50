/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use narpi::bitmap::VisitedBitmap;
use narpi::narpi_core::options::{EncoderOptions, Strategy};
use narpi::region::{decode_regions, encode_regions, encode_regions_with, RegionRecord};
use narpi::{Container, Raster};
use nanorand::Rng;

/// A raster whose pixels are drawn from a small palette, so that
/// regions of every shape show up
fn palette_raster(rand: &mut nanorand::WyRand, width: usize, height: usize, colors: u8) -> Raster {
    let palette: Vec<[u8; 3]> = (0..colors)
        .map(|_| [rand.generate(), rand.generate(), rand.generate()])
        .collect();

    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        let color = palette[usize::from(rand.generate_range(0..colors))];
        pixels.extend_from_slice(&color);
    }
    Raster::new(width, height, pixels).unwrap()
}

fn round_trip(raster: &Raster) {
    for strategy in [Strategy::Region, Strategy::Plane] {
        let bytes = Container::encode(raster, strategy).unwrap().to_bytes();
        let decoded = Container::from_bytes(&bytes).unwrap().decode().unwrap();
        assert_eq!(&decoded, raster, "{strategy} round trip failed");
    }
}

#[test]
fn test_random_palette_rasters() {
    let mut rand = nanorand::WyRand::new_seed(0x6e61_7270);

    for _ in 0..40 {
        let width = rand.generate_range(1_usize..60);
        let height = rand.generate_range(1_usize..60);
        let colors = rand.generate_range(1_u8..5);

        round_trip(&palette_raster(&mut rand, width, height, colors));
    }
}

#[test]
fn test_random_noise() {
    let mut rand = nanorand::WyRand::new_seed(42);
    let mut pixels = vec![0_u8; 33 * 17 * 3];
    rand.fill(&mut pixels);

    round_trip(&Raster::new(33, 17, pixels).unwrap());
}

#[test]
fn test_wide_rasters_split_records() {
    let mut rand = nanorand::WyRand::new_seed(7);
    round_trip(&palette_raster(&mut rand, 700, 3, 2));

    let raster = Raster::filled(300, 1, [1, 2, 3]);
    let records = encode_regions(&raster);
    assert!(records.len() >= 2);
    round_trip(&raster);
}

#[test]
fn test_tall_columns_use_wide_verticals() {
    let raster = Raster::filled(2, 600, [9, 9, 9]);
    let records = encode_regions(&raster);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vertical(0), 599);
    assert_eq!(records[0].vertical(1), 599);
    round_trip(&raster);
}

#[test]
fn test_region_coverage_is_exact() {
    let mut rand = nanorand::WyRand::new_seed(99);
    let mut bitmap = VisitedBitmap::default();

    for _ in 0..10 {
        let raster = palette_raster(&mut rand, 40, 25, 3);
        let records = encode_regions_with(&raster, &mut bitmap);

        assert!(bitmap.is_complete());
        let covered: usize = records.iter().map(RegionRecord::pixel_count).sum();
        assert_eq!(covered, raster.pixel_count());
        assert_eq!(decode_regions(&records, 40, 25).unwrap(), raster);
    }
}

#[test]
fn test_every_split_threshold() {
    let mut rand = nanorand::WyRand::new_seed(3);
    let raster = palette_raster(&mut rand, 31, 9, 2);

    for threshold in 1..=127 {
        let options = EncoderOptions::default()
            .set_strategy(Strategy::Plane)
            .set_split_threshold(threshold);
        let container = Container::encode_with_options(&raster, &options).unwrap();
        assert_eq!(container.decode().unwrap(), raster);
    }
}

#[test]
fn test_empty_raster() {
    round_trip(&Raster::filled(0, 0, [0, 0, 0]));
    round_trip(&Raster::filled(5, 0, [0, 0, 0]));
}
