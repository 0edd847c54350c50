/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The plane codec
//!
//! Every color channel is stored on its own as a sequence of spans.
//!
//! - A tag below 128 starts a repeat span, the next byte is
//!   written `tag` times.
//! - A tag of 128 or more starts a literal span, the next
//!   `tag - 127` bytes are copied as is.
//!
//! Spans never exceed the split threshold (1..=127, default 127).
//!
//! A channel section is a big endian `u32` byte count followed by its
//! spans, sections appear in red, green, blue order.
use alloc::format;
use alloc::vec::Vec;

use narpi_core::bytestream::{ZByteReader, ZByteWriter};
use narpi_core::log::debug;
use narpi_core::options::MAX_SPLIT_THRESHOLD;

use crate::constants::LITERAL_TAG_BASE;
use crate::errors::{NarpiDecodeErrors, NarpiEncodeErrors};
use crate::raster::Raster;

fn check_threshold(split_threshold: u8) -> Result<usize, NarpiEncodeErrors> {
    if split_threshold == 0 || split_threshold > MAX_SPLIT_THRESHOLD {
        return Err(NarpiEncodeErrors::InvalidSplitThreshold(split_threshold));
    }
    Ok(usize::from(split_threshold))
}

fn flush_literal(literal: &[u8], max_span: usize, out: &mut Vec<u8>) {
    for chunk in literal.chunks(max_span) {
        out.push(LITERAL_TAG_BASE + chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

/// Pack one channel into spans
///
/// Runs of two or more equal bytes become repeat spans, everything
/// else is gathered into literal spans.
///
/// ```
/// let spans = narpi::plane::encode_plane(&[2, 2, 4, 8], 127).unwrap();
/// assert_eq!(spans, [2, 2, 129, 4, 8]);
/// ```
///
/// # Errors
/// [`NarpiEncodeErrors::InvalidSplitThreshold`] if `split_threshold` is not in `1..=127`
pub fn encode_plane(channel: &[u8], split_threshold: u8) -> Result<Vec<u8>, NarpiEncodeErrors> {
    let max_span = check_threshold(split_threshold)?;

    let mut out = Vec::with_capacity(channel.len() / 2 + 8);
    let mut literal_start = 0;
    let mut position = 0;

    while position < channel.len() {
        let value = channel[position];
        let run = channel[position..]
            .iter()
            .take_while(|byte| **byte == value)
            .count();

        if run < 2 {
            position += 1;
            continue;
        }
        flush_literal(&channel[literal_start..position], max_span, &mut out);

        let mut left = run;
        while left > 0 {
            let span = left.min(max_span);
            out.push(span as u8);
            out.push(value);
            left -= span;
        }
        position += run;
        literal_start = position;
    }
    flush_literal(&channel[literal_start..], max_span, &mut out);

    Ok(out)
}

/// Unpack spans into a channel of exactly `expected_len` bytes
///
/// # Errors
/// - [`NarpiDecodeErrors::InvalidRecord`] for a zero tag or a span writing
///   past `expected_len`
/// - [`NarpiDecodeErrors::TruncatedStream`] if a span runs past the end of `spans`
/// - [`NarpiDecodeErrors::DimensionMismatch`] if the spans produce fewer bytes
pub fn decode_plane(spans: &[u8], expected_len: usize) -> Result<Vec<u8>, NarpiDecodeErrors> {
    // a two byte repeat span yields at most 127 bytes
    let mut out = Vec::with_capacity(expected_len.min(spans.len().saturating_mul(64)));
    let mut reader = ZByteReader::new(spans);

    while !reader.eof() {
        let offset = reader.position();
        let tag = reader.get_u8_err()?;

        if tag == 0 {
            return Err(NarpiDecodeErrors::InvalidRecord(format!(
                "zero length span at offset {offset}"
            )));
        }
        let length = if tag > LITERAL_TAG_BASE {
            usize::from(tag - LITERAL_TAG_BASE)
        } else {
            usize::from(tag)
        };
        if out.len() + length > expected_len {
            return Err(NarpiDecodeErrors::InvalidRecord(format!(
                "span at offset {offset} writes past the {expected_len} byte plane"
            )));
        }
        if tag > LITERAL_TAG_BASE {
            out.extend_from_slice(reader.get_as_ref(length)?);
        } else {
            let value = reader.get_u8_err()?;
            out.resize(out.len() + length, value);
        }
    }
    if out.len() != expected_len {
        return Err(NarpiDecodeErrors::DimensionMismatch(expected_len, out.len()));
    }
    Ok(out)
}

/// Smallest payload able to hold three sections of `plane_len` bytes each
fn min_planes_len(plane_len: usize) -> usize {
    let max_span = usize::from(MAX_SPLIT_THRESHOLD);
    3 * (4 + 2 * plane_len.div_ceil(max_span))
}

/// Write the three channel sections of `raster`, returning the bytes written
pub fn write_planes(
    raster: &Raster, split_threshold: u8, writer: &mut ZByteWriter
) -> Result<usize, NarpiEncodeErrors> {
    let start = writer.bytes_written();

    for channel in 0..3 {
        let spans = encode_plane(&raster.channel(channel), split_threshold)?;
        let length = u32::try_from(spans.len())
            .map_err(|_| NarpiEncodeErrors::TooLargeDimensions(spans.len()))?;

        debug!("Channel {channel}: {} bytes packed into {length}", raster.pixel_count());
        writer.write_u32_be(length);
        writer.write_all(&spans);
    }
    Ok(writer.bytes_written() - start)
}

/// Read three channel sections and interleave them into a raster
///
/// Payloads too short to cover `width` x `height` are rejected with
/// [`NarpiDecodeErrors::TruncatedStream`] before anything is allocated.
pub fn read_planes<T: AsRef<[u8]>>(
    reader: &mut ZByteReader<T>, width: usize, height: usize
) -> Result<Raster, NarpiDecodeErrors> {
    let plane_len = width * height;
    let min_len = min_planes_len(plane_len);

    if reader.remaining() < min_len {
        return Err(NarpiDecodeErrors::TruncatedStream(min_len, reader.remaining()));
    }
    let mut channels = Vec::with_capacity(3);

    for _ in 0..3 {
        let length = reader.get_u32_be_err()? as usize;
        let spans = reader.get_as_ref(length)?;
        channels.push(decode_plane(spans, plane_len)?);
    }
    let mut raster = Raster::blank(width, height);

    for (index, ((r, g), b)) in channels[0]
        .iter()
        .zip(&channels[1])
        .zip(&channels[2])
        .enumerate()
    {
        raster.set_pixel_at(index, [*r, *g, *b]);
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use narpi_core::bytestream::{ZByteReader, ZByteWriter};

    use crate::errors::{NarpiDecodeErrors, NarpiEncodeErrors};
    use crate::plane::{decode_plane, encode_plane, read_planes, write_planes};
    use crate::raster::Raster;

    /// Lengths of every span, in order
    fn span_lengths(spans: &[u8]) -> Vec<usize> {
        let mut lengths = vec![];
        let mut position = 0;

        while position < spans.len() {
            let tag = spans[position];
            if tag > 127 {
                let length = usize::from(tag - 127);
                lengths.push(length);
                position += 1 + length;
            } else {
                lengths.push(usize::from(tag));
                position += 2;
            }
        }
        lengths
    }

    #[test]
    fn test_known_layouts() {
        assert_eq!(encode_plane(&[2, 2, 4, 8], 127).unwrap(), [2, 2, 129, 4, 8]);
        assert_eq!(encode_plane(&[3, 2, 5, 5], 127).unwrap(), [129, 3, 2, 2, 5]);
        assert_eq!(encode_plane(&[1, 4, 4, 4], 127).unwrap(), [128, 1, 3, 4]);
        assert!(encode_plane(&[], 127).unwrap().is_empty());
    }

    #[test]
    fn test_long_run_splits() {
        let spans = encode_plane(&[9; 300], 127).unwrap();
        assert_eq!(span_lengths(&spans), [127, 127, 46]);
        assert_eq!(decode_plane(&spans, 300).unwrap(), vec![9; 300]);
    }

    #[test]
    fn test_alternating_is_one_literal() {
        let spans = encode_plane(&[1, 2, 1, 2], 127).unwrap();
        assert_eq!(spans, [131, 1, 2, 1, 2]);
    }

    #[test]
    fn test_small_threshold_round_trip() {
        let data: Vec<u8> = (0..200).map(|i| if i % 7 < 3 { 5 } else { i as u8 }).collect();

        for threshold in [1, 2, 5, 127] {
            let spans = encode_plane(&data, threshold).unwrap();
            assert!(span_lengths(&spans).iter().all(|l| *l <= usize::from(threshold)));
            assert_eq!(decode_plane(&spans, data.len()).unwrap(), data);
        }
    }

    #[test]
    fn test_rejects_threshold() {
        for threshold in [0, 128, 255] {
            assert!(matches!(
                encode_plane(&[1], threshold),
                Err(NarpiEncodeErrors::InvalidSplitThreshold(_))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_bad_spans() {
        // zero tag
        assert!(matches!(decode_plane(&[0, 1], 1), Err(NarpiDecodeErrors::InvalidRecord(_))));
        // literal runs past the section
        assert!(matches!(
            decode_plane(&[130, 1], 3),
            Err(NarpiDecodeErrors::TruncatedStream(3, 1))
        ));
        // repeat without its value
        assert!(matches!(
            decode_plane(&[2], 2),
            Err(NarpiDecodeErrors::TruncatedStream(1, 0))
        ));
        // writes past the plane
        assert!(matches!(decode_plane(&[3, 1], 2), Err(NarpiDecodeErrors::InvalidRecord(_))));
        // too short
        assert!(matches!(
            decode_plane(&[2, 1], 3),
            Err(NarpiDecodeErrors::DimensionMismatch(3, 2))
        ));
    }

    #[test]
    fn test_short_payload_rejected_before_allocating() {
        // three empty sections for a 65535x65535 canvas
        let bytes = [0_u8; 12];
        let mut reader = ZByteReader::new(&bytes);

        assert!(matches!(
            read_planes(&mut reader, 65535, 65535),
            Err(NarpiDecodeErrors::TruncatedStream(_, 12))
        ));
        // an empty canvas still needs its three lengths
        assert!(matches!(
            read_planes(&mut ZByteReader::new(&bytes[..8]), 0, 0),
            Err(NarpiDecodeErrors::TruncatedStream(12, 8))
        ));
        assert_eq!(read_planes(&mut ZByteReader::new(&bytes), 0, 0).unwrap().pixel_count(), 0);
    }

    #[test]
    fn test_planes_round_trip() {
        let mut raster = Raster::filled(5, 3, [200, 10, 10]);
        raster.set_pixel(4, 2, [1, 2, 3]);
        raster.set_pixel(0, 1, [200, 11, 10]);

        let mut bytes = Vec::new();
        let written = write_planes(&raster, 127, &mut ZByteWriter::new(&mut bytes)).unwrap();
        assert_eq!(written, bytes.len());

        let mut reader = ZByteReader::new(&bytes);
        assert_eq!(read_planes(&mut reader, 5, 3).unwrap(), raster);
        assert!(reader.eof());
    }
}
