/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The region codec
//!
//! A raster is decomposed into regions of a single color. Scanning in
//! row-major order, the first unclaimed pixel starts a region which
//! grows to the right over unclaimed pixels of the same color, and every
//! column it covers grows downwards the same way. Each region becomes
//! a [`RegionRecord`].
//!
//! Records carry no coordinates. A decoder keeps the same claim bitmap
//! and places each record at the first pixel it has not painted yet,
//! which is exactly where the encoder started it.
//!
//! # Record layout
//! ```text
//! 3 bytes   color R,G,B
//! 1 byte    h_extent, 0..=253
//! 2 bytes   section length L, big endian
//! L bytes   vertical section, absent when L is zero
//!           presence flags  ceil((h_extent+1)/8) bytes, bit i%8 of byte i/8
//!           wide flags      same size, set when the entry takes two bytes
//!           entries         one per present column, in column order
//! ```
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use alloc::{format, vec};

use narpi_core::bytestream::{ZByteReader, ZByteWriter};
use narpi_core::log::{debug, trace};

use crate::bitmap::{index_to_xy, VisitedBitmap};
use crate::constants::{MAX_H_EXTENT, MAX_PIXELS_PER_REGION_BYTE, MAX_RECORD_COLUMNS};
use crate::errors::NarpiDecodeErrors;
use crate::raster::Raster;
use crate::split::{compact_len, is_wide, join_u16, split_u16};

/// A flood filled region of a single color
///
/// The region starts at the pixel where the scan cursor stands,
/// covers `h_extent + 1` pixels of that row and, for every column
/// listed in `verticals`, that many more pixels straight below.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegionRecord {
    color:     [u8; 3],
    h_extent:  u8,
    verticals: BTreeMap<u8, u16>
}

impl RegionRecord {
    /// Create a record, checking that it is well formed
    ///
    /// # Errors
    /// [`NarpiDecodeErrors::InvalidRecord`] if `h_extent` is above 253,
    /// a vertical names a column past `h_extent` or a vertical is zero
    pub fn new(
        color: [u8; 3], h_extent: u8, verticals: BTreeMap<u8, u16>
    ) -> Result<RegionRecord, NarpiDecodeErrors> {
        if h_extent > MAX_H_EXTENT {
            return Err(NarpiDecodeErrors::InvalidRecord(format!(
                "horizontal extent {h_extent} larger than {MAX_H_EXTENT}"
            )));
        }
        for (column, count) in &verticals {
            if *column > h_extent {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "vertical for column {column} beyond horizontal extent {h_extent}"
                )));
            }
            if *count == 0 {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "zero length vertical for column {column}"
                )));
            }
        }
        Ok(RegionRecord {
            color,
            h_extent,
            verticals
        })
    }

    pub const fn color(&self) -> [u8; 3] {
        self.color
    }

    /// Columns beyond the first one covered by this record
    pub const fn h_extent(&self) -> u8 {
        self.h_extent
    }

    /// Number of columns covered, `h_extent + 1`
    pub const fn columns(&self) -> usize {
        self.h_extent as usize + 1
    }

    /// Vertical run lengths keyed by column offset, only non zero runs
    pub fn verticals(&self) -> &BTreeMap<u8, u16> {
        &self.verticals
    }

    /// Pixels below the top row in `column`
    pub fn vertical(&self, column: u8) -> u16 {
        self.verticals.get(&column).copied().unwrap_or(0)
    }

    /// Rows covered by the tallest column
    pub fn rows(&self) -> usize {
        1 + self
            .verticals
            .values()
            .max()
            .map_or(0, |count| usize::from(*count))
    }

    /// Total number of pixels this record paints
    pub fn pixel_count(&self) -> usize {
        self.columns()
            + self
                .verticals
                .values()
                .map(|count| usize::from(*count))
                .sum::<usize>()
    }

    /// Offsets `(dx, dy)` of every pixel painted, relative to
    /// the record's starting pixel, column by column
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..=self.h_extent).flat_map(move |column| {
            let rows = usize::from(self.vertical(column)) + 1;
            (0..rows).map(move |dy| (usize::from(column), dy))
        })
    }

    /// The record's shape as text, one string per row,
    /// `o` for a painted pixel and `.` for an empty one
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use narpi::region::RegionRecord;
    ///
    /// let record = RegionRecord::new([0, 0, 0], 2, BTreeMap::from([(1, 2)])).unwrap();
    /// assert_eq!(record.footprint(), ["ooo", ".o.", ".o."]);
    /// ```
    pub fn footprint(&self) -> Vec<String> {
        (0..self.rows())
            .map(|row| {
                (0..=self.h_extent)
                    .map(|column| {
                        if row <= usize::from(self.vertical(column)) {
                            'o'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Size of the record on the wire
    pub fn encoded_size(&self) -> usize {
        6 + self.section_len()
    }

    fn flag_len(&self) -> usize {
        self.columns().div_ceil(8)
    }

    fn section_len(&self) -> usize {
        if self.verticals.is_empty() {
            return 0;
        }
        2 * self.flag_len()
            + self
                .verticals
                .values()
                .map(|count| compact_len(*count))
                .sum::<usize>()
    }
}

/// Split `raster` into region records using a fresh claim bitmap
pub fn encode_regions(raster: &Raster) -> Vec<RegionRecord> {
    let mut bitmap = VisitedBitmap::default();
    encode_regions_with(raster, &mut bitmap)
}

/// Split `raster` into region records, reusing `bitmap`
///
/// The bitmap is reset before use. On return every pixel in it is marked.
pub fn encode_regions_with(raster: &Raster, bitmap: &mut VisitedBitmap) -> Vec<RegionRecord> {
    let (width, height) = raster.dimensions();
    bitmap.reset(width, height);

    let mut records = Vec::new();
    let mut cursor = 0;
    let progress_step = height.div_ceil(8).max(1);
    let mut next_progress = progress_step;

    while let Some(start) = bitmap.next_unvisited(cursor) {
        let (x0, y0) = index_to_xy(start, width);

        if y0 >= next_progress {
            trace!("Progress: row {y0} of {height}");
            next_progress = (y0 / progress_step + 1) * progress_step;
        }
        let color = raster.pixel_at(start);
        let mut verticals = BTreeMap::new();
        let mut columns = 0;

        while columns < MAX_RECORD_COLUMNS
            && x0 + columns < width
            && !bitmap.is_visited_index(start + columns)
            && raster.pixel_at(start + columns) == color
        {
            let x = x0 + columns;
            bitmap.mark_index(start + columns);

            let count = flood_down(raster, bitmap, x, y0, color);

            if count > 0 {
                verticals.insert(columns as u8, count);
            }
            columns += 1;
        }
        records.push(RegionRecord {
            color,
            h_extent: (columns - 1) as u8,
            verticals
        });
        cursor = start + 1;
    }
    debug!("Encoded {}x{} raster into {} regions", width, height, records.len());

    records
}

/// Count and claim unvisited pixels of `color` directly below `(x, y)`
fn flood_down(raster: &Raster, bitmap: &mut VisitedBitmap, x: usize, y: usize, color: [u8; 3]) -> u16 {
    let width = raster.width();
    let mut count = 0_u16;
    let mut row = y + 1;

    while row < raster.height() && count < u16::MAX {
        let index = row * width + x;

        if bitmap.is_visited_index(index) || raster.pixel_at(index) != color {
            break;
        }
        bitmap.mark_index(index);
        count += 1;
        row += 1;
    }
    count
}

/// Places records on a canvas the way the encoder discovered them
pub(crate) struct RegionCursor {
    bitmap: VisitedBitmap,
    cursor: usize
}

impl RegionCursor {
    pub(crate) fn new(width: usize, height: usize) -> RegionCursor {
        RegionCursor {
            bitmap: VisitedBitmap::new(width, height),
            cursor: 0
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.bitmap.is_complete()
    }

    pub(crate) fn covered(&self) -> usize {
        self.bitmap.visited_count()
    }

    /// Claim every pixel of `record` at the next free position,
    /// returning that position
    pub(crate) fn place(&mut self, record: &RegionRecord) -> Result<(usize, usize), NarpiDecodeErrors> {
        let (width, height) = (self.bitmap.width(), self.bitmap.height());

        let start = self.bitmap.next_unvisited(self.cursor).ok_or_else(|| {
            NarpiDecodeErrors::InvalidRecord(String::from("record arrived after the canvas is full"))
        })?;
        let (x0, y0) = index_to_xy(start, width);

        for (dx, dy) in record.cells() {
            let (x, y) = (x0 + dx, y0 + dy);

            if x >= width || y >= height {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "record starting at ({x0},{y0}) leaves the {width}x{height} canvas at ({x},{y})"
                )));
            }
            if !self.bitmap.mark(x, y) {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "record starting at ({x0},{y0}) overlaps painted pixel ({x},{y})"
                )));
            }
        }
        self.cursor = start + 1;

        Ok((x0, y0))
    }

    fn incomplete_error(&self) -> NarpiDecodeErrors {
        NarpiDecodeErrors::DimensionMismatch(self.bitmap.len(), self.covered())
    }
}

fn paint(raster: &mut Raster, record: &RegionRecord, x0: usize, y0: usize) {
    let width = raster.width();

    for (dx, dy) in record.cells() {
        raster.set_pixel_at((y0 + dy) * width + x0 + dx, record.color);
    }
}

/// Rebuild a `width` x `height` raster from records in emission order
///
/// # Errors
/// - [`NarpiDecodeErrors::InvalidRecord`] if a record leaves the canvas,
///   overlaps painted pixels or arrives once the canvas is full
/// - [`NarpiDecodeErrors::DimensionMismatch`] if the records do not cover the canvas
pub fn decode_regions(
    records: &[RegionRecord], width: usize, height: usize
) -> Result<Raster, NarpiDecodeErrors> {
    let mut raster = Raster::blank(width, height);
    let mut cursor = RegionCursor::new(width, height);

    for record in records {
        let (x0, y0) = cursor.place(record)?;
        paint(&mut raster, record, x0, y0);
    }
    if !cursor.is_complete() {
        return Err(cursor.incomplete_error());
    }
    Ok(raster)
}

/// Pair every record with the 0-based `(x, y)` it is painted at
pub fn positioned_records(
    records: &[RegionRecord], width: usize, height: usize
) -> Result<Vec<((usize, usize), &RegionRecord)>, NarpiDecodeErrors> {
    let mut cursor = RegionCursor::new(width, height);

    records
        .iter()
        .map(|record| Ok((cursor.place(record)?, record)))
        .collect()
}

/// Serialize one record
pub fn write_record(record: &RegionRecord, writer: &mut ZByteWriter) {
    writer.write_all(&record.color);
    writer.write_u8(record.h_extent);

    let section_len = record.section_len();
    // at most 2*32 flag bytes and 254 two byte entries
    writer.write_u16_be(section_len as u16);

    if section_len == 0 {
        return;
    }
    let flag_len = record.flag_len();
    let mut presence = vec![0_u8; flag_len];
    let mut wide = vec![0_u8; flag_len];

    for (column, count) in &record.verticals {
        let column = usize::from(*column);
        presence[column / 8] |= 1 << (column % 8);

        if is_wide(*count) {
            wide[column / 8] |= 1 << (column % 8);
        }
    }
    writer.write_all(&presence);
    writer.write_all(&wide);

    for count in record.verticals.values() {
        let (high, low) = split_u16(*count);

        if is_wide(*count) {
            writer.write_u8(high);
        }
        writer.write_u8(low);
    }
}

/// Serialize records back to back, returning the bytes written
pub fn write_regions(records: &[RegionRecord], writer: &mut ZByteWriter) -> usize {
    let start = writer.bytes_written();

    for record in records {
        write_record(record, writer);
    }
    writer.bytes_written() - start
}

/// Parse one record
///
/// # Errors
/// - [`NarpiDecodeErrors::TruncatedStream`] if the stream ends inside the record
/// - [`NarpiDecodeErrors::InvalidRecord`] if the vertical section is inconsistent
pub fn read_record<T: AsRef<[u8]>>(
    reader: &mut ZByteReader<T>
) -> Result<RegionRecord, NarpiDecodeErrors> {
    let color = reader.read_fixed_bytes_or_error::<3>()?;
    let h_extent = reader.get_u8_err()?;

    if h_extent > MAX_H_EXTENT {
        return Err(NarpiDecodeErrors::InvalidRecord(format!(
            "horizontal extent {h_extent} larger than {MAX_H_EXTENT}"
        )));
    }
    let section_len = usize::from(reader.get_u16_be_err()?);
    let section = reader.get_as_ref(section_len)?;
    let verticals = parse_verticals(section, h_extent)?;

    Ok(RegionRecord {
        color,
        h_extent,
        verticals
    })
}

fn parse_verticals(section: &[u8], h_extent: u8) -> Result<BTreeMap<u8, u16>, NarpiDecodeErrors> {
    let mut verticals = BTreeMap::new();

    if section.is_empty() {
        return Ok(verticals);
    }
    let columns = usize::from(h_extent) + 1;
    let flag_len = columns.div_ceil(8);

    if section.len() < 2 * flag_len {
        return Err(NarpiDecodeErrors::InvalidRecord(format!(
            "vertical section of {} bytes cannot hold {} flag bytes",
            section.len(),
            2 * flag_len
        )));
    }
    let (presence, rest) = section.split_at(flag_len);
    let (wide, entries) = rest.split_at(flag_len);
    let flag = |flags: &[u8], column: usize| (flags[column / 8] >> (column % 8)) & 1 == 1;

    // flag bits past the last column must stay clear
    for column in columns..flag_len * 8 {
        if flag(presence, column) || flag(wide, column) {
            return Err(NarpiDecodeErrors::InvalidRecord(format!(
                "flag set for column {column} beyond horizontal extent {h_extent}"
            )));
        }
    }
    let mut entries = entries.iter();

    for column in 0..columns {
        let is_present = flag(presence, column);
        let is_wide_entry = flag(wide, column);

        if !is_present {
            if is_wide_entry {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "wide flag set on absent column {column}"
                )));
            }
            continue;
        }
        let mut next = || {
            entries.next().copied().ok_or_else(|| {
                NarpiDecodeErrors::InvalidRecord(String::from(
                    "vertical section shorter than its flags require"
                ))
            })
        };
        let count = if is_wide_entry {
            let high = next()?;
            let low = next()?;
            let count = join_u16(high, low);

            if !is_wide(count) {
                return Err(NarpiDecodeErrors::InvalidRecord(format!(
                    "two byte vertical {count} in column {column} fits in one byte"
                )));
            }
            count
        } else {
            u16::from(next()?)
        };
        if count == 0 {
            return Err(NarpiDecodeErrors::InvalidRecord(format!(
                "zero length vertical for column {column}"
            )));
        }
        verticals.insert(column as u8, count);
    }
    if entries.len() != 0 {
        return Err(NarpiDecodeErrors::InvalidRecord(format!(
            "{} bytes left over in vertical section",
            entries.len()
        )));
    }
    if verticals.is_empty() {
        return Err(NarpiDecodeErrors::InvalidRecord(String::from(
            "non empty vertical section without verticals"
        )));
    }
    Ok(verticals)
}

/// Fail early when the bytes left cannot cover a `width` x `height` canvas
fn check_payload_len<T: AsRef<[u8]>>(
    reader: &ZByteReader<T>, width: usize, height: usize
) -> Result<(), NarpiDecodeErrors> {
    let needed = width
        .saturating_mul(height)
        .div_ceil(MAX_PIXELS_PER_REGION_BYTE);

    if reader.remaining() < needed {
        return Err(NarpiDecodeErrors::TruncatedStream(needed, reader.remaining()));
    }
    Ok(())
}

/// Read records until a `width` x `height` canvas is covered
///
/// Records are validated against the canvas as they are read, bytes
/// after the last record are left in the reader. Payloads too short to
/// ever cover the canvas fail with [`NarpiDecodeErrors::TruncatedStream`]
/// before the claim bitmap is allocated.
pub fn read_regions<T: AsRef<[u8]>>(
    reader: &mut ZByteReader<T>, width: usize, height: usize
) -> Result<Vec<RegionRecord>, NarpiDecodeErrors> {
    check_payload_len(reader, width, height)?;

    let mut cursor = RegionCursor::new(width, height);
    let mut records = Vec::new();

    while !cursor.is_complete() {
        if reader.eof() {
            return Err(cursor.incomplete_error());
        }
        let record = read_record(reader)?;
        cursor.place(&record)?;
        records.push(record);
    }
    debug!("Read {} region records", records.len());

    Ok(records)
}

/// Read and paint records in one pass until a `width` x `height` canvas is covered
pub(crate) fn decode_region_stream<T: AsRef<[u8]>>(
    reader: &mut ZByteReader<T>, width: usize, height: usize
) -> Result<Raster, NarpiDecodeErrors> {
    check_payload_len(reader, width, height)?;

    let mut raster = Raster::blank(width, height);
    let mut cursor = RegionCursor::new(width, height);
    let mut count = 0_usize;

    while !cursor.is_complete() {
        if reader.eof() {
            return Err(cursor.incomplete_error());
        }
        let record = read_record(reader)?;
        let (x0, y0) = cursor.place(&record)?;
        paint(&mut raster, &record, x0, y0);
        count += 1;
    }
    debug!("Painted {} region records", count);

    Ok(raster)
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use narpi_core::bytestream::{ZByteReader, ZByteWriter};

    use crate::bitmap::VisitedBitmap;
    use crate::errors::NarpiDecodeErrors;
    use crate::raster::Raster;
    use crate::region::{
        decode_region_stream, decode_regions, encode_regions, encode_regions_with,
        positioned_records, read_record, read_regions, write_record, write_regions, RegionRecord
    };

    fn encode_bytes(record: &RegionRecord) -> Vec<u8> {
        let mut out = Vec::new();
        write_record(record, &mut ZByteWriter::new(&mut out));
        out
    }

    #[test]
    fn test_single_pixel() {
        let raster = Raster::filled(1, 1, [10, 20, 30]);
        let records = encode_regions(&raster);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].color(), [10, 20, 30]);
        assert_eq!(records[0].h_extent(), 0);
        assert!(records[0].verticals().is_empty());
        assert_eq!(encode_bytes(&records[0]), [10, 20, 30, 0, 0, 0]);
        assert_eq!(decode_regions(&records, 1, 1).unwrap(), raster);
    }

    #[test]
    fn test_wide_uniform_row_splits() {
        let raster = Raster::filled(300, 1, [7, 7, 7]);
        let records = encode_regions(&raster);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].h_extent(), 253);
        assert_eq!(records[1].h_extent(), 45);
        assert_eq!(decode_regions(&records, 300, 1).unwrap(), raster);
    }

    #[test]
    fn test_uniform_block_is_one_record() {
        let raster = Raster::filled(4, 3, [1, 2, 3]);
        let records = encode_regions(&raster);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].footprint(), ["oooo", "oooo", "oooo"]);
        assert_eq!(records[0].pixel_count(), 12);
    }

    #[test]
    fn test_every_pixel_visited_once() {
        let mut raster = Raster::filled(5, 4, [0, 0, 0]);
        raster.set_pixel(2, 0, [9, 9, 9]);
        raster.set_pixel(1, 2, [9, 9, 9]);
        raster.set_pixel(3, 3, [5, 5, 5]);

        let mut bitmap = VisitedBitmap::new(1, 1);
        let records = encode_regions_with(&raster, &mut bitmap);

        assert!(bitmap.is_complete());
        let covered: usize = records.iter().map(RegionRecord::pixel_count).sum();
        assert_eq!(covered, 20);
        assert_eq!(decode_regions(&records, 5, 4).unwrap(), raster);
    }

    #[test]
    fn test_horizontal_flood_stops_at_claimed_pixel() {
        // the first region claims column 1 all the way down, the
        // second row region must not jump over it
        let mut raster = Raster::filled(3, 2, [1, 1, 1]);
        raster.set_pixel(0, 0, [2, 2, 2]);
        raster.set_pixel(2, 0, [2, 2, 2]);

        let records = encode_regions(&raster);
        assert_eq!(decode_regions(&records, 3, 2).unwrap(), raster);

        let positions: Vec<_> = positioned_records(&records, 3, 2)
            .unwrap()
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        assert_eq!(positions, [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_wire_layout_with_wide_vertical() {
        let verticals = BTreeMap::from([(0, 300), (2, 5)]);
        let record = RegionRecord::new([1, 2, 3], 2, verticals).unwrap();

        let bytes = encode_bytes(&record);
        // presence 0b101, wide 0b001, then 300 as (1,44) and 5
        assert_eq!(bytes, [1, 2, 3, 2, 0, 5, 0b101, 0b001, 1, 44, 5]);
        assert_eq!(record.encoded_size(), bytes.len());

        let mut reader = ZByteReader::new(&bytes);
        assert_eq!(read_record(&mut reader).unwrap(), record);
        assert!(reader.eof());
    }

    #[test]
    fn test_read_rejects_bad_sections() {
        let cases: [&[u8]; 5] = [
            // extent 254
            &[0, 0, 0, 254, 0, 0],
            // wide flag on absent column
            &[0, 0, 0, 0, 0, 3, 0, 1, 4],
            // zero one byte entry
            &[0, 0, 0, 0, 0, 3, 1, 0, 0],
            // two byte entry that fits in one
            &[0, 0, 0, 0, 0, 4, 1, 1, 0, 9],
            // leftover entry byte
            &[0, 0, 0, 0, 0, 4, 1, 0, 3, 3]
        ];
        for bytes in cases {
            let err = read_record(&mut ZByteReader::new(bytes)).unwrap_err();
            assert!(matches!(err, NarpiDecodeErrors::InvalidRecord(_)), "{bytes:?}");
        }
        let err = read_record(&mut ZByteReader::new([0_u8, 0, 0, 0, 0, 3, 1])).unwrap_err();
        assert!(matches!(err, NarpiDecodeErrors::TruncatedStream(3, 1)));
    }

    #[test]
    fn test_decode_rejects_misplaced_records() {
        let single = RegionRecord::new([0, 0, 0], 0, BTreeMap::new()).unwrap();
        let pair = RegionRecord::new([0, 0, 0], 1, BTreeMap::new()).unwrap();
        let triple = RegionRecord::new([0, 0, 0], 2, BTreeMap::new()).unwrap();
        let tall = RegionRecord::new([0, 0, 0], 0, BTreeMap::from([(0, 1)])).unwrap();

        // leaves the canvas to the right
        assert!(matches!(
            decode_regions(&[triple], 2, 1),
            Err(NarpiDecodeErrors::InvalidRecord(_))
        ));
        // arrives after the canvas is full
        assert!(matches!(
            decode_regions(&[single.clone(), single.clone()], 1, 1),
            Err(NarpiDecodeErrors::InvalidRecord(_))
        ));
        // the pair placed at (0,1) runs into the column painted from (1,0)
        assert!(matches!(
            decode_regions(&[single.clone(), tall, pair], 2, 2),
            Err(NarpiDecodeErrors::InvalidRecord(_))
        ));
        // too few records
        assert!(matches!(
            decode_regions(&[single], 2, 2),
            Err(NarpiDecodeErrors::DimensionMismatch(4, 1))
        ));
    }

    #[test]
    fn test_read_regions_stops_at_full_canvas() {
        let mut raster = Raster::filled(6, 3, [4, 4, 4]);
        raster.set_pixel(5, 2, [8, 8, 8]);
        let records = encode_regions(&raster);

        let mut bytes = Vec::new();
        let written = write_regions(&records, &mut ZByteWriter::new(&mut bytes));
        assert_eq!(written, bytes.len());
        bytes.push(0xAA);

        let mut reader = ZByteReader::new(&bytes);
        assert_eq!(read_regions(&mut reader, 6, 3).unwrap(), records);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_short_payload_rejected_before_allocating() {
        let empty: [u8; 0] = [];
        assert!(matches!(
            read_regions(&mut ZByteReader::new(&empty), 65535, 65535),
            Err(NarpiDecodeErrors::TruncatedStream(131069, 0))
        ));
        assert!(matches!(
            decode_region_stream(&mut ZByteReader::new(&[1_u8, 2, 3]), 65535, 65535),
            Err(NarpiDecodeErrors::TruncatedStream(131069, 3))
        ));
        // a non empty canvas needs at least one record byte
        assert!(matches!(
            decode_region_stream(&mut ZByteReader::new(&empty), 2, 2),
            Err(NarpiDecodeErrors::TruncatedStream(1, 0))
        ));
        assert!(read_regions(&mut ZByteReader::new(&empty), 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_footprint_matches_shape() {
        let verticals = BTreeMap::from([(2, 3)]);
        let record = RegionRecord::new([0, 0, 0], 3, verticals).unwrap();
        assert_eq!(record.footprint(), ["oooo", "..o.", "..o.", "..o."]);
        assert_eq!(record.rows(), 4);
    }
}
