/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Every container starts with this
pub const NARPI_MAGIC_PREFIX: &[u8] = b"NARPI";
/// Format version written by this crate, the only one accepted on read
pub const NARPI_VERSION: &str = "1.0";
/// Ends the magic string
pub const NARPI_MAGIC_TERMINATOR: u8 = b'!';
/// How far ahead the header parser looks for the terminator
pub const NARPI_MAX_MAGIC_LENGTH: usize = 16;

/// Largest value a record's horizontal extent can take
pub const MAX_H_EXTENT: u8 = 253;
/// Columns a single record may span, `MAX_H_EXTENT + 1`
pub const MAX_RECORD_COLUMNS: usize = MAX_H_EXTENT as usize + 1;

/// Upper bound on the pixels one byte of region records can paint
///
/// A full width record of two byte verticals paints under 29000 pixels
/// per byte it occupies.
pub const MAX_PIXELS_PER_REGION_BYTE: usize = 32768;

/// Literal span tags start right after the largest repeat tag
pub const LITERAL_TAG_BASE: u8 = 127;

/// Widest and tallest raster a container header can describe
pub const MAX_DIMENSION: usize = u16::MAX as usize;
