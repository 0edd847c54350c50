/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding
use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use narpi_core::bytestream::ZByteIoError;
use narpi_core::colorspace::ColorSpace;

/// Possible Errors that may occur during decoding
pub enum NarpiDecodeErrors {
    /// The stream does not start with a recognized
    /// `NARPI<version><strategy>!` magic string
    MalformedHeader(&'static str),
    /// The stream ended before a structure was complete
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually left
    TruncatedStream(usize, usize),
    /// A region record or plane span is inconsistent
    /// with itself or with the canvas it is painted on
    InvalidRecord(String),
    /// The payload covers a different number of pixels
    /// than the header declares
    ///
    /// # Arguments
    /// - 1st argument is the number of pixels expected
    /// - 2nd argument is the number actually produced
    DimensionMismatch(usize, usize),
    /// Header dimensions exceed the configured decoder limits
    ///
    /// # Arguments
    /// - 1st argument is the dimension name, `width` or `height`
    /// - 2nd argument is the configured limit
    /// - 3rd argument is the dimension found in the header
    TooLargeDimensions(&'static str, usize, usize),
    /// Bytes are left after the payload in strict mode
    TrailingBytes(usize),
    IoErrors(ZByteIoError)
}

impl Debug for NarpiDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            NarpiDecodeErrors::MalformedHeader(reason) => {
                writeln!(f, "Malformed header: {reason}")
            }
            NarpiDecodeErrors::TruncatedStream(expected, found) => {
                writeln!(
                    f,
                    "Truncated stream, required {expected} bytes but remaining stream has {found}"
                )
            }
            NarpiDecodeErrors::InvalidRecord(reason) => {
                writeln!(f, "Invalid record: {reason}")
            }
            NarpiDecodeErrors::DimensionMismatch(expected, found) => {
                writeln!(
                    f,
                    "Dimension mismatch, header declares {expected} pixels but payload covers {found}"
                )
            }
            NarpiDecodeErrors::TooLargeDimensions(name, limit, found) => {
                writeln!(
                    f,
                    "Image {name} {found} greater than max configured {name} {limit}"
                )
            }
            NarpiDecodeErrors::TrailingBytes(count) => {
                writeln!(f, "{count} unexpected bytes after the payload")
            }
            NarpiDecodeErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl Display for NarpiDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NarpiDecodeErrors {}

impl From<ZByteIoError> for NarpiDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        match value {
            ZByteIoError::NotEnoughBytes(expected, found) => {
                NarpiDecodeErrors::TruncatedStream(expected, found)
            }
            value => NarpiDecodeErrors::IoErrors(value)
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for NarpiDecodeErrors {
    fn from(value: std::io::Error) -> Self {
        NarpiDecodeErrors::IoErrors(ZByteIoError::StdIoError(value))
    }
}

/// Errors encountered during encoding
pub enum NarpiEncodeErrors {
    /// Plane split threshold outside `1..=127`
    InvalidSplitThreshold(u8),
    /// Too large dimensions
    ///
    /// Width and height are stored as 16 bit values
    TooLargeDimensions(usize),
    /// Pixel buffer length is not `width*height*3`
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    DimensionMismatch(usize, usize),
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// The output file exists and overwriting was not allowed
    FileExists(String),
    IoErrors(ZByteIoError)
}

impl Debug for NarpiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            NarpiEncodeErrors::InvalidSplitThreshold(found) => {
                writeln!(
                    f,
                    "Invalid split threshold {found}, expected a value between 1 and 127"
                )
            }
            NarpiEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, NARPI can only encode images less than {}",
                    u16::MAX
                )
            }
            NarpiEncodeErrors::DimensionMismatch(expected, found) => {
                writeln!(
                    f,
                    "Expected pixel buffer of length {expected} but found {found}"
                )
            }
            NarpiEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into NARPI, supported ones are {supported:?}")
            }
            NarpiEncodeErrors::FileExists(path) => {
                writeln!(f, "File {path} already exists, refusing to overwrite it")
            }
            NarpiEncodeErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl Display for NarpiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NarpiEncodeErrors {}

impl From<ZByteIoError> for NarpiEncodeErrors {
    fn from(value: ZByteIoError) -> Self {
        NarpiEncodeErrors::IoErrors(value)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for NarpiEncodeErrors {
    fn from(value: std::io::Error) -> Self {
        NarpiEncodeErrors::IoErrors(ZByteIoError::StdIoError(value))
    }
}
