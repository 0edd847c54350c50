/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use narpi::{NarpiDecodeErrors, NarpiEncodeErrors};

/// Errors that end a command line run
pub enum CliErrors {
    NarpiDecode(NarpiDecodeErrors),
    NarpiEncode(NarpiEncodeErrors),
    PngDecode(png::DecodingError),
    PngEncode(png::EncodingError),
    JpegDecode(jpeg_decoder::Error),
    JpegEncode(jpeg_encoder::EncodingError),
    PpmDecode(String),
    PpmEncode(String),
    IoErrors(std::io::Error),
    UnsupportedFormat(String),
    GenericString(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrors::NarpiDecode(err) => writeln!(f, "NARPI decode error: {err:?}"),
            CliErrors::NarpiEncode(err) => writeln!(f, "NARPI encode error: {err:?}"),
            CliErrors::PngDecode(err) => writeln!(f, "PNG decode error: {err}"),
            CliErrors::PngEncode(err) => writeln!(f, "PNG encode error: {err}"),
            CliErrors::JpegDecode(err) => writeln!(f, "JPEG decode error: {err}"),
            CliErrors::JpegEncode(err) => writeln!(f, "JPEG encode error: {err}"),
            CliErrors::PpmDecode(err) => writeln!(f, "PPM decode error: {err}"),
            CliErrors::PpmEncode(err) => writeln!(f, "PPM encode error: {err}"),
            CliErrors::IoErrors(err) => writeln!(f, "I/O error: {err}"),
            CliErrors::UnsupportedFormat(what) => writeln!(f, "Unsupported format: {what}"),
            CliErrors::GenericString(message) => writeln!(f, "{message}")
        }
    }
}

impl Display for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for CliErrors {}

impl From<NarpiDecodeErrors> for CliErrors {
    fn from(value: NarpiDecodeErrors) -> Self {
        CliErrors::NarpiDecode(value)
    }
}

impl From<NarpiEncodeErrors> for CliErrors {
    fn from(value: NarpiEncodeErrors) -> Self {
        CliErrors::NarpiEncode(value)
    }
}

impl From<png::DecodingError> for CliErrors {
    fn from(value: png::DecodingError) -> Self {
        CliErrors::PngDecode(value)
    }
}

impl From<png::EncodingError> for CliErrors {
    fn from(value: png::EncodingError) -> Self {
        CliErrors::PngEncode(value)
    }
}

impl From<jpeg_decoder::Error> for CliErrors {
    fn from(value: jpeg_decoder::Error) -> Self {
        CliErrors::JpegDecode(value)
    }
}

impl From<jpeg_encoder::EncodingError> for CliErrors {
    fn from(value: jpeg_encoder::EncodingError) -> Self {
        CliErrors::JpegEncode(value)
    }
}

impl From<std::io::Error> for CliErrors {
    fn from(value: std::io::Error) -> Self {
        CliErrors::IoErrors(value)
    }
}

impl From<String> for CliErrors {
    fn from(value: String) -> Self {
        CliErrors::GenericString(value)
    }
}

impl From<&'static str> for CliErrors {
    fn from(value: &'static str) -> Self {
        CliErrors::GenericString(value.to_string())
    }
}
