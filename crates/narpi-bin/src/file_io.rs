/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::trace;

use crate::errors::CliErrors;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];
const JPEG_SIGNATURE: [u8; 2] = [0xFF, 0xD8];

/// Image formats the converter reads or writes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    Narpi,
    Png,
    Jpeg,
    Ppm
}

impl ImageFormat {
    /// Detect a format from the first bytes of a file
    pub fn guess_format(bytes: &[u8]) -> Option<ImageFormat> {
        if bytes.starts_with(narpi::NARPI_MAGIC_PREFIX) {
            Some(ImageFormat::Narpi)
        } else if bytes.starts_with(&PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else if matches!(bytes, [b'P', b'5'..=b'7', ..]) {
            Some(ImageFormat::Ppm)
        } else {
            None
        }
    }

    /// Pick a format from the extension of `path`, case insensitive
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "narpi" => Some(ImageFormat::Narpi),
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "ppm" => Some(ImageFormat::Ppm),
            _ => None
        }
    }
}

/// Write `data` to `path`, refusing to replace an existing
/// file unless `overwrite` is set
pub fn write_output(path: &Path, data: &[u8], overwrite: bool) -> Result<(), CliErrors> {
    let mut options = OpenOptions::new();
    options.write(true);

    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path).map_err(|err| {
        if err.kind() == ErrorKind::AlreadyExists {
            CliErrors::GenericString(format!("Not overwriting file {path:?}"))
        } else {
            CliErrors::from(err)
        }
    })?;
    file.write_all(data)?;

    trace!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}
