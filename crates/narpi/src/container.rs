/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use narpi_core::bytestream::{ZByteReader, ZByteWriter};
use narpi_core::log::{trace, warn};
use narpi_core::options::{DecoderOptions, EncoderOptions, Strategy, MAX_SPLIT_THRESHOLD};

use crate::constants::{
    NARPI_MAGIC_PREFIX, NARPI_MAGIC_TERMINATOR, NARPI_MAX_MAGIC_LENGTH, NARPI_VERSION
};
use crate::errors::{NarpiDecodeErrors, NarpiEncodeErrors};
use crate::plane::{read_planes, write_planes};
use crate::raster::Raster;
use crate::region::{decode_region_stream, encode_regions, read_regions, write_regions, RegionRecord};

/// Fields stored in front of every payload
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NarpiHeader {
    pub strategy: Strategy,
    pub width:    u16,
    pub height:   u16
}

impl NarpiHeader {
    /// The magic string for `strategy`, e.g. `NARPI1.0R!`
    pub fn magic(strategy: Strategy) -> Vec<u8> {
        let mut magic = Vec::with_capacity(NARPI_MAX_MAGIC_LENGTH);
        magic.extend_from_slice(NARPI_MAGIC_PREFIX);
        magic.extend_from_slice(NARPI_VERSION.as_bytes());
        magic.push(strategy.tag());
        magic.push(NARPI_MAGIC_TERMINATOR);
        magic
    }

    /// Parse a header, leaving `reader` at the first payload byte
    ///
    /// The magic string is checked before anything else is read.
    ///
    /// # Errors
    /// - [`NarpiDecodeErrors::MalformedHeader`] if the magic string is missing,
    ///   names another version or an unknown strategy
    /// - [`NarpiDecodeErrors::TruncatedStream`] if the dimensions are cut short
    pub fn parse<T: AsRef<[u8]>>(reader: &mut ZByteReader<T>) -> Result<NarpiHeader, NarpiDecodeErrors> {
        let magic = reader
            .read_until(NARPI_MAGIC_TERMINATOR, NARPI_MAX_MAGIC_LENGTH)
            .map_err(|_| NarpiDecodeErrors::MalformedHeader("no NARPI magic string found"))?;

        // prefix, version, one strategy byte, terminator
        let expected_len = NARPI_MAGIC_PREFIX.len() + NARPI_VERSION.len() + 2;

        if !magic.starts_with(NARPI_MAGIC_PREFIX) {
            return Err(NarpiDecodeErrors::MalformedHeader(
                "magic string does not start with NARPI"
            ));
        }
        if magic.len() != expected_len
            || &magic[NARPI_MAGIC_PREFIX.len()..expected_len - 2] != NARPI_VERSION.as_bytes()
        {
            return Err(NarpiDecodeErrors::MalformedHeader(
                "unsupported NARPI version"
            ));
        }
        let strategy = Strategy::from_tag(magic[expected_len - 2])
            .ok_or(NarpiDecodeErrors::MalformedHeader("unknown NARPI strategy"))?;

        let width = reader.get_u16_be_err()?;
        let height = reader.get_u16_be_err()?;

        trace!("Image strategy: {strategy}");
        trace!("Image width: {width}");
        trace!("Image height: {height}");

        Ok(NarpiHeader {
            strategy,
            width,
            height
        })
    }

    /// Write the header, returning the bytes written
    pub fn write(&self, writer: &mut ZByteWriter) -> usize {
        let start = writer.bytes_written();

        writer.write_all(&NarpiHeader::magic(self.strategy));
        writer.write_u16_be(self.width);
        writer.write_u16_be(self.height);

        writer.bytes_written() - start
    }

    /// Reject dimensions larger than the decoder limits
    pub fn check_limits(&self, options: &DecoderOptions) -> Result<(), NarpiDecodeErrors> {
        let (width, height) = (usize::from(self.width), usize::from(self.height));

        if width > options.get_max_width() {
            return Err(NarpiDecodeErrors::TooLargeDimensions(
                "width",
                options.get_max_width(),
                width
            ));
        }
        if height > options.get_max_height() {
            return Err(NarpiDecodeErrors::TooLargeDimensions(
                "height",
                options.get_max_height(),
                height
            ));
        }
        Ok(())
    }
}

/// Decode the payload following `header`, honoring `options`
pub(crate) fn decode_payload<T: AsRef<[u8]>>(
    header: &NarpiHeader, reader: &mut ZByteReader<T>, options: &DecoderOptions
) -> Result<Raster, NarpiDecodeErrors> {
    header.check_limits(options)?;

    let (width, height) = (usize::from(header.width), usize::from(header.height));

    let raster = match header.strategy {
        Strategy::Region => decode_region_stream(reader, width, height)?,
        Strategy::Plane => read_planes(reader, width, height)?
    };
    let trailing = reader.remaining();

    if trailing > 0 {
        if options.get_strict_mode() {
            return Err(NarpiDecodeErrors::TrailingBytes(trailing));
        }
        warn!("Ignoring {trailing} bytes after the payload");
    }
    Ok(raster)
}

/// An encoded image, header fields and payload
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Container {
    header:  NarpiHeader,
    payload: Vec<u8>
}

impl Container {
    /// Encode `raster` with `strategy` and the default split threshold
    pub fn encode(raster: &Raster, strategy: Strategy) -> Result<Container, NarpiEncodeErrors> {
        let options = EncoderOptions::default().set_strategy(strategy);
        Container::encode_with_options(raster, &options)
    }

    /// Encode `raster` with the strategy and split threshold in `options`
    ///
    /// Width, height and colorspace in `options` are ignored,
    /// the raster carries its own.
    ///
    /// # Errors
    /// - [`NarpiEncodeErrors::InvalidSplitThreshold`] if the threshold is not in `1..=127`
    /// - [`NarpiEncodeErrors::TooLargeDimensions`] if the raster does not fit in the header
    pub fn encode_with_options(
        raster: &Raster, options: &EncoderOptions
    ) -> Result<Container, NarpiEncodeErrors> {
        let threshold = options.get_split_threshold();

        if threshold == 0 || threshold > MAX_SPLIT_THRESHOLD {
            return Err(NarpiEncodeErrors::InvalidSplitThreshold(threshold));
        }
        let width = u16::try_from(raster.width())
            .map_err(|_| NarpiEncodeErrors::TooLargeDimensions(raster.width()))?;
        let height = u16::try_from(raster.height())
            .map_err(|_| NarpiEncodeErrors::TooLargeDimensions(raster.height()))?;

        let strategy = options.get_strategy();
        let mut payload = Vec::new();
        let mut writer = ZByteWriter::new(&mut payload);

        match strategy {
            Strategy::Region => {
                let records = encode_regions(raster);
                write_regions(&records, &mut writer);
            }
            Strategy::Plane => {
                write_planes(raster, threshold, &mut writer)?;
            }
        }
        Ok(Container {
            header: NarpiHeader {
                strategy,
                width,
                height
            },
            payload
        })
    }

    /// Decode with default options
    pub fn decode(&self) -> Result<Raster, NarpiDecodeErrors> {
        self.decode_with_options(&DecoderOptions::default())
    }

    pub fn decode_with_options(&self, options: &DecoderOptions) -> Result<Raster, NarpiDecodeErrors> {
        let mut reader = ZByteReader::new(&self.payload);
        decode_payload(&self.header, &mut reader, options)
    }

    /// Parse a serialized container
    ///
    /// Only the header is validated, the payload is checked when decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Container, NarpiDecodeErrors> {
        let mut reader = ZByteReader::new(bytes);
        let header = NarpiHeader::parse(&mut reader)?;

        Ok(Container {
            header,
            payload: reader.remaining_bytes().to_vec()
        })
    }

    /// Serialize header and payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NARPI_MAX_MAGIC_LENGTH + 4 + self.payload.len());
        let mut writer = ZByteWriter::new(&mut out);

        self.header.write(&mut writer);
        writer.write_all(&self.payload);

        out
    }

    /// Write the container to `path`
    ///
    /// # Errors
    /// - [`NarpiEncodeErrors::FileExists`] if `path` exists and `overwrite` is false
    /// - [`NarpiEncodeErrors::IoErrors`] for any other file system error
    #[cfg(feature = "std")]
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self, path: P, overwrite: bool
    ) -> Result<(), NarpiEncodeErrors> {
        use std::io::Write;

        let path = path.as_ref();
        let mut options = std::fs::OpenOptions::new();
        options.write(true);

        if overwrite {
            options.create(true).truncate(true);
        } else {
            // fails atomically if the file is already there
            options.create_new(true);
        }
        let mut file = options.open(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                NarpiEncodeErrors::FileExists(path.display().to_string())
            } else {
                NarpiEncodeErrors::from(err)
            }
        })?;
        file.write_all(&self.to_bytes())?;

        trace!("Wrote {} bytes to {}", self.encoded_size(), path.display());
        Ok(())
    }

    /// Read and parse the container stored at `path`
    #[cfg(feature = "std")]
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Container, NarpiDecodeErrors> {
        let bytes = std::fs::read(path)?;
        Container::from_bytes(&bytes)
    }

    pub const fn header(&self) -> &NarpiHeader {
        &self.header
    }

    pub const fn strategy(&self) -> Strategy {
        self.header.strategy
    }

    pub const fn width(&self) -> u16 {
        self.header.width
    }

    pub const fn height(&self) -> u16 {
        self.header.height
    }

    /// Format version, always the one this crate writes
    pub const fn version(&self) -> &'static str {
        NARPI_VERSION
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the serialized container
    pub fn encoded_size(&self) -> usize {
        NarpiHeader::magic(self.header.strategy).len() + 4 + self.payload.len()
    }

    /// Parse the region records of a region payload
    ///
    /// Returns `None` for plane payloads.
    pub fn region_records(&self) -> Option<Result<Vec<RegionRecord>, NarpiDecodeErrors>> {
        if self.header.strategy != Strategy::Region {
            return None;
        }
        let mut reader = ZByteReader::new(&self.payload);
        Some(read_regions(
            &mut reader,
            usize::from(self.header.width),
            usize::from(self.header.height)
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use narpi_core::bytestream::ZByteReader;
    use narpi_core::options::{DecoderOptions, EncoderOptions, Strategy};

    use crate::errors::{NarpiDecodeErrors, NarpiEncodeErrors};
    use crate::raster::Raster;
    use crate::{Container, NarpiHeader};

    fn sample() -> Raster {
        let mut raster = Raster::filled(7, 5, [30, 60, 90]);
        raster.set_pixel(3, 2, [0, 0, 0]);
        raster.set_pixel(6, 4, [255, 0, 0]);
        raster
    }

    #[test]
    fn test_header_layout() {
        let container = Container::encode(&Raster::filled(1, 1, [10, 20, 30]), Strategy::Region).unwrap();
        let bytes = container.to_bytes();

        assert_eq!(&bytes[..10], b"NARPI1.0R!");
        assert_eq!(&bytes[10..14], &[0, 1, 0, 1]);
        assert_eq!(&bytes[14..], &[10, 20, 30, 0, 0, 0]);
        assert_eq!(container.encoded_size(), bytes.len());

        let plane = Container::encode(&Raster::filled(1, 1, [0, 0, 0]), Strategy::Plane).unwrap();
        assert_eq!(&plane.to_bytes()[..10], b"NARPI1.0P!");
    }

    #[test]
    fn test_both_strategies_round_trip() {
        let raster = sample();

        for strategy in [Strategy::Region, Strategy::Plane] {
            let container = Container::encode(&raster, strategy).unwrap();
            let parsed = Container::from_bytes(&container.to_bytes()).unwrap();

            assert_eq!(parsed, container);
            assert_eq!(parsed.strategy(), strategy);
            assert_eq!(parsed.decode().unwrap(), raster);
        }
    }

    #[test]
    fn test_rejects_bad_magic() {
        let inputs: [&[u8]; 5] = [
            b"",
            b"PNG\x89 not narpi at all",
            b"NARPI0.6!\x00\x01\x00\x01",
            b"NARPI1.0X!\x00\x01\x00\x01",
            b"XARPI1.0R!\x00\x01\x00\x01"
        ];
        for input in inputs {
            let err = Container::from_bytes(input).unwrap_err();
            assert!(matches!(err, NarpiDecodeErrors::MalformedHeader(_)), "{input:?}");
        }
        let err = NarpiHeader::parse(&mut ZByteReader::new(b"NARPI1.0R!\x00")).unwrap_err();
        assert!(matches!(err, NarpiDecodeErrors::TruncatedStream(2, 1)));
    }

    #[test]
    fn test_trailing_bytes() {
        let raster = sample();
        let mut bytes = Container::encode(&raster, Strategy::Region).unwrap().to_bytes();
        bytes.extend_from_slice(&[1, 2, 3]);

        let container = Container::from_bytes(&bytes).unwrap();
        assert!(matches!(
            container.decode(),
            Err(NarpiDecodeErrors::TrailingBytes(3))
        ));
        let lenient = DecoderOptions::default().set_strict_mode(false);
        assert_eq!(container.decode_with_options(&lenient).unwrap(), raster);
    }

    #[test]
    fn test_decoder_limits() {
        let container = Container::encode(&sample(), Strategy::Plane).unwrap();
        let options = DecoderOptions::default().set_max_height(4);

        assert!(matches!(
            container.decode_with_options(&options),
            Err(NarpiDecodeErrors::TooLargeDimensions("height", 4, 5))
        ));
    }

    #[test]
    fn test_split_threshold_checked_on_entry() {
        let options = EncoderOptions::default().set_split_threshold(0);
        assert!(matches!(
            Container::encode_with_options(&sample(), &options),
            Err(NarpiEncodeErrors::InvalidSplitThreshold(0))
        ));
    }

    #[test]
    fn test_region_records_only_for_region_payloads() {
        let raster = sample();
        let region = Container::encode(&raster, Strategy::Region).unwrap();
        let records: Vec<_> = region.region_records().unwrap().unwrap();
        assert!(!records.is_empty());

        let plane = Container::encode(&raster, Strategy::Plane).unwrap();
        assert!(plane.region_records().is_none());
    }
}
