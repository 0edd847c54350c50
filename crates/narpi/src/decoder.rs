/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use narpi_core::bytestream::ZByteReader;
use narpi_core::colorspace::ColorSpace;
use narpi_core::log::trace;
use narpi_core::options::{DecoderOptions, Strategy};

use crate::container::{decode_payload, NarpiHeader};
use crate::errors::NarpiDecodeErrors;
use crate::raster::Raster;

/// A NARPI decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Width, height and strategy are accessible
/// after decoding headers
///
/// [`decode_headers`]:NarpiDecoder::decode_headers
/// [`decode`]:NarpiDecoder::decode
pub struct NarpiDecoder<T: AsRef<[u8]>> {
    header:  Option<NarpiHeader>,
    stream:  ZByteReader<T>,
    options: DecoderOptions
}

impl<T: AsRef<[u8]>> NarpiDecoder<T> {
    /// Create a new decoder with the default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = narpi::NarpiDecoder::new(&[0_u8; 16]);
    /// // additional code
    /// ```
    pub fn new(data: T) -> NarpiDecoder<T> {
        NarpiDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use narpi::narpi_core::options::DecoderOptions;
    /// use narpi::NarpiDecoder;
    /// // only decode images less than 10 in both width and height
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = NarpiDecoder::new_with_options([0_u8; 0], options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> NarpiDecoder<T> {
        NarpiDecoder {
            header: None,
            stream: ZByteReader::new(data),
            options
        }
    }
    /// Decode the header storing needed information into
    /// the decoder instance
    ///
    /// Dimensions are checked against the configured limits here,
    /// before any payload byte is read.
    pub fn decode_headers(&mut self) -> Result<(), NarpiDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = NarpiHeader::parse(&mut self.stream)?;
        header.check_limits(&self.options)?;

        self.header = Some(header);
        Ok(())
    }

    /// Decode the image into a [`Raster`]
    pub fn decode_raster(&mut self) -> Result<Raster, NarpiDecodeErrors> {
        self.decode_headers()?;

        let header = self
            .header
            .ok_or(NarpiDecodeErrors::MalformedHeader("headers not decoded"))?;
        let raster = decode_payload(&header, &mut self.stream, &self.options)?;

        trace!("Finished decoding image");
        Ok(raster)
    }

    /// Decode the image, returning interleaved RGB pixels
    ///
    /// The length of the output is `width*height*3`
    pub fn decode(&mut self) -> Result<Vec<u8>, NarpiDecodeErrors> {
        Ok(self.decode_raster()?.into_pixels())
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .map(|header| (usize::from(header.width), usize::from(header.height)))
    }

    /// Payload strategy, or none if the headers haven't been decoded
    pub fn strategy(&self) -> Option<Strategy> {
        self.header.map(|header| header.strategy)
    }

    /// Decoded pixels are always RGB
    pub const fn colorspace(&self) -> ColorSpace {
        ColorSpace::RGB
    }

    /// Number of bytes needed to hold the decoded pixels
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.dimensions().map(|(width, height)| width * height * 3)
    }
}
