/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use narpi_core::colorspace::ColorSpace;
use narpi_core::log::debug;
use narpi_core::options::EncoderOptions;

use crate::container::Container;
use crate::errors::NarpiEncodeErrors;
use crate::raster::Raster;

const SUPPORTED_COLORSPACES: [ColorSpace; 1] = [ColorSpace::RGB];

/// A NARPI encoder
///
/// # Example
/// - Encode a 100 by 100 RGB image with the plane strategy
///
/// ```
/// use narpi::narpi_core::colorspace::ColorSpace;
/// use narpi::narpi_core::options::{EncoderOptions, Strategy};
/// use narpi::{NarpiEncodeErrors, NarpiEncoder};
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), NarpiEncodeErrors> {
///     let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
///     let options = EncoderOptions::new(W, H, ColorSpace::RGB).set_strategy(Strategy::Plane);
///     let mut encoder = NarpiEncoder::new(&pixels, options);
///     let bytes = encoder.encode()?;
///     // write bytes, or do something
///     Ok(())
/// }
/// ```
pub struct NarpiEncoder<'a> {
    // raw pixels, interleaved RGB
    pixel_data: &'a [u8],
    options:    EncoderOptions
}

impl<'a> NarpiEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, size must be equal to `width*height*3`
    /// - options: Width, height, colorspace, strategy and split threshold
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> NarpiEncoder<'a> {
        NarpiEncoder {
            pixel_data: data,
            options
        }
    }

    pub const fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode into a [`Container`] without serializing it
    pub fn encode_container(&self) -> Result<Container, NarpiEncodeErrors> {
        if self.options.get_colorspace() != ColorSpace::RGB {
            return Err(NarpiEncodeErrors::UnsupportedColorspace(
                self.options.get_colorspace(),
                &SUPPORTED_COLORSPACES
            ));
        }
        let raster = Raster::new(
            self.options.get_width(),
            self.options.get_height(),
            self.pixel_data.to_vec()
        )?;
        let container = Container::encode_with_options(&raster, &self.options)?;

        debug!(
            "Encoded {} pixel bytes into {} bytes",
            self.pixel_data.len(),
            container.encoded_size()
        );
        Ok(container)
    }

    /// Encode the pixels into a serialized NARPI image
    ///
    /// # Returns
    /// - Ok(bytes): header and payload
    /// - Err: The error encountered during encoding
    pub fn encode(&mut self) -> Result<Vec<u8>, NarpiEncodeErrors> {
        Ok(self.encode_container()?.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use narpi_core::colorspace::ColorSpace;
    use narpi_core::options::{EncoderOptions, Strategy};

    use crate::{NarpiDecoder, NarpiEncodeErrors, NarpiEncoder};

    #[test]
    fn test_narpi_encode_rgb() {
        const W: usize = 100;
        const H: usize = 100;

        let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| ((i / 300) % 256) as u8);

        for strategy in [Strategy::Region, Strategy::Plane] {
            let options = EncoderOptions::new(W, H, ColorSpace::RGB).set_strategy(strategy);
            let output = NarpiEncoder::new(&pixels, options).encode().unwrap();

            let mut decoder = NarpiDecoder::new(&output);
            let decoded_pixels = decoder.decode().unwrap();
            assert_eq!(&pixels[..], &decoded_pixels[..]);
        }
    }

    #[test]
    fn test_narpi_rejects_rgba() {
        let pixels = [0_u8; 16];
        let mut encoder = NarpiEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGBA));

        assert!(matches!(
            encoder.encode(),
            Err(NarpiEncodeErrors::UnsupportedColorspace(ColorSpace::RGBA, _))
        ));
    }

    #[test]
    fn test_narpi_rejects_short_buffer() {
        let pixels = [0_u8; 11];
        let mut encoder = NarpiEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGB));

        assert!(matches!(
            encoder.encode(),
            Err(NarpiEncodeErrors::DimensionMismatch(12, 11))
        ));
    }
}
