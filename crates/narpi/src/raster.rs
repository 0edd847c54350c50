/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::constants::MAX_DIMENSION;
use crate::errors::NarpiEncodeErrors;

/// An RGB8 image, row-major and interleaved, three bytes per pixel
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Raster {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl Raster {
    /// Wrap interleaved RGB pixels
    ///
    /// # Errors
    /// - [`NarpiEncodeErrors::TooLargeDimensions`] if width or height exceed 65535
    /// - [`NarpiEncodeErrors::DimensionMismatch`] if `pixels` is not `width*height*3` bytes
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Raster, NarpiEncodeErrors> {
        if width > MAX_DIMENSION {
            return Err(NarpiEncodeErrors::TooLargeDimensions(width));
        }
        if height > MAX_DIMENSION {
            return Err(NarpiEncodeErrors::TooLargeDimensions(height));
        }
        let expected = width * height * 3;

        if pixels.len() != expected {
            return Err(NarpiEncodeErrors::DimensionMismatch(expected, pixels.len()));
        }
        Ok(Raster {
            width,
            height,
            pixels
        })
    }
    /// A raster where every pixel is `color`
    ///
    /// Dimensions are not checked against the container limits,
    /// encoding an oversized raster fails later.
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Raster {
        let mut pixels = Vec::with_capacity(width * height * 3);

        for _ in 0..width * height {
            pixels.extend_from_slice(&color);
        }
        Raster {
            width,
            height,
            pixels
        }
    }
    /// All black raster, used as the decode canvas
    pub(crate) fn blank(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            pixels: vec![0; width * height * 3]
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of pixels, not bytes
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at `(x, y)`
    ///
    /// # Panics
    /// If the coordinate is outside the raster
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height);
        self.pixel_at(y * self.width + x)
    }

    /// Set the color at `(x, y)`
    ///
    /// # Panics
    /// If the coordinate is outside the raster
    pub fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 3]) {
        assert!(x < self.width && y < self.height);
        self.set_pixel_at(y * self.width + x, color);
    }

    #[inline]
    pub(crate) fn pixel_at(&self, index: usize) -> [u8; 3] {
        let start = index * 3;
        [
            self.pixels[start],
            self.pixels[start + 1],
            self.pixels[start + 2]
        ]
    }

    #[inline]
    pub(crate) fn set_pixel_at(&mut self, index: usize, color: [u8; 3]) {
        let start = index * 3;
        self.pixels[start..start + 3].copy_from_slice(&color);
    }

    /// Copy out one color channel, `0` red, `1` green, `2` blue
    pub fn channel(&self, channel: usize) -> Vec<u8> {
        self.pixels.iter().skip(channel).step_by(3).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::errors::NarpiEncodeErrors;
    use crate::Raster;

    #[test]
    fn test_rejects_wrong_length() {
        let err = Raster::new(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, NarpiEncodeErrors::DimensionMismatch(12, 11)));
    }

    #[test]
    fn test_rejects_large_dimensions() {
        let err = Raster::new(65536, 0, vec![]).unwrap_err();
        assert!(matches!(err, NarpiEncodeErrors::TooLargeDimensions(65536)));
    }

    #[test]
    fn test_channels_and_pixels() {
        let mut raster = Raster::filled(2, 1, [1, 2, 3]);
        raster.set_pixel(1, 0, [4, 5, 6]);
        assert_eq!(raster.pixel(1, 0), [4, 5, 6]);
        assert_eq!(raster.channel(0), vec![1, 4]);
        assert_eq!(raster.channel(2), vec![3, 6]);
    }
}
