/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Display, Formatter};

use crate::colorspace::ColorSpace;

/// Largest span length the plane codec can express in a single tag
pub const MAX_SPLIT_THRESHOLD: u8 = 127;
/// Split threshold used when none is configured
pub const DEFAULT_SPLIT_THRESHOLD: u8 = MAX_SPLIT_THRESHOLD;

/// The way pixels are laid out in the payload
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Strategy {
    /// Flood filled regions of a single color
    #[default]
    Region,
    /// Per channel planes packed into repeat and literal spans
    Plane
}

impl Strategy {
    /// The single character stored in the container magic
    pub const fn tag(self) -> u8 {
        match self {
            Strategy::Region => b'R',
            Strategy::Plane => b'P'
        }
    }
    /// Inverse of [`Strategy::tag`]
    pub const fn from_tag(tag: u8) -> Option<Strategy> {
        match tag {
            b'R' => Some(Strategy::Region),
            b'P' => Some(Strategy::Plane),
            _ => None
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Strategy::Region => write!(f, "region"),
            Strategy::Plane => write!(f, "plane")
        }
    }
}

/// Options for the narpi encoder
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:           usize,
    height:          usize,
    colorspace:      ColorSpace,
    strategy:        Strategy,
    split_threshold: u8
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:           0,
            height:          0,
            colorspace:      ColorSpace::RGB,
            strategy:        Strategy::Region,
            split_threshold: DEFAULT_SPLIT_THRESHOLD
        }
    }
}

impl EncoderOptions {
    /// Create options describing a `width` x `height` raster in `colorspace`
    pub fn new(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions::default()
            .set_width(width)
            .set_height(height)
            .set_colorspace(colorspace)
    }
    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }
    /// Get height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }
    /// Get the colorspace the input pixels are in
    pub const fn get_colorspace(&self) -> ColorSpace {
        self.colorspace
    }
    pub const fn get_strategy(&self) -> Strategy {
        self.strategy
    }
    /// Maximum span length emitted by the plane strategy
    pub const fn get_split_threshold(&self) -> u8 {
        self.split_threshold
    }

    /// Set width for the image to be encoded
    #[must_use]
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
    /// Set height for the image to be encoded
    #[must_use]
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
    /// Set colorspace of the pixels handed to the encoder
    #[must_use]
    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }
    #[must_use]
    pub fn set_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
    /// Set the split threshold for the plane strategy
    ///
    /// The value is not clamped, the encoder rejects values
    /// outside `1..=127`
    #[must_use]
    pub fn set_split_threshold(mut self, threshold: u8) -> Self {
        self.split_threshold = threshold;
        self
    }
}
