/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use narpi_core::colorspace::ColorSpace;
use narpi_core::options::{DecoderOptions, EncoderOptions};

use crate::cmd_parsers::global_options::CmdOptions;

pub mod global_options;

pub fn get_decoder_options(options: &CmdOptions) -> DecoderOptions {
    DecoderOptions::new_cmd()
        .set_max_width(options.max_width)
        .set_max_height(options.max_height)
        .set_strict_mode(options.strict_mode)
}

/// Encoder options for a `width` by `height` RGB image
pub fn get_encoder_options(options: &CmdOptions, width: usize, height: usize) -> EncoderOptions {
    EncoderOptions::new(width, height, ColorSpace::RGB)
        .set_strategy(options.strategy)
        .set_split_threshold(options.split_threshold)
}
