/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and Encoder Options
//!
//! This module exposes the structs through which the narpi encoder,
//! decoder and the command line tool share configuration.
//!
//! One [`DecoderOptions`] can be reused for any number of decodes and
//! one [`EncoderOptions`] describes the raster handed to the encoder.
pub use decoder::DecoderOptions;
pub use encoder::{EncoderOptions, Strategy, DEFAULT_SPLIT_THRESHOLD, MAX_SPLIT_THRESHOLD};

mod decoder;
mod encoder;
