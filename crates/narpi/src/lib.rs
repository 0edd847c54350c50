/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding NARPI images
//!
//! NARPI (not a regular pixels image) is a lossless codec for RGB rasters
//! made of large flat colored areas. A container carries one of two payloads
//!
//! - **region**: the raster is split into flood filled regions of a single color,
//!   each region is stored as a small record, see [`region`]
//! - **plane**: every color channel is packed into repeat and literal spans,
//!   see [`plane`]
//!
//! The strategy is part of the magic string so a decoder never has to guess.
//!
//! # Example
//! ```
//! use narpi::{Container, Raster};
//! use narpi::narpi_core::options::Strategy;
//!
//! let raster = Raster::filled(16, 16, [10, 20, 30]);
//! let container = Container::encode(&raster, Strategy::Region).unwrap();
//! let bytes = container.to_bytes();
//!
//! let decoded = Container::from_bytes(&bytes).unwrap().decode().unwrap();
//! assert_eq!(decoded, raster);
//! ```
//!
//! # Features
//! - `std`: file backed loading and saving of containers
//! - `log`: trace and debug information through the `log` crate
//!
//! ## `no_std`
//! Without the `std` feature the crate only needs `alloc`

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use constants::{NARPI_MAGIC_PREFIX, NARPI_VERSION};
pub use container::*;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use narpi_core;
pub use raster::Raster;

pub mod bitmap;
mod constants;
mod container;
mod decoder;
mod encoder;
mod errors;
pub mod plane;
mod raster;
pub mod region;
pub mod split;
