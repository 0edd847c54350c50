/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the narpi crates
//!
//! This crate provides a set of core routines shared
//! by the narpi codec and the command line converter
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace information for rasters handed to and from the codec
//! - Encoder and decoder options
//! - A logging facade that compiles to nothing when the `log` feature is off
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which we need for storing encoded and decoded bytes.
//!
//! # Features
//!  - `std`: Enables `std::io::Error` propagation in byte stream errors.
//!
//!  - `log`: Routes the logging macros in [`log`] to the `log` crate.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!    present in the crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
#[cfg(not(feature = "log"))]
pub mod log;
#[cfg(feature = "log")]
pub use log;
pub mod options;
#[cfg(feature = "serde")]
pub mod serde;
