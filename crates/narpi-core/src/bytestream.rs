/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader works over anything that can be viewed as a byte slice and
//! reports every short read as an error, the writer appends to a growable
//! buffer and therefore cannot fail.
//!
//! Multi-byte integers are read and written in big endian, which is
//! what every narpi structure uses on disk.
pub use reader::{ZByteIoError, ZByteReader};
pub use writer::ZByteWriter;

mod reader;
mod writer;
