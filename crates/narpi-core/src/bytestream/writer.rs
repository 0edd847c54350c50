/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

/// Encapsulates a simple byte writer appending to a growable buffer
///
/// Writes never fail, the buffer grows as needed.
pub struct ZByteWriter<'a> {
    buffer:        &'a mut Vec<u8>,
    bytes_written: usize
}

impl<'a> ZByteWriter<'a> {
    /// Create a new writer that appends to `buffer`
    pub fn new(buffer: &'a mut Vec<u8>) -> ZByteWriter<'a> {
        ZByteWriter {
            buffer,
            bytes_written: 0
        }
    }
    /// Number of bytes this writer appended so far
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.buffer.push(byte);
        self.bytes_written += 1;
    }
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) {
        self.buffer.extend_from_slice(buf);
        self.bytes_written += buf.len();
    }
}

macro_rules! write_single_type {
    ($name:tt,$int_type:tt) => {
        impl<'a> ZByteWriter<'a> {
            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[inline]
            pub fn $name(&mut self, value: $int_type) {
                self.write_all(&value.to_be_bytes());
            }
        }
    };
}

write_single_type!(write_u16_be, u16);
write_single_type!(write_u32_be, u32);
