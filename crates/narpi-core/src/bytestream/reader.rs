/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

/// Errors raised by the byte stream reader
pub enum ZByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// Requested more bytes than the stream holds
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually left
    NotEnoughBytes(usize, usize),
    Generic(&'static str)
}

impl core::fmt::Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ZByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ZByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ZByteIoError {
    fn from(value: std::io::Error) -> Self {
        ZByteIoError::StdIoError(value)
    }
}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// An encapsulation of a byte stream reader
///
/// This provides an interface similar to [std::io::Cursor] but
/// every read that cannot be fully satisfied returns
/// [`ZByteIoError::NotEnoughBytes`] and leaves the position untouched.
///
/// # Example
/// ```
/// use narpi_core::bytestream::ZByteReader;
///
/// let mut reader = ZByteReader::new([0x01_u8, 0x02, 0x03]);
/// assert_eq!(reader.get_u16_be_err().unwrap(), 0x0102);
/// assert_eq!(reader.remaining(), 1);
/// assert!(reader.get_u16_be_err().is_err());
/// ```
pub struct ZByteReader<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ZByteReader<T> {
    /// Create a new instance of the byte stream
    pub const fn new(buf: T) -> ZByteReader<T> {
        ZByteReader {
            stream:   buf,
            position: 0
        }
    }
    /// Return whether the underlying buffer
    /// has `num` bytes available for reading
    #[inline]
    pub fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.as_ref().len()
    }
    /// Return the number of bytes not yet read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }
    /// Return true if the whole stream was consumed
    #[inline]
    pub fn eof(&self) -> bool {
        self.position >= self.stream.as_ref().len()
    }
    /// Current read position, in bytes from the start of the stream
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Bytes from the current position to the end of the stream,
    /// without advancing
    pub fn remaining_bytes(&self) -> &[u8] {
        let buf = self.stream.as_ref();
        &buf[self.position.min(buf.len())..]
    }

    /// Read a single byte or error out if the stream is exhausted
    #[inline]
    pub fn get_u8_err(&mut self) -> Result<u8, ZByteIoError> {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ZByteIoError::NotEnoughBytes(1, 0))
        }
    }
    /// Return a reference to the next `num` bytes and advance past them
    pub fn get_as_ref(&mut self, num: usize) -> Result<&[u8], ZByteIoError> {
        if !self.has(num) {
            return Err(ZByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        let start = self.position;
        self.position += num;

        Ok(&self.stream.as_ref()[start..start + num])
    }
    /// Read exactly `N` bytes into a fixed size array
    #[inline]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.get_as_ref(N)?);
        Ok(byte_store)
    }
    /// Read bytes up to and including `delimiter`, looking at
    /// most `limit` bytes ahead.
    ///
    /// Returns the bytes read, including the delimiter. If the delimiter
    /// is not found inside the window nothing is consumed.
    pub fn read_until(&mut self, delimiter: u8, limit: usize) -> Result<&[u8], ZByteIoError> {
        let window = &self.remaining_bytes()[..self.remaining().min(limit)];

        match window.iter().position(|x| *x == delimiter) {
            Some(pos) => self.get_as_ref(pos + 1),
            None => Err(ZByteIoError::Generic("Delimiter not found"))
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: AsRef<[u8]>> ZByteReader<T> {
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ZByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;

                Ok($int_type::from_be_bytes(space))
            }
        }
    };
}

get_single_type!(get_u16_be_err, u16);
get_single_type!(get_u32_be_err, u32);
