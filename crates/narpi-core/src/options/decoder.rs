/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options
///
/// Limits are checked against the header before any payload
/// is touched, so a hostile header cannot trigger a large allocation.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which the decoder will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 65535
    max_width:   usize,
    /// Maximum height for which the decoder will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 65535
    max_height:  usize,
    /// Treat some warnings as errors
    ///
    /// When true, bytes left over after the payload are an error.
    /// When false they are logged and ignored.
    ///
    /// - Default value: true
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   usize::from(u16::MAX),
            max_height:  usize::from(u16::MAX),
            strict_mode: true
        }
    }
}

impl DecoderOptions {
    /// Options used by the command line tool
    ///
    /// Same limits as the default, but tolerant of trailing bytes
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(false)
    }
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject recoverable anomalies
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in strict mode
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecoderOptions;

    #[test]
    fn test_defaults_and_setters() {
        let options = DecoderOptions::default();
        assert_eq!(options.get_max_width(), 65535);
        assert_eq!(options.get_max_height(), 65535);
        assert!(options.get_strict_mode());

        let options = options.set_max_width(10).set_max_height(20);
        assert_eq!(options.get_max_width(), 10);
        assert_eq!(options.get_max_height(), 20);
        assert!(!DecoderOptions::new_cmd().get_strict_mode());
    }
}
