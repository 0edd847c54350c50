/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Splitting 16 bit counts into bytes
//!
//! Vertical run lengths in region records are stored in one byte when
//! they fit and in two bytes, high byte first, otherwise.

/// Split `value` into its high and low byte
///
/// ```
/// assert_eq!(narpi::split::split_u16(60116), (234, 212));
/// ```
#[inline]
pub const fn split_u16(value: u16) -> (u8, u8) {
    ((value >> 8) as u8, (value & 0xFF) as u8)
}

/// Inverse of [`split_u16`]
#[inline]
pub const fn join_u16(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | (low as u16)
}

/// Whether `value` needs the two byte form
#[inline]
pub const fn is_wide(value: u16) -> bool {
    value > 0xFF
}

/// Number of bytes `value` occupies in its compact form
#[inline]
pub const fn compact_len(value: u16) -> usize {
    if is_wide(value) {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use crate::split::{compact_len, is_wide, join_u16, split_u16};

    #[test]
    fn test_boundaries_round_trip() {
        for value in [1_u16, 255, 256, 65535] {
            let (high, low) = split_u16(value);
            assert_eq!(join_u16(high, low), value);
        }
        assert!(!is_wide(255));
        assert!(is_wide(256));
        assert_eq!(compact_len(255), 1);
        assert_eq!(compact_len(256), 2);
    }

    #[test]
    fn test_known_split() {
        assert_eq!(split_u16(60116), (234, 212));
        assert_eq!(join_u16(234, 212), 60116);
    }

    /// Masking with 240 and 15 keeps only one byte worth of nibbles and
    /// silently loses the high byte.
    #[test]
    fn test_nibble_mask_split_loses_data() {
        let nibble_split = |v: u16| (((v & 240) >> 4) as u8, (v & 15) as u8);

        let mut lossy = 0;
        for value in 256..=u16::MAX {
            let (high, low) = split_u16(value);
            assert_eq!(join_u16(high, low), value);

            let (high, low) = nibble_split(value);
            if join_u16(high, low) != value {
                lossy += 1;
            }
        }
        assert_eq!(lossy, usize::from(u16::MAX) - 255);
        assert_ne!(nibble_split(60116), split_u16(60116));
    }
}
