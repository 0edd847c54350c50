/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tracking which pixels a region pass has already claimed
use alloc::vec;
use alloc::vec::Vec;

const WORD_BITS: usize = u64::BITS as usize;

/// A two dimensional claim tracker, one bit per pixel
///
/// Pixels are addressed either by `(x, y)` or by their row-major
/// index `y * width + x`.
#[derive(Clone, Debug, Default)]
pub struct VisitedBitmap {
    width:   usize,
    height:  usize,
    visited: usize,
    words:   Vec<u64>
}

impl VisitedBitmap {
    /// Create a bitmap with every pixel unvisited
    pub fn new(width: usize, height: usize) -> VisitedBitmap {
        let mut bitmap = VisitedBitmap::default();
        bitmap.reset(width, height);
        bitmap
    }
    /// Resize to `width` x `height` and clear every bit
    ///
    /// The allocation is reused when it is large enough.
    pub fn reset(&mut self, width: usize, height: usize) {
        let words = (width * height).div_ceil(WORD_BITS);

        self.words.clear();
        self.words.resize(words, 0);
        self.width = width;
        self.height = height;
        self.visited = 0;
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pixels marked so far
    pub const fn visited_count(&self) -> usize {
        self.visited
    }

    /// True once every pixel has been marked
    pub const fn is_complete(&self) -> bool {
        self.visited == self.len()
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.is_visited_index(y * self.width + x)
    }

    #[inline]
    pub fn is_visited_index(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Mark `(x, y)`, returning false if it was already marked
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) -> bool {
        self.mark_index(y * self.width + x)
    }

    /// Mark the pixel at `index`, returning false if it was already marked
    #[inline]
    pub fn mark_index(&mut self, index: usize) -> bool {
        let word = &mut self.words[index / WORD_BITS];
        let bit = 1_u64 << (index % WORD_BITS);

        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.visited += 1;
        true
    }

    /// Row-major index of the first unvisited pixel at or after `start`
    pub fn next_unvisited(&self, start: usize) -> Option<usize> {
        let len = self.len();
        let mut index = start;

        while index < len {
            let word = self.words[index / WORD_BITS];
            // all ones from the current bit upwards
            let pending = !word & (u64::MAX << (index % WORD_BITS));

            if pending != 0 {
                let found = (index / WORD_BITS) * WORD_BITS + pending.trailing_zeros() as usize;
                return (found < len).then_some(found);
            }
            index = (index / WORD_BITS + 1) * WORD_BITS;
        }
        None
    }
}

/// Convert a row-major index into `(x, y)` for a raster `width` pixels wide
#[inline]
pub const fn index_to_xy(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

#[cfg(test)]
mod tests {
    use crate::bitmap::{index_to_xy, VisitedBitmap};

    #[test]
    fn test_mark_and_query() {
        let mut bitmap = VisitedBitmap::new(3, 2);
        assert!(!bitmap.is_visited(2, 1));
        assert!(bitmap.mark(2, 1));
        assert!(!bitmap.mark(2, 1));
        assert!(bitmap.is_visited_index(5));
        assert_eq!(bitmap.visited_count(), 1);
    }

    #[test]
    fn test_next_unvisited_crosses_words() {
        let mut bitmap = VisitedBitmap::new(70, 2);
        for index in 0..130 {
            bitmap.mark_index(index);
        }
        assert_eq!(bitmap.next_unvisited(0), Some(130));
        assert_eq!(index_to_xy(130, 70), (60, 1));

        for index in 130..140 {
            bitmap.mark_index(index);
        }
        assert!(bitmap.is_complete());
        assert_eq!(bitmap.next_unvisited(0), None);
    }

    #[test]
    fn test_reset_clears() {
        let mut bitmap = VisitedBitmap::new(4, 4);
        bitmap.mark(1, 1);
        bitmap.reset(2, 2);
        assert_eq!(bitmap.visited_count(), 0);
        assert_eq!(bitmap.next_unvisited(0), Some(0));
        assert_eq!(bitmap.len(), 4);
    }
}
