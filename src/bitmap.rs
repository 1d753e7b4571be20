// CLASSIFICATION: COMMUNITY
// Filename: bitmap.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Fixed-size slot bitmap.
//!
//! A set bit marks an occupied mailbox slot. The bitmap never allocates;
//! storage is a word array sized for [`MAX_MBOX_SLOTS`] and only the first
//! `len` bits are meaningful.

use core::fmt;

/// Upper bound on the number of slots a single bitmap can track.
pub const MAX_MBOX_SLOTS: usize = 256;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = MAX_MBOX_SLOTS / WORD_BITS;

/// Occupancy bitmap over `len` mailbox slots.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SlotBitmap {
    words: [u64; WORDS],
    len: usize,
}

impl SlotBitmap {
    /// Create an all-clear bitmap of `len` slots, or `None` if `len` is zero
    /// or above [`MAX_MBOX_SLOTS`].
    pub fn new(len: usize) -> Option<Self> {
        if len == 0 || len > MAX_MBOX_SLOTS {
            return None;
        }
        Some(Self {
            words: [0; WORDS],
            len,
        })
    }

    /// Number of slots tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a bitmap tracks at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if no slot is occupied.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.count_ones() == 0
    }

    /// Test a single bit. Out-of-range indices read as clear.
    #[must_use]
    pub fn test(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index of the first clear bit at or after `start`.
    #[must_use]
    pub fn find_next_zero(&self, start: usize) -> Option<usize> {
        (start..self.len).find(|&i| !self.test(i))
    }

    /// Index of the first set bit at or after `start`.
    #[must_use]
    pub fn find_next_set(&self, start: usize) -> Option<usize> {
        (start..self.len).find(|&i| self.test(i))
    }

    /// First-fit search for `count` consecutive clear bits, scanning upward
    /// from `start`. Does not wrap.
    #[must_use]
    pub fn find_next_zero_area(&self, start: usize, count: usize) -> Option<usize> {
        if count == 0 || count > self.len {
            return None;
        }
        let mut candidate = self.find_next_zero(start)?;
        loop {
            let end = candidate.checked_add(count)?;
            if end > self.len {
                return None;
            }
            match self.find_next_set(candidate) {
                Some(busy) if busy < end => candidate = self.find_next_zero(busy + 1)?,
                _ => return Some(candidate),
            }
        }
    }

    /// True if every bit in `[start, start + count)` is set.
    #[must_use]
    pub fn range_is_set(&self, start: usize, count: usize) -> bool {
        self.checked_end(start, count)
            .is_some_and(|end| (start..end).all(|i| self.test(i)))
    }

    /// Set bits `[start, start + count)`. Returns `false` and leaves the
    /// bitmap untouched if the range overflows or runs past `len`.
    pub fn set_range(&mut self, start: usize, count: usize) -> bool {
        let Some(end) = self.checked_end(start, count) else {
            return false;
        };
        for i in start..end {
            self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
        }
        true
    }

    /// Clear bits `[start, start + count)`. Same range rules as
    /// [`SlotBitmap::set_range`].
    pub fn clear_range(&mut self, start: usize, count: usize) -> bool {
        let Some(end) = self.checked_end(start, count) else {
            return false;
        };
        for i in start..end {
            self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
        }
        true
    }

    fn checked_end(&self, start: usize, count: usize) -> Option<usize> {
        start.checked_add(count).filter(|&end| end <= self.len)
    }
}

/// Renders slot 0 first, `1` for occupied: a 4-slot bitmap with slots 0 and 1
/// taken prints as `1100`.
impl fmt::Display for SlotBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.test(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for SlotBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotBitmap({self})")
    }
}
