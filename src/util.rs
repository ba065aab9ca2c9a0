//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! candidate digits during solving.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use crate::error::{GridError, GridResult};

/// A set of Sudoku digits (1 to 9) that is implemented as a bit mask. Each
/// digit is represented by one bit in a 16-bit word. This generally has
/// better performance than a `HashSet` and is trivially copyable, which
/// matters since one of these is computed for every blank cell in every
/// backtracking step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DigitSet {
    mask: u16
}

/// The lowest digit that can be contained in a [DigitSet].
pub const MIN_DIGIT: u8 = 1;

/// The highest digit that can be contained in a [DigitSet].
pub const MAX_DIGIT: u8 = 9;

const ALL_MASK: u16 = 0b11_1111_1110;

impl DigitSet {

    /// Creates a new, empty `DigitSet`.
    pub fn new() -> DigitSet {
        DigitSet {
            mask: 0
        }
    }

    /// Creates a new `DigitSet` that contains all digits from 1 to 9.
    pub fn full() -> DigitSet {
        DigitSet {
            mask: ALL_MASK
        }
    }

    /// Creates a new singleton `DigitSet` which contains only the given
    /// digit.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, `GridError::InvalidNumber` is returned.
    pub fn singleton(digit: u8) -> GridResult<DigitSet> {
        let mut result = DigitSet::new();
        result.insert(digit)?;
        Ok(result)
    }

    fn compute_mask(digit: u8) -> GridResult<u16> {
        if digit < MIN_DIGIT || digit > MAX_DIGIT {
            Err(GridError::InvalidNumber)
        }
        else {
            Ok(1u16 << digit)
        }
    }

    /// Indicates whether this set contains the given digit, in which case
    /// this method returns `true`. If it is not contained or outside the
    /// range of valid digits, `false` will be returned.
    pub fn contains(&self, digit: u8) -> bool {
        if let Ok(mask) = DigitSet::compute_mask(digit) {
            self.mask & mask > 0
        }
        else {
            false
        }
    }

    /// Inserts the given digit into this set, such that [DigitSet::contains]
    /// returns `true` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// not present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, `GridError::InvalidNumber` is returned.
    pub fn insert(&mut self, digit: u8) -> GridResult<bool> {
        let mask = DigitSet::compute_mask(digit)?;
        let changed = self.mask & mask == 0;
        self.mask |= mask;
        Ok(changed)
    }

    /// Removes the given digit from this set, such that [DigitSet::contains]
    /// returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, `GridError::InvalidNumber` is returned.
    pub fn remove(&mut self, digit: u8) -> GridResult<bool> {
        let mask = DigitSet::compute_mask(digit)?;
        let changed = self.mask & mask > 0;
        self.mask &= !mask;
        Ok(changed)
    }

    /// Indicates whether this set is empty, i.e. contains no digits. If this
    /// method returns `true`, [DigitSet::contains] will return `false` for
    /// all inputs.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns an iterator over the digits contained in this set in
    /// ascending order.
    pub fn iter(&self) -> DigitSetIter {
        DigitSetIter {
            mask: self.mask
        }
    }
}

impl Default for DigitSet {
    fn default() -> DigitSet {
        DigitSet::new()
    }
}

/// An iterator over the content of a [DigitSet], yielding digits in
/// ascending order.
pub struct DigitSetIter {
    mask: u16
}

impl Iterator for DigitSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.mask == 0 {
            None
        }
        else {
            let digit = self.mask.trailing_zeros() as u8;
            self.mask &= self.mask - 1;
            Some(digit)
        }
    }
}

impl IntoIterator for DigitSet {
    type Item = u8;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: DigitSet) {
        self.mask |= rhs.mask;
    }
}

impl BitOr for DigitSet {
    type Output = DigitSet;

    /// Computes the set union of the two operands.
    fn bitor(mut self, rhs: DigitSet) -> DigitSet {
        self |= rhs;
        self
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: DigitSet) {
        self.mask &= rhs.mask;
    }
}

impl BitAnd for DigitSet {
    type Output = DigitSet;

    /// Computes the set intersection of the two operands.
    fn bitand(mut self, rhs: DigitSet) -> DigitSet {
        self &= rhs;
        self
    }
}

impl SubAssign for DigitSet {
    fn sub_assign(&mut self, rhs: DigitSet) {
        self.mask &= !rhs.mask;
    }
}

impl Sub for DigitSet {
    type Output = DigitSet;

    /// Computes the set difference of the two operands, where the elements of
    /// the right-hand-side are removed from the result.
    fn sub(mut self, rhs: DigitSet) -> DigitSet {
        self -= rhs;
        self
    }
}
