//! Bitboard representation and operations
//!
//! The board has 20 squares (4 files × 5 ranks), so a bitboard fits in a
//! `u32` with bit `file + 4 * rank` set for each occupied square.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::board::{FILES, RANKS};

/// A 20-bit bitboard representing squares on the 4×5 board
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u32);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(0xFFFFF);

    // File masks
    pub const FILE_A: Bitboard = Bitboard(0x11111);
    pub const FILE_D: Bitboard = Bitboard(0x88888);

    // Rank masks
    pub const RANK_1: Bitboard = Bitboard(0x0000F);
    pub const RANK_5: Bitboard = Bitboard(0xF0000);

    /// b2, c2, b3, c3, b4, c4
    pub const CENTER: Bitboard = Bitboard(0x06660);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Bitboard(value & Self::ALL.0)
    }

    #[inline]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u32 << sq)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Population count
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the least significant set bit
    #[inline]
    pub const fn lsb(self) -> u8 {
        self.0.trailing_zeros() as u8
    }

    #[inline]
    pub fn pop_lsb(&mut self) -> u8 {
        let sq = self.lsb();
        self.0 &= self.0 - 1;
        sq
    }

    #[inline]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u32 << sq)) != 0
    }

    #[inline]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u32 << sq;
    }

    #[inline]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u32 << sq);
    }

    #[inline]
    pub const fn file_mask(file: u8) -> Self {
        Bitboard(Self::FILE_A.0 << file)
    }

    #[inline]
    pub const fn rank_mask(rank: u8) -> Self {
        Bitboard(Self::RANK_1.0 << (rank * FILES))
    }

    /// Iterate over set squares in ascending order
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over set bits in a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    /// Complement restricted to the 20 board squares
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..RANKS).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..FILES {
                let sq = rank * FILES + file;
                if self.contains(sq) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d")?;
        Ok(())
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_empty() {
        let bb = Bitboard::EMPTY;
        assert!(bb.is_empty());
        assert_eq!(bb.count(), 0);
    }

    #[test]
    fn test_bitboard_pop_lsb() {
        let mut bb = Bitboard::new(0b1010);
        assert_eq!(bb.pop_lsb(), 1);
        assert_eq!(bb.0, 0b1000);
        assert_eq!(bb.pop_lsb(), 3);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_masks() {
        assert_eq!(Bitboard::ALL.count(), 20);
        assert_eq!(Bitboard::FILE_A.count(), 5);
        assert_eq!(Bitboard::RANK_1.count(), 4);
        assert_eq!(Bitboard::file_mask(3), Bitboard::FILE_D);
        assert_eq!(Bitboard::rank_mask(4), Bitboard::RANK_5);
        assert_eq!(Bitboard::CENTER.count(), 6);
    }

    #[test]
    fn test_not_stays_on_board() {
        assert_eq!(!Bitboard::EMPTY, Bitboard::ALL);
        assert_eq!(!Bitboard::ALL, Bitboard::EMPTY);
    }

    #[test]
    fn test_bitboard_iter() {
        let bb = Bitboard::new(0b10101);
        let squares: Vec<u8> = bb.iter().collect();
        assert_eq!(squares, vec![0, 2, 4]);
    }
}
