//! Fixed-size set of grid coordinates packed into an unsigned integer.
//!
//! The type is `no_std` friendly and avoids heap allocations. One bit per
//! cell of the `BOARD_SIZE` x `BOARD_SIZE` grid, row-major.

use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use super::common::Coordinate;
use super::config::BOARD_SIZE;

/// Errors returned by bitboard construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Grid cell count exceeds the bits available in `T`.
    SizeTooLarge { cells: usize, capacity: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { cells, capacity } => {
                write!(f, "SizeTooLarge: {} cells exceed T::BITS={}", cells, capacity)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

/// Set of guessed coordinates on the standard board.
pub type GuessSet = BitBoard<u128>;

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

    #[inline]
    fn mask() -> T {
        if Self::CELLS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    /// Empty set without a capacity check; use with `u128`.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: `Err(SizeTooLarge)` if the grid does not fit in `T`.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::CELLS > capacity {
            Err(BitBoardError::SizeTooLarge {
                cells: Self::CELLS,
                capacity,
            })
        } else {
            Ok(Self::new())
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Every cell of the grid is set.
    pub fn is_full(&self) -> bool {
        self.bits == Self::mask()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        ((self.bits >> coord.index()) & T::one()) != T::zero()
    }

    /// Adds `coord`; returns `false` if it was already present.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        let was = self.contains(coord);
        self.bits = self.bits | (T::one() << coord.index());
        !was
    }

    #[inline]
    pub fn into_raw(self) -> T {
        self.bits
    }

    /// Builds a set from the raw integer, masking out bits beyond the grid.
    #[inline]
    pub fn from_raw(raw: T) -> Self {
        BitBoard {
            bits: raw & Self::mask(),
        }
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(move |c| self.contains(*c))
    }
}

impl<T> FromIterator<Coordinate> for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl<T> Default for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", any::type_name::<T>())?;
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in Coordinate::all() {
            let bit = if self.contains(c) { '■' } else { '□' };
            write!(f, "{} ", bit)?;
            if c.col() + 1 == BOARD_SIZE && c.row() + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
