//! Quilt geometry.
//!
//! A quilt is two overlaid square lattices. The *major* lattice holds the full
//! cells; the *minor* lattice has one fewer row and column and each of its
//! cells sits diagonally between four major cells. Every square gets a flat
//! index: majors fill `[0, major_count)` row-major, minors fill
//! `[major_count, square_count)` row-major within the minor grid.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lattice {
    Major,
    Minor,
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lattice::Major => "major",
            Lattice::Minor => "minor",
        })
    }
}

/// A square located by lattice and row/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub lattice: Lattice,
    pub row: usize,
    pub col: usize,
}

/// Dimensions of a quilt and everything derived from them.
///
/// Derived sizes are computed once in [`Topology::new`] and only exposed
/// through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    major_width: usize,
    major_height: usize,
    minor_width: usize,
    minor_height: usize,
    major_count: usize,
    minor_count: usize,
}

impl Topology {
    pub fn new(major_width: usize, major_height: usize) -> Result<Self> {
        if major_width == 0 || major_height == 0 {
            return Err(Error::InvalidDimensions { width: major_width, height: major_height });
        }
        let (minor_width, minor_height) = (major_width - 1, major_height - 1);
        let too_big = || Error::InvalidDimensions { width: major_width, height: major_height };
        let major_count = major_width.checked_mul(major_height).ok_or_else(too_big)?;
        let minor_count = minor_width.checked_mul(minor_height).ok_or_else(too_big)?;
        // square_count() adds the two, so the sum must fit as well
        major_count.checked_add(minor_count).ok_or_else(too_big)?;
        Ok(Self { major_width, major_height, minor_width, minor_height, major_count, minor_count })
    }

    pub fn major_width(&self) -> usize { self.major_width }
    pub fn major_height(&self) -> usize { self.major_height }
    pub fn minor_width(&self) -> usize { self.minor_width }
    pub fn minor_height(&self) -> usize { self.minor_height }
    pub fn major_count(&self) -> usize { self.major_count }
    pub fn minor_count(&self) -> usize { self.minor_count }
    pub fn square_count(&self) -> usize { self.major_count + self.minor_count }

    /// Width and height of the given lattice.
    pub fn dims(&self, lattice: Lattice) -> (usize, usize) {
        match lattice {
            Lattice::Major => (self.major_width, self.major_height),
            Lattice::Minor => (self.minor_width, self.minor_height),
        }
    }

    /// Whether `(row, col)` exists in `lattice`. Takes signed coordinates so
    /// neighbor offsets can be probed without underflow.
    pub fn contains(&self, lattice: Lattice, row: isize, col: isize) -> bool {
        let (width, height) = self.dims(lattice);
        row >= 0 && col >= 0 && (row as usize) < height && (col as usize) < width
    }

    pub fn major_idx(&self, row: usize, col: usize) -> Result<usize> {
        self.idx(Square { lattice: Lattice::Major, row, col })
    }

    pub fn minor_idx(&self, row: usize, col: usize) -> Result<usize> {
        self.idx(Square { lattice: Lattice::Minor, row, col })
    }

    /// Flat index of a square.
    pub fn idx(&self, square: Square) -> Result<usize> {
        let Square { lattice, row, col } = square;
        let (width, height) = self.dims(lattice);
        if row >= height || col >= width {
            return Err(Error::OutOfRange { lattice, row, col });
        }
        Ok(match lattice {
            Lattice::Major => col + row * width,
            Lattice::Minor => self.major_count + col + row * width,
        })
    }

    /// Inverse of [`Topology::idx`].
    pub fn square(&self, index: usize) -> Result<Square> {
        if index < self.major_count {
            Ok(Square {
                lattice: Lattice::Major,
                row: index / self.major_width,
                col: index % self.major_width,
            })
        } else if index < self.square_count() {
            // minor_width > 0 here, otherwise minor_count would be 0
            let local = index - self.major_count;
            Ok(Square {
                lattice: Lattice::Minor,
                row: local / self.minor_width,
                col: local % self.minor_width,
            })
        } else {
            Err(Error::IndexOutOfRange { index, square_count: self.square_count() })
        }
    }

    /// All squares of one lattice, row-major.
    pub fn squares(&self, lattice: Lattice) -> impl Iterator<Item = Square> {
        let (width, height) = self.dims(lattice);
        (0..height).flat_map(move |row| (0..width).map(move |col| Square { lattice, row, col }))
    }
}
