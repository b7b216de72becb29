//! Declarative constraint model of a quilt.
//!
//! One integer variable per flat square index, each ranging over the catalog's
//! color indices, plus:
//! - a flat conjunction of `x[a] != x[b]` for every pair of touching squares
//! - one global cardinality constraint: color `i` is used exactly
//!   `catalog[i].count` times
//!
//! Building the model never solves anything; engines consume it by reference.

use std::collections::BTreeSet;
use std::ops::Deref;

use tracing::debug;

use crate::catalog::Catalog;
use crate::topology::{Lattice, Square, Topology};

/// Orthogonal steps that only look forward, so each pair is emitted once.
const FORWARD: [(isize, isize); 2] = [(0, 1), (1, 0)];

/// Minor cells touching a major cell at `(row, col)`.
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 0), (0, -1), (0, 0)];

/// A color index per square, as returned by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn new(colors: Vec<usize>) -> Self {
        Self(colors)
    }
}

impl Deref for Assignment {
    type Target = [usize];
    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(colors: Vec<usize>) -> Self {
        Self(colors)
    }
}

/// Why an assignment does not satisfy a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Length { expected: usize, actual: usize },
    Domain { square: usize, color: usize },
    Adjacent { a: usize, b: usize, color: usize },
    Cardinality { color: usize, expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuiltModel {
    variables: usize,
    domain: usize,
    adjacencies: Vec<(usize, usize)>,
    cardinality: Vec<usize>,
}

impl QuiltModel {
    pub fn build(topology: &Topology, catalog: &Catalog) -> Self {
        let mut pairs = BTreeSet::new();
        let mut touch = |a: Square, b: Square| {
            // both squares are in bounds by construction
            if let (Ok(a), Ok(b)) = (topology.idx(a), topology.idx(b)) {
                pairs.insert((a.min(b), a.max(b)));
            }
        };

        for lattice in [Lattice::Major, Lattice::Minor] {
            for sq in topology.squares(lattice) {
                for (dr, dc) in FORWARD {
                    if let Some(other) = offset(topology, sq, lattice, dr, dc) {
                        touch(sq, other);
                    }
                }
            }
        }
        for sq in topology.squares(Lattice::Major) {
            for (dr, dc) in DIAGONAL {
                if let Some(minor) = offset(topology, sq, Lattice::Minor, dr, dc) {
                    touch(sq, minor);
                }
            }
        }

        let model = Self {
            variables: topology.square_count(),
            domain: catalog.len(),
            adjacencies: pairs.into_iter().collect(),
            cardinality: catalog.colors().iter().map(|c| c.count).collect(),
        };
        debug!(
            variables = model.variables,
            domain = model.domain,
            adjacencies = model.adjacencies.len(),
            "built quilt model"
        );
        model
    }

    /// Number of decision variables (one per square).
    pub fn variables(&self) -> usize {
        self.variables
    }

    /// Number of values each variable may take, `0..domain`.
    pub fn domain(&self) -> usize {
        self.domain
    }

    /// Unordered pairs `(a, b)`, `a < b`, of squares that must differ.
    pub fn adjacencies(&self) -> &[(usize, usize)] {
        &self.adjacencies
    }

    /// Exact number of squares each color index must occupy.
    pub fn cardinality(&self) -> &[usize] {
        &self.cardinality
    }

    /// Every constraint `assignment` breaks. Empty means it is a solution.
    pub fn violations(&self, assignment: &[usize]) -> Vec<Violation> {
        if assignment.len() != self.variables {
            return vec![Violation::Length { expected: self.variables, actual: assignment.len() }];
        }
        let mut res = Vec::new();
        let mut used = vec![0; self.domain];
        for (square, &color) in assignment.iter().enumerate() {
            match used.get_mut(color) {
                Some(n) => *n += 1,
                None => res.push(Violation::Domain { square, color }),
            }
        }
        for &(a, b) in &self.adjacencies {
            if assignment[a] == assignment[b] {
                res.push(Violation::Adjacent { a, b, color: assignment[a] });
            }
        }
        for (color, (&expected, &actual)) in self.cardinality.iter().zip(&used).enumerate() {
            if expected != actual {
                res.push(Violation::Cardinality { color, expected, actual });
            }
        }
        res
    }
}

fn offset(topology: &Topology, from: Square, lattice: Lattice, dr: isize, dc: isize) -> Option<Square> {
    let (row, col) = (from.row as isize + dr, from.col as isize + dc);
    if topology.contains(lattice, row, col) {
        Some(Square { lattice, row: row as usize, col: col as usize })
    } else {
        None
    }
}
