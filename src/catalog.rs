//! The fixed palette a quilt is sewn from.

use crate::error::{Error, Result};
use crate::topology::Topology;

/// A named fabric color and how many squares of it must be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub name: String,
    pub count: usize,
    /// Style token for rendering, normally a `#rrggbb` hex string.
    pub display: String,
}

impl Color {
    pub fn new(name: impl Into<String>, count: usize, display: impl Into<String>) -> Self {
        Self { name: name.into(), count, display: display.into() }
    }
}

/// Ordered colors. A color's position is also its value in an assignment.
///
/// Only constructible through [`Catalog::new`], so every catalog covers its
/// topology exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    colors: Vec<Color>,
}

impl Catalog {
    pub fn new(colors: Vec<Color>, topology: &Topology) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if let Some(c) = colors.iter().find(|c| c.count == 0) {
            return Err(Error::ZeroCount { name: c.name.clone() });
        }
        let actual: usize = colors.iter().map(|c| c.count).sum();
        if actual != topology.square_count() {
            return Err(Error::CountMismatch { expected: topology.square_count(), actual });
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    pub fn count(&self, index: usize) -> Option<usize> {
        self.get(index).map(|c| c.count)
    }

    pub fn display(&self, index: usize) -> Option<&str> {
        self.get(index).map(|c| c.display.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Color)> {
        self.colors.iter().enumerate()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_by_two() -> Topology {
        Topology::new(2, 2).unwrap()
    }

    #[test]
    fn exact_cover_accepted() {
        let catalog = Catalog::new(vec![Color::new("A", 3, "#ff0000"), Color::new("B", 2, "#00ff00")], &two_by_two()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.count(0), Some(3));
        assert_eq!(catalog.display(1), Some("#00ff00"));
        assert_eq!(catalog.get(2), None);
        assert_eq!(catalog.iter().map(|(i, c)| (i, c.name.as_str())).collect::<Vec<_>>(), vec![(0, "A"), (1, "B")]);
    }

    #[test]
    fn mismatch_rejected() {
        let err = Catalog::new(vec![Color::new("A", 3, ""), Color::new("B", 1, "")], &two_by_two()).unwrap_err();
        assert!(matches!(err, Error::CountMismatch { expected: 5, actual: 4 }));
        let err = Catalog::new(vec![Color::new("A", 6, "")], &two_by_two()).unwrap_err();
        assert!(matches!(err, Error::CountMismatch { expected: 5, actual: 6 }));
    }

    #[test]
    fn empty_and_zero_rejected() {
        assert!(matches!(Catalog::new(vec![], &two_by_two()), Err(Error::EmptyCatalog)));
        let err = Catalog::new(vec![Color::new("A", 5, ""), Color::new("ghost", 0, "")], &two_by_two()).unwrap_err();
        assert!(matches!(err, Error::ZeroCount { name } if name == "ghost"));
    }

    proptest! {
        #[test]
        fn validity_matches_sum(counts in proptest::collection::vec(1usize..6, 1..6), width in 1usize..5, height in 1usize..5) {
            let topology = Topology::new(width, height).unwrap();
            let colors: Vec<_> = counts.iter().enumerate().map(|(i, &n)| Color::new(format!("c{}", i), n, "")).collect();
            let sum: usize = counts.iter().sum();
            let first = Catalog::new(colors.clone(), &topology);
            prop_assert_eq!(first.is_ok(), sum == topology.square_count());
            if let Ok(first) = first {
                prop_assert_eq!(first, Catalog::new(colors, &topology).unwrap());
            }
        }
    }
}
