//! Quilt configuration as read from a JSON file or command-line flags.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Color};
use crate::error::{Error, Result};
use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub name: String,
    pub count: usize,
    pub display: String,
}

/// `name:count:display`, e.g. `blue:7:#0000ff`.
impl FromStr for ColorSpec {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, ':');
        let (name, count, display) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(count), Some(display)) if !name.is_empty() => (name, count, display),
            _ => return Err(Error::InvalidColorSpec(format!("expected name:count:display, got '{}'", s))),
        };
        let count = count
            .parse()
            .map_err(|_| Error::InvalidColorSpec(format!("bad count '{}' in '{}'", count, s)))?;
        Ok(ColorSpec { name: name.to_string(), count, display: display.to_string() })
    }
}

impl From<ColorSpec> for Color {
    fn from(spec: ColorSpec) -> Self {
        Color::new(spec.name, spec.count, spec.display)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuiltConfig {
    pub major_width: usize,
    pub major_height: usize,
    pub colors: Vec<ColorSpec>,
}

impl QuiltConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Validate into the read-only values a run is built from.
    pub fn build(&self) -> Result<(Topology, Catalog)> {
        let topology = Topology::new(self.major_width, self.major_height)?;
        let colors = self.colors.iter().cloned().map(Color::from).collect();
        let catalog = Catalog::new(colors, &topology)?;
        Ok((topology, catalog))
    }
}
