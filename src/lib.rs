//! Quilt square color placement.
//!
//! A quilt is a major lattice of squares with a minor lattice set diagonally
//! between them. Given a palette with exact per-color counts, this crate
//! builds a constraint model where no two touching squares share a color,
//! and asks a solving engine (z3 by default) for several solutions that are
//! pushed as far apart from each other as possible.
//!
//! ```no_run
//! use quilt_placer::{Catalog, Color, Diversifier, QuiltModel, Topology, Z3Engine};
//!
//! let topology = Topology::new(2, 2)?;
//! let catalog = Catalog::new(
//!     vec![Color::new("A", 2, "#ff0000"), Color::new("B", 2, "#00ff00"), Color::new("C", 1, "#0000ff")],
//!     &topology,
//! )?;
//! let model = QuiltModel::build(&topology, &catalog);
//! let outcome = Diversifier::new(&model, Z3Engine::new(), 2).run(|_, _| Ok(()))?;
//! assert_eq!(outcome.solutions.len(), 2);
//! # Ok::<(), quilt_placer::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod diversify;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod topology;

pub use catalog::{Catalog, Color};
pub use config::{ColorSpec, QuiltConfig};
pub use diversify::{diversity_objective, hamming_distance, total_pairwise_distance, Diversifier, Outcome, Phase, StopReason};
pub use engine::{Engine, Objective, Solve, Z3Engine};
pub use error::{Error, Result};
pub use model::{Assignment, QuiltModel, Violation};
pub use topology::{Lattice, Square, Topology};
