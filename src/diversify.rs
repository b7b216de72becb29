//! Repeated solving for visually distinct quilts.
//!
//! The first solve has no objective. Every later solve maximizes the summed
//! Hamming distance to *all* accepted solutions, recomputed from the current
//! history, and requires the new solution to differ from each of them in at
//! least one square. The loop stops once the target is reached (`Done`) or
//! the engine reports infeasibility (`Exhausted`), which keeps whatever was
//! accepted so far.

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::engine::{Engine, Objective, Solve};
use crate::error::{Error, Result};
use crate::model::{Assignment, QuiltModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SeekingFirst,
    MaximizingDiversity,
    Done,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of solutions was found.
    Done,
    /// The engine ran out of (further) solutions first.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub solutions: Vec<Assignment>,
    pub stop: StopReason,
}

/// Number of squares colored differently in `a` and `b`.
pub fn hamming_distance(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count() + a.len().abs_diff(b.len())
}

/// Sum of Hamming distances over every unordered pair in `history`.
pub fn total_pairwise_distance(history: &[Assignment]) -> usize {
    history.iter().tuple_combinations().map(|(a, b)| hamming_distance(a, b)).sum()
}

/// The objective for the next solve given everything accepted so far.
pub fn diversity_objective(history: &[Assignment]) -> Objective<'_> {
    Objective { away_from: history, min_distance: 1 }
}

pub struct Diversifier<'m, E> {
    model: &'m QuiltModel,
    engine: E,
    target: usize,
    seed: Option<u32>,
    history: Vec<Assignment>,
    phase: Phase,
}

impl<'m, E: Engine> Diversifier<'m, E> {
    pub fn new(model: &'m QuiltModel, engine: E, target: usize) -> Self {
        let phase = if target == 0 { Phase::Done } else { Phase::SeekingFirst };
        Self { model, engine, target, seed: None, history: Vec::new(), phase }
    }

    /// Seed passed to every solve request.
    pub fn seed(mut self, seed: Option<u32>) -> Self {
        self.seed = seed;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &[Assignment] {
        &self.history
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Issue one solve request. Returns the history index of the newly
    /// accepted solution, or `None` once the loop has stopped.
    pub fn step(&mut self) -> Result<Option<usize>> {
        if matches!(self.phase, Phase::Done | Phase::Exhausted) {
            return Ok(None);
        }

        let objective = match self.phase {
            Phase::SeekingFirst => None,
            _ => Some(diversity_objective(&self.history)),
        };
        debug!(phase = ?self.phase, accepted = self.history.len(), "requesting solution");
        let reply = self.engine.solve(self.model, objective.as_ref(), self.seed)?;

        match reply {
            Solve::Found(assignment) => {
                if let Some(v) = self.model.violations(&assignment).first() {
                    return Err(Error::Engine(format!("engine returned an invalid assignment: {:?}", v)));
                }
                if self.history.contains(&assignment) {
                    return Err(Error::Engine("engine repeated an accepted solution".into()));
                }
                self.history.push(assignment);
                info!(
                    solution = self.history.len(),
                    target = self.target,
                    total_distance = total_pairwise_distance(&self.history),
                    "accepted solution"
                );
                self.phase = if self.history.len() >= self.target { Phase::Done } else { Phase::MaximizingDiversity };
                Ok(Some(self.history.len() - 1))
            }
            Solve::Infeasible => {
                warn!(accepted = self.history.len(), target = self.target, "no further solutions");
                self.phase = Phase::Exhausted;
                Ok(None)
            }
            Solve::Interrupted => Err(Error::Timeout { accepted: self.history.len() }),
        }
    }

    /// Drive the loop to completion, handing each accepted solution to
    /// `on_solution` as soon as it is found.
    pub fn run<F>(mut self, mut on_solution: F) -> Result<Outcome>
    where
        F: FnMut(usize, &Assignment) -> Result<()>,
    {
        while let Some(i) = self.step()? {
            on_solution(i, &self.history[i])?;
        }
        let stop = match self.phase {
            Phase::Exhausted => StopReason::Exhausted,
            _ => StopReason::Done,
        };
        Ok(Outcome { solutions: self.history, stop })
    }
}
