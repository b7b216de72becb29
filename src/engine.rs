//! The solving backend behind a narrow interface.
//!
//! An [`Engine`] receives the declarative [`QuiltModel`] by reference, an
//! optional diversity [`Objective`] and an optional seed, and answers with a
//! full assignment or an infeasibility report. [`Z3Engine`] is the stock
//! implementation on top of z3's `Optimize`.

use std::sync::Mutex;

use tracing::debug;
use z3::ast::{Ast, Bool, Int};
use z3::{Config, Context, Optimize, SatResult};

use crate::error::{Error, Result};
use crate::model::{Assignment, QuiltModel};

/// Push the next solution away from earlier ones.
///
/// Maximize `sum(hamming(x, p) for p in away_from)` while keeping every
/// individual distance at least `min_distance`.
#[derive(Debug, Clone, Copy)]
pub struct Objective<'h> {
    pub away_from: &'h [Assignment],
    pub min_distance: usize,
}

/// Engine answer to one solve request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solve {
    Found(Assignment),
    Infeasible,
    /// The per-call deadline ran out before an answer was proven.
    Interrupted,
}

pub trait Engine {
    fn solve(&mut self, model: &QuiltModel, objective: Option<&Objective<'_>>, seed: Option<u32>) -> Result<Solve>;
}

/// z3 `Optimize` backend. A fresh context is built for every call; only the
/// [`QuiltModel`] is shared between calls.
#[derive(Debug, Clone, Default)]
pub struct Z3Engine {
    timeout_ms: Option<u64>,
}

impl Z3Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout_ms: Option<u64>) -> Self {
        Self { timeout_ms }
    }
}

/// z3's own default for `smt.random_seed` and `sat.random_seed`.
const DEFAULT_SEED: u32 = 0;

/// z3 keeps random seeds in process-global parameters. Holding this for a
/// whole solve keeps one call's seed from leaking into another's.
static SEED_LOCK: Mutex<()> = Mutex::new(());

fn count<'ctx, 'a, I>(context: &'ctx Context, iter: I) -> Int<'ctx> where 'ctx: 'a, I: Iterator<Item = &'a Bool<'ctx>> {
    let (zero, one) = (Int::from_u64(context, 0), Int::from_u64(context, 1));
    let mut res = zero.clone();
    for v in iter {
        res += v.ite(&one, &zero);
    }
    res
}

impl Engine for Z3Engine {
    fn solve(&mut self, model: &QuiltModel, objective: Option<&Objective<'_>>, seed: Option<u32>) -> Result<Solve> {
        let mut config = Config::new();
        if let Some(ms) = self.timeout_ms {
            config.set_timeout_msec(ms);
        }
        let _seed_guard = SEED_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let seed_value = seed.unwrap_or(DEFAULT_SEED).to_string();
        z3::set_global_param("smt.random_seed", &seed_value);
        z3::set_global_param("sat.random_seed", &seed_value);
        let context = Context::new(&config);
        let int = |n: usize| Int::from_u64(&context, n as u64);

        let squares: Vec<Int> = (0..model.variables()).map(|i| Int::new_const(&context, format!("sq{}", i))).collect();
        let s = Optimize::new(&context);

        let (lo, hi) = (int(0), int(model.domain().saturating_sub(1)));
        for v in squares.iter() {
            s.assert(&v.ge(&lo));
            s.assert(&v.le(&hi));
        }
        for &(a, b) in model.adjacencies() {
            s.assert(&squares[a]._eq(&squares[b]).not());
        }
        for (color, &n) in model.cardinality().iter().enumerate() {
            let value = int(color);
            let is_color: Vec<Bool> = squares.iter().map(|v| v._eq(&value)).collect();
            s.assert(&count(&context, is_color.iter())._eq(&int(n)));
        }

        if let Some(objective) = objective {
            let min = int(objective.min_distance);
            let mut total = int(0);
            for past in objective.away_from {
                if past.len() != squares.len() {
                    return Err(Error::Engine(format!("history entry has {} squares, model has {}", past.len(), squares.len())));
                }
                let differs: Vec<Bool> = squares.iter().zip(past.iter()).map(|(v, &c)| v._eq(&int(c)).not()).collect();
                let distance = count(&context, differs.iter());
                s.assert(&distance.ge(&min));
                total += distance;
            }
            s.maximize(&total);
        }

        debug!(
            variables = squares.len(),
            history = objective.map_or(0, |o| o.away_from.len()),
            ?seed,
            "z3 solve"
        );
        match s.check(&[]) {
            SatResult::Sat => {
                let z3_model = s.get_model().ok_or_else(|| Error::Engine("sat without a model".into()))?;
                let colors = squares
                    .iter()
                    .map(|v| {
                        z3_model
                            .eval(v, true)
                            .and_then(|value| value.as_u64())
                            .map(|value| value as usize)
                            .ok_or_else(|| Error::Engine(format!("no value for {}", v)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Solve::Found(Assignment::new(colors)))
            }
            SatResult::Unsat => Ok(Solve::Infeasible),
            SatResult::Unknown if self.timeout_ms.is_some() => Ok(Solve::Interrupted),
            SatResult::Unknown => Err(Error::Engine("z3 could not decide the model".into())),
        }
    }
}
