use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    error::ConfigResult,
    params::{clamp_probability, PayoutParams},
    rng::{RandomSource, ThreadSource},
};

/// Anything that can hand out one payout multiplier per request.
pub trait PayoutGenerator: Send + Sync {
    fn next(&self) -> f64;
    fn params(&self) -> &PayoutParams;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    Stateless,
    Stateful,
}

impl GeneratorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorMode::Stateless => "stateless",
            GeneratorMode::Stateful => "stateful",
        }
    }
}

/// Builds the generator for `mode` behind a trait object.
pub fn build_generator<S>(
    mode: GeneratorMode,
    params: PayoutParams,
    source: S,
) -> ConfigResult<Box<dyn PayoutGenerator>>
where
    S: RandomSource + 'static,
{
    let generator: Box<dyn PayoutGenerator> = match mode {
        GeneratorMode::Stateless => Box::new(StatelessGenerator::new(params, source)?),
        GeneratorMode::Stateful => Box::new(StatefulGenerator::new(params, source)?),
    };
    Ok(generator)
}

fn pick(u: f64, probability: f64, params: &PayoutParams) -> f64 {
    if u < probability {
        params.high_payout
    } else {
        params.low_payout
    }
}

/// Fixed win probability, no memory between draws.
pub struct StatelessGenerator<S = ThreadSource> {
    params: PayoutParams,
    win_probability: f64,
    source: S,
}

impl<S: RandomSource> StatelessGenerator<S> {
    pub fn new(params: PayoutParams, source: S) -> ConfigResult<Self> {
        params.validate()?;
        Ok(Self {
            win_probability: params.win_probability(),
            params,
            source,
        })
    }

    pub fn win_probability(&self) -> f64 {
        self.win_probability
    }
}

impl<S: RandomSource> PayoutGenerator for StatelessGenerator<S> {
    fn next(&self) -> f64 {
        pick(self.source.next_unit(), self.win_probability, &self.params)
    }

    fn params(&self) -> &PayoutParams {
        &self.params
    }
}

/// One stateful draw, as seen from inside the lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    /// Win probability after balance adjustment and clamping.
    pub probability: f64,
    pub multiplier: f64,
    /// Balance after this draw settled.
    pub balance: f64,
}

/// Balance-feedback generator.
///
/// The balance accumulates `target_rtp - multiplier` after every draw and
/// shifts the next draw's win probability by `balance * sensitivity`, so a
/// run that has under-paid becomes more generous and one that has over-paid
/// tightens. The balance never leaves `[-max_balance, max_balance]`.
pub struct StatefulGenerator<S = ThreadSource> {
    params: PayoutParams,
    neutral_probability: f64,
    max_balance: f64,
    balance: Mutex<f64>,
    source: S,
}

impl<S: RandomSource> StatefulGenerator<S> {
    pub fn new(params: PayoutParams, source: S) -> ConfigResult<Self> {
        Self::with_balance(params, source, 0.0)
    }

    /// Starts from a preset balance (clamped like any other).
    pub fn with_balance(params: PayoutParams, source: S, balance: f64) -> ConfigResult<Self> {
        params.validate()?;
        let max_balance = params.max_balance();
        Ok(Self {
            neutral_probability: params.raw_win_probability(),
            max_balance,
            balance: Mutex::new(balance.clamp(-max_balance, max_balance)),
            params,
            source,
        })
    }

    /// Unclamped probability that makes the expected payout equal the target at zero balance.
    pub fn neutral_probability(&self) -> f64 {
        self.neutral_probability
    }

    pub fn max_balance(&self) -> f64 {
        self.max_balance
    }

    /// Snapshot of the running balance.
    pub fn balance(&self) -> f64 {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, f64> {
        // guarded value is a plain clamped f64, safe to reuse after a poisoning panic
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Probability the next draw would use at `balance`.
    pub fn adjusted_probability(&self, balance: f64) -> f64 {
        clamp_probability(self.neutral_probability + balance * self.params.sensitivity)
    }

    pub fn draw(&self) -> Draw {
        let mut balance = self.lock();

        let probability = self.adjusted_probability(*balance);
        let multiplier = pick(self.source.next_unit(), probability, &self.params);

        *balance = (*balance + self.params.target_rtp - multiplier)
            .clamp(-self.max_balance, self.max_balance);

        Draw {
            probability,
            multiplier,
            balance: *balance,
        }
    }
}

impl<S: RandomSource> PayoutGenerator for StatefulGenerator<S> {
    fn next(&self) -> f64 {
        self.draw().multiplier
    }

    fn params(&self) -> &PayoutParams {
        &self.params
    }
}
