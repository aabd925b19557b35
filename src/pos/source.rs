//! Success/failure sources for simulated API calls
//!
//! Each simulated call asks a [`SuccessSource`] whether it succeeds. Production
//! code flips a fair coin; tests script the outcomes with [`FixedOutcomes`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that a simulated call succeeds
pub const SUCCESS_PROBABILITY: f64 = 0.5;

/// Decides the outcome of each simulated call
pub trait SuccessSource: Send + Sync {
    /// Draw the outcome of the next call
    fn next_success(&self) -> bool;
}

/// Fair coin backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl SuccessSource for ThreadRngSource {
    fn next_success(&self) -> bool {
        rand::thread_rng().gen_bool(SUCCESS_PROBABILITY)
    }
}

/// Fair coin with a reproducible sequence
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SuccessSource for SeededSource {
    fn next_success(&self) -> bool {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(SUCCESS_PROBABILITY),
            Err(poisoned) => poisoned.into_inner().gen_bool(SUCCESS_PROBABILITY),
        }
    }
}

/// Scripted outcomes, cycling when exhausted
#[derive(Debug)]
pub struct FixedOutcomes {
    outcomes: Vec<bool>,
    index: AtomicUsize,
}

impl FixedOutcomes {
    /// Create a source returning `outcomes` in order. An empty list always succeeds.
    pub fn new(outcomes: Vec<bool>) -> Self {
        Self {
            outcomes,
            index: AtomicUsize::new(0),
        }
    }

    pub fn always(success: bool) -> Self {
        Self::new(vec![success])
    }

    /// Number of outcomes drawn so far
    pub fn draws(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl SuccessSource for FixedOutcomes {
    fn next_success(&self) -> bool {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        if self.outcomes.is_empty() {
            return true;
        }
        self.outcomes[idx % self.outcomes.len()]
    }
}
