//! Ordering of answer options on screen.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Arranges the options of one question before they are shown.
pub trait OptionOrder: Send {
    fn arrange(&mut self, options: &mut [String]);
}

/// Lexicographic order: stable across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sorted;

impl OptionOrder for Sorted {
    fn arrange(&mut self, options: &mut [String]) {
        options.sort();
    }
}

pub struct Shuffled {
    rng: StdRng,
}

impl Shuffled {
    /// Reproducible when a seed is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl fmt::Debug for Shuffled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffled").finish_non_exhaustive()
    }
}

impl OptionOrder for Shuffled {
    fn arrange(&mut self, options: &mut [String]) {
        options.shuffle(&mut self.rng);
    }
}
