use std::collections::HashSet;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ID_PREFIX: &str = "gge";

/// Source of shape identifiers.
///
/// Identifiers must be unique within one document, the format is otherwise opaque to the consuming tool.
///
/// `Send` so a document can be moved to, or shared behind a mutex with, another thread.
pub trait IdSource: Send {
    fn next_id(&mut self) -> String;
}

/// Generates `gge<n>` identifiers with a random `n`, never repeating one.
#[derive(Debug)]
pub struct RandomIdSource {
    rng: StdRng,
    range: Range<u32>,
    issued: HashSet<u32>,
}

impl RandomIdSource {
    pub const DEFAULT_RANGE: Range<u32> = 1500..15_000_000;

    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic identifiers, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            range: Self::DEFAULT_RANGE,
            issued: HashSet::new(),
        }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> String {
        // re-draw on collision, the range is far larger than any realistic shape count
        loop {
            let candidate = self
                .rng
                .random_range(self.range.clone());
            if self.issued.insert(candidate) {
                return format!("{}{}", ID_PREFIX, candidate);
            }
        }
    }
}

/// Generates `gge1`, `gge2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    last: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        self.last += 1;
        format!("{}{}", ID_PREFIX, self.last)
    }
}
