//! Seed finder - brute-force inversion of "steps from state 0" for the game generator.

mod worker;

pub use worker::{FinderState, SeedFinder};

use crate::config::ConfigError;
use crate::protocol::{SearchProgress, SearchResult, StateWord};
use crate::rng::{Lcg16, StateStepper};

#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("state {target:#010x} not reached after {checked} steps; generator cycled back to its start")]
    Exhausted { target: u32, checked: u64 },
    #[error("a search for {target:#010x} is still running")]
    Busy { target: u32 },
    #[error("worker stopped without reporting a result for {target:#010x}")]
    NoResult { target: u32 },
    #[error("seed finder worker is no longer running")]
    WorkerGone,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn seed finder worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Search from the generator's canonical start state (0).
pub fn find_index<F>(target: u32, progress_interval: u64, on_progress: F) -> Result<SearchResult, FinderError>
where
    F: FnMut(SearchProgress),
{
    search(Lcg16::new(0), target, progress_interval, on_progress)
}

/// Step `stepper` until its state equals `target`, reporting progress every
/// `progress_interval` steps (including step 0).
///
/// Stops with [`FinderError::Exhausted`] if the stepper returns to its starting state
/// first. `progress_interval` must be a power of two.
pub fn search<S, F>(
    mut stepper: S,
    target: u32,
    progress_interval: u64,
    mut on_progress: F,
) -> Result<SearchResult, FinderError>
where
    S: StateStepper,
    F: FnMut(SearchProgress),
{
    if !progress_interval.is_power_of_two() {
        return Err(ConfigError::InvalidProgressInterval(progress_interval).into());
    }
    let mask = progress_interval - 1;
    let start = stepper.state();
    let mut checked: u64 = 0;

    loop {
        if checked & mask == 0 {
            on_progress(SearchProgress::at(checked));
        }
        if stepper.state() == target {
            return Ok(SearchResult {
                index: checked,
                seed: StateWord::from(target),
            });
        }
        stepper.advance();
        checked += 1;
        if stepper.state() == start {
            return Err(FinderError::Exhausted { target, checked });
        }
    }
}
