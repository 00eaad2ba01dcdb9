use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::FinderConfig;
use crate::protocol::{FinderRequest, FinderResponse, SearchProgress, SearchResult};
use crate::rng::{Lcg16, StateStepper};

use super::{search, FinderError};

/// Caller-side view of the worker's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderState {
    Idle,
    Searching { target: u32 },
    Found(SearchResult),
    /// The worker hit a full cycle without a match and stopped. Terminal.
    Exhausted { target: u32 },
}

/// Handle to a dedicated seed-search thread.
///
/// Requests and responses travel over channels only; the worker owns its generator.
/// At most one search may be outstanding, and none can be cancelled once started.
pub struct SeedFinder {
    request_tx: UnboundedSender<FinderRequest>,
    response_rx: UnboundedReceiver<FinderResponse>,
    state: FinderState,
    worker: JoinHandle<()>,
}

impl SeedFinder {
    /// Spawn a worker that searches the game generator from state 0.
    pub fn spawn(config: FinderConfig) -> Result<Self, FinderError> {
        Self::spawn_with(config, || Lcg16::new(0))
    }

    /// Spawn a worker that starts every search from a fresh `new_stepper()`.
    pub fn spawn_with<S, N>(config: FinderConfig, new_stepper: N) -> Result<Self, FinderError>
    where
        S: StateStepper + 'static,
        N: Fn() -> S + Send + 'static,
    {
        config.validate()?;

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();

        let worker = thread::Builder::new()
            .name("seed-finder".to_string())
            .spawn(move || worker_main(config, new_stepper, request_rx, response_tx))?;

        Ok(Self {
            request_tx,
            response_rx,
            state: FinderState::Idle,
            worker,
        })
    }

    pub fn state(&self) -> FinderState {
        self.state
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Start a search for `target`.
    pub fn find(&mut self, target: u32) -> Result<(), FinderError> {
        self.request(FinderRequest::find(target))
    }

    pub fn request(&mut self, request: FinderRequest) -> Result<(), FinderError> {
        match self.state {
            FinderState::Searching { target } => return Err(FinderError::Busy { target }),
            FinderState::Exhausted { .. } => return Err(FinderError::WorkerGone),
            FinderState::Idle | FinderState::Found(_) => {}
        }

        let FinderRequest::Find { seed } = request;
        self.request_tx
            .send(request)
            .map_err(|_| FinderError::WorkerGone)?;
        self.state = FinderState::Searching {
            target: seed.state(),
        };
        Ok(())
    }

    /// Post a raw JSON request. Malformed or unrecognized messages are ignored.
    pub fn post_json(&mut self, raw: &str) -> Result<(), FinderError> {
        match FinderRequest::from_json(raw) {
            Some(request) => self.request(request),
            None => Ok(()),
        }
    }

    /// Next message from the worker, or `None` once it has stopped.
    pub async fn recv(&mut self) -> Option<FinderResponse> {
        let response = self.response_rx.recv().await;
        self.observe(response.as_ref());
        response
    }

    /// Drain progress messages until the outstanding search finishes.
    pub async fn wait_found<F>(&mut self, mut on_progress: F) -> Result<SearchResult, FinderError>
    where
        F: FnMut(SearchProgress),
    {
        let target = match self.state {
            FinderState::Searching { target } => target,
            FinderState::Found(result) => return Ok(result),
            FinderState::Exhausted { target } => return Err(FinderError::NoResult { target }),
            FinderState::Idle => return Err(FinderError::WorkerGone),
        };

        loop {
            match self.recv().await {
                Some(FinderResponse::Progress(progress)) => on_progress(progress),
                Some(FinderResponse::Found(result)) => return Ok(result),
                None => return Err(FinderError::NoResult { target }),
            }
        }
    }

    fn observe(&mut self, response: Option<&FinderResponse>) {
        match (response, self.state) {
            (Some(FinderResponse::Found(result)), _) => self.state = FinderState::Found(*result),
            (None, FinderState::Searching { target }) => {
                self.state = FinderState::Exhausted { target }
            }
            _ => {}
        }
    }
}

fn worker_main<S, N>(
    config: FinderConfig,
    new_stepper: N,
    mut requests: UnboundedReceiver<FinderRequest>,
    responses: UnboundedSender<FinderResponse>,
) where
    S: StateStepper,
    N: Fn() -> S,
{
    while let Some(request) = requests.blocking_recv() {
        let FinderRequest::Find { seed } = request;
        let target = seed.state();
        tracing::info!(target, "Finding seed");

        let outcome = search(new_stepper(), target, config.progress_interval, |progress| {
            tracing::debug!(checked = progress.checked, progress = progress.progress, "Search progress");
            let _ = responses.send(FinderResponse::Progress(progress));
        });

        match outcome {
            Ok(result) => {
                tracing::info!(index = result.index, target, "Seed found");
                let _ = responses.send(FinderResponse::Found(SearchResult { seed, ..result }));
            }
            Err(err) => {
                // Every state lies on the generator's single cycle, so this means corrupted
                // input or wrong generator constants. Nothing sensible can follow.
                tracing::error!(error = %err, "Seed search exhausted the generator cycle");
                return;
            }
        }
    }
}
