//! Messages exchanged with the seed-finder worker.
//!
//! Both directions are JSON objects tagged by a `type` field, e.g.
//! `{"type":"find","seed":12345}` in and `{"type":"found","index":1,"seed":12345}` out.
//! Seeds at or above 2^31 may also arrive as negative int32 values, the way JavaScript
//! callers hold them; replies echo the seed in the form it arrived.

use serde::{Deserialize, Serialize};

/// Size of the generator's state space; progress is reported as a fraction of it.
pub const STATE_SPACE: u64 = 1 << 32;

/// Caller-to-worker messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinderRequest {
    /// Locate the step index at which the generator's state equals `seed`
    Find { seed: StateWord },
}

impl FinderRequest {
    pub fn find(state: u32) -> Self {
        FinderRequest::Find {
            seed: StateWord::from(state),
        }
    }

    /// Parse a raw request, returning `None` for malformed JSON or an unknown `type`.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(request) => Some(request),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring unrecognized finder request");
                None
            }
        }
    }
}

/// Worker-to-caller messages
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinderResponse {
    /// Periodic milestone while searching
    Progress(SearchProgress),
    /// Terminal result; exactly one per successful search
    Found(SearchResult),
}

impl FinderResponse {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Fraction of the state space covered, in `[0, 1)`
    pub progress: f64,
    /// Steps examined so far
    pub checked: u64,
}

impl SearchProgress {
    pub fn at(checked: u64) -> Self {
        Self {
            progress: checked as f64 / STATE_SPACE as f64,
            checked,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of advances from state 0 to reach `seed`
    pub index: u64,
    /// The searched-for state, echoed back
    pub seed: StateWord,
}

/// A 32-bit generator state in either of its wire encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateWord {
    Unsigned(u32),
    /// Two's-complement view of the same bits, e.g. `-740551042` for `0xD3DC167E`
    Signed(i32),
}

impl StateWord {
    pub fn state(self) -> u32 {
        match self {
            StateWord::Unsigned(state) => state,
            StateWord::Signed(state) => state as u32,
        }
    }
}

impl From<u32> for StateWord {
    fn from(state: u32) -> Self {
        StateWord::Unsigned(state)
    }
}
