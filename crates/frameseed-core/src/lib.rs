//! Frameseed core - seed search and timer tables for a game's 16-bit LCG.
//!
//! This crate reproduces the game's generator bit for bit, locates how many steps from
//! state 0 an observed state lies, and maps generator samples to timer frame counts.

#![forbid(unsafe_code)]

pub mod config;
pub mod finder;
pub mod protocol;
pub mod rng;
pub mod timers;

pub use config::{FinderConfig, FrameseedConfig, LogConfig};
pub use finder::{find_index, FinderError, FinderState, SeedFinder};
pub use protocol::{FinderRequest, FinderResponse, SearchProgress, SearchResult, StateWord};
pub use rng::{Lcg16, StateStepper};
pub use timers::{LookupEntry, TableError, TimerKind, TimerTable, TimerTables};
