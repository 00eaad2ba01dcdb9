//! Precomputed timer durations and frame counts for every 16-bit generator sample.
//!
//! The game draws two kinds of countdown timers from the generator and ticks them down
//! once per frame. Instead of re-simulating a countdown per query, both tables are built
//! once per process and indexed by sample.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::rng::Lcg16;

/// Frames per second of the game's update loop.
pub const FPS: f64 = 60.0;
/// Time subtracted from a countdown on each frame.
pub const FRAME_TIME: f64 = 1.0 / FPS;

/// Number of entries in each table: one per possible sample.
pub const TABLE_LEN: usize = 1 << 16;

pub const TIMER1_MIN_FRAMES: u32 = 481;
pub const TIMER1_MAX_FRAMES: u32 = 780;
pub const TIMER2TO4_MIN_FRAMES: u32 = 900;
pub const TIMER2TO4_MAX_FRAMES: u32 = 1501;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("sample {sample} is outside 0..=65535")]
    OutOfRange { sample: u64 },
    #[error("unknown timer table {0:?} (expected \"timer1\" or \"timer2to4\")")]
    UnknownTable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// The first timer, drawn from `8.0..=13.0` seconds.
    Timer1,
    /// Timers two through four, drawn from `15.0..=25.0` seconds.
    Timer2To4,
}

impl TimerKind {
    pub const ALL: [TimerKind; 2] = [TimerKind::Timer1, TimerKind::Timer2To4];

    pub fn name(self) -> &'static str {
        match self {
            TimerKind::Timer1 => "timer1",
            TimerKind::Timer2To4 => "timer2to4",
        }
    }

    /// Duration range in seconds passed to [`Lcg16::range_float`].
    pub fn seconds(self) -> (f32, f32) {
        match self {
            TimerKind::Timer1 => (8.0, 13.0),
            TimerKind::Timer2To4 => (15.0, 25.0),
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimerKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timer1" => Ok(TimerKind::Timer1),
            "timer2to4" => Ok(TimerKind::Timer2To4),
            other => Err(TableError::UnknownTable(other.to_string())),
        }
    }
}

/// A simulated timer and the number of frames it lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupEntry {
    pub timer: f32,
    pub frames: u32,
}

impl LookupEntry {
    fn new(timer: f32) -> Self {
        Self {
            timer,
            frames: count_frames(timer),
        }
    }
}

/// Count frames by ticking the countdown until it is no longer positive.
///
/// Accumulated `f64` error is part of the result: an exact 8 second timer lasts 481
/// frames, not 480.
pub fn count_frames(timer: f32) -> u32 {
    let mut counter = f64::from(timer);
    let mut frames = 0;
    while counter > 0.0 {
        counter -= FRAME_TIME;
        frames += 1;
    }
    frames
}

/// Draw a timer of `kind` the way the game does from a generator.
pub fn simulate_timer(rng: &Lcg16, kind: TimerKind) -> f32 {
    let (min, max) = kind.seconds();
    rng.range_float(min, max)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerTable {
    kind: TimerKind,
    entries: Box<[LookupEntry]>,
}

impl TimerTable {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn entry(&self, sample: u16) -> LookupEntry {
        self.entries[usize::from(sample)]
    }

    pub fn timer_value(&self, sample: u16) -> f32 {
        self.entry(sample).timer
    }

    pub fn frames(&self, sample: u16) -> u32 {
        self.entry(sample).frames
    }

    /// Lookup for an untyped sample, e.g. one parsed from user input.
    pub fn try_frames(&self, sample: u64) -> Result<u32, TableError> {
        let index = u16::try_from(sample).map_err(|_| TableError::OutOfRange { sample })?;
        Ok(self.frames(index))
    }

    /// Lookup keyed by a full generator state; only its high 16 bits matter.
    pub fn frames_for_seed(&self, seed: u32) -> u32 {
        self.frames((seed >> 16) as u16)
    }

    pub fn min_frames(&self) -> u32 {
        self.frames(0)
    }

    pub fn max_frames(&self) -> u32 {
        self.frames(u16::MAX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerTables {
    pub timer1: TimerTable,
    pub timer2to4: TimerTable,
}

impl TimerTables {
    /// Simulate both timers for every sample.
    ///
    /// Both draws for a sample come from the same generator state; the caller supplies
    /// whichever state was current when the game drew that timer.
    pub fn build() -> Self {
        let mut timer1 = Vec::with_capacity(TABLE_LEN);
        let mut timer2to4 = Vec::with_capacity(TABLE_LEN);

        let mut rng = Lcg16::default();
        for sample in 0..=u16::MAX {
            rng.set_state(u32::from(sample) << 16);
            timer1.push(LookupEntry::new(simulate_timer(&rng, TimerKind::Timer1)));
            timer2to4.push(LookupEntry::new(simulate_timer(&rng, TimerKind::Timer2To4)));
        }

        tracing::debug!(entries = TABLE_LEN, "Built timer lookup tables");

        Self {
            timer1: TimerTable {
                kind: TimerKind::Timer1,
                entries: timer1.into_boxed_slice(),
            },
            timer2to4: TimerTable {
                kind: TimerKind::Timer2To4,
                entries: timer2to4.into_boxed_slice(),
            },
        }
    }

    pub fn get(&self, kind: TimerKind) -> &TimerTable {
        match kind {
            TimerKind::Timer1 => &self.timer1,
            TimerKind::Timer2To4 => &self.timer2to4,
        }
    }
}

static TABLES: OnceLock<TimerTables> = OnceLock::new();

/// Process-wide tables, built on first use.
pub fn tables() -> &'static TimerTables {
    TABLES.get_or_init(TimerTables::build)
}

pub fn table(kind: TimerKind) -> &'static TimerTable {
    tables().get(kind)
}

pub fn min_frames(kind: TimerKind) -> u32 {
    table(kind).min_frames()
}

pub fn max_frames(kind: TimerKind) -> u32 {
    table(kind).max_frames()
}

pub fn frames_for_sample(kind: TimerKind, sample: u16) -> u32 {
    table(kind).frames(sample)
}

pub fn lookup_timer1_frames(seed: u32) -> u32 {
    tables().timer1.frames_for_seed(seed)
}

pub fn lookup_timer2to4_frames(seed: u32) -> u32 {
    tables().timer2to4.frames_for_seed(seed)
}
