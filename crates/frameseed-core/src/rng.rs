//! The game's 16-bit-output linear congruential generator.
//!
//! State is a single `u32`; the visible output is its high half. Float helpers reproduce
//! the game's single-precision rounding exactly, because the timer tables depend on it.

/// Multiplier of the recurrence `state * M + C (mod 2^32)`.
pub const MULTIPLIER: u32 = 0x41C6_4E6D;
/// Increment of the recurrence.
pub const INCREMENT: u32 = 0x0000_3039;
/// The game's approximation of `1 / 65536`. Slightly larger, so sample `0xFFFF` maps to `1.0`.
pub const UNIT_SCALE: f64 = 0.000015259022;

/// Anything whose full 32-bit state can be stepped and compared.
///
/// The seed search is written against this so it can be exercised with short-cycle
/// steppers; production code only ever uses [`Lcg16`].
pub trait StateStepper {
    fn state(&self) -> u32;

    fn advance(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Lcg16 {
    state: u32,
}

impl Lcg16 {
    pub fn new(state: u32) -> Self {
        Self { state }
    }

    /// A generator whose current sample is `sample` and whose low half is zero.
    pub fn from_sample(sample: u16) -> Self {
        Self::new(u32::from(sample) << 16)
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    pub fn advance(&mut self) {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
    }

    /// Bits 16..32 of the state.
    pub fn sample(&self) -> u16 {
        (self.state >> 16) as u16
    }

    /// The sample scaled by [`UNIT_SCALE`], rounded once to `f32`.
    pub fn uniform_float(&self) -> f32 {
        (f64::from(self.sample()) * UNIT_SCALE) as f32
    }

    /// `min + uniform_float() * (max - min)`, rounded once to `f32`.
    ///
    /// The span is narrowed to `f32` first; the multiply and add are then exact in `f64`,
    /// which makes the final narrowing the only rounding step, as in the game.
    pub fn range_float(&self, min: f32, max: f32) -> f32 {
        let span = max - min;
        (f64::from(self.uniform_float()) * f64::from(span) + f64::from(min)) as f32
    }

    /// Inclusive `min..=max` via `sample % (max - min + 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn range_int(&self, min: i32, max: i32) -> i32 {
        assert!(min <= max, "range_int requires min <= max, got {min}..={max}");
        let width = i64::from(max) - i64::from(min) + 1;
        (i64::from(min) + i64::from(self.sample()) % width) as i32
    }
}

impl StateStepper for Lcg16 {
    fn state(&self) -> u32 {
        self.state
    }

    fn advance(&mut self) {
        Lcg16::advance(self);
    }
}

impl Iterator for Lcg16 {
    type Item = u16;

    /// Advances, then yields the new sample.
    fn next(&mut self) -> Option<u16> {
        Lcg16::advance(self);
        Some(self.sample())
    }
}
