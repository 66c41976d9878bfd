//! Sources of randomness for combat draws.
//!
//! Every random decision in a battle (initiative, special attack, miss/crit,
//! damage variance) is pulled from a [`RandomSource`]. Callers own the source,
//! so a battle can run on a seeded generator, on OS entropy, or on a scripted
//! sequence of draws in tests.

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Bernoulli draw that succeeds with `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform integer in the closed range `[min, max]`.
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        unit_to_range(self.next_unit(), min, max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Maps a unit draw onto the closed integer range `[min, max]`.
///
/// `floor(draw * span) + min`; draws outside `[0, 1)` are clamped onto the
/// range ends.
pub fn unit_to_range(draw: f64, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    let span = i64::from(max) - i64::from(min) + 1;
    let offset = (draw * span as f64).floor() as i64;
    (i64::from(min) + offset.clamp(0, span - 1)) as i32
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Deterministic for a given seed, which makes whole battles replayable.
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.next_u32();
        rng
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);

        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Used to pin down individual draws (special, miss/crit, variance,
/// initiative) when testing the rules.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
