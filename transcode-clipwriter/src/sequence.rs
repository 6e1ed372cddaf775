//! Audio sample sequences for non-integer sample/frame ratios
//!
//! When the audio sampling rate is not an integer multiple of the video
//! edit rate (48 kHz at 29.97 Hz gives 1601.6 samples per frame), every
//! frame must still carry a whole number of samples. The remainder is
//! spread over a repeating cycle of frames so the long-run rate is exact:
//!
//! ```text
//! 48000 Hz @ 30000/1001 -> 1602 1601 1602 1601 1602  (sum 8008 over 5 frames)
//! 48000 Hz @ 25         -> 1920
//! ```

use crate::types::{gcd, Rational};
use std::fmt;

/// Longest cycle a sequence may have. Broadcast rate pairs stay within a
/// handful of frames; anything longer is not a usable cadence.
pub const MAX_CYCLE_LENGTH: u64 = 1 << 16;

/// Repeating per-frame audio sample counts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleSequence(Vec<u32>);

impl SampleSequence {
    /// Compute the sequence for `sampling_rate` samples per second at
    /// `edit_rate` frames per second.
    ///
    /// Returns `None` when either rate is not positive, a single frame
    /// would carry more than `u32::MAX` samples, or the cycle would be
    /// longer than [`MAX_CYCLE_LENGTH`] frames.
    pub fn new(sampling_rate: Rational, edit_rate: Rational) -> Option<Self> {
        if !sampling_rate.is_positive() || !edit_rate.is_positive() {
            return None;
        }

        // samples per frame = (Ra.num * Rv.den) / (Ra.den * Rv.num) = p / q
        let num = sampling_rate.numerator as u64 * edit_rate.denominator as u64;
        let den = sampling_rate.denominator as u64 * edit_rate.numerator as u64;
        let g = gcd(num, den);
        let (p, q) = (num / g, den / g);

        if p / q >= u32::MAX as u64 || q > MAX_CYCLE_LENGTH {
            return None;
        }

        // Cumulative count after frame i is round(i * p / q), half rounded up.
        let (p, q) = (p as u128, q as u128);
        let cumulative = |i: u128| (2 * i * p + q) / (2 * q);
        let counts = (0..q)
            .map(|i| (cumulative(i + 1) - cumulative(i)) as u32)
            .collect();

        Some(SampleSequence(counts))
    }

    /// Single-element sequence for tracks without a variable sample pattern
    pub fn constant(count: u32) -> Self {
        SampleSequence(vec![count])
    }

    /// The cycle rotated left by `offset` frames (modulo the cycle length)
    pub fn shifted(&self, offset: usize) -> Self {
        let mut counts = self.0.clone();
        let len = counts.len();
        counts.rotate_left(offset % len);
        SampleSequence(counts)
    }

    /// Cycle length in frames
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a sequence has at least one frame
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total samples over one cycle
    pub fn sum(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    /// Sample count for frame `frame`, continuing the cycle indefinitely
    pub fn count_at(&self, frame: u64) -> u32 {
        self.0[(frame % self.0.len() as u64) as usize]
    }

    /// True if every frame carries the same number of samples
    pub fn is_constant(&self) -> bool {
        self.0.windows(2).all(|w| w[0] == w[1])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }
}

impl fmt::Display for SampleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}
