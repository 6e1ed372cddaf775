//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rational number for edit rates, sampling rates and aspect ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub numerator: i32,
    pub denominator: i32,
}

impl Rational {
    /// Create new rational
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Rational {
            numerator,
            denominator,
        }
    }

    /// True when both terms are strictly positive
    pub fn is_positive(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Lowest-terms form. Zero denominators are returned unchanged.
    pub fn reduced(&self) -> Self {
        let g = gcd(self.numerator.unsigned_abs() as u64, self.denominator.unsigned_abs() as u64);
        if g <= 1 {
            return *self;
        }
        Rational::new(self.numerator / g as i32, self.denominator / g as i32)
    }

    /// Common frame rates
    pub const fn fps_25() -> Self {
        Rational::new(25, 1)
    }

    pub const fn fps_50() -> Self {
        Rational::new(50, 1)
    }

    pub const fn fps_23_976() -> Self {
        Rational::new(24000, 1001)
    }

    pub const fn fps_29_97() -> Self {
        Rational::new(30000, 1001)
    }

    pub const fn fps_59_94() -> Self {
        Rational::new(60000, 1001)
    }

    /// 48 kHz audio sampling rate
    pub const fn sampling_48k() -> Self {
        Rational::new(48000, 1)
    }

    /// 16:9 picture aspect ratio
    pub const fn widescreen() -> Self {
        Rational::new(16, 9)
    }

    /// 4:3 picture aspect ratio
    pub const fn standard() -> Self {
        Rational::new(4, 3)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::new(1, 1)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Rational::fps_29_97().to_string(), "30000/1001");
    }

    #[test]
    fn test_reduced() {
        assert_eq!(Rational::new(50, 2).reduced(), Rational::new(25, 1));
        assert_eq!(Rational::new(30000, 1001).reduced(), Rational::new(30000, 1001));
        assert_eq!(Rational::new(0, 0).reduced(), Rational::new(0, 0));
    }

    #[test]
    fn test_is_positive() {
        assert!(Rational::sampling_48k().is_positive());
        assert!(!Rational::new(0, 1).is_positive());
        assert!(!Rational::new(25, 0).is_positive());
    }
}
