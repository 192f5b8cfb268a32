//! Polar-form complex numbers.
//!
//! A [`Complex`] stores a magnitude and a phase measured in units of π, so a
//! phase of `0.5` is the angle π/2. Multiplication stays in polar form;
//! addition goes through rectangular coordinates.

use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, Mul};

use approx::AbsDiffEq;
use num_complex::Complex64;

/// Immutable complex number in polar form.
///
/// Invariants: `magnitude >= 0` and `phase` lies in `[0, 2)`. A zero
/// magnitude always carries phase `0`, so every representation of zero
/// compares equal.
///
/// `PartialEq` and `Hash` are exact. Use [`AbsDiffEq`] for tolerant
/// comparison of computed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    magnitude: f64,
    phase: f64,
}

/// Wrap a phase (in units of π) into `[0, 2)`.
fn normalize_phase(phase: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0
    let wrapped = phase.rem_euclid(2.0) + 0.0;
    if wrapped >= 2.0 {
        0.0
    } else {
        wrapped
    }
}

impl Complex {
    pub const ZERO: Complex = Complex { magnitude: 0.0, phase: 0.0 };
    pub const ONE: Complex = Complex { magnitude: 1.0, phase: 0.0 };
    pub const NEG_ONE: Complex = Complex { magnitude: 1.0, phase: 1.0 };
    pub const I: Complex = Complex { magnitude: 1.0, phase: 0.5 };
    pub const NEG_I: Complex = Complex { magnitude: 1.0, phase: 1.5 };

    /// Creates a complex number from a magnitude and a phase in units of π.
    ///
    /// A negative magnitude is folded into the phase.
    pub fn new(magnitude: f64, phase: f64) -> Self {
        let (magnitude, phase) = if magnitude < 0.0 {
            (-magnitude, phase + 1.0)
        } else {
            (magnitude, phase)
        };
        if magnitude == 0.0 {
            return Complex::ZERO;
        }
        Complex {
            magnitude,
            phase: normalize_phase(phase),
        }
    }

    /// Creates a complex number from a magnitude and a phase in radians.
    pub fn from_radians(magnitude: f64, radians: f64) -> Self {
        Complex::new(magnitude, radians / PI)
    }

    /// Creates a real number: phase `0` for non-negative values, `1` otherwise.
    pub fn from_real(real: f64) -> Self {
        if real < 0.0 {
            Complex::new(-real, 1.0)
        } else {
            Complex::new(real, 0.0)
        }
    }

    /// Creates a complex number from rectangular coordinates.
    pub fn from_rect(real: f64, imag: f64) -> Self {
        Complex::new(real.hypot(imag), imag.atan2(real) / PI)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Phase in units of π, in `[0, 2)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase in radians.
    pub fn phase_angle(&self) -> f64 {
        self.phase * PI
    }

    pub fn re(&self) -> f64 {
        self.magnitude * self.phase_angle().cos()
    }

    pub fn im(&self) -> f64 {
        self.magnitude * self.phase_angle().sin()
    }

    /// Squared magnitude; the measurement probability of an amplitude.
    pub fn norm_sqr(&self) -> f64 {
        self.magnitude * self.magnitude
    }

    pub fn conj(&self) -> Self {
        Complex::new(self.magnitude, -self.phase)
    }

    /// Unit-magnitude value with the same phase.
    pub fn normalized(&self) -> Self {
        Complex::new(1.0, self.phase)
    }

    pub fn to_complex64(&self) -> Complex64 {
        Complex64::from_polar(self.magnitude, self.phase_angle())
    }
}

impl Default for Complex {
    fn default() -> Self {
        Complex::ZERO
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Complex::from_real(real)
    }
}

impl From<i32> for Complex {
    fn from(real: i32) -> Self {
        Complex::from_real(real as f64)
    }
}

impl From<Complex64> for Complex {
    fn from(c: Complex64) -> Self {
        Complex::from_rect(c.re, c.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(c: Complex) -> Self {
        c.to_complex64()
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(self.magnitude * rhs.magnitude, self.phase + rhs.phase)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        self * Complex::from_real(rhs)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::from_rect(self.re() + rhs.re(), self.im() + rhs.im())
    }
}

/// Sums in rectangular form and converts back to polar once.
impl Sum for Complex {
    fn sum<It: Iterator<Item = Complex>>(iter: It) -> Self {
        let total: Complex64 = iter.map(|c| c.to_complex64()).sum();
        Complex::from(total)
    }
}

impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.magnitude.to_bits().hash(state);
        self.phase.to_bits().hash(state);
    }
}

/// Tolerant comparison in rectangular coordinates, so values on either
/// side of the phase wrap compare close.
impl AbsDiffEq for Complex {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        1e-12
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.re() - other.re()).abs() <= epsilon && (self.im() - other.im()).abs() <= epsilon
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0 + 0.0
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = round2(self.re());
        let i = round2(self.im());
        if i == 0.0 {
            write!(f, "{}", r)
        } else if r == 0.0 {
            write!(f, "{}i", i)
        } else if i < 0.0 {
            write!(f, "{} - {}i", r, -i)
        } else {
            write!(f, "{} + {}i", r, i)
        }
    }
}
