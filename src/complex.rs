//! Complex numbers and the arithmetic the transform is built from.
//!
//! [`Complex`] is a plain `Copy` value: every operation returns a new number
//! and nothing mutates a component in place.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use rand::Rng;

/// A complex number with double precision components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// A purely real number.
    pub const fn from_re(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// A purely imaginary number.
    pub const fn from_im(im: f64) -> Self {
        Self { re: 0.0, im }
    }

    /// Exact equality of both components. Same as `==`.
    pub fn eq_exact(self, other: Self) -> bool {
        self.re == other.re && self.im == other.im
    }

    /// Equality after rounding both components to the nearest integer.
    ///
    /// Meant for coarse visual comparisons. It is not a tolerance check:
    /// `0.49` and `0.51` compare unequal while `0.51` and `1.49` compare equal.
    pub fn eq_rounded(self, other: Self) -> bool {
        self.re.round() == other.re.round() && self.im.round() == other.im.round()
    }

    /// The modulus `sqrt(re² + im²)`.
    pub fn modulus(self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// The squared modulus, used as the divisor in [`Div`].
    pub fn modulus_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `atan(im / re)`.
    ///
    /// This is the two-quadrant arctangent: results lie in `[-π/2, π/2]`,
    /// so points in the second and third quadrants report the angle of their
    /// reflection through the origin. Use `im.atan2(re)` for the full angle.
    pub fn argument(self) -> f64 {
        (self.im / self.re).atan()
    }

    /// `e^z = e^re · (cos(im) + i·sin(im))`.
    pub fn exp(self) -> Self {
        let scale = Complex::from_re(self.re.exp());
        let angle = Complex::from_re(self.im.cos()) + Complex::from_im(self.im.sin());
        scale * angle
    }

    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// `1 / z`.
    ///
    /// `z` must not be zero; the result is then non-finite, exactly as for
    /// [`Div`].
    pub fn recip(self) -> Self {
        Complex::ONE / self
    }

    /// A number with both components drawn uniformly from `[0, 1)`.
    ///
    /// Intended for seeding tests, not for signal paths.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            re: rng.gen::<f64>(),
            im: rng.gen::<f64>(),
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::from_re(re)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e}{:+e}i", self.re, self.im)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + rhs.re * self.im,
        }
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

/// `w / z` over `|z|²`.
///
/// Dividing by the zero complex number is a precondition violation and is
/// not checked: the divisor is `0.0` and the components come out NaN or
/// infinite.
impl Div for Complex {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let (u, v) = (self.re, self.im);
        let (x, y) = (rhs.re, rhs.im);
        let div = rhs.modulus_sq();
        Self {
            re: (u * x + v * y) / div,
            im: (v * x - u * y) / div,
        }
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}
