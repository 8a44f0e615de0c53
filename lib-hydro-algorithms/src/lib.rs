//! Scheme-agnostic building blocks for Godunov-type hydrodynamics codes.

use num::rational::Rational64;

pub mod solution_states;
pub mod piecewise_linear;
pub mod runge_kutta;

/// Types that convert losslessly to and from a fixed-size array of `f64`
/// components. Any type with the two `From` conversions qualifies.
pub trait IntoAndFromF64Array<const N: usize>: Copy + Into<[f64; N]> + From<[f64; N]> {
}

impl<T, const N: usize> IntoAndFromF64Array<N> for T where T: Copy + Into<[f64; N]> + From<[f64; N]> {
}

/// A solution state that Runge-Kutta stages can blend in place.
pub trait WeightedAverage: Clone {
    /// Replace `self` with `b * s0 + (1 - b) * self`.
    fn weighted_average(&mut self, b: Rational64, s0: &Self);
}

pub(crate) fn rational_to_f64(b: Rational64) -> f64 {
    *b.numer() as f64 / *b.denom() as f64
}
