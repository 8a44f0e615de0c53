use core::ops::{Add, Mul};
use ndarray::{Array2, Zip};
use num::rational::Rational64;
use crate::{rational_to_f64, WeightedAverage};




/**
 * A time-tagged 2-D array of conserved quantities. The iteration count is
 * rational so that Runge-Kutta stages weight it like the data: a completed
 * step always advances it by exactly one.
 */
#[derive(Debug)]
pub struct SolutionStateArray2<T> {
    pub time: f64,
    pub iteration: Rational64,
    pub conserved: Array2<T>,
}

impl<T> SolutionStateArray2<T> {
    pub fn new(time: f64, conserved: Array2<T>) -> Self {
        SolutionStateArray2{time, iteration: Rational64::new(0, 1), conserved}
    }

    /// The number of completed steps, rounded down.
    pub fn completed_iterations(&self) -> u64 {
        self.iteration.to_integer().max(0) as u64
    }
}

impl<T: Clone> Clone for SolutionStateArray2<T> {
    fn clone(&self) -> Self {
        SolutionStateArray2{time: self.time, iteration: self.iteration, conserved: self.conserved.clone()}
    }

    fn clone_from(&mut self, source: &Self) {
        self.time = source.time;
        self.iteration = source.iteration;
        self.conserved.clone_from(&source.conserved);
    }
}

impl<T> WeightedAverage for SolutionStateArray2<T> where T: Copy + Add<Output=T> + Mul<f64, Output=T> {
    fn weighted_average(&mut self, b: Rational64, s0: &Self) {
        let bf = rational_to_f64(b);
        self.time = s0.time * bf + self.time * (1.0 - bf);
        self.iteration = s0.iteration * b + self.iteration * (-b + 1);
        Zip::from(&mut self.conserved).and(&s0.conserved).for_each(|u, &u0| *u = u0 * bf + *u * (1.0 - bf));
    }
}
