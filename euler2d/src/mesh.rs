use ndarray::prelude::*;
use crate::Error;




/**
 * A uniform Cartesian grid of nx1 x nx2 zones covering a rectangle, padded by
 * `num_guard` ghost zones on every side. Arrays over the padded grid have
 * shape (nx1 + 2g, nx2 + 2g); the interior occupies the index ranges
 * g..g + nx1 and g..g + nx2.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    nx1: usize,
    nx2: usize,
    x1_range: (f64, f64),
    x2_range: (f64, f64),
    num_guard: usize,
}




// ============================================================================
impl Grid {
    pub fn new(resolution: (usize, usize), x1_range: (f64, f64), x2_range: (f64, f64), num_guard: usize) -> Result<Self, Error> {
        let (nx1, nx2) = resolution;

        if nx1 == 0 || nx2 == 0 {
            return Err(Error::invalid("resolution", format!("must be positive, got ({}, {})", nx1, nx2)));
        }
        for (key, (lo, hi)) in [("x1 range", x1_range), ("x2 range", x2_range)] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::invalid(key, format!("must be a finite interval with min < max, got ({}, {})", lo, hi)));
            }
        }
        if num_guard == 0 {
            return Err(Error::invalid("num_guard", "at least one ghost zone is required"));
        }
        Ok(Grid{nx1, nx2, x1_range, x2_range, num_guard})
    }

    pub fn nx1(&self) -> usize { self.nx1 }
    pub fn nx2(&self) -> usize { self.nx2 }
    pub fn num_guard(&self) -> usize { self.num_guard }
    pub fn x1_range(&self) -> (f64, f64) { self.x1_range }
    pub fn x2_range(&self) -> (f64, f64) { self.x2_range }
    pub fn dx1(&self) -> f64 { (self.x1_range.1 - self.x1_range.0) / self.nx1 as f64 }
    pub fn dx2(&self) -> f64 { (self.x2_range.1 - self.x2_range.0) / self.nx2 as f64 }
    pub fn min_spacing(&self) -> f64 { self.dx1().min(self.dx2()) }
    pub fn cell_volume(&self) -> f64 { self.dx1() * self.dx2() }
    pub fn num_zones(&self) -> usize { self.nx1 * self.nx2 }

    /// Interior shape (nx1, nx2).
    pub fn shape(&self) -> (usize, usize) {
        (self.nx1, self.nx2)
    }

    /// Shape including ghost zones.
    pub fn padded_shape(&self) -> (usize, usize) {
        (self.nx1 + 2 * self.num_guard, self.nx2 + 2 * self.num_guard)
    }

    pub fn cell_centers_x1(&self) -> Array1<f64> {
        cell_centers(self.x1_range, self.nx1)
    }

    pub fn cell_centers_x2(&self) -> Array1<f64> {
        cell_centers(self.x2_range, self.nx2)
    }

    /// Cell-center coordinates as two (nx1, nx2) arrays, x1 varying along
    /// the first axis.
    pub fn coordinate_grids(&self) -> (Array2<f64>, Array2<f64>) {
        let x1 = self.cell_centers_x1();
        let x2 = self.cell_centers_x2();
        let shape = self.shape();
        let x = x1.insert_axis(Axis(1)).broadcast(shape).map(|b| b.to_owned()).unwrap_or_else(|| Array2::zeros(shape));
        let y = x2.insert_axis(Axis(0)).broadcast(shape).map(|b| b.to_owned()).unwrap_or_else(|| Array2::zeros(shape));
        (x, y)
    }

    pub fn interior<'a, T>(&self, array: &'a Array2<T>) -> ArrayView2<'a, T> {
        let g = self.num_guard;
        array.slice(s![g..g + self.nx1, g..g + self.nx2])
    }

    pub fn interior_mut<'a, T>(&self, array: &'a mut Array2<T>) -> ArrayViewMut2<'a, T> {
        let g = self.num_guard;
        array.slice_mut(s![g..g + self.nx1, g..g + self.nx2])
    }

    /// Embed an interior array in a padded array. Ghost zones hold
    /// `T::default()` until boundary conditions are applied.
    pub fn with_ghost_cells<T: Clone + Default>(&self, interior: ArrayView2<T>) -> Result<Array2<T>, Error> {
        if interior.dim() != self.shape() {
            return Err(Error::shape_mismatch("initial state", &[self.nx1, self.nx2], interior.shape()));
        }
        let mut padded = Array2::default(self.padded_shape());
        self.interior_mut(&mut padded).assign(&interior);
        Ok(padded)
    }
}




// ============================================================================
fn cell_centers(range: (f64, f64), num_zones: usize) -> Array1<f64> {
    let vertices = Array::<f64, _>::linspace(range.0, range.1, num_zones + 1);
    0.5 * (&vertices.slice(s![1..]) + &vertices.slice(s![..-1]))
}

/// Polar radius and angle of a Cartesian point.
pub fn cartesian_to_polar(x: f64, y: f64) -> (f64, f64) {
    ((x * x + y * y).sqrt(), y.atan2(x))
}
