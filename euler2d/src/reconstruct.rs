use ndarray::prelude::*;
use ndarray::{Slice, Zip};
use lib_euler2d::Primitive;
use lib_hydro_algorithms::piecewise_linear::plm_gradient;




/**
 * Spatial reconstruction of face states from cell averages of the primitive
 * variables.
 */
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Reconstruction {
    /// Face states are the adjacent cell values (first order).
    PiecewiseConstant,
    /// Generalized-minmod limited linear profiles (second order). The
    /// parameter `theta` is in [1, 2]; 1 is minmod.
    PiecewiseLinear { theta: f64 },
}

impl Reconstruction {
    pub fn required_guard_zones(self) -> usize {
        match self {
            Reconstruction::PiecewiseConstant => 1,
            Reconstruction::PiecewiseLinear{..} => 2,
        }
    }

    /**
     * Left and right states at every face between adjacent cells along
     * `axis`. For n cells along the axis the returned arrays have n - 1
     * entries along it: face k separates cells k and k + 1. The first and
     * last cells get zero slopes.
     */
    pub fn face_states(self, p: ArrayView2<Primitive>, axis: Axis) -> (Array2<Primitive>, Array2<Primitive>) {
        let n = p.len_of(axis);
        let lower = p.slice_axis(axis, Slice::from(0..n - 1));
        let upper = p.slice_axis(axis, Slice::from(1..n));

        match self {
            Reconstruction::PiecewiseConstant => {
                (lower.to_owned(), upper.to_owned())
            }
            Reconstruction::PiecewiseLinear{theta} => {
                let mut half_slopes = Array2::<Primitive>::default(p.dim());

                if n > 2 {
                    let pl = p.slice_axis(axis, Slice::from(0..n - 2));
                    let p0 = p.slice_axis(axis, Slice::from(1..n - 1));
                    let pr = p.slice_axis(axis, Slice::from(2..n));
                    let dp = Zip::from(&pl).and(&p0).and(&pr).map_collect(|pl, p0, pr| plm_gradient::<Primitive, 4>(theta, pl, p0, pr) * 0.5);
                    half_slopes.slice_axis_mut(axis, Slice::from(1..n - 1)).assign(&dp);
                }
                let fl = &lower + &half_slopes.slice_axis(axis, Slice::from(0..n - 1));
                let fr = &upper - &half_slopes.slice_axis(axis, Slice::from(1..n));
                (fl, fr)
            }
        }
    }
}
