use crate::IntoAndFromF64Array;




/**
 * Generalized minmod slope of a cell, given its two neighbors. The parameter
 * theta ranges from 1 (minmod, most diffusive) to 2 (monotonized central).
 * The result is a difference across one cell width, so face values are
 * y0 -/+ 0.5 * slope. For theta <= 2 those face values lie between the
 * neighboring cell values: no new extrema are created.
 */
pub fn plm_gradient_f64(theta: f64, yl: f64, y0: f64, yr: f64) -> f64 {

    fn sgn(a: f64) -> f64 {
        1.0f64.copysign(a)
    }

    fn minabs(a: f64, b: f64, c: f64) -> f64 {
        a.abs().min(b.abs()).min(c.abs())
    }

    let a = (y0 - yl) * theta;
    let b = (yr - yl) * 0.5;
    let c = (yr - y0) * theta;
    0.25 * (sgn(a) + sgn(b)).abs() * (sgn(a) + sgn(c)) * minabs(a, b, c)
}

/// Component-wise generalized minmod slope of a multi-component cell value.
pub fn plm_gradient<T, const N: usize>(theta: f64, yl: &T, y0: &T, yr: &T) -> T where T: IntoAndFromF64Array<N> {
    let l: [f64; N] = (*yl).into();
    let c: [f64; N] = (*y0).into();
    let r: [f64; N] = (*yr).into();
    let mut g = [0.0; N];

    for n in 0..N {
        g[n] = plm_gradient_f64(theta, l[n], c[n], r[n]);
    }
    T::from(g)
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_data_is_reconstructed_exactly() {
        for theta in [1.0, 1.5, 2.0] {
            assert_eq!(plm_gradient_f64(theta, 0.0, 1.0, 2.0), 1.0);
            assert_eq!(plm_gradient_f64(theta, 3.0, 1.0, -1.0), -2.0);
        }
    }

    #[test]
    fn slopes_vanish_at_extrema() {
        assert_eq!(plm_gradient_f64(1.5, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(plm_gradient_f64(1.5, 1.0, 0.0, 2.0), 0.0);
        assert_eq!(plm_gradient_f64(1.5, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn face_values_stay_within_neighbor_bounds() {
        let data = [0.0, 0.1, 0.9, 1.0, 1.0, 0.3, -2.0, -2.1, 5.0, 5.5, 5.4];
        for theta in [1.0, 1.5, 2.0] {
            for w in data.windows(3) {
                let g = plm_gradient_f64(theta, w[0], w[1], w[2]);
                let lo = w[0].min(w[1]).min(w[2]);
                let hi = w[0].max(w[1]).max(w[2]);
                for face in [w[1] - 0.5 * g, w[1] + 0.5 * g] {
                    assert!(face >= lo - 1e-14 && face <= hi + 1e-14);
                }
            }
        }
    }

    #[test]
    fn array_gradient_is_component_wise() {
        let g = plm_gradient::<[f64; 3], 3>(1.0, &[0.0, 1.0, 0.0], &[1.0, 1.0, 1.0], &[2.0, 1.0, 0.0]);
        assert_eq!(g, [1.0, 0.0, 0.0]);
    }
}
