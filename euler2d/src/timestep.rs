use ndarray::prelude::*;
use lib_euler2d::Conserved;
use crate::mesh::Grid;




/// The largest `c + |v|` over the given zones. Non-finite speeds propagate.
pub fn max_signal_speed(u: ArrayView2<Conserved>, gamma_law_index: f64) -> f64 {
    u.fold(0.0, |a: f64, u| {
        let s = u.to_primitive(gamma_law_index).max_signal_speed(gamma_law_index);
        if s.is_nan() || a.is_nan() { f64::NAN } else { a.max(s) }
    })
}




/**
 * The CFL-limited time step for the interior zones,
 *
 *   dt = cfl * min(dx1, dx2) / max(c + |v|)
 *
 * When the maximum signal speed is zero or not finite the step falls back to
 * min(dx1, dx2).
 */
pub fn compute_timestep(u: ArrayView2<Conserved>, grid: &Grid, gamma_law_index: f64, cfl: f64) -> f64 {
    let a = max_signal_speed(u, gamma_law_index);
    let dx = grid.min_spacing();

    if a.is_finite() && a > f64::EPSILON {
        cfl * dx / a
    } else {
        dx
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use lib_euler2d::Primitive;

    fn grid() -> Grid {
        Grid::new((10, 20), (0.0, 1.0), (0.0, 1.0), 2).unwrap()
    }

    #[test]
    fn timestep_uses_the_fastest_zone() {
        let mut u = Array2::from_elem((10, 20), Primitive(1.0, 0.0, 0.0, 1.0 / 1.4).to_conserved(1.4));
        u[[3, 7]] = Primitive(1.0, 3.0, 4.0, 1.0 / 1.4).to_conserved(1.4);
        assert!((max_signal_speed(u.view(), 1.4) - 6.0).abs() < 1e-12);
        assert!((compute_timestep(u.view(), &grid(), 1.4, 0.4) - 0.4 * 0.05 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn slow_flows_may_step_further_than_one_zone() {
        let sound_speed = 0.1;
        let u = Array2::from_elem((10, 20), Primitive(1.0, 0.0, 0.0, sound_speed * sound_speed / 1.4).to_conserved(1.4));
        let dt = compute_timestep(u.view(), &grid(), 1.4, 0.4);
        assert!((dt - 0.4 * 0.05 / sound_speed).abs() < 1e-12);
        assert!(dt > grid().min_spacing());
    }

    #[test]
    fn vanishing_or_invalid_speeds_fall_back_to_the_cap() {
        let cold = Array2::from_elem((10, 20), Conserved(1.0, 0.0, 0.0, 0.0));
        assert_eq!(compute_timestep(cold.view(), &grid(), 1.4, 0.4), 0.05);

        let mut bad = Array2::from_elem((10, 20), Primitive(1.0, 0.0, 0.0, 1.0).to_conserved(1.4));
        bad[[0, 0]] = Conserved(f64::NAN, 0.0, 0.0, 1.0);
        assert_eq!(compute_timestep(bad.view(), &grid(), 1.4, 0.4), 0.05);
    }
}
