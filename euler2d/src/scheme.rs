use ndarray::prelude::*;
use ndarray::{Slice, Zip};
use lib_euler2d::{Conserved, Direction, Primitive, RiemannSolver};
use crate::mesh::Grid;
use crate::reconstruct::Reconstruction;
use crate::state::SolutionState;
use crate::Error;




/**
 * The semi-discrete right-hand side L(U) of the finite-volume scheme:
 *
 *   L(U) = -[F(i+1/2) - F(i-1/2)] / dx1 - [G(j+1/2) - G(j-1/2)] / dx2 + nu lap(U)
 *
 * Every face flux is computed once and shared by the two cells it separates,
 * so the flux differences telescope exactly. The Laplacian acts on the
 * momentum and energy components only and is skipped when nu = 0.
 */
#[derive(Clone, Debug)]
pub struct SpatialOperator {
    grid: Grid,
    gamma_law_index: f64,
    riemann_solver: RiemannSolver,
    reconstruction: Reconstruction,
    viscosity: f64,
}




// ============================================================================
impl SpatialOperator {
    pub fn new(grid: Grid, gamma_law_index: f64, riemann_solver: RiemannSolver, reconstruction: Reconstruction, viscosity: f64) -> Result<Self, Error> {
        if !(gamma_law_index > 1.0 && gamma_law_index.is_finite()) {
            return Err(Error::invalid("gamma", format!("must be greater than 1, got {}", gamma_law_index)));
        }
        if !(viscosity >= 0.0 && viscosity.is_finite()) {
            return Err(Error::invalid("nu", format!("must be non-negative, got {}", viscosity)));
        }
        if let Reconstruction::PiecewiseLinear{theta} = reconstruction {
            if !(1.0..=2.0).contains(&theta) {
                return Err(Error::invalid("plm_theta", format!("must be in [1, 2], got {}", theta)));
            }
        }
        if grid.num_guard() < reconstruction.required_guard_zones() {
            return Err(Error::invalid("num_guard", format!(
                "{} ghost zones are too few for {:?}", grid.num_guard(), reconstruction)));
        }
        Ok(SpatialOperator{grid, gamma_law_index, riemann_solver, reconstruction, viscosity})
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn gamma_law_index(&self) -> f64 { self.gamma_law_index }
    pub fn riemann_solver(&self) -> RiemannSolver { self.riemann_solver }
    pub fn reconstruction(&self) -> Reconstruction { self.reconstruction }
    pub fn viscosity(&self) -> f64 { self.viscosity }

    /// Godunov fluxes through the nx + 1 faces bounding the interior along
    /// `direction`, for every interior zone along the other axis.
    fn godunov_fluxes(&self, p: ArrayView2<Primitive>, direction: Direction) -> Array2<Conserved> {
        let g = self.grid.num_guard();
        let (nx1, nx2) = self.grid.shape();
        let solver = self.riemann_solver;
        let gamma = self.gamma_law_index;

        let (strip, axis, faces) = match direction {
            Direction::X1 => (p.slice(s![.., g..g + nx2]), Axis(0), Slice::from(g - 1..g + nx1)),
            Direction::X2 => (p.slice(s![g..g + nx1, ..]), Axis(1), Slice::from(g - 1..g + nx2)),
        };
        let (fl, fr) = self.reconstruction.face_states(strip, axis);

        Zip::from(fl.slice_axis(axis, faces))
            .and(fr.slice_axis(axis, faces))
            .par_map_collect(|&pl, &pr| solver.flux(pl, pr, direction, gamma))
    }

    /**
     * Evaluate L(U) for a padded state whose ghost zones are current. The
     * result has the interior shape (nx1, nx2).
     */
    pub fn rhs(&self, u: &Array2<Conserved>) -> Array2<Conserved> {
        let gamma = self.gamma_law_index;
        let p = u.mapv(|u| u.to_primitive(gamma));
        let fx = self.godunov_fluxes(p.view(), Direction::X1);
        let fy = self.godunov_fluxes(p.view(), Direction::X2);
        let (nx1, nx2) = self.grid.shape();
        let (dx1, dx2) = (self.grid.dx1(), self.grid.dx2());

        let mut l = Zip::from(fx.slice(s![0..nx1, ..]))
            .and(fx.slice(s![1..nx1 + 1, ..]))
            .and(fy.slice(s![.., 0..nx2]))
            .and(fy.slice(s![.., 1..nx2 + 1]))
            .map_collect(|&fxl, &fxr, &fyl, &fyr| (fxl - fxr) / dx1 + (fyl - fyr) / dx2);

        if self.viscosity > 0.0 {
            self.add_viscous_term(u, &mut l);
        }
        l
    }

    fn add_viscous_term(&self, u: &Array2<Conserved>, l: &mut Array2<Conserved>) {
        let g = self.grid.num_guard();
        let (nx1, nx2) = self.grid.shape();
        let nu = self.viscosity;
        let cx = 1.0 / (self.grid.dx1() * self.grid.dx1());
        let cy = 1.0 / (self.grid.dx2() * self.grid.dx2());
        let i = g..g + nx1;
        let j = g..g + nx2;

        Zip::from(l)
            .and(u.slice(s![i.clone(), j.clone()]))
            .and(u.slice(s![g - 1..g + nx1 - 1, j.clone()]))
            .and(u.slice(s![g + 1..g + nx1 + 1, j]))
            .and(u.slice(s![i.clone(), g - 1..g + nx2 - 1]))
            .and(u.slice(s![i, g + 1..g + nx2 + 1]))
            .for_each(|l, &c, &xl, &xr, &yl, &yr| {
                let lap = (xl + xr - 2.0 * c) * cx + (yl + yr - 2.0 * c) * cy;
                l.1 += nu * lap.1;
                l.2 += nu * lap.2;
                l.3 += nu * lap.3;
            });
    }

    /**
     * One forward-Euler update of the interior, U <- U + dt L(U), advancing
     * the state's time and iteration count. Ghost zones must be current on
     * entry and are stale on exit.
     */
    pub fn forward_euler(&self, state: &mut SolutionState, dt: f64) {
        let l = self.rhs(&state.conserved);
        Zip::from(self.grid.interior_mut(&mut state.conserved))
            .and(&l)
            .for_each(|u, &du| *u = *u + du * dt);
        state.time += dt;
        state.iteration += 1;
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{apply_boundary_conditions, BoundaryCondition, BoundaryConfig};

    const GAMMA: f64 = 1.4;

    fn operator(solver: RiemannSolver, reconstruction: Reconstruction, nu: f64) -> SpatialOperator {
        let grid = Grid::new((8, 6), (0.0, 1.0), (0.0, 0.75), 2).unwrap();
        SpatialOperator::new(grid, GAMMA, solver, reconstruction, nu).unwrap()
    }

    fn padded(op: &SpatialOperator, f: impl Fn(f64, f64) -> Primitive, bc: BoundaryCondition) -> Array2<Conserved> {
        let (x, y) = op.grid().coordinate_grids();
        let interior = Zip::from(&x).and(&y).map_collect(|&x, &y| f(x, y).to_conserved(GAMMA));
        let mut u = op.grid().with_ghost_cells(interior.view()).unwrap();
        apply_boundary_conditions(&mut u, op.grid(), &BoundaryConfig::uniform(bc));
        u
    }

    #[test]
    fn uniform_state_is_stationary() {
        for solver in [RiemannSolver::Hll, RiemannSolver::Hllc] {
            for reconstruction in [Reconstruction::PiecewiseConstant, Reconstruction::PiecewiseLinear{theta: 1.5}] {
                let op = operator(solver, reconstruction, 0.01);
                let u = padded(&op, |_, _| Primitive(1.3, 0.4, -0.7, 2.1), BoundaryCondition::Outflow);
                let l = op.rhs(&u);
                assert_eq!(l.dim(), (8, 6));
                assert!(l.iter().all(|&du| du == Conserved::default()));
            }
        }
    }

    #[test]
    fn periodic_fluxes_telescope_to_zero() {
        let op = operator(RiemannSolver::Hllc, Reconstruction::PiecewiseLinear{theta: 1.5}, 0.0);
        let u = padded(&op, |x, y| Primitive(1.0 + 0.5 * (6.0 * x).sin() * (8.0 * y).cos(), 0.3, -0.2, 1.0 + x), BoundaryCondition::Periodic);
        let total = op.rhs(&u).iter().fold(Conserved::default(), |a, &b| a + b);
        assert!(total.0.abs() < 1e-11);
        assert!(total.1.abs() < 1e-11);
        assert!(total.2.abs() < 1e-11);
        assert!(total.3.abs() < 1e-11);
    }

    #[test]
    fn viscosity_leaves_the_density_untouched() {
        let bump = |x: f64, _y: f64| Primitive(1.0, (-50.0 * (x - 0.5) * (x - 0.5)).exp(), 0.0, 1.0);
        let inviscid = operator(RiemannSolver::Hll, Reconstruction::PiecewiseConstant, 0.0);
        let viscous = operator(RiemannSolver::Hll, Reconstruction::PiecewiseConstant, 0.1);
        let u = padded(&inviscid, bump, BoundaryCondition::Outflow);
        let a = inviscid.rhs(&u);
        let b = viscous.rhs(&u);
        assert!(Zip::from(&a).and(&b).all(|a, b| a.0 == b.0));
        assert!(Zip::from(&a).and(&b).fold(0.0, |acc, a, b| acc + (a.1 - b.1).abs()) > 0.0);
    }

    #[test]
    fn invalid_operators_are_rejected() {
        let grid = Grid::new((8, 8), (0.0, 1.0), (0.0, 1.0), 1).unwrap();
        assert!(SpatialOperator::new(grid.clone(), GAMMA, RiemannSolver::Hll, Reconstruction::PiecewiseLinear{theta: 1.5}, 0.0).is_err());
        assert!(SpatialOperator::new(grid.clone(), 1.0, RiemannSolver::Hll, Reconstruction::PiecewiseConstant, 0.0).is_err());
        assert!(SpatialOperator::new(grid.clone(), GAMMA, RiemannSolver::Hll, Reconstruction::PiecewiseConstant, -1.0).is_err());
        assert!(SpatialOperator::new(grid, GAMMA, RiemannSolver::Hll, Reconstruction::PiecewiseConstant, 0.0).is_ok());
    }

    #[test]
    fn forward_euler_advances_time_and_iteration() {
        let op = operator(RiemannSolver::Hll, Reconstruction::PiecewiseConstant, 0.0);
        let u = padded(&op, |_, _| Primitive(1.0, 0.0, 0.0, 1.0), BoundaryCondition::Outflow);
        let mut state = SolutionState::new(0.0, u);
        op.forward_euler(&mut state, 0.01);
        assert!((state.time - 0.01).abs() < 1e-16);
        assert_eq!(state.completed_iterations(), 1);
    }
}
