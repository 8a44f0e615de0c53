use lib_hydro_algorithms::runge_kutta::{self as rk, RungeKuttaOrder};
use crate::boundary::{apply_boundary_conditions, BoundaryConfig};
use crate::scheme::SpatialOperator;
use crate::state::SolutionState;




/**
 * Advances the padded state by one time step with a strong-stability
 * preserving Runge-Kutta scheme built from forward-Euler stages. Boundary
 * conditions are re-applied before every evaluation of L(U). The stage
 * buffer is allocated on the first step and reused afterwards.
 */
#[derive(Debug)]
pub struct TimeIntegrator {
    order: RungeKuttaOrder,
    scratch: Option<SolutionState>,
}




// ============================================================================
impl TimeIntegrator {
    pub fn new(order: RungeKuttaOrder) -> Self {
        TimeIntegrator{order, scratch: None}
    }

    pub fn order(&self) -> RungeKuttaOrder {
        self.order
    }

    pub fn advance(&mut self, state: &mut SolutionState, operator: &SpatialOperator, boundary: &BoundaryConfig, dt: f64) {
        let scratch = self.scratch.get_or_insert_with(|| state.clone());

        rk::advance(state, scratch, |s: &mut SolutionState| {
            apply_boundary_conditions(&mut s.conserved, operator.grid(), boundary);
            operator.forward_euler(s, dt);
        }, self.order);
    }
}
