use ndarray::Array2;
use euler2d::boundary::apply_boundary_conditions;
use euler2d::scheme::SpatialOperator;
use euler2d::{BoundaryCondition, BoundaryConfig, Conserved, Grid, Primitive, Reconstruction, RiemannSolver, RungeKuttaOrder, Simulation, SimulationConfig};

const GAMMA: f64 = 1.4;

#[test]
fn uniform_flow_has_an_exactly_vanishing_rhs() {
    let grid = Grid::new((10, 7), (0.0, 1.0), (0.0, 0.7), 2).unwrap();
    let interior = Array2::from_elem(grid.shape(), Primitive(0.8, 0.3, -1.1, 0.6).to_conserved(GAMMA));

    for bc in [BoundaryCondition::Outflow, BoundaryCondition::Periodic] {
        for solver in [RiemannSolver::Hll, RiemannSolver::Hllc] {
            for reconstruction in [Reconstruction::PiecewiseConstant, Reconstruction::PiecewiseLinear{theta: 1.0}, Reconstruction::PiecewiseLinear{theta: 2.0}] {
                let operator = SpatialOperator::new(grid.clone(), GAMMA, solver, reconstruction, 0.0).unwrap();
                let mut u = grid.with_ghost_cells(interior.view()).unwrap();
                apply_boundary_conditions(&mut u, &grid, &BoundaryConfig::uniform(bc));
                assert!(operator.rhs(&u).iter().all(|&l| l == Conserved::default()), "{:?} {:?} {:?}", bc, solver, reconstruction);
            }
        }
    }
}

#[test]
fn uniform_flow_is_preserved_by_every_integrator() {
    for rk_order in [RungeKuttaOrder::RK1, RungeKuttaOrder::RK2, RungeKuttaOrder::RK3] {
        let config = SimulationConfig{
            resolution: (8, 8),
            boundary: BoundaryConfig::uniform(BoundaryCondition::Periodic),
            riemann_solver: RiemannSolver::Hllc,
            reconstruction: Reconstruction::PiecewiseLinear{theta: 1.5},
            rk_order,
            ..SimulationConfig::default()
        };
        let u0 = Primitive(1.0, 0.5, 0.25, 1.0).to_conserved(GAMMA);
        let mut sim = Simulation::new(&config, Array2::from_elem((8, 8), u0)).unwrap();

        for _ in 0..5 {
            sim.step().unwrap();
        }
        for u in sim.interior().iter() {
            let (a, b): ([f64; 4], [f64; 4]) = ((*u).into(), u0.into());
            for q in 0..4 {
                assert!((a[q] - b[q]).abs() < 1e-14 * (1.0 + b[q].abs()));
            }
        }
    }
}
