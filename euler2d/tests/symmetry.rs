use euler2d::{BoundaryCondition, BoundaryConfig, Problem, Reconstruction, RiemannSolver, RungeKuttaOrder, Simulation, SimulationConfig};

fn run(problem: Problem, riemann_solver: RiemannSolver, reconstruction: Reconstruction, time: f64) -> Simulation {
    let config = SimulationConfig{
        resolution: (32, 32),
        x1_range: (-1.0, 1.0),
        x2_range: (-1.0, 1.0),
        boundary: BoundaryConfig::uniform(BoundaryCondition::Reflective),
        riemann_solver,
        rk_order: RungeKuttaOrder::RK3,
        reconstruction,
        ..SimulationConfig::default()
    };
    let grid = config.grid().unwrap();
    let mut sim = Simulation::new(&config, problem.setup(&grid, config.gamma_law_index)).unwrap();
    sim.advance_to(time).unwrap();
    sim
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-10 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn centered_blasts_stay_mirror_and_diagonal_symmetric() {
    for problem in [Problem::Sedov, Problem::Implosion] {
        for solver in [RiemannSolver::Hll, RiemannSolver::Hllc] {
            let sim = run(problem, solver, Reconstruction::PiecewiseLinear{theta: 1.5}, 0.05);
            let u = sim.interior();
            let n = 32;

            for i in 0..n {
                for j in 0..n {
                    let a = u[[i, j]];
                    let mx = u[[n - 1 - i, j]];
                    let my = u[[i, n - 1 - j]];
                    let t = u[[j, i]];
                    assert!(close(a.density(), mx.density()) && close(a.momentum_1(), -mx.momentum_1()) && close(a.momentum_2(), mx.momentum_2()), "{:?} x-mirror at ({}, {})", problem, i, j);
                    assert!(close(a.density(), my.density()) && close(a.momentum_2(), -my.momentum_2()) && close(a.total_energy(), my.total_energy()), "{:?} y-mirror at ({}, {})", problem, i, j);
                    assert!(close(a.density(), t.density()) && close(a.momentum_1(), t.momentum_2()), "{:?} transpose at ({}, {})", problem, i, j);
                }
            }
        }
    }
}

#[test]
fn reflective_walls_hold_a_resting_gas_in_place() {
    let config = SimulationConfig{
        resolution: (12, 12),
        boundary: BoundaryConfig::uniform(BoundaryCondition::Reflective),
        riemann_solver: RiemannSolver::Hllc,
        reconstruction: Reconstruction::PiecewiseLinear{theta: 1.5},
        ..SimulationConfig::default()
    };
    let initial = ndarray::Array2::from_elem((12, 12), euler2d::Primitive(1.0, 0.0, 0.0, 1.0).to_conserved(config.gamma_law_index));
    let mut sim = Simulation::new(&config, initial.clone()).unwrap();
    for _ in 0..10 {
        sim.step().unwrap();
    }
    assert_eq!(sim.interior(), initial);
}
