use euler2d::diagnostics::{min_density, min_pressure, DiagnosticSample};
use euler2d::{Problem, Reconstruction, RiemannSolver, RungeKuttaOrder, Simulation, SimulationConfig};

fn assert_physical_every_step(sim: &mut Simulation, tfinal: f64) -> usize {
    let gamma = sim.config().gamma_law_index;
    let mut clamped = 0;

    while sim.time() < tfinal {
        let report = sim.step().unwrap();
        clamped += report.sanitized.count();
        assert!(sim.interior().iter().all(|u| u.is_physical(gamma)), "unphysical zone at t={}", sim.time());
    }
    let sample = DiagnosticSample{
        time: sim.time(),
        iteration: sim.iteration(),
        dt: sim.last_dt(),
        grid: sim.grid(),
        gamma_law_index: gamma,
        conserved: sim.interior(),
        clamped_cells: 0,
    };
    assert!(min_density(&sample) > 0.0);
    assert!(min_pressure(&sample) > 0.0);
    clamped
}

#[test]
fn sod_stays_positive_without_the_floor() {
    for (solver, reconstruction, order) in [
        (RiemannSolver::Hll, Reconstruction::PiecewiseConstant, RungeKuttaOrder::RK1),
        (RiemannSolver::Hllc, Reconstruction::PiecewiseLinear{theta: 1.5}, RungeKuttaOrder::RK3),
    ] {
        let config = SimulationConfig{
            resolution: (200, 2),
            x1_range: (0.0, 1.0),
            x2_range: (0.0, 0.01),
            riemann_solver: solver,
            reconstruction,
            rk_order: order,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(&config, Problem::Sod.setup(&config.grid().unwrap(), config.gamma_law_index)).unwrap();
        assert_eq!(assert_physical_every_step(&mut sim, 0.2), 0);
    }
}

#[test]
fn sedov_blast_stays_positive() {
    for (solver, reconstruction, order) in [
        (RiemannSolver::Hll, Reconstruction::PiecewiseConstant, RungeKuttaOrder::RK1),
        (RiemannSolver::Hllc, Reconstruction::PiecewiseLinear{theta: 1.5}, RungeKuttaOrder::RK3),
    ] {
        let config = SimulationConfig{
            resolution: (64, 64),
            riemann_solver: solver,
            reconstruction,
            rk_order: order,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(&config, Problem::Sedov.setup(&config.grid().unwrap(), config.gamma_law_index)).unwrap();
        assert_physical_every_step(&mut sim, 0.05);
    }
}
