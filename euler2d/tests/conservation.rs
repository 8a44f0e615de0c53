use euler2d::checkpoint::MemorySink;
use euler2d::{BoundaryCondition, BoundaryConfig, Conserved, Problem, Reconstruction, RiemannSolver, RungeKuttaOrder, Simulation, SimulationConfig};

fn totals(sim: &Simulation) -> [f64; 4] {
    let sum = sim.interior().iter().fold(Conserved::default(), |a, &u| a + u);
    sum.into()
}

fn periodic_config(riemann_solver: RiemannSolver, reconstruction: Reconstruction, rk_order: RungeKuttaOrder, viscosity: f64) -> SimulationConfig {
    SimulationConfig{
        gamma_law_index: 5.0 / 3.0,
        viscosity,
        resolution: (32, 32),
        x1_range: (0.0, 1.0),
        x2_range: (0.0, 1.0),
        boundary: BoundaryConfig::uniform(BoundaryCondition::Periodic),
        riemann_solver,
        rk_order,
        reconstruction,
        tfinal: 0.1,
        ..SimulationConfig::default()
    }
}

#[test]
fn periodic_runs_conserve_mass_momentum_and_energy() {
    let schemes = [
        (RiemannSolver::Hll, Reconstruction::PiecewiseConstant, RungeKuttaOrder::RK1, 0.0),
        (RiemannSolver::Hllc, Reconstruction::PiecewiseLinear{theta: 1.5}, RungeKuttaOrder::RK3, 0.0),
        (RiemannSolver::Hllc, Reconstruction::PiecewiseLinear{theta: 2.0}, RungeKuttaOrder::RK2, 1e-3),
    ];

    for (solver, reconstruction, order, nu) in schemes {
        let config = periodic_config(solver, reconstruction, order, nu);
        let grid = config.grid().unwrap();
        let mut sim = Simulation::new(&config, Problem::KelvinHelmholtz.setup(&grid, config.gamma_law_index)).unwrap();
        let before = totals(&sim);

        let mut sink = MemorySink::new();
        let summary = sim.run(&mut sink).unwrap();
        let after = totals(&sim);

        assert_eq!(summary.clamped_cells, 0);
        for q in 0..4 {
            let scale = before[q].abs().max(1.0);
            assert!((after[q] - before[q]).abs() < 1e-12 * scale * 1024.0, "component {}: {} -> {}", q, before[q], after[q]);
        }

        let mass = sink.series("total_mass");
        assert_eq!(mass.len() as u64, summary.iterations + 1);
        assert!(mass.iter().all(|(_, m)| (m - mass[0].1).abs() < 1e-12));
    }
}
