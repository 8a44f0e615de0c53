use std::time::Instant;
use ndarray::prelude::*;
use tracing::{debug, info, warn};
use lib_euler2d::Conserved;
use crate::boundary::apply_boundary_conditions;
use crate::checkpoint::{Checkpoint, CheckpointSink};
use crate::config::SimulationConfig;
use crate::diagnostics::{DiagnosticSample, Diagnostics};
use crate::integrate::TimeIntegrator;
use crate::mesh::Grid;
use crate::sanitize::{sanitize, SanitizeReport};
use crate::scheme::SpatialOperator;
use crate::source::SourceRegistry;
use crate::state::SolutionState;
use crate::timestep::compute_timestep;
use crate::Error;




/// What happened during one step.
#[derive(Clone, Debug)]
pub struct StepReport {
    pub time: f64,
    pub dt: f64,
    pub iteration: u64,
    pub sanitized: SanitizeReport,
}

/// Totals for a completed run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub time: f64,
    pub iterations: u64,
    pub checkpoints: usize,
    pub clamped_cells: usize,
    pub mean_kzps: f64,
}




/**
 * Owns the padded solution state and drives it through the per-step
 * pipeline:
 *
 *   boundary conditions -> timestep -> Runge-Kutta stages -> sources -> sanitize
 *
 * Every Runge-Kutta stage re-applies the boundary conditions before
 * evaluating L(U).
 */
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    operator: SpatialOperator,
    integrator: TimeIntegrator,
    state: SolutionState,
    sources: SourceRegistry,
    diagnostics: Diagnostics,
    last_dt: f64,
    last_clamped: usize,
}




// ============================================================================
impl Simulation {

    /**
     * Validate the configuration and wrap the (nx1, nx2) initial interior
     * state with ghost zones. The built-in diagnostics are registered.
     */
    pub fn new(config: &SimulationConfig, initial: Array2<Conserved>) -> Result<Self, Error> {
        config.validate()?;
        let grid = config.grid()?;
        let operator = SpatialOperator::new(
            grid.clone(),
            config.gamma_law_index,
            config.riemann_solver,
            config.reconstruction,
            config.viscosity)?;

        let mut conserved = grid.with_ghost_cells(initial.view())?;
        apply_boundary_conditions(&mut conserved, &grid, &config.boundary);

        Ok(Simulation{
            config: config.clone(),
            grid,
            operator,
            integrator: TimeIntegrator::new(config.rk_order),
            state: SolutionState::new(0.0, conserved),
            sources: SourceRegistry::new(),
            diagnostics: Diagnostics::builtin(),
            last_dt: 0.0,
            last_clamped: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig { &self.config }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn time(&self) -> f64 { self.state.time }
    pub fn iteration(&self) -> u64 { self.state.completed_iterations() }
    pub fn last_dt(&self) -> f64 { self.last_dt }
    pub fn state(&self) -> &SolutionState { &self.state }
    pub fn sources(&self) -> &SourceRegistry { &self.sources }
    pub fn diagnostics(&self) -> &Diagnostics { &self.diagnostics }

    /// The interior zones, ghost zones excluded.
    pub fn interior(&self) -> ArrayView2<Conserved> {
        self.grid.interior(&self.state.conserved)
    }

    pub fn add_source<F>(&mut self, name: &str, source: F) where F: Fn(ArrayView2<Conserved>) -> Array2<Conserved> + Send + Sync + 'static {
        self.sources.register(name, source)
    }

    pub fn register_diagnostic<F>(&mut self, name: &str, producer: F) -> Result<(), Error> where F: Fn(&DiagnosticSample) -> f64 + Send + Sync + 'static {
        self.diagnostics.register(name, producer)
    }

    pub fn sample_diagnostics(&self) -> Vec<(String, f64)> {
        self.diagnostics.sample(&DiagnosticSample{
            time: self.time(),
            iteration: self.iteration(),
            dt: self.last_dt,
            grid: &self.grid,
            gamma_law_index: self.config.gamma_law_index,
            conserved: self.interior(),
            clamped_cells: self.last_clamped,
        })
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::from_interior(self.time(), self.iteration(), self.interior(), self.sample_diagnostics())
    }

    /// Take one CFL-limited step, not bounded by the end time.
    pub fn step(&mut self) -> Result<StepReport, Error> {
        self.advance_step(f64::INFINITY)
    }

    /// Step until the simulation time reaches `time` exactly.
    pub fn advance_to(&mut self, time: f64) -> Result<(), Error> {
        while self.time() < time {
            self.advance_step(time)?;
        }
        Ok(())
    }

    fn advance_step(&mut self, t_limit: f64) -> Result<StepReport, Error> {
        let gamma = self.config.gamma_law_index;

        apply_boundary_conditions(&mut self.state.conserved, &self.grid, &self.config.boundary);

        let mut dt = compute_timestep(self.interior(), &self.grid, gamma, self.config.cfl);
        let lands_on_limit = self.time() + dt >= t_limit;

        if lands_on_limit {
            dt = t_limit - self.time();
        }
        self.integrator.advance(&mut self.state, &self.operator, &self.config.boundary, dt);

        if lands_on_limit {
            self.state.time = t_limit;
        }
        self.sources.apply(self.grid.interior_mut(&mut self.state.conserved), dt)?;

        let sanitized = sanitize(self.grid.interior_mut(&mut self.state.conserved), gamma);

        if !sanitized.is_empty() {
            warn!(
                "iteration {}: reset {} unphysical zone(s) to the floor state, first at {:?}",
                self.iteration(),
                sanitized.count(),
                sanitized.cells[0]);
        }
        self.last_dt = dt;
        self.last_clamped = sanitized.count();

        Ok(StepReport{time: self.time(), dt, iteration: self.iteration(), sanitized})
    }

    /**
     * Run to the configured end time. Diagnostics go to the sink before
     * every step and once after the last one; checkpoints are written at
     * the start, whenever a checkpoint interval has elapsed, and at the end.
     */
    pub fn run(&mut self, sink: &mut dyn CheckpointSink) -> Result<RunSummary, Error> {
        let tfinal = self.config.tfinal;
        let interval = self.config.checkpoint_interval;
        let start_program = Instant::now();
        let start_iteration = self.iteration();
        let mut next_checkpoint = self.time();
        let mut checkpoints = 0;
        let mut clamped_cells = 0;

        info!("running {} zones to t={} ({}, {:?}, {:?})",
            self.grid.num_zones(), tfinal, self.config.riemann_solver, self.config.reconstruction, self.config.rk_order);

        while self.time() < tfinal {
            sink.record_diagnostics(self.time(), &self.sample_diagnostics())?;

            if self.time() >= next_checkpoint {
                sink.write_checkpoint(&self.checkpoint())?;
                checkpoints += 1;
                debug!("checkpoint {} at t={:.4}", checkpoints, self.time());

                while next_checkpoint <= self.time() {
                    next_checkpoint += interval;
                }
            }
            let start = Instant::now();
            let report = self.advance_step(tfinal)?;
            clamped_cells += report.sanitized.count();

            info!("[{:05}] t={:.3} dt={:.3e} kzps={:.3}",
                report.iteration,
                report.time,
                report.dt,
                self.grid.num_zones() as f64 * 1e-3 / start.elapsed().as_secs_f64());
        }

        sink.record_diagnostics(self.time(), &self.sample_diagnostics())?;
        sink.write_checkpoint(&self.checkpoint())?;
        checkpoints += 1;

        let iterations = self.iteration() - start_iteration;
        let mean_kzps = self.grid.num_zones() as f64 * 1e-3 * iterations as f64 / start_program.elapsed().as_secs_f64();
        info!("mean kzps = {:.3}", mean_kzps);

        Ok(RunSummary{time: self.time(), iterations, checkpoints, clamped_cells, mean_kzps})
    }
}
