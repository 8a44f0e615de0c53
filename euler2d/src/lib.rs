//! Finite-volume solver for the compressible Euler equations on a uniform
//! 2D Cartesian grid: HLL/HLLC Godunov fluxes, optional PLM reconstruction,
//! SSP Runge-Kutta time stepping, CFL-limited time steps, and a positivity
//! floor.

pub mod boundary;
pub mod checkpoint;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod integrate;
pub mod io;
pub mod mesh;
pub mod problems;
pub mod reconstruct;
pub mod sanitize;
pub mod scheme;
pub mod simulation;
pub mod source;
pub mod state;
pub mod timestep;

pub use error::Error;
pub use lib_euler2d::{Conserved, Direction, Primitive, RiemannSolver};
pub use lib_hydro_algorithms::runge_kutta::RungeKuttaOrder;
pub use boundary::{BoundaryCondition, BoundaryConfig};
pub use checkpoint::{Checkpoint, CheckpointSink, MemorySink};
pub use config::SimulationConfig;
pub use mesh::Grid;
pub use problems::Problem;
pub use reconstruct::Reconstruction;
pub use simulation::{RunSummary, Simulation, StepReport};
