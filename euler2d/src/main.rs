/**
 * Command-line driver for the 2D Euler solver.
 *
 * Program-control options are clap flags; model parameters are positional
 * key=value pairs routed to lib_config, optionally preceded by a parameter
 * file. Problem defaults are merged first, then the file, then the command
 * line. An example invocation:
 *
 *   euler2d sedov --outdir=data/sedov nx1=256 nx2=256 tfinal=0.1
 */




// ============================================================================
use std::path::PathBuf;
use clap::Parser;
use tracing::{error, info};

use euler2d::io::AsciiSink;
use euler2d::problems::Problem;
use euler2d::{CheckpointSink, Error, Simulation, SimulationConfig};




// ============================================================================
#[derive(Parser, Debug)]
#[command(name = "euler2d", version, about = "Solve the 2D Euler equations on a structured grid")]
struct Opts {
    /// Problem to run (see --list)
    problem: String,

    /// Model parameters as key=value pairs
    parameters: Vec<String>,

    /// Read key=value model parameters from a file before the command line
    #[arg(short = 'p', long)]
    parameter_file: Option<PathBuf>,

    /// Directory for checkpoints and diagnostics
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,

    /// Write an HDF5 file instead of plain-text output
    #[cfg(feature = "hdf5")]
    #[arg(long)]
    hdf5: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Also print debug messages
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Print the model parameters and exit without running
    #[arg(short, long)]
    list: bool,
}




// ============================================================================
fn make_config(opts: &Opts, problem: Problem) -> Result<(lib_config::Form, SimulationConfig), Error> {
    let mut form = SimulationConfig::default()
        .form()
        .merge_value_map(&problem.default_parameters())?;

    if let Some(path) = &opts.parameter_file {
        form = form.merge_string_map(lib_config::to_string_map_from_file(path)?)?;
    }
    form = form.merge_string_map(lib_config::to_string_map_from_key_val_pairs(opts.parameters.iter().cloned())?)?;

    let config = SimulationConfig::from_form(&form)?;
    Ok((form, config))
}

fn make_sink(opts: &Opts, problem: Problem, config: &SimulationConfig) -> Result<Box<dyn CheckpointSink>, Error> {
    let grid = config.grid()?;

    #[cfg(feature = "hdf5")]
    let use_hdf5 = opts.hdf5;
    #[cfg(not(feature = "hdf5"))]
    let use_hdf5 = false;

    if use_hdf5 {
        make_hdf5_sink(opts, problem, config)
    } else {
        Ok(Box::new(AsciiSink::new(opts.outdir.join(problem.name()), grid, config.gamma_law_index)?))
    }
}

#[cfg(feature = "hdf5")]
fn make_hdf5_sink(opts: &Opts, problem: Problem, config: &SimulationConfig) -> Result<Box<dyn CheckpointSink>, Error> {
    std::fs::create_dir_all(&opts.outdir)?;
    let path = opts.outdir.join(format!("{}.h5", problem));
    Ok(Box::new(euler2d::io::Hdf5Sink::create(path, &config.grid()?, config.gamma_law_index)?))
}

#[cfg(not(feature = "hdf5"))]
fn make_hdf5_sink(_opts: &Opts, problem: Problem, _config: &SimulationConfig) -> Result<Box<dyn CheckpointSink>, Error> {
    Err(Error::invalid("hdf5", format!("{} output requires the hdf5 feature", problem)))
}




// ============================================================================
fn run(opts: Opts) -> Result<(), Error> {
    let problem: Problem = opts.problem.parse()?;
    let (form, config) = make_config(&opts, problem)?;

    if opts.list {
        println!("{}:", problem);
    } else {
        info!("{}:", problem);
    }
    for (key, parameter) in &form {
        if opts.list {
            println!("\t{:.<24} {: <10} {}", key, parameter.value, parameter.about);
        } else {
            info!("\t{:.<24} {: <10} {}", key, parameter.value, parameter.about);
        }
    }
    if opts.list {
        return Ok(())
    }

    let grid = config.grid()?;
    let mut simulation = Simulation::new(&config, problem.setup(&grid, config.gamma_law_index))?;

    for (name, source) in problem.sources() {
        simulation.add_source(name, source);
    }
    let mut sink = make_sink(&opts, problem, &config)?;
    let summary = simulation.run(sink.as_mut())?;

    info!("finished {} iterations at t={}, {} checkpoints, {} zones clamped",
        summary.iterations, summary.time, summary.checkpoints, summary.clamped_cells);
    Ok(())
}




// ============================================================================
fn main() {
    let opts = Opts::parse();

    let level = if opts.quiet {
        tracing::Level::WARN
    } else if opts.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    if let Err(e) = run(opts) {
        error!("{}", e);
        std::process::exit(1);
    }
}
