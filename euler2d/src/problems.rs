use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::str::FromStr;
use ndarray::prelude::*;
use ndarray::Zip;
use lib_config::Value;
use lib_euler2d::{energy, sound_speed, Conserved, Primitive};
use crate::mesh::{cartesian_to_polar, Grid};
use crate::source::{uniform_gravity, SourceFn};
use crate::Error;




/// Gravitational acceleration along x2 in the Rayleigh-Taylor setup.
pub const RAYLEIGH_TAYLOR_GRAVITY: f64 = -0.1;

const DENSITY_WAVE_AMPLITUDE: f64 = 0.2;
const DENSITY_WAVE_VELOCITY: f64 = 1.0;




/**
 * The built-in initial-value problems. Each one fills the interior of a grid
 * with conserved states and suggests default model parameters (domain,
 * boundary conditions, adiabatic index, end time) that are merged into the
 * configuration form before user-supplied values.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// Sod shock tube along x1.
    Sod,
    /// Point blast: high-energy disk of radius 0.1 in a cold, uniform gas.
    Sedov,
    /// Low-density, low-pressure disk of radius 0.2 inside a reflective box.
    Implosion,
    /// Counter-streaming x2 velocities on either side of the x1 midline.
    Shear,
    /// Liska & Wendroff (2003) four-quadrant Riemann problem, case 3.
    Quadrants,
    /// Dense, shearing slab with a sinusoidal x2 velocity seed.
    KelvinHelmholtz,
    /// Heavy fluid above light fluid in uniform gravity.
    RayleighTaylor,
    /// Sinusoidal density profile advected at uniform velocity and pressure.
    DensityWave,
}

impl Problem {
    pub fn all() -> [Problem; 8] {
        [
            Problem::Sod,
            Problem::Sedov,
            Problem::Implosion,
            Problem::Shear,
            Problem::Quadrants,
            Problem::KelvinHelmholtz,
            Problem::RayleighTaylor,
            Problem::DensityWave,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Problem::Sod             => "sod",
            Problem::Sedov           => "sedov",
            Problem::Implosion       => "implosion",
            Problem::Shear           => "shear",
            Problem::Quadrants       => "quadrants",
            Problem::KelvinHelmholtz => "kelvin-helmholtz",
            Problem::RayleighTaylor  => "rayleigh-taylor",
            Problem::DensityWave     => "density-wave",
        }
    }

    /// Model parameters this problem is meant to run with.
    pub fn default_parameters(self) -> BTreeMap<String, Value> {
        let items: Vec<(&str, Value)> = match self {
            Problem::Sod => vec![
                ("nx1", 200.into()), ("nx2", 4.into()),
                ("x1min", 0.0.into()), ("x1max", 1.0.into()),
                ("x2min", 0.0.into()), ("x2max", 0.02.into()),
                ("tfinal", 0.2.into()),
            ],
            Problem::Sedov => vec![
                ("nx1", 128.into()), ("nx2", 128.into()),
                ("tfinal", 0.2.into()),
            ],
            Problem::Implosion => vec![
                ("nx1", 128.into()), ("nx2", 128.into()),
                ("bc_left", "reflective".into()), ("bc_right", "reflective".into()),
                ("bc_bottom", "reflective".into()), ("bc_top", "reflective".into()),
                ("tfinal", 1.0.into()),
            ],
            Problem::Shear => vec![
                ("nx1", 128.into()), ("nx2", 16.into()),
                ("bc_bottom", "periodic".into()), ("bc_top", "periodic".into()),
                ("nu", 0.01.into()),
                ("tfinal", 1.0.into()),
            ],
            Problem::Quadrants => vec![
                ("nx1", 128.into()), ("nx2", 128.into()),
                ("x1min", 0.0.into()), ("x1max", 1.0.into()),
                ("x2min", 0.0.into()), ("x2max", 1.0.into()),
                ("solver", "hllc".into()), ("high_space", true.into()), ("rk_order", 3.into()),
                ("tfinal", 0.3.into()),
            ],
            Problem::KelvinHelmholtz => vec![
                ("nx1", 128.into()), ("nx2", 128.into()),
                ("x1min", 0.0.into()), ("x1max", 1.0.into()),
                ("x2min", 0.0.into()), ("x2max", 1.0.into()),
                ("bc_left", "periodic".into()), ("bc_right", "periodic".into()),
                ("bc_bottom", "periodic".into()), ("bc_top", "periodic".into()),
                ("gamma", (5.0 / 3.0).into()),
                ("solver", "hllc".into()), ("high_space", true.into()), ("rk_order", 3.into()),
                ("tfinal", 1.5.into()),
            ],
            Problem::RayleighTaylor => vec![
                ("nx1", 64.into()), ("nx2", 192.into()),
                ("x1min", 0.0.into()), ("x1max", 0.5.into()),
                ("x2min", 0.0.into()), ("x2max", 1.5.into()),
                ("bc_left", "periodic".into()), ("bc_right", "periodic".into()),
                ("bc_bottom", "reflective".into()), ("bc_top", "reflective".into()),
                ("gamma", (5.0 / 3.0).into()),
                ("solver", "hllc".into()), ("high_space", true.into()), ("rk_order", 3.into()),
                ("tfinal", 5.0.into()),
            ],
            Problem::DensityWave => vec![
                ("nx1", 128.into()), ("nx2", 4.into()),
                ("x1min", 0.0.into()), ("x1max", 1.0.into()),
                ("x2min", 0.0.into()), ("x2max", 0.03125.into()),
                ("bc_left", "periodic".into()), ("bc_right", "periodic".into()),
                ("bc_bottom", "periodic".into()), ("bc_top", "periodic".into()),
                ("solver", "hllc".into()), ("high_space", true.into()), ("rk_order", 3.into()),
                ("tfinal", 1.0.into()),
            ],
        };
        items.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    /// The initial interior state on the given grid.
    pub fn setup(self, grid: &Grid, gamma_law_index: f64) -> Array2<Conserved> {
        let g = gamma_law_index;
        let (x0, x1) = grid.x1_range();
        let (y0, y1) = grid.x2_range();
        let xmid = 0.5 * (x0 + x1);
        let ymid = 0.5 * (y0 + y1);

        match self {
            Problem::Sod => fill(grid, |x, _| {
                (if x < xmid { Primitive(1.0, 0.0, 0.0, 1.0) } else { Primitive(0.125, 0.0, 0.0, 0.1) }).to_conserved(g)
            }),
            Problem::Sedov => fill(grid, |x, y| {
                let (r, _) = cartesian_to_polar(x - xmid, y - ymid);
                if r < 0.1 { Conserved(1.0, 0.0, 0.0, 10.0) } else { Conserved(1.0, 0.0, 0.0, energy(g, 1.0, 1e-4, 0.0, 0.0)) }
            }),
            Problem::Implosion => fill(grid, |x, y| {
                let (r, _) = cartesian_to_polar(x - xmid, y - ymid);
                (if r < 0.2 { Primitive(0.125, 0.0, 0.0, 0.14) } else { Primitive(1.0, 0.0, 0.0, 1.0) }).to_conserved(g)
            }),
            Problem::Shear => fill(grid, |x, _| {
                (if x <= xmid { Primitive(1.0, 0.0, 1.0, 1.0) } else { Primitive(1.0, 0.0, -1.0, 1.0) }).to_conserved(g)
            }),
            Problem::Quadrants => fill(grid, |x, y| {
                let p = match (x < xmid, y < ymid) {
                    (true,  false) => Primitive(0.5323, 1.206, 0.0, 0.3),
                    (false, false) => Primitive(1.5, 0.0, 0.0, 1.5),
                    (true,  true)  => Primitive(0.138, 1.206, 1.206, 0.029),
                    (false, true)  => Primitive(0.5323, 0.0, 1.206, 0.3),
                };
                p.to_conserved(g)
            }),
            Problem::KelvinHelmholtz => fill(grid, |x, y| {
                let h = y1 - y0;
                let (lo, hi) = (y0 + 0.25 * h, y0 + 0.75 * h);
                let sigma = 0.05 * h / 2f64.sqrt();
                let seed = |yc: f64| (-(y - yc).powi(2) / (2.0 * sigma * sigma)).exp();
                let v = 0.1 * (4.0 * PI * (x - x0) / (x1 - x0)).sin() * (seed(lo) + seed(hi));
                let p = if y > hi || y < lo { Primitive(1.0, -0.5, v, 2.5) } else { Primitive(2.0, 0.5, v, 2.5) };
                p.to_conserved(g)
            }),
            Problem::RayleighTaylor => fill(grid, |x, y| {
                let grav = RAYLEIGH_TAYLOR_GRAVITY;
                let interface = y0 + 0.5 * (y1 - y0);
                let cs = sound_speed(g, 2.5, 2.0);
                let v = 0.01 * cs * (1.0 - (4.0 * PI * (x - x0)).cos()) * (1.0 - (4.0 * PI * (y - y0) / 3.0).cos());
                let d = if y >= interface { 2.0 } else { 1.0 };
                Primitive(d, 0.0, v, 2.5 + grav * d * (y - interface)).to_conserved(g)
            }),
            Problem::DensityWave => density_wave(grid, g, 0.0),
        }
    }

    /// Source terms the problem needs, in the order they are to be
    /// registered.
    pub fn sources(self) -> Vec<(&'static str, SourceFn)> {
        match self {
            Problem::RayleighTaylor => {
                let gravity: SourceFn = Box::new(uniform_gravity(RAYLEIGH_TAYLOR_GRAVITY));
                vec![("gravity", gravity)]
            }
            _ => vec![],
        }
    }
}

impl FromStr for Problem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "sod"                     => Ok(Problem::Sod),
            "sedov"                   => Ok(Problem::Sedov),
            "implosion"               => Ok(Problem::Implosion),
            "shear" | "sheer"         => Ok(Problem::Shear),
            "quadrants"               => Ok(Problem::Quadrants),
            "kelvin-helmholtz" | "kh" => Ok(Problem::KelvinHelmholtz),
            "rayleigh-taylor" | "rt"  => Ok(Problem::RayleighTaylor),
            "density-wave"            => Ok(Problem::DensityWave),
            _ => Err(Error::UnknownProblem(s.to_string())),
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}




// ============================================================================
fn fill(grid: &Grid, f: impl Fn(f64, f64) -> Conserved) -> Array2<Conserved> {
    let (x, y) = grid.coordinate_grids();
    Zip::from(&x).and(&y).map_collect(|&x, &y| f(x, y))
}

/**
 * The density wave at time t: ρ = 1 + A sin(2π (x - u t) / L), advected at
 * velocity u along x1 through a periodic domain of length L, at uniform unit
 * pressure. This is an exact solution of the Euler equations.
 */
pub fn density_wave(grid: &Grid, gamma_law_index: f64, time: f64) -> Array2<Conserved> {
    let (x0, x1) = grid.x1_range();
    let k = 2.0 * PI / (x1 - x0);
    fill(grid, |x, _| {
        let d = 1.0 + DENSITY_WAVE_AMPLITUDE * (k * (x - x0 - DENSITY_WAVE_VELOCITY * time)).sin();
        Primitive(d, DENSITY_WAVE_VELOCITY, 0.0, 1.0).to_conserved(gamma_law_index)
    })
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn every_problem_sets_up_a_physical_state_with_its_defaults() {
        for problem in Problem::all() {
            let form = SimulationConfig::default().form().merge_value_map(&problem.default_parameters()).unwrap();
            let config = SimulationConfig::from_form(&form).unwrap();
            let grid = config.grid().unwrap();
            let u = problem.setup(&grid, config.gamma_law_index);
            assert_eq!(u.dim(), grid.shape());
            assert!(u.iter().all(|u| u.is_physical(config.gamma_law_index)), "{}", problem);
        }
    }

    #[test]
    fn names_round_trip() {
        for problem in Problem::all() {
            assert_eq!(problem.name().parse::<Problem>().unwrap(), problem);
        }
        assert_eq!("KH".parse::<Problem>().unwrap(), Problem::KelvinHelmholtz);
        assert!(matches!("blast".parse::<Problem>(), Err(Error::UnknownProblem(_))));
    }

    #[test]
    fn sod_has_the_standard_left_and_right_states() {
        let grid = Grid::new((10, 2), (0.0, 1.0), (0.0, 0.1), 2).unwrap();
        let u = Problem::Sod.setup(&grid, 1.4);
        assert_eq!(u[[0, 0]].to_primitive(1.4).density(), 1.0);
        assert!((u[[9, 1]].gas_pressure(1.4) - 0.1).abs() < 1e-14);
    }

    #[test]
    fn sedov_energy_is_concentrated_at_the_center() {
        let grid = Grid::new((20, 20), (-1.0, 1.0), (-1.0, 1.0), 2).unwrap();
        let u = Problem::Sedov.setup(&grid, 1.4);
        assert_eq!(u[[10, 10]].total_energy(), 10.0);
        assert!(u[[0, 0]].total_energy() < 1e-3);
    }

    #[test]
    fn density_wave_is_periodic_in_time() {
        let grid = Grid::new((16, 2), (0.0, 1.0), (0.0, 0.1), 2).unwrap();
        let a = density_wave(&grid, 1.4, 0.0);
        let b = density_wave(&grid, 1.4, 1.0);
        assert!(Zip::from(&a).and(&b).all(|a, b| (a.0 - b.0).abs() < 1e-12));
    }

    #[test]
    fn only_rayleigh_taylor_has_a_source() {
        assert_eq!(Problem::RayleighTaylor.sources().len(), 1);
        assert!(Problem::Sedov.sources().is_empty());
    }
}
