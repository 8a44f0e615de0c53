use ndarray::prelude::*;
use lib_euler2d::Conserved;
use crate::mesh::Grid;
use crate::Error;




/// What a diagnostic producer sees: the interior state after the most recent
/// sanitization, together with the step that produced it.
#[derive(Clone, Debug)]
pub struct DiagnosticSample<'a> {
    pub time: f64,
    pub iteration: u64,
    pub dt: f64,
    pub grid: &'a Grid,
    pub gamma_law_index: f64,
    pub conserved: ArrayView2<'a, Conserved>,
    pub clamped_cells: usize,
}

pub type DiagnosticFn = Box<dyn Fn(&DiagnosticSample) -> f64 + Send + Sync>;




/**
 * Named scalar reductions of the solution, evaluated in registration order.
 * Names must be unique.
 */
#[derive(Default)]
pub struct Diagnostics {
    producers: Vec<(String, DiagnosticFn)>,
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}




// ============================================================================
impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the total mass, energy and momenta, the kinetic
    /// energy, the density and pressure minima, and the clamped-cell count.
    pub fn builtin() -> Self {
        let mut diagnostics = Self::new();
        let builtins: [(&str, fn(&DiagnosticSample) -> f64); 8] = [
            ("total_mass", total_mass),
            ("total_energy", total_energy),
            ("total_momentum_1", total_momentum_1),
            ("total_momentum_2", total_momentum_2),
            ("kinetic_energy", kinetic_energy),
            ("min_density", min_density),
            ("min_pressure", min_pressure),
            ("clamped_cells", |s| s.clamped_cells as f64),
        ];
        for (name, producer) in builtins {
            diagnostics.producers.push((name.to_string(), Box::new(producer)));
        }
        diagnostics
    }

    pub fn register<F>(&mut self, name: &str, producer: F) -> Result<(), Error> where F: Fn(&DiagnosticSample) -> f64 + Send + Sync + 'static {
        if self.names().any(|n| n == name) {
            return Err(Error::DuplicateDiagnostic(name.to_string()));
        }
        self.producers.push((name.to_string(), Box::new(producer)));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.producers.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    pub fn sample(&self, sample: &DiagnosticSample) -> Vec<(String, f64)> {
        self.producers.iter().map(|(name, f)| (name.clone(), f(sample))).collect()
    }
}




// ============================================================================
fn volume_integral(s: &DiagnosticSample, f: impl Fn(&Conserved) -> f64) -> f64 {
    s.conserved.iter().map(f).sum::<f64>() * s.grid.cell_volume()
}

pub fn total_mass(s: &DiagnosticSample) -> f64 {
    volume_integral(s, |u| u.density())
}

pub fn total_energy(s: &DiagnosticSample) -> f64 {
    volume_integral(s, |u| u.total_energy())
}

pub fn total_momentum_1(s: &DiagnosticSample) -> f64 {
    volume_integral(s, |u| u.momentum_1())
}

pub fn total_momentum_2(s: &DiagnosticSample) -> f64 {
    volume_integral(s, |u| u.momentum_2())
}

pub fn kinetic_energy(s: &DiagnosticSample) -> f64 {
    volume_integral(s, |u| u.kinetic_energy())
}

pub fn min_density(s: &DiagnosticSample) -> f64 {
    s.conserved.fold(f64::INFINITY, |a, u| a.min(u.density()))
}

pub fn min_pressure(s: &DiagnosticSample) -> f64 {
    s.conserved.fold(f64::INFINITY, |a, u| a.min(u.gas_pressure(s.gamma_law_index)))
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use lib_euler2d::Primitive;

    fn with_sample<R>(f: impl FnOnce(&DiagnosticSample) -> R) -> R {
        let grid = Grid::new((4, 5), (0.0, 2.0), (0.0, 1.0), 2).unwrap();
        let mut u = Array2::from_elem((4, 5), Primitive(2.0, 1.0, -1.0, 0.4).to_conserved(1.4));
        u[[1, 1]] = Primitive(0.5, 0.0, 0.0, 0.1).to_conserved(1.4);
        let sample = DiagnosticSample{
            time: 0.5,
            iteration: 7,
            dt: 0.01,
            grid: &grid,
            gamma_law_index: 1.4,
            conserved: u.view(),
            clamped_cells: 2,
        };
        f(&sample)
    }

    #[test]
    fn builtin_diagnostics() {
        let values = with_sample(|s| Diagnostics::builtin().sample(s));
        let get = |name: &str| values.iter().find(|(n, _)| n == name).map(|(_, v)| *v).unwrap();
        assert!((get("total_mass") - (19.0 * 2.0 + 0.5) * 0.1).abs() < 1e-12);
        assert!((get("total_momentum_1") - 3.8).abs() < 1e-12);
        assert!((get("total_momentum_2") + 3.8).abs() < 1e-12);
        assert!((get("kinetic_energy") - 3.8).abs() < 1e-12);
        assert_eq!(get("min_density"), 0.5);
        assert!((get("min_pressure") - 0.1).abs() < 1e-14);
        assert_eq!(get("clamped_cells"), 2.0);
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn custom_diagnostics_run_in_registration_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.register("time", |s| s.time).unwrap();
        diagnostics.register("iteration", |s| s.iteration as f64).unwrap();
        let values = with_sample(|s| diagnostics.sample(s));
        assert_eq!(values, vec![("time".to_string(), 0.5), ("iteration".to_string(), 7.0)]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut diagnostics = Diagnostics::builtin();
        assert!(matches!(diagnostics.register("total_mass", |_| 0.0), Err(Error::DuplicateDiagnostic(_))));
        assert_eq!(diagnostics.len(), 8);
    }
}
