use ndarray::prelude::*;
use ndarray::Zip;
use lib_euler2d::Conserved;
use crate::Error;




/// A source term: the rate of change it contributes, as a function of the
/// interior state.
pub type SourceFn = Box<dyn Fn(ArrayView2<Conserved>) -> Array2<Conserved> + Send + Sync>;




/**
 * An ordered list of named source terms. After the flux update each term is
 * evaluated on the same interior state, the contributions are summed in
 * registration order, and the sum is added scaled by dt.
 */
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<(String, SourceFn)>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}




// ============================================================================
impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, source: F) where F: Fn(ArrayView2<Conserved>) -> Array2<Conserved> + Send + Sync + 'static {
        self.sources.push((name.to_string(), Box::new(source)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn apply(&self, mut u: ArrayViewMut2<Conserved>, dt: f64) -> Result<(), Error> {
        if self.sources.is_empty() {
            return Ok(())
        }
        let mut total = Array2::<Conserved>::default(u.dim());

        for (name, source) in &self.sources {
            let s = source(u.view());

            if s.dim() != total.dim() {
                return Err(Error::shape_mismatch(&format!("source term '{}'", name), total.shape(), s.shape()));
            }
            total += &s;
        }
        Zip::from(&mut u).and(&total).for_each(|u, &s| *u += s * dt);
        Ok(())
    }
}




/**
 * Uniform gravitational acceleration `g` along x2:
 * S = (0, 0, g ρ, g ρv).
 */
pub fn uniform_gravity(g: f64) -> impl Fn(ArrayView2<Conserved>) -> Array2<Conserved> + Send + Sync + 'static {
    move |u: ArrayView2<Conserved>| u.mapv(|u| Conserved(0.0, 0.0, g * u.density(), g * u.momentum_2()))
}
