use ndarray::prelude::*;
use ndarray::Zip;
use lib_euler2d::Conserved;
use crate::Error;




/**
 * A snapshot of the interior solution, ghost zones stripped, with the
 * diagnostic values most recently sampled.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    pub time: f64,
    pub iteration: u64,
    pub density: Array2<f64>,
    pub momentum_1: Array2<f64>,
    pub momentum_2: Array2<f64>,
    pub energy: Array2<f64>,
    pub diagnostics: Vec<(String, f64)>,
}

impl Checkpoint {
    pub fn from_interior(time: f64, iteration: u64, u: ArrayView2<Conserved>, diagnostics: Vec<(String, f64)>) -> Self {
        Checkpoint{
            time,
            iteration,
            density:    u.mapv(|u| u.density()),
            momentum_1: u.mapv(|u| u.momentum_1()),
            momentum_2: u.mapv(|u| u.momentum_2()),
            energy:     u.mapv(|u| u.total_energy()),
            diagnostics,
        }
    }

    pub fn conserved(&self) -> Array2<Conserved> {
        Zip::from(&self.density)
            .and(&self.momentum_1)
            .and(&self.momentum_2)
            .and(&self.energy)
            .map_collect(|&d, &m1, &m2, &e| Conserved(d, m1, m2, e))
    }
}




/**
 * Receives the output of a run: diagnostic values every step, and full
 * checkpoints after initialization, at every checkpoint interval, and after
 * the final step.
 */
pub trait CheckpointSink {
    fn record_diagnostics(&mut self, time: f64, values: &[(String, f64)]) -> Result<(), Error>;
    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), Error>;
}




/// Keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub diagnostics: Vec<(f64, Vec<(String, f64)>)>,
    pub checkpoints: Vec<Checkpoint>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The time series of one diagnostic.
    pub fn series(&self, name: &str) -> Vec<(f64, f64)> {
        self.diagnostics
            .iter()
            .filter_map(|(t, values)| values.iter().find(|(n, _)| n == name).map(|(_, v)| (*t, *v)))
            .collect()
    }
}

impl CheckpointSink for MemorySink {
    fn record_diagnostics(&mut self, time: f64, values: &[(String, f64)]) -> Result<(), Error> {
        self.diagnostics.push((time, values.to_vec()));
        Ok(())
    }

    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), Error> {
        self.checkpoints.push(checkpoint.clone());
        Ok(())
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_splits_and_reassembles_the_state() {
        let u = Array2::from_shape_fn((3, 2), |(i, j)| Conserved(1.0 + i as f64, j as f64, -(j as f64), 5.0));
        let c = Checkpoint::from_interior(0.1, 4, u.view(), vec![]);
        assert_eq!(c.density[[2, 0]], 3.0);
        assert_eq!(c.momentum_2[[1, 1]], -1.0);
        assert_eq!(c.conserved(), u);
    }

    #[test]
    fn memory_sink_series() {
        let mut sink = MemorySink::new();
        sink.record_diagnostics(0.0, &[("a".to_string(), 1.0), ("b".to_string(), 2.0)]).unwrap();
        sink.record_diagnostics(0.5, &[("a".to_string(), 3.0)]).unwrap();
        assert_eq!(sink.series("a"), vec![(0.0, 1.0), (0.5, 3.0)]);
        assert_eq!(sink.series("b"), vec![(0.0, 2.0)]);
    }
}
