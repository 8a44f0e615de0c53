use std::fs::{File, OpenOptions};
use std::io::prelude::*;
use std::io::{BufWriter, LineWriter};
use std::path::{Path, PathBuf};
use ndarray::Zip;
use tracing::debug;
use crate::checkpoint::{Checkpoint, CheckpointSink};
use crate::mesh::Grid;
use crate::Error;




/**
 * Writes plain-text output into a directory: `diagnostics.dat`, one line per
 * step, and `chkpt.NNNN.dat` files with one line per zone holding
 * `x y rho u v p`.
 */
#[derive(Debug)]
pub struct AsciiSink {
    outdir: PathBuf,
    grid: Grid,
    gamma_law_index: f64,
    diagnostics: Option<LineWriter<File>>,
    checkpoint_number: usize,
}




// ============================================================================
impl AsciiSink {
    pub fn new<P: AsRef<Path>>(outdir: P, grid: Grid, gamma_law_index: f64) -> Result<Self, Error> {
        std::fs::create_dir_all(&outdir)?;
        Ok(AsciiSink{
            outdir: outdir.as_ref().to_path_buf(),
            grid,
            gamma_law_index,
            diagnostics: None,
            checkpoint_number: 0,
        })
    }

    pub fn checkpoint_filename(&self, number: usize) -> PathBuf {
        self.outdir.join(format!("chkpt.{:04}.dat", number))
    }
}

impl CheckpointSink for AsciiSink {
    fn record_diagnostics(&mut self, time: f64, values: &[(String, f64)]) -> Result<(), Error> {
        if self.diagnostics.is_none() {
            let file = OpenOptions::new().create(true).write(true).truncate(true).open(self.outdir.join("diagnostics.dat"))?;
            let mut writer = LineWriter::new(file);
            write!(writer, "# time")?;
            for (name, _) in values {
                write!(writer, " {}", name)?;
            }
            writeln!(writer)?;
            self.diagnostics = Some(writer);
        }
        let writer = match self.diagnostics.as_mut() {
            Some(writer) => writer,
            None => return Ok(()),
        };
        write!(writer, "{:.12e}", time)?;
        for (_, value) in values {
            write!(writer, " {:.12e}", value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), Error> {
        let filename = self.checkpoint_filename(self.checkpoint_number);
        let mut writer = BufWriter::new(File::create(&filename)?);
        let (x, y) = self.grid.coordinate_grids();
        let gamma = self.gamma_law_index;

        writeln!(writer, "# time={} iteration={}", checkpoint.time, checkpoint.iteration)?;
        for (name, value) in &checkpoint.diagnostics {
            writeln!(writer, "# {}={}", name, value)?;
        }
        writeln!(writer, "# x y rho u v p")?;

        let primitive = checkpoint.conserved().mapv(|u| u.to_primitive(gamma));
        let mut result = Ok(());
        Zip::from(&x).and(&y).and(&primitive).for_each(|x, y, p| {
            if result.is_ok() {
                result = writeln!(writer, "{} {} {} {} {} {}", x, y, p.0, p.1, p.2, p.3);
            }
        });
        result?;
        writer.flush()?;

        debug!("wrote {}", filename.display());
        self.checkpoint_number += 1;
        Ok(())
    }
}




// ============================================================================
#[cfg(feature = "hdf5")]
pub use self::h5::Hdf5Sink;

#[cfg(feature = "hdf5")]
mod h5 {
    use hdf5::{Dataset, File};
    use ndarray::prelude::*;
    use crate::checkpoint::{Checkpoint, CheckpointSink};
    use crate::mesh::Grid;
    use crate::Error;

    /**
     * An HDF5 file with append-only datasets: `t` (every recorded time),
     * `tc` (checkpoint times), `rho`, `momx`, `momy`, `E` (one interior slab
     * per checkpoint), and one dataset per diagnostic. The file carries the
     * `gamma`, `xrange` and `yrange` attributes.
     */
    pub struct Hdf5Sink {
        file: File,
        shape: (usize, usize),
    }

    fn append_scalar(dataset: &Dataset, value: f64) -> hdf5::Result<()> {
        let n = dataset.shape()[0];
        dataset.resize(n + 1)?;
        dataset.write_slice(&arr1(&[value]), n..n + 1)
    }

    fn append_slab(dataset: &Dataset, slab: &Array2<f64>) -> hdf5::Result<()> {
        let n = dataset.shape()[0];
        let (n1, n2) = slab.dim();
        dataset.resize((n + 1, n1, n2))?;
        dataset.write_slice(&slab.view().insert_axis(Axis(0)), s![n..n + 1, .., ..])
    }

    impl Hdf5Sink {
        pub fn create<P: AsRef<std::path::Path>>(path: P, grid: &Grid, gamma_law_index: f64) -> Result<Self, Error> {
            let file = File::create(path)?;
            let (n1, n2) = grid.shape();
            let (x0, x1) = grid.x1_range();
            let (y0, y1) = grid.x2_range();

            file.new_attr::<f64>().create("gamma")?.write_scalar(&gamma_law_index)?;
            file.new_attr::<f64>().shape(2).create("xrange")?.write(&arr1(&[x0, x1]))?;
            file.new_attr::<f64>().shape(2).create("yrange")?.write(&arr1(&[y0, y1]))?;

            for name in ["t", "tc"] {
                file.new_dataset::<f64>().chunk(64).shape(0..).create(name)?;
            }
            for name in ["rho", "momx", "momy", "E"] {
                file.new_dataset::<f64>().chunk((1, n1, n2)).shape((0.., n1, n2)).create(name)?;
            }
            Ok(Hdf5Sink{file, shape: (n1, n2)})
        }

        fn scalar_dataset(&self, name: &str) -> hdf5::Result<Dataset> {
            if self.file.link_exists(name) {
                self.file.dataset(name)
            } else {
                self.file.new_dataset::<f64>().chunk(64).shape(0..).create(name)
            }
        }
    }

    impl CheckpointSink for Hdf5Sink {
        fn record_diagnostics(&mut self, time: f64, values: &[(String, f64)]) -> Result<(), Error> {
            append_scalar(&self.file.dataset("t")?, time)?;
            for (name, value) in values {
                append_scalar(&self.scalar_dataset(name)?, *value)?;
            }
            Ok(())
        }

        fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), Error> {
            if checkpoint.density.dim() != self.shape {
                return Err(Error::shape_mismatch("checkpoint", &[self.shape.0, self.shape.1], checkpoint.density.shape()));
            }
            append_scalar(&self.file.dataset("tc")?, checkpoint.time)?;
            append_slab(&self.file.dataset("rho")?, &checkpoint.density)?;
            append_slab(&self.file.dataset("momx")?, &checkpoint.momentum_1)?;
            append_slab(&self.file.dataset("momy")?, &checkpoint.momentum_2)?;
            append_slab(&self.file.dataset("E")?, &checkpoint.energy)?;
            self.file.flush()?;
            Ok(())
        }
    }
}
