use ndarray::prelude::*;
use ndarray::Zip;
use lib_euler2d::{energy, Conserved};




pub const DENSITY_FLOOR: f64 = 1e-6;
pub const MOMENTUM_FLOOR: f64 = 1e-12;
pub const PRESSURE_FLOOR: f64 = 1e-6;




/**
 * The state that replaces unphysical zones: ρ = 1e-6, ρu = ρv = 1e-12, and E
 * the total energy of a gas with ρ = p = u = v = 1e-6. This is a numerical
 * floor, not a physical state.
 */
pub fn floor_state(gamma_law_index: f64) -> Conserved {
    Conserved(
        DENSITY_FLOOR,
        MOMENTUM_FLOOR,
        MOMENTUM_FLOOR,
        energy(gamma_law_index, DENSITY_FLOOR, PRESSURE_FLOOR, 1e-6, 1e-6))
}




/// Interior (i, j) indexes of the zones reset by `sanitize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub cells: Vec<(usize, usize)>,
}

impl SanitizeReport {
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}




/**
 * Reset every zone with non-positive density, pressure, or total energy, or
 * any non-finite component, to the floor state.
 */
pub fn sanitize(u: ArrayViewMut2<Conserved>, gamma_law_index: f64) -> SanitizeReport {
    let floor = floor_state(gamma_law_index);
    let mut cells = Vec::new();

    Zip::indexed(u).for_each(|index, u| {
        if !u.is_physical(gamma_law_index) {
            *u = floor;
            cells.push(index);
        }
    });
    SanitizeReport{cells}
}
