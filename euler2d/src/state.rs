use ndarray::prelude::*;
use ndarray::Zip;
use lib_euler2d::Conserved;
use lib_hydro_algorithms::solution_states::SolutionStateArray2;
use crate::Error;




// ============================================================================
pub type SolutionState = SolutionStateArray2<Conserved>;




/**
 * Convert a (nx1, nx2, 4) component array, with the last axis holding
 * (ρ, ρu, ρv, E), into an array of conserved states.
 */
pub fn conserved_from_components(components: ArrayView3<f64>) -> Result<Array2<Conserved>, Error> {
    let (n1, n2, nq) = components.dim();

    if nq != 4 {
        return Err(Error::shape_mismatch("component array", &[n1, n2, 4], components.shape()));
    }
    Ok(Array2::from_shape_fn((n1, n2), |(i, j)| Conserved(
        components[[i, j, 0]],
        components[[i, j, 1]],
        components[[i, j, 2]],
        components[[i, j, 3]])))
}

/// The inverse of `conserved_from_components`.
pub fn components_from_conserved(u: ArrayView2<Conserved>) -> Array3<f64> {
    let (n1, n2) = u.dim();
    let mut components = Array3::zeros((n1, n2, 4));

    Zip::from(components.lanes_mut(Axis(2)))
        .and(&u)
        .for_each(|mut q, u| {
            let a: [f64; 4] = (*u).into();
            q.assign(&aview1(&a));
        });
    components
}
