use std::str::FromStr;
use ndarray::prelude::*;
use ndarray::Zip;
use lib_euler2d::{Conserved, Direction};
use crate::mesh::Grid;
use crate::Error;




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundaryCondition {
    /// Ghost zones copy the nearest interior zone.
    Outflow,
    /// Ghost zones mirror the first interior zones with the normal momentum
    /// negated.
    Reflective,
    /// Ghost zones copy the zones at the opposite edge of the interior.
    Periodic,
}

impl BoundaryCondition {
    pub fn name(self) -> &'static str {
        match self {
            BoundaryCondition::Outflow    => "outflow",
            BoundaryCondition::Reflective => "reflective",
            BoundaryCondition::Periodic   => "periodic",
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "outflow"    => Ok(BoundaryCondition::Outflow),
            "reflective" => Ok(BoundaryCondition::Reflective),
            "periodic"   => Ok(BoundaryCondition::Periodic),
            _ => Err(Error::UnknownBoundary(s.to_string())),
        }
    }
}

impl std::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}




/**
 * One boundary condition per side of the domain: `x1` holds the (left,
 * right) policies and `x2` holds (bottom, top).
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryConfig {
    pub x1: (BoundaryCondition, BoundaryCondition),
    pub x2: (BoundaryCondition, BoundaryCondition),
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self::uniform(BoundaryCondition::Outflow)
    }
}

impl BoundaryConfig {
    pub fn uniform(bc: BoundaryCondition) -> Self {
        BoundaryConfig{x1: (bc, bc), x2: (bc, bc)}
    }

    fn sides(&self, direction: Direction) -> (BoundaryCondition, BoundaryCondition) {
        match direction {
            Direction::X1 => self.x1,
            Direction::X2 => self.x2,
        }
    }

    /// Check that this configuration can be enforced on the given grid.
    pub fn validate(&self, grid: &Grid) -> Result<(), Error> {
        for (direction, key, n) in [(Direction::X1, "bc_x1", grid.nx1()), (Direction::X2, "bc_x2", grid.nx2())] {
            let (lo, hi) = self.sides(direction);
            let periodic = [lo, hi].iter().filter(|&&bc| bc == BoundaryCondition::Periodic).count();

            if periodic == 1 {
                return Err(Error::invalid(key, format!("periodic boundaries must be paired, got ({}, {})", lo, hi)));
            }
            if [lo, hi].iter().any(|&bc| bc != BoundaryCondition::Outflow) && n < grid.num_guard() {
                return Err(Error::invalid(key, format!(
                    "{} and {} boundaries need at least {} interior zones, got {}", lo, hi, grid.num_guard(), n)));
            }
        }
        Ok(())
    }
}




// ============================================================================
fn copy_layer(u: &mut Array2<Conserved>, direction: Direction, src: usize, dst: usize, reflect: bool) {
    let (src_layer, dst_layer) = match direction {
        Direction::X1 => u.multi_slice_mut((s![src, ..], s![dst, ..])),
        Direction::X2 => u.multi_slice_mut((s![.., src], s![.., dst])),
    };

    if reflect {
        Zip::from(dst_layer).and(&src_layer).for_each(|d, s| *d = s.reflect(direction));
    } else {
        Zip::from(dst_layer).and(&src_layer).for_each(|d, s| *d = *s);
    }
}

fn apply_along(u: &mut Array2<Conserved>, direction: Direction, (lo, hi): (BoundaryCondition, BoundaryCondition), g: usize) {
    let axis = match direction {
        Direction::X1 => Axis(0),
        Direction::X2 => Axis(1),
    };
    let n = u.len_of(axis);

    for k in 0..g {
        let dst = g - 1 - k;
        let src = match lo {
            BoundaryCondition::Outflow    => g,
            BoundaryCondition::Reflective => g + k,
            BoundaryCondition::Periodic   => n - g - 1 - k,
        };
        copy_layer(u, direction, src, dst, lo == BoundaryCondition::Reflective);

        let dst = n - g + k;
        let src = match hi {
            BoundaryCondition::Outflow    => n - g - 1,
            BoundaryCondition::Reflective => n - g - 1 - k,
            BoundaryCondition::Periodic   => g + k,
        };
        copy_layer(u, direction, src, dst, hi == BoundaryCondition::Reflective);
    }
}




/**
 * Fill the ghost zones of a padded state array according to the boundary
 * configuration. The x1 sides are filled first across the full padded x2
 * extent, then the x2 sides across the full padded x1 extent, so corner zones
 * take their values from the already filled x1 ghost layers. Interior zones
 * are not modified.
 */
pub fn apply_boundary_conditions(u: &mut Array2<Conserved>, grid: &Grid, config: &BoundaryConfig) {
    let g = grid.num_guard();
    apply_along(u, Direction::X1, config.x1, g);
    apply_along(u, Direction::X2, config.x2, g);
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn setup(nx1: usize, nx2: usize) -> (Grid, Array2<Conserved>) {
        let grid = Grid::new((nx1, nx2), (0.0, 1.0), (0.0, 1.0), 2).unwrap();
        let interior = Array2::from_shape_fn((nx1, nx2), |(i, j)| Conserved(1.0 + i as f64, 1.0 + j as f64, 10.0 + i as f64, 100.0 + (10 * i + j) as f64));
        let u = grid.with_ghost_cells(interior.view()).unwrap();
        (grid, u)
    }

    #[test]
    fn outflow_copies_the_nearest_interior_zone() {
        let (grid, mut u) = setup(4, 3);
        apply_boundary_conditions(&mut u, &grid, &BoundaryConfig::default());
        for j in 2..5 {
            assert_eq!(u[[0, j]], u[[2, j]]);
            assert_eq!(u[[1, j]], u[[2, j]]);
            assert_eq!(u[[6, j]], u[[5, j]]);
            assert_eq!(u[[7, j]], u[[5, j]]);
        }
        assert_eq!(u[[0, 0]], u[[2, 2]]);
        assert_eq!(u[[7, 6]], u[[5, 4]]);
    }

    #[test]
    fn reflective_mirrors_and_negates_the_normal_momentum() {
        let (grid, mut u) = setup(4, 3);
        apply_boundary_conditions(&mut u, &grid, &BoundaryConfig::uniform(BoundaryCondition::Reflective));
        for j in 2..5 {
            assert_eq!(u[[1, j]], u[[2, j]].reflect(Direction::X1));
            assert_eq!(u[[0, j]], u[[3, j]].reflect(Direction::X1));
            assert_eq!(u[[6, j]], u[[5, j]].reflect(Direction::X1));
            assert_eq!(u[[7, j]], u[[4, j]].reflect(Direction::X1));
        }
        for i in 2..6 {
            assert_eq!(u[[i, 1]], u[[i, 2]].reflect(Direction::X2));
            assert_eq!(u[[i, 6]], u[[i, 3]].reflect(Direction::X2));
        }
    }

    #[test]
    fn periodic_wraps_to_the_opposite_edge() {
        let (grid, mut u) = setup(4, 3);
        apply_boundary_conditions(&mut u, &grid, &BoundaryConfig::uniform(BoundaryCondition::Periodic));
        for j in 0..7 {
            assert_eq!(u[[0, j]], u[[4, j]]);
            assert_eq!(u[[1, j]], u[[5, j]]);
            assert_eq!(u[[6, j]], u[[2, j]]);
            assert_eq!(u[[7, j]], u[[3, j]]);
        }
        for i in 0..8 {
            assert_eq!(u[[i, 0]], u[[i, 3]]);
            assert_eq!(u[[i, 1]], u[[i, 4]]);
            assert_eq!(u[[i, 5]], u[[i, 2]]);
            assert_eq!(u[[i, 6]], u[[i, 3]]);
        }
    }

    #[test]
    fn interior_is_left_untouched() {
        let (grid, mut u) = setup(4, 3);
        let before = grid.interior(&u).to_owned();
        let config = BoundaryConfig{
            x1: (BoundaryCondition::Reflective, BoundaryCondition::Outflow),
            x2: (BoundaryCondition::Periodic, BoundaryCondition::Periodic),
        };
        apply_boundary_conditions(&mut u, &grid, &config);
        assert_eq!(grid.interior(&u), before);
    }

    #[test]
    fn configuration_errors() {
        let grid = Grid::new((4, 1), (0.0, 1.0), (0.0, 1.0), 2).unwrap();
        let unpaired = BoundaryConfig{
            x1: (BoundaryCondition::Periodic, BoundaryCondition::Outflow),
            x2: (BoundaryCondition::Outflow, BoundaryCondition::Outflow),
        };
        assert!(unpaired.validate(&grid).is_err());
        assert!(BoundaryConfig::uniform(BoundaryCondition::Periodic).validate(&grid).is_err());
        assert!(BoundaryConfig::default().validate(&grid).is_ok());
        assert!(matches!("wall".parse::<BoundaryCondition>(), Err(Error::UnknownBoundary(_))));
        assert_eq!("Periodic".parse::<BoundaryCondition>().unwrap(), BoundaryCondition::Periodic);
    }
}
