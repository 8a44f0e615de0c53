//! Approximate Riemann solvers for the face between two primitive states.
//!
//! Both solvers use the Davis signal-speed estimates
//! `SL = min(uL - cL, uR - cR)`, `SR = max(uL + cL, uR + cR)`, with velocities
//! taken normal to the face.

use std::str::FromStr;
use crate::{Conserved, Direction, Primitive};




// ============================================================================
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RiemannError {
    #[error("unknown Riemann solver '{0}' (expected 'hll' or 'hllc')")]
    UnknownSolver(String),

    #[error("the initial states generate vacuum (critical velocity {0:.4e})")]
    VacuumGenerated(f64),

    #[error("pressure iteration did not converge after {0} iterations")]
    NoConvergence(usize),
}




/**
 * The closed set of approximate Riemann solvers
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RiemannSolver {
    Hll,
    Hllc,
}

impl RiemannSolver {
    pub fn flux(self, pl: Primitive, pr: Primitive, direction: Direction, gamma_law_index: f64) -> Conserved {
        match self {
            RiemannSolver::Hll  => riemann_hll (pl, pr, direction, gamma_law_index),
            RiemannSolver::Hllc => riemann_hllc(pl, pr, direction, gamma_law_index),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiemannSolver::Hll  => "hll",
            RiemannSolver::Hllc => "hllc",
        }
    }
}

impl FromStr for RiemannSolver {
    type Err = RiemannError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hll"  => Ok(RiemannSolver::Hll),
            "hllc" => Ok(RiemannSolver::Hllc),
            _ => Err(RiemannError::UnknownSolver(s.to_string())),
        }
    }
}

impl std::fmt::Display for RiemannSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}




// ============================================================================
fn signal_speeds(pl: Primitive, pr: Primitive, direction: Direction, gamma_law_index: f64) -> (f64, f64) {
    let (alm, alp) = pl.outer_wavespeeds(direction, gamma_law_index);
    let (arm, arp) = pr.outer_wavespeeds(direction, gamma_law_index);
    (alm.min(arm), alp.max(arp))
}

fn hll_average(ul: Conserved, ur: Conserved, fl: Conserved, fr: Conserved, sl: f64, sr: f64) -> Conserved {
    if sr - sl <= 0.0 {
        return fl;
    }
    (sr * fl - sl * fr + (ur - ul) * (sl * sr)) / (sr - sl)
}




// ============================================================================
pub fn riemann_hll(pl: Primitive, pr: Primitive, direction: Direction, gamma_law_index: f64) -> Conserved {
    let fl = pl.flux_vector(direction, gamma_law_index);
    let fr = pr.flux_vector(direction, gamma_law_index);
    let (sl, sr) = signal_speeds(pl, pr, direction, gamma_law_index);

    if sl >= 0.0 {
        fl
    } else if sr <= 0.0 {
        fr
    } else {
        let ul = pl.to_conserved(gamma_law_index);
        let ur = pr.to_conserved(gamma_law_index);
        hll_average(ul, ur, fl, fr, sl, sr)
    }
}




/**
 * The HLLC flux (Toro, Spruce & Speares 1994). The contact speed is
 *
 *   S* = [pR - pL + ρL uL (SL - uL) - ρR uR (SR - uR)] / [ρL (SL - uL) - ρR (SR - uR)]
 *
 * and the star state on side K is
 *
 *   U*K = ρK (SK - uK) / (SK - S*) [1, S*, vK, EK/ρK + (S* - uK)(S* + pK / (ρK (SK - uK)))]
 *
 * with u normal and v transverse to the face. Falls back to the HLL flux if
 * the contact estimate is not usable.
 */
pub fn riemann_hllc(pl: Primitive, pr: Primitive, direction: Direction, gamma_law_index: f64) -> Conserved {
    let fl = pl.flux_vector(direction, gamma_law_index);
    let fr = pr.flux_vector(direction, gamma_law_index);
    let (sl, sr) = signal_speeds(pl, pr, direction, gamma_law_index);

    if sl >= 0.0 {
        return fl;
    }
    if sr <= 0.0 {
        return fr;
    }

    let ul = pl.to_conserved(gamma_law_index);
    let ur = pr.to_conserved(gamma_law_index);
    let (dl, vl, prl) = (pl.density(), pl.velocity(direction), pl.pressure());
    let (dr, vr, prr) = (pr.density(), pr.velocity(direction), pr.pressure());

    let ml = dl * (sl - vl);
    let mr = dr * (sr - vr);
    let denominator = ml - mr;
    let s_star = (prr - prl + ml * vl - mr * vr) / denominator;

    if !s_star.is_finite() || s_star <= sl || s_star >= sr {
        return hll_average(ul, ur, fl, fr, sl, sr);
    }

    let star_state = |p: Primitive, u: Conserved, sk: f64| {
        let d = p.density();
        let vn = p.velocity(direction);
        let vt = p.velocity(direction.transverse());
        let factor = d * (sk - vn) / (sk - s_star);
        let e = u.total_energy() / d + (s_star - vn) * (s_star + p.pressure() / (d * (sk - vn)));
        Conserved::from_normal(direction, factor, factor * s_star, factor * vt, factor * e)
    };

    if s_star >= 0.0 {
        fl + (star_state(pl, ul, sl) - ul) * sl
    } else {
        fr + (star_state(pr, ur, sr) - ur) * sr
    }
}
