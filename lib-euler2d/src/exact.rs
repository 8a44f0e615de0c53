//! Exact solution of the Riemann problem for the ideal-gas Euler equations,
//! used to verify shock-tube runs. The star-region pressure is found by
//! Newton iteration on the pressure function, and the self-similar solution
//! is sampled at `ξ = (x - x0) / t` (Toro, chapter 4).

use crate::{Direction, Primitive, RiemannError};




// ============================================================================
#[derive(Copy, Clone, Debug)]
pub struct ExactRiemannSolution {
    left: Primitive,
    right: Primitive,
    direction: Direction,
    gamma_law_index: f64,
    p_star: f64,
    u_star: f64,
}




// ============================================================================
struct Side {
    d: f64,
    u: f64,
    p: f64,
    c: f64,
}

impl Side {
    fn new(p: Primitive, direction: Direction, gamma: f64) -> Self {
        Side{d: p.density(), u: p.velocity(direction), p: p.pressure(), c: p.sound_speed(gamma)}
    }

    /// The pressure function f_K(p) and its derivative.
    fn pressure_function(&self, p: f64, gamma: f64) -> (f64, f64) {
        if p > self.p {
            let a = 2.0 / ((gamma + 1.0) * self.d);
            let b = (gamma - 1.0) / (gamma + 1.0) * self.p;
            let q = (a / (p + b)).sqrt();
            ((p - self.p) * q, q * (1.0 - 0.5 * (p - self.p) / (b + p)))
        } else {
            let r = p / self.p;
            let f = 2.0 * self.c / (gamma - 1.0) * (r.powf((gamma - 1.0) / (2.0 * gamma)) - 1.0);
            let df = r.powf(-(gamma + 1.0) / (2.0 * gamma)) / (self.d * self.c);
            (f, df)
        }
    }
}




// ============================================================================
impl ExactRiemannSolution {
    pub fn new(left: Primitive, right: Primitive, direction: Direction, gamma_law_index: f64) -> Result<Self, RiemannError> {
        const MAX_ITERATIONS: usize = 100;
        const TOLERANCE: f64 = 1e-12;

        let g = gamma_law_index;
        let l = Side::new(left, direction, g);
        let r = Side::new(right, direction, g);
        let du = r.u - l.u;
        let critical = 2.0 * (l.c + r.c) / (g - 1.0) - du;

        if critical <= 0.0 {
            return Err(RiemannError::VacuumGenerated(critical));
        }

        // primitive-variable guess (Toro 9.20), bounded away from zero
        let pvrs = 0.5 * (l.p + r.p) - 0.125 * du * (l.d + r.d) * (l.c + r.c);
        let mut p = pvrs.max(TOLERANCE);

        for _ in 0..MAX_ITERATIONS {
            let (fl, dfl) = l.pressure_function(p, g);
            let (fr, dfr) = r.pressure_function(p, g);
            let p_new = (p - (fl + fr + du) / (dfl + dfr)).max(TOLERANCE);
            let change = 2.0 * (p_new - p).abs() / (p_new + p);
            p = p_new;

            if change < TOLERANCE {
                let (fl, _) = l.pressure_function(p, g);
                let (fr, _) = r.pressure_function(p, g);
                return Ok(ExactRiemannSolution{
                    left,
                    right,
                    direction,
                    gamma_law_index,
                    p_star: p,
                    u_star: 0.5 * (l.u + r.u) + 0.5 * (fr - fl),
                })
            }
        }
        Err(RiemannError::NoConvergence(MAX_ITERATIONS))
    }

    pub fn star_pressure(&self) -> f64 {
        self.p_star
    }

    pub fn star_velocity(&self) -> f64 {
        self.u_star
    }

    /// Density in the star region on the left and right of the contact.
    pub fn star_densities(&self) -> (f64, f64) {
        let l = Side::new(self.left, self.direction, self.gamma_law_index);
        let r = Side::new(self.right, self.direction, self.gamma_law_index);
        (self.star_density(&l), self.star_density(&r))
    }

    fn star_density(&self, side: &Side) -> f64 {
        let g = self.gamma_law_index;
        let ratio = self.p_star / side.p;

        if ratio > 1.0 {
            let g6 = (g - 1.0) / (g + 1.0);
            side.d * (ratio + g6) / (g6 * ratio + 1.0)
        } else {
            side.d * ratio.powf(1.0 / g)
        }
    }

    /// The primitive state at similarity coordinate `xi = (x - x0) / t`.
    pub fn sample(&self, xi: f64) -> Primitive {
        let g = self.gamma_law_index;
        let (p_star, u_star) = (self.p_star, self.u_star);
        let gm = (g - 1.0) / (2.0 * g);
        let gp = (g + 1.0) / (2.0 * g);

        let (outer, side, sign) = if xi <= u_star {
            (self.left, Side::new(self.left, self.direction, g), 1.0)
        } else {
            (self.right, Side::new(self.right, self.direction, g), -1.0)
        };

        // Work in a frame where the sampled side is on the left: s measures
        // distance into the fan away from the outer state.
        let s = sign * xi;
        let u = sign * side.u;
        let us = sign * u_star;
        let transverse = outer.velocity(self.direction.transverse());

        let assemble = |d: f64, un: f64, p: f64| match self.direction {
            Direction::X1 => Primitive(d, sign * un, transverse, p),
            Direction::X2 => Primitive(d, transverse, sign * un, p),
        };

        if p_star > side.p {
            let shock_speed = u - side.c * (gp * p_star / side.p + gm).sqrt();
            if s <= shock_speed {
                outer
            } else {
                assemble(self.star_density(&side), us, p_star)
            }
        } else {
            let head = u - side.c;
            let tail = us - side.c * (p_star / side.p).powf(gm);
            if s <= head {
                outer
            } else if s > tail {
                assemble(self.star_density(&side), us, p_star)
            } else {
                let c = 2.0 / (g + 1.0) * (side.c + 0.5 * (g - 1.0) * (u - s));
                let un = 2.0 / (g + 1.0) * (side.c + 0.5 * (g - 1.0) * u + s);
                let d = side.d * (c / side.c).powf(2.0 / (g - 1.0));
                let p = side.p * (c / side.c).powf(2.0 * g / (g - 1.0));
                assemble(d, un, p)
            }
        }
    }
}
