//! State types and equation-of-state relations for the 2-D Euler equations
//! of an ideal gas with constant adiabatic index.

pub mod exact;
pub mod riemann;

pub use riemann::{riemann_hll, riemann_hllc, RiemannError, RiemannSolver};




// ============================================================================
/// Conserved variables `(ρ, ρu, ρv, E)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Conserved(pub f64, pub f64, pub f64, pub f64);

/// Primitive variables `(ρ, u, v, p)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Primitive(pub f64, pub f64, pub f64, pub f64);

/// A grid axis, used as the normal direction of a cell face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    X1,
    X2,
}




// ============================================================================
impl std::ops::Add<Primitive> for Primitive { type Output = Self; fn add(self, u: Primitive) -> Primitive { Primitive(self.0 + u.0, self.1 + u.1, self.2 + u.2, self.3 + u.3) } }
impl std::ops::Sub<Primitive> for Primitive { type Output = Self; fn sub(self, u: Primitive) -> Primitive { Primitive(self.0 - u.0, self.1 - u.1, self.2 - u.2, self.3 - u.3) } }
impl std::ops::Mul<Primitive> for f64 { type Output = Primitive; fn mul(self, u: Primitive) -> Primitive { Primitive(self * u.0, self * u.1, self * u.2, self * u.3) } }
impl std::ops::Mul<f64> for Primitive { type Output = Primitive; fn mul(self, a: f64) -> Primitive { Primitive(self.0 * a, self.1 * a, self.2 * a, self.3 * a) } }
impl std::ops::Div<f64> for Primitive { type Output = Primitive; fn div(self, a: f64) -> Primitive { Primitive(self.0 / a, self.1 / a, self.2 / a, self.3 / a) } }




// ============================================================================
impl std::ops::Add<Conserved> for Conserved { type Output = Self; fn add(self, u: Conserved) -> Conserved { Conserved(self.0 + u.0, self.1 + u.1, self.2 + u.2, self.3 + u.3) } }
impl std::ops::Sub<Conserved> for Conserved { type Output = Self; fn sub(self, u: Conserved) -> Conserved { Conserved(self.0 - u.0, self.1 - u.1, self.2 - u.2, self.3 - u.3) } }
impl std::ops::Mul<Conserved> for f64 { type Output = Conserved; fn mul(self, u: Conserved) -> Conserved { Conserved(self * u.0, self * u.1, self * u.2, self * u.3) } }
impl std::ops::Mul<f64> for Conserved { type Output = Conserved; fn mul(self, a: f64) -> Conserved { Conserved(self.0 * a, self.1 * a, self.2 * a, self.3 * a) } }
impl std::ops::Div<f64> for Conserved { type Output = Conserved; fn div(self, a: f64) -> Conserved { Conserved(self.0 / a, self.1 / a, self.2 / a, self.3 / a) } }
impl std::ops::Neg for Conserved { type Output = Conserved; fn neg(self) -> Conserved { Conserved(-self.0, -self.1, -self.2, -self.3) } }
impl std::ops::AddAssign<Conserved> for Conserved { fn add_assign(&mut self, u: Conserved) { *self = *self + u } }




// ============================================================================
impl From<Primitive> for [f64; 4] {
    fn from(p: Primitive) -> [f64; 4] {
        [p.0, p.1, p.2, p.3]
    }
}

impl From<[f64; 4]> for Primitive {
    fn from(a: [f64; 4]) -> Primitive {
        Primitive(a[0], a[1], a[2], a[3])
    }
}

impl From<Conserved> for [f64; 4] {
    fn from(u: Conserved) -> [f64; 4] {
        [u.0, u.1, u.2, u.3]
    }
}

impl From<[f64; 4]> for Conserved {
    fn from(a: [f64; 4]) -> Conserved {
        Conserved(a[0], a[1], a[2], a[3])
    }
}




// ============================================================================
/// Gas pressure from the density, velocity, and total energy density.
pub fn pressure(gamma_law_index: f64, density: f64, vx: f64, vy: f64, total_energy: f64) -> f64 {
    (gamma_law_index - 1.0) * (total_energy - 0.5 * density * (vx * vx + vy * vy))
}

/// Total energy density from the density, pressure, and velocity.
pub fn energy(gamma_law_index: f64, density: f64, pressure: f64, vx: f64, vy: f64) -> f64 {
    pressure / (gamma_law_index - 1.0) + 0.5 * density * (vx * vx + vy * vy)
}

pub fn sound_speed(gamma_law_index: f64, pressure: f64, density: f64) -> f64 {
    (gamma_law_index * pressure / density).sqrt()
}




// ============================================================================
impl Direction {
    pub fn transverse(self) -> Direction {
        match self {
            Direction::X1 => Direction::X2,
            Direction::X2 => Direction::X1,
        }
    }
}




// ============================================================================
impl Conserved {
    pub fn density        (self) -> f64 { self.0 }
    pub fn momentum_1     (self) -> f64 { self.1 }
    pub fn momentum_2     (self) -> f64 { self.2 }
    pub fn total_energy   (self) -> f64 { self.3 }
    pub fn kinetic_energy (self) -> f64 { 0.5 * (self.1 * self.1 + self.2 * self.2) / self.density() }
    pub fn thermal_energy (self) -> f64 { self.total_energy() - self.kinetic_energy() }

    pub fn momentum(self, direction: Direction) -> f64 {
        match direction {
            Direction::X1 => self.momentum_1(),
            Direction::X2 => self.momentum_2(),
        }
    }

    pub fn to_primitive(self, gamma_law_index: f64) -> Primitive {
        Primitive(
            self.density(),
            self.momentum_1() / self.density(),
            self.momentum_2() / self.density(),
            self.thermal_energy() * (gamma_law_index - 1.0))
    }

    pub fn gas_pressure(self, gamma_law_index: f64) -> f64 {
        self.thermal_energy() * (gamma_law_index - 1.0)
    }

    /// The mirror image of this state across a face normal to `direction`.
    pub fn reflect(self, direction: Direction) -> Conserved {
        match direction {
            Direction::X1 => Conserved(self.0, -self.1, self.2, self.3),
            Direction::X2 => Conserved(self.0, self.1, -self.2, self.3),
        }
    }

    /// Assemble a state from its density, normal and transverse momenta
    /// relative to `direction`, and total energy.
    pub fn from_normal(direction: Direction, density: f64, normal: f64, transverse: f64, total_energy: f64) -> Conserved {
        match direction {
            Direction::X1 => Conserved(density, normal, transverse, total_energy),
            Direction::X2 => Conserved(density, transverse, normal, total_energy),
        }
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.2.is_finite() && self.3.is_finite()
    }

    /// True if density, pressure, and total energy are all strictly positive
    /// and finite.
    pub fn is_physical(self, gamma_law_index: f64) -> bool {
        self.is_finite()
            && self.density() > 0.0
            && self.total_energy() > 0.0
            && self.gas_pressure(gamma_law_index) > 0.0
    }
}




// ============================================================================
impl Primitive {
    pub fn density   (self) -> f64 { self.0 }
    pub fn velocity_1(self) -> f64 { self.1 }
    pub fn velocity_2(self) -> f64 { self.2 }
    pub fn pressure  (self) -> f64 { self.3 }

    pub fn velocity(self, direction: Direction) -> f64 {
        match direction {
            Direction::X1 => self.velocity_1(),
            Direction::X2 => self.velocity_2(),
        }
    }

    pub fn speed(self) -> f64 {
        (self.1 * self.1 + self.2 * self.2).sqrt()
    }

    pub fn total_energy(self, gamma_law_index: f64) -> f64 {
        energy(gamma_law_index, self.density(), self.pressure(), self.velocity_1(), self.velocity_2())
    }

    pub fn sound_speed_squared(self, gamma_law_index: f64) -> f64 {
        gamma_law_index * self.pressure() / self.density()
    }

    pub fn sound_speed(self, gamma_law_index: f64) -> f64 {
        sound_speed(gamma_law_index, self.pressure(), self.density())
    }

    /// Fastest signal speed in any direction, `c + |v|`.
    pub fn max_signal_speed(self, gamma_law_index: f64) -> f64 {
        self.sound_speed(gamma_law_index) + self.speed()
    }

    pub fn to_conserved(self, gamma_law_index: f64) -> Conserved {
        Conserved(
            self.density(),
            self.density() * self.velocity_1(),
            self.density() * self.velocity_2(),
            self.total_energy(gamma_law_index))
    }

    pub fn outer_wavespeeds(self, direction: Direction, gamma_law_index: f64) -> (f64, f64) {
        let cs = self.sound_speed(gamma_law_index);
        let vn = self.velocity(direction);
        (vn - cs, vn + cs)
    }

    pub fn flux_vector(self, direction: Direction, gamma_law_index: f64) -> Conserved {
        let pg = self.pressure();
        let vn = self.velocity(direction);
        let advective_term = vn * self.to_conserved(gamma_law_index);
        let pressure_term = Conserved::from_normal(direction, 0.0, pg, 0.0, pg * vn);
        advective_term + pressure_term
    }
}
