use lib_config::Form;
use lib_euler2d::RiemannSolver;
use lib_hydro_algorithms::runge_kutta::RungeKuttaOrder;
use crate::boundary::{BoundaryCondition, BoundaryConfig};
use crate::mesh::Grid;
use crate::reconstruct::Reconstruction;
use crate::Error;




/// Number of ghost zones on each side of the grid.
pub const NUM_GUARD: usize = 2;




/**
 * The typed model parameters of a run. These are the values that influence
 * the numerical result; they round-trip through a `lib_config::Form` so they
 * can be given as key=value pairs and printed back.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub gamma_law_index: f64,
    pub viscosity: f64,
    pub resolution: (usize, usize),
    pub x1_range: (f64, f64),
    pub x2_range: (f64, f64),
    pub boundary: BoundaryConfig,
    pub riemann_solver: RiemannSolver,
    pub rk_order: RungeKuttaOrder,
    pub reconstruction: Reconstruction,
    pub cfl: f64,
    pub checkpoint_interval: f64,
    pub tfinal: f64,
    pub num_guard: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig{
            gamma_law_index: 1.4,
            viscosity: 0.0,
            resolution: (100, 100),
            x1_range: (-1.0, 1.0),
            x2_range: (-1.0, 1.0),
            boundary: BoundaryConfig::default(),
            riemann_solver: RiemannSolver::Hll,
            rk_order: RungeKuttaOrder::RK1,
            reconstruction: Reconstruction::PiecewiseConstant,
            cfl: 0.4,
            checkpoint_interval: 0.1,
            tfinal: 1.0,
            num_guard: NUM_GUARD,
        }
    }
}




// ============================================================================
fn to_usize(form: &Form, key: &str) -> Result<usize, Error> {
    let n = form.get_int(key)?;
    usize::try_from(n).map_err(|_| Error::invalid(key, format!("must be non-negative, got {}", n)))
}

fn to_order(form: &Form, key: &str) -> Result<RungeKuttaOrder, Error> {
    let n = form.get_int(key)?;
    RungeKuttaOrder::from_order(n).ok_or_else(|| Error::invalid(key, format!("must be 1, 2, or 3, got {}", n)))
}




// ============================================================================
impl SimulationConfig {

    /**
     * A form declaring every model parameter, with this configuration's
     * values as the defaults.
     */
    pub fn form(&self) -> Form {
        let (high_space, theta) = match self.reconstruction {
            Reconstruction::PiecewiseConstant => (false, 1.5),
            Reconstruction::PiecewiseLinear{theta} => (true, theta),
        };
        Form::new()
            .item("gamma"              , self.gamma_law_index              , "Adiabatic index of the gas")
            .item("nu"                 , self.viscosity                    , "Kinematic viscosity (0 disables the viscous term)")
            .item("nx1"                , self.resolution.0 as i64          , "Number of zones along x1")
            .item("nx2"                , self.resolution.1 as i64          , "Number of zones along x2")
            .item("x1min"              , self.x1_range.0                   , "Lower x1 extent of the domain")
            .item("x1max"              , self.x1_range.1                   , "Upper x1 extent of the domain")
            .item("x2min"              , self.x2_range.0                   , "Lower x2 extent of the domain")
            .item("x2max"              , self.x2_range.1                   , "Upper x2 extent of the domain")
            .item("bc_left"            , self.boundary.x1.0.name()         , "Boundary condition at x1min [outflow|reflective|periodic]")
            .item("bc_right"           , self.boundary.x1.1.name()         , "Boundary condition at x1max [outflow|reflective|periodic]")
            .item("bc_bottom"          , self.boundary.x2.0.name()         , "Boundary condition at x2min [outflow|reflective|periodic]")
            .item("bc_top"             , self.boundary.x2.1.name()         , "Boundary condition at x2max [outflow|reflective|periodic]")
            .item("solver"             , self.riemann_solver.name()        , "Riemann solver [hll|hllc]")
            .item("rk_order"           , self.rk_order.order() as i64      , "Runge-Kutta time integration order [1|2|3]")
            .item("high_space"         , high_space                        , "Use limited piecewise-linear reconstruction")
            .item("plm_theta"          , theta                             , "PLM limiter parameter in [1, 2] (1 is minmod)")
            .item("cfl"                , self.cfl                          , "Courant number")
            .item("checkpoint_interval", self.checkpoint_interval          , "Simulation time between checkpoints")
            .item("tfinal"             , self.tfinal                       , "Time at which to stop the simulation")
    }

    /// Read and validate a configuration from a form declared by `form`.
    pub fn from_form(form: &Form) -> Result<Self, Error> {
        let boundary = BoundaryConfig{
            x1: (form.get_string("bc_left")?.parse::<BoundaryCondition>()?, form.get_string("bc_right")?.parse()?),
            x2: (form.get_string("bc_bottom")?.parse::<BoundaryCondition>()?, form.get_string("bc_top")?.parse()?),
        };
        let reconstruction = if form.get_bool("high_space")? {
            Reconstruction::PiecewiseLinear{theta: form.get_float("plm_theta")?}
        } else {
            Reconstruction::PiecewiseConstant
        };
        let config = SimulationConfig{
            gamma_law_index: form.get_float("gamma")?,
            viscosity: form.get_float("nu")?,
            resolution: (to_usize(form, "nx1")?, to_usize(form, "nx2")?),
            x1_range: (form.get_float("x1min")?, form.get_float("x1max")?),
            x2_range: (form.get_float("x2min")?, form.get_float("x2max")?),
            boundary,
            riemann_solver: form.get_string("solver")?.parse()?,
            rk_order: to_order(form, "rk_order")?,
            reconstruction,
            cfl: form.get_float("cfl")?,
            checkpoint_interval: form.get_float("checkpoint_interval")?,
            tfinal: form.get_float("tfinal")?,
            num_guard: NUM_GUARD,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Result<Grid, Error> {
        Grid::new(self.resolution, self.x1_range, self.x2_range, self.num_guard)
    }

    /// Check every parameter. Errors here are fatal and raised before the
    /// first step.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.gamma_law_index > 1.0 && self.gamma_law_index.is_finite()) {
            return Err(Error::invalid("gamma", format!("must be greater than 1, got {}", self.gamma_law_index)));
        }
        if !(self.viscosity >= 0.0 && self.viscosity.is_finite()) {
            return Err(Error::invalid("nu", format!("must be non-negative, got {}", self.viscosity)));
        }
        if !(self.cfl > 0.0 && self.cfl < 1.0) {
            return Err(Error::invalid("cfl", format!("must be in (0, 1), got {}", self.cfl)));
        }
        if !(self.checkpoint_interval > 0.0) {
            return Err(Error::invalid("checkpoint_interval", format!("must be positive, got {}", self.checkpoint_interval)));
        }
        if !(self.tfinal >= 0.0 && self.tfinal.is_finite()) {
            return Err(Error::invalid("tfinal", format!("must be a non-negative number, got {}", self.tfinal)));
        }
        if let Reconstruction::PiecewiseLinear{theta} = self.reconstruction {
            if !(1.0..=2.0).contains(&theta) {
                return Err(Error::invalid("plm_theta", format!("must be in [1, 2], got {}", theta)));
            }
        }
        if self.num_guard < self.reconstruction.required_guard_zones() {
            return Err(Error::invalid("num_guard", format!("{} is too few for {:?}", self.num_guard, self.reconstruction)));
        }
        self.boundary.validate(&self.grid()?)
    }
}
