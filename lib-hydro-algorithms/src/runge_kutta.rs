use num::rational::Rational64;
use crate::WeightedAverage;




/**
 * Strong-stability-preserving Runge-Kutta schemes in Shu-Osher form. Each
 * stage is a forward-Euler `update` of the current stage state, blended
 * with the step's initial state s0 by a rational weight b:
 *
 *   s <- b s0 + (1 - b) update(s)
 *
 * RK3 uses b = (0, 3/4, 1/3), which is the usual SSP-RK3:
 *
 *   u1 = u + dt L(u)
 *   u2 = 3/4 u + 1/4 (u1 + dt L(u1))
 *   u  = 1/3 u + 2/3 (u2 + dt L(u2))
 *
 * Updates act on the state in place. The `scratch` state holds s0 and is
 * overwritten; keeping it between steps avoids reallocating the stage
 * buffer.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RungeKuttaOrder {
    RK1,
    RK2,
    RK3,
}

impl RungeKuttaOrder {
    pub fn from_order(order: i64) -> Option<Self> {
        match order {
            1 => Some(RungeKuttaOrder::RK1),
            2 => Some(RungeKuttaOrder::RK2),
            3 => Some(RungeKuttaOrder::RK3),
            _ => None,
        }
    }

    pub fn order(self) -> usize {
        match self {
            RungeKuttaOrder::RK1 => 1,
            RungeKuttaOrder::RK2 => 2,
            RungeKuttaOrder::RK3 => 3,
        }
    }

    fn stage_weights(self) -> Vec<Rational64> {
        match self {
            RungeKuttaOrder::RK1 => vec![Rational64::new(0, 1)],
            RungeKuttaOrder::RK2 => vec![Rational64::new(0, 1), Rational64::new(1, 2)],
            RungeKuttaOrder::RK3 => vec![Rational64::new(0, 1), Rational64::new(3, 4), Rational64::new(1, 3)],
        }
    }
}




// ============================================================================
fn advance_stages<State, Update>(state: &mut State, scratch: &mut State, mut update: Update, weights: &[Rational64])
where
    State: WeightedAverage,
    Update: FnMut(&mut State)
{
    scratch.clone_from(state);

    for &b in weights {
        update(state);

        if b != Rational64::new(0, 1) {
            state.weighted_average(b, scratch);
        }
    }
}

pub fn advance_rk1<State, Update>(state: &mut State, mut update: Update) where State: WeightedAverage, Update: FnMut(&mut State)
{
    update(state)
}

pub fn advance_rk2<State, Update>(state: &mut State, scratch: &mut State, update: Update) where State: WeightedAverage, Update: FnMut(&mut State)
{
    advance_stages(state, scratch, update, &RungeKuttaOrder::RK2.stage_weights())
}

pub fn advance_rk3<State, Update>(state: &mut State, scratch: &mut State, update: Update) where State: WeightedAverage, Update: FnMut(&mut State)
{
    advance_stages(state, scratch, update, &RungeKuttaOrder::RK3.stage_weights())
}

pub fn advance<State, Update>(state: &mut State, scratch: &mut State, update: Update, order: RungeKuttaOrder) where State: WeightedAverage, Update: FnMut(&mut State)
{
    match order {
        RungeKuttaOrder::RK1 => advance_rk1(state, update),
        RungeKuttaOrder::RK2 => advance_rk2(state, scratch, update),
        RungeKuttaOrder::RK3 => advance_rk3(state, scratch, update),
    }
}
