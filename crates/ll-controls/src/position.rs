//! Position-form control law: absolute output with an explicit integral.
//!
//! The integral accumulator lives in the controller state and is re-clamped
//! on every scan when anti-windup is enabled, so its own contribution can
//! never exceed the output limits no matter how long the error persists.
//! Callers must reject non-positive scan intervals before evaluating; the
//! derivative here is a plain first difference over one interval.

use crate::config::{ControllerConfig, Structure};
use crate::record::Terms;
use crate::state::ControllerState;
use ll_core::Real;

/// Accumulate the integral, apply the anti-windup clamp, and evaluate one
/// scan's absolute output terms.
///
/// The accumulator is updated before the integral term is read, and the
/// clamp runs regardless of whether the final output will saturate: it
/// bounds the integral's own contribution, not the clamped sum.
pub(crate) fn evaluate(config: &ControllerConfig, state: &mut ControllerState, dt: Real) -> Terms {
    debug_assert!(dt > 0.0, "caller validates the scan interval");

    let error = state.error();
    state.integral_sum += error * dt;
    if config.anti_windup() {
        clamp_integral(config, state);
    }

    let i = config.ki() * state.integral_sum;
    let measurement_slope = (state.process_variable - state.prev_pv) / dt;
    let (p, d) = match config.structure() {
        Structure::BasicPid => (
            config.kp() * error,
            config.kd() * (error - state.prev_error) / dt,
        ),
        Structure::IPd => (
            config.kp() * state.setpoint - config.kp() * state.process_variable,
            -(config.kd() * measurement_slope),
        ),
        Structure::PiD => (config.kp() * error, -(config.kd() * measurement_slope)),
    };

    Terms { p, i, d }
}

/// Bound the accumulator so `ki * integral_sum` stays inside the output
/// limits. `max(ki, EPSILON)` guards the division when `ki` is zero.
fn clamp_integral(config: &ControllerConfig, state: &mut ControllerState) {
    let limits = config.limits();
    let divisor = config.ki().max(Real::EPSILON);
    let contribution = config.ki() * state.integral_sum;
    if contribution > limits.max() {
        state.integral_sum = limits.max() / divisor;
    } else if contribution < limits.min() {
        state.integral_sum = limits.min() / divisor;
    }
}
