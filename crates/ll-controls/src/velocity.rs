//! Velocity-form control law: one output increment per scan.
//!
//! Each scan yields a delta that the caller adds onto the previous output,
//! so a single scan's integral action cannot wind up and a return from
//! manual control resumes from whatever output is current. The derivative
//! is a second difference over the two-deep history; a non-positive scan
//! interval zeroes it rather than dividing by it.

use crate::config::{ControllerConfig, Structure};
use crate::record::Terms;
use crate::state::ControllerState;
use ll_core::Real;

/// Compute one scan's output increment, split into term contributions.
///
/// Reads two scans of history from `state` and mutates nothing; the
/// caller owns history advancement and output clamping.
pub(crate) fn increment(config: &ControllerConfig, state: &ControllerState, dt: Real) -> Terms {
    let error = state.error();
    let prev_error = state.prev_error;
    let error2 = state.error_two_back();
    let pv = state.process_variable;
    let prev_pv = state.prev_pv;
    let prev_pv2 = state.prev_pv2;

    let i = config.ki() * error * dt;
    // Numerators of the second-difference derivative, divided by dt below.
    let (p, d_num) = match config.structure() {
        Structure::BasicPid => (
            config.kp() * (error - prev_error),
            config.kd() * (error - 2.0 * prev_error + error2),
        ),
        Structure::IPd => (
            config.kp() * (prev_pv - pv),
            config.kd() * (prev_pv2 - 2.0 * prev_pv + pv),
        ),
        Structure::PiD => (
            config.kp() * (error - prev_error),
            config.kd() * (prev_pv2 - 2.0 * prev_pv + pv),
        ),
    };
    let d = if dt > 0.0 { d_num / dt } else { 0.0 };

    Terms { p, i, d }
}
