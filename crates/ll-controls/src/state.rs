//! Persistent controller state: scan values, history, and mode.

use ll_core::Real;
use serde::{Deserialize, Serialize};

/// Operating mode of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The engine computes the output from the control law each scan.
    Auto,
    /// The output tracks the operator-set manual value; no control math
    /// runs.
    Manual,
}

/// Numeric state carried between scans.
///
/// Mutated once per scan by [`Controller::scan`](crate::Controller::scan);
/// hosts read it through [`Controller::state`](crate::Controller::state)
/// and never write it directly. History is exactly two scans deep, which
/// is what the second-difference derivative of the velocity formulation
/// needs. History keeps advancing during manual scans, so a later return
/// to automatic control sees live values rather than ones frozen when
/// manual began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Target value the loop drives toward.
    pub setpoint: Real,
    /// Most recent measurement recorded by a scan.
    pub process_variable: Real,
    /// Output as of the latest scan, always inside the output limits.
    pub output: Real,
    /// Operator-set output used while in [`Mode::Manual`].
    pub manual_output: Real,
    /// Current operating mode.
    pub mode: Mode,
    /// Error one scan back.
    pub prev_error: Real,
    /// Setpoint one scan back.
    pub prev_setpoint: Real,
    /// Measurement one scan back.
    pub prev_pv: Real,
    /// Measurement two scans back.
    pub prev_pv2: Real,
    /// Integral accumulator (position formulation only).
    pub integral_sum: Real,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            setpoint: 0.0,
            process_variable: 0.0,
            output: 0.0,
            manual_output: 0.0,
            mode: Mode::Auto,
            prev_error: 0.0,
            prev_setpoint: 0.0,
            prev_pv: 0.0,
            prev_pv2: 0.0,
            integral_sum: 0.0,
        }
    }
}

impl ControllerState {
    /// Current-scan error, `setpoint - process_variable`.
    pub fn error(&self) -> Real {
        self.setpoint - self.process_variable
    }

    /// Error two scans back, reconstructed from stored history.
    pub(crate) fn error_two_back(&self) -> Real {
        self.prev_setpoint - self.prev_pv2
    }

    /// Reset to the steady pair `(output0, pv0)`.
    ///
    /// Fills the whole history with the pair and clears the integral, so
    /// the first scan afterwards sees no artificial transient. The
    /// setpoint and mode are left alone.
    pub(crate) fn reset(&mut self, output0: Real, pv0: Real) {
        self.output = output0;
        self.manual_output = output0;
        self.process_variable = pv0;
        self.prev_pv = pv0;
        self.prev_pv2 = pv0;
        self.prev_setpoint = self.setpoint;
        self.prev_error = 0.0;
        self.integral_sum = 0.0;
    }

    /// Shift the two-deep history after a scan has consumed it.
    pub(crate) fn advance_history(&mut self, error: Real) {
        self.prev_error = error;
        self.prev_pv2 = self.prev_pv;
        self.prev_pv = self.process_variable;
        self.prev_setpoint = self.setpoint;
    }
}
