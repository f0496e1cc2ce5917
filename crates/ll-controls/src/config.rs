//! Controller configuration: gains, output limits, algorithm selection.

use crate::error::{ControlError, ControlResult};
use ll_core::{ensure_finite, Bounds, Real};
use serde::{Deserialize, Serialize};

/// Algorithm structure: which terms act on the error and which act
/// directly on the measurement.
///
/// The choice trades responsiveness to setpoint changes against the
/// "kick" a setpoint step puts on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Structure {
    /// Textbook PID: P, I and D all act on the error. A setpoint step
    /// kicks both the proportional and derivative terms.
    #[serde(rename = "basic-pid")]
    BasicPid,
    /// Only the integral acts on the error; P and D act on the
    /// measurement. Suppresses both kicks.
    #[serde(rename = "i-pd")]
    IPd,
    /// P and I act on the error, D acts on the measurement. Suppresses
    /// the derivative kick only.
    #[serde(rename = "pi-d")]
    PiD,
}

/// Numerical formulation of the control law, fixed for a controller's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formulation {
    /// Compute a bounded output increment each scan and sum it onto the
    /// previous output. Inherently windup-resistant and bumpless.
    Velocity,
    /// Compute the absolute output each scan from an explicit integral
    /// accumulator.
    Position,
}

/// Validated controller configuration.
///
/// All fields are private; mutation goes through the checked setters so a
/// held config is always internally consistent. The structure and the
/// anti-windup flag may change freely between scans, the gains and limits
/// only through validation, and the formulation never.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    kp: Real,
    ki: Real,
    kd: Real,
    limits: Bounds,
    structure: Structure,
    formulation: Formulation,
    anti_windup: bool,
}

impl ControllerConfig {
    /// Create a validated configuration.
    ///
    /// Starts with the [`Structure::BasicPid`] structure and anti-windup
    /// enabled; see [`with_structure`](Self::with_structure) and
    /// [`with_anti_windup`](Self::with_anti_windup).
    ///
    /// # Arguments
    ///
    /// * `formulation` - velocity or position form, fixed thereafter
    /// * `kp`, `ki`, `kd` - proportional, integral, derivative gains
    /// * `out_min`, `out_max` - output clamp range, `out_min < out_max`
    ///
    /// # Errors
    ///
    /// Fails when a gain or limit is non-finite, when
    /// `out_min >= out_max`, or when a gain is negative in the position
    /// formulation.
    pub fn new(
        formulation: Formulation,
        kp: Real,
        ki: Real,
        kd: Real,
        out_min: Real,
        out_max: Real,
    ) -> ControlResult<Self> {
        let limits = Bounds::new(out_min, out_max)?;
        check_gains(formulation, kp, ki, kd)?;
        Ok(Self {
            kp,
            ki,
            kd,
            limits,
            structure: Structure::BasicPid,
            formulation,
            anti_windup: true,
        })
    }

    /// Select the algorithm structure.
    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = structure;
        self
    }

    /// Enable or disable the integral anti-windup clamp. Only the
    /// position formulation reads this; the velocity form has no
    /// accumulator to wind up.
    pub fn with_anti_windup(mut self, enabled: bool) -> Self {
        self.anti_windup = enabled;
        self
    }

    /// Replace the three gains.
    ///
    /// The position formulation rejects negative gains; the velocity
    /// formulation accepts any finite sign for inverse-acting loops.
    pub fn set_tuning(&mut self, kp: Real, ki: Real, kd: Real) -> ControlResult<()> {
        check_gains(self.formulation, kp, ki, kd)?;
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        Ok(())
    }

    /// Replace the output clamp range.
    pub fn set_output_limits(&mut self, out_min: Real, out_max: Real) -> ControlResult<()> {
        self.limits = Bounds::new(out_min, out_max)?;
        Ok(())
    }

    /// Select the algorithm structure for subsequent scans.
    pub fn set_structure(&mut self, structure: Structure) {
        self.structure = structure;
    }

    /// Enable or disable the integral anti-windup clamp.
    pub fn set_anti_windup(&mut self, enabled: bool) {
        self.anti_windup = enabled;
    }

    /// Proportional gain.
    pub fn kp(&self) -> Real {
        self.kp
    }

    /// Integral gain.
    pub fn ki(&self) -> Real {
        self.ki
    }

    /// Derivative gain.
    pub fn kd(&self) -> Real {
        self.kd
    }

    /// Output clamp range.
    pub fn limits(&self) -> Bounds {
        self.limits
    }

    /// Selected algorithm structure.
    pub fn structure(&self) -> Structure {
        self.structure
    }

    /// Numerical formulation.
    pub fn formulation(&self) -> Formulation {
        self.formulation
    }

    /// Whether the integral anti-windup clamp is active.
    pub fn anti_windup(&self) -> bool {
        self.anti_windup
    }
}

fn check_gains(formulation: Formulation, kp: Real, ki: Real, kd: Real) -> ControlResult<()> {
    ensure_finite(kp, "kp")?;
    ensure_finite(ki, "ki")?;
    ensure_finite(kd, "kd")?;
    if formulation == Formulation::Position && (kp < 0.0 || ki < 0.0 || kd < 0.0) {
        return Err(ControlError::InvalidConfig {
            what: "position form requires non-negative gains",
        });
    }
    Ok(())
}
