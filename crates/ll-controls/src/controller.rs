//! The scan-based controller: mode arbitration, bumpless transfer, and
//! the per-scan entry point.

use crate::config::{ControllerConfig, Formulation, Structure};
use crate::error::{ControlError, ControlResult};
use crate::record::{ScanRecord, Terms};
use crate::state::{ControllerState, Mode};
use crate::{position, velocity};
use ll_core::{ensure_finite, Real};

/// A scan-based process controller: setpoint in, bounded output out.
///
/// The host scheduler calls [`update`](Self::update) (or
/// [`scan`](Self::scan) for the full per-term record) once per control
/// scan with the latest measurement and the elapsed interval. Tuning,
/// limits, structure, mode and the manual output may change between
/// scans through the validated setters; the numerical formulation is
/// fixed when the configuration is built.
///
/// # Example
///
/// ```
/// use ll_controls::{Controller, ControllerConfig, Formulation};
///
/// let config = ControllerConfig::new(Formulation::Velocity, 1.0, 0.5, 0.0, 0.0, 100.0)?;
/// let mut controller = Controller::new(config);
/// controller.set_setpoint(10.0)?;
/// controller.initialize(50.0, 10.0)?;
///
/// // One scan at pv = 5: the output moves up from its initialized value.
/// let output = controller.update(5.0, 1.0)?;
/// assert_eq!(output, 57.5);
/// # Ok::<(), ll_controls::ControlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    state: ControllerState,
}

impl Controller {
    /// Build a controller from a validated configuration.
    ///
    /// Starts in [`Mode::Auto`] with all state zeroed; call
    /// [`initialize`](Self::initialize) before the first scan to seed a
    /// known steady state.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            state: ControllerState::default(),
        }
    }

    /// Reset state to the steady pair `(output0, pv0)`.
    ///
    /// The whole history takes the pair's values and the integral
    /// accumulator is cleared, so the first scan afterwards produces no
    /// artificial transient. The setpoint and mode are untouched.
    ///
    /// # Errors
    ///
    /// Fails when either value is non-finite.
    pub fn initialize(&mut self, output0: Real, pv0: Real) -> ControlResult<()> {
        ensure_finite(output0, "initial output")?;
        ensure_finite(pv0, "initial process variable")?;
        self.state.reset(output0, pv0);
        Ok(())
    }

    /// Evaluate one scan and return the bounded output.
    ///
    /// # Errors
    ///
    /// `InvalidArg` when the position formulation receives `dt <= 0`.
    /// The velocity formulation never fails: a non-positive interval
    /// only suppresses its derivative term.
    pub fn update(&mut self, pv: Real, dt: Real) -> ControlResult<Real> {
        Ok(self.scan(pv, dt)?.output)
    }

    /// Evaluate one scan and return the full record: error, per-term
    /// contributions, and the bounded output.
    ///
    /// Every scan, manual or automatic, records the measurement and
    /// advances the two-deep history, so mode switches always resume
    /// against live values.
    pub fn scan(&mut self, pv: Real, dt: Real) -> ControlResult<ScanRecord> {
        // The position form treats a non-positive interval as a caller
        // contract violation; reject before touching any state.
        if self.config.formulation() == Formulation::Position && dt <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "scan interval must be positive",
            });
        }

        self.state.process_variable = pv;
        let error = self.state.error();

        let (terms, raw) = match self.state.mode {
            Mode::Manual => (Terms::ZERO, self.state.manual_output),
            Mode::Auto => match self.config.formulation() {
                Formulation::Velocity => {
                    let terms = velocity::increment(&self.config, &self.state, dt);
                    (terms, self.state.output + terms.sum())
                }
                Formulation::Position => {
                    let terms = position::evaluate(&self.config, &mut self.state, dt);
                    (terms, terms.sum())
                }
            },
        };

        let output = self.config.limits().clamp(raw);
        self.state.advance_history(error);
        self.state.output = output;

        Ok(ScanRecord {
            mode: self.state.mode,
            setpoint: self.state.setpoint,
            process_variable: pv,
            error,
            p_term: terms.p,
            i_term: terms.i,
            d_term: terms.d,
            output,
            saturated: !raw.is_nan() && output != raw,
        })
    }

    /// Switch between automatic and manual control.
    ///
    /// Entering manual captures the current output as the manual value,
    /// so the handover never steps the output. Returning to automatic
    /// resumes the engine against live history: the velocity formulation
    /// continues from the current output, while the position formulation
    /// keeps its integral accumulator as-is and may step (see
    /// [`seed_integral`](Self::seed_integral) for a host-driven
    /// re-seed). Setting the current mode again is a no-op.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.state.mode == mode {
            return;
        }
        if mode == Mode::Manual {
            self.state.manual_output = self.state.output;
        }
        self.state.mode = mode;
    }

    /// Set the manual output value, clamped to the output limits on
    /// write. While in manual mode the live output follows immediately.
    ///
    /// # Errors
    ///
    /// Fails when the value is non-finite.
    pub fn set_manual_output(&mut self, value: Real) -> ControlResult<()> {
        ensure_finite(value, "manual output")?;
        let clamped = self.config.limits().clamp(value);
        self.state.manual_output = clamped;
        if self.state.mode == Mode::Manual {
            self.state.output = clamped;
        }
        Ok(())
    }

    /// Change the target setpoint.
    ///
    /// # Errors
    ///
    /// Fails when the value is non-finite.
    pub fn set_setpoint(&mut self, setpoint: Real) -> ControlResult<()> {
        ensure_finite(setpoint, "setpoint")?;
        self.state.setpoint = setpoint;
        Ok(())
    }

    /// Replace the three gains; validation is per the configuration's
    /// formulation. On failure the previous gains stay in force.
    pub fn set_tuning(&mut self, kp: Real, ki: Real, kd: Real) -> ControlResult<()> {
        self.config.set_tuning(kp, ki, kd)
    }

    /// Replace the output clamp range. The next scan re-clamps the
    /// output into the new range.
    pub fn set_output_limits(&mut self, out_min: Real, out_max: Real) -> ControlResult<()> {
        self.config.set_output_limits(out_min, out_max)
    }

    /// Select the algorithm structure for subsequent scans.
    pub fn set_structure(&mut self, structure: Structure) {
        self.config.set_structure(structure);
    }

    /// Enable or disable the position-form integral clamp.
    pub fn set_anti_windup(&mut self, enabled: bool) {
        self.config.set_anti_windup(enabled);
    }

    /// Overwrite the integral accumulator.
    ///
    /// Intended for deliberate bumpless re-entry to automatic control in
    /// the position formulation: seed so that the first automatic scan
    /// reproduces the current output. Nothing calls this implicitly.
    ///
    /// # Errors
    ///
    /// Fails when the value is non-finite.
    pub fn seed_integral(&mut self, value: Real) -> ControlResult<()> {
        ensure_finite(value, "integral seed")?;
        self.state.integral_sum = value;
        Ok(())
    }

    /// Latest bounded output.
    pub fn output(&self) -> Real {
        self.state.output
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Current setpoint.
    pub fn setpoint(&self) -> Real {
        self.state.setpoint
    }

    /// Copy of the current configuration.
    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Read-only view of the numeric state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn velocity_output_stays_within_limits(
            pvs in prop::collection::vec(-1e6_f64..1e6_f64, 1..40),
            dts in prop::collection::vec(0.001_f64..10.0_f64, 1..40),
            kp in -10.0_f64..10.0,
            ki in -10.0_f64..10.0,
            kd in -10.0_f64..10.0,
        ) {
            let config =
                ControllerConfig::new(Formulation::Velocity, kp, ki, kd, -50.0, 50.0).unwrap();
            let mut c = Controller::new(config);
            c.set_setpoint(25.0).unwrap();
            c.initialize(0.0, 0.0).unwrap();
            for (i, pv) in pvs.iter().enumerate() {
                let out = c.update(*pv, dts[i % dts.len()]).unwrap();
                prop_assert!((-50.0..=50.0).contains(&out));
            }
        }

        #[test]
        fn position_output_stays_within_limits(
            pvs in prop::collection::vec(-1e6_f64..1e6_f64, 1..40),
            dts in prop::collection::vec(0.001_f64..10.0_f64, 1..40),
            kp in 0.0_f64..10.0,
            ki in 0.0_f64..10.0,
            kd in 0.0_f64..10.0,
            anti_windup in any::<bool>(),
        ) {
            let config = ControllerConfig::new(Formulation::Position, kp, ki, kd, -50.0, 50.0)
                .unwrap()
                .with_anti_windup(anti_windup);
            let mut c = Controller::new(config);
            c.set_setpoint(25.0).unwrap();
            c.initialize(0.0, 0.0).unwrap();
            for (i, pv) in pvs.iter().enumerate() {
                let out = c.update(*pv, dts[i % dts.len()]).unwrap();
                prop_assert!((-50.0..=50.0).contains(&out));
            }
        }

        #[test]
        fn retuning_mid_run_never_breaks_the_limits(
            pvs in prop::collection::vec(-1e3_f64..1e3_f64, 4..30),
            gains in prop::collection::vec((0.0_f64..5.0, 0.0_f64..5.0, 0.0_f64..5.0), 1..6),
        ) {
            let config =
                ControllerConfig::new(Formulation::Position, 1.0, 0.5, 0.1, -20.0, 20.0).unwrap();
            let mut c = Controller::new(config);
            c.set_setpoint(5.0).unwrap();
            c.initialize(0.0, 0.0).unwrap();
            for (i, pv) in pvs.iter().enumerate() {
                let (kp, ki, kd) = gains[i % gains.len()];
                c.set_tuning(kp, ki, kd).unwrap();
                let out = c.update(*pv, 0.1).unwrap();
                prop_assert!((-20.0..=20.0).contains(&out));
            }
        }
    }
}
