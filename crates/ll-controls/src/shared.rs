//! Thread-shared controller handle.
//!
//! One clone goes to the scan scheduler, another to an interactive tuning
//! surface. Every method takes the lock exactly once for its whole
//! read-modify-write sequence, so a scan never observes a half-applied
//! retune and a retune never lands between an engine evaluation and its
//! history advancement. A poisoned lock surfaces as
//! [`ControlError::LockPoisoned`] instead of a panic.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ControllerConfig, Structure};
use crate::controller::Controller;
use crate::error::{ControlError, ControlResult};
use crate::record::ScanRecord;
use crate::state::{ControllerState, Mode};
use ll_core::Real;

/// Cloneable, mutex-guarded wrapper around [`Controller`].
#[derive(Debug)]
pub struct SharedController {
    inner: Arc<Mutex<Controller>>,
}

impl Clone for SharedController {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedController {
    /// Wrap a fresh controller built from `config`.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Controller::new(config))),
        }
    }

    fn lock(&self) -> ControlResult<MutexGuard<'_, Controller>> {
        self.inner.lock().map_err(|_| ControlError::LockPoisoned)
    }

    /// See [`Controller::initialize`].
    pub fn initialize(&self, output0: Real, pv0: Real) -> ControlResult<()> {
        self.lock()?.initialize(output0, pv0)
    }

    /// See [`Controller::update`]. The whole scan runs under the lock.
    pub fn update(&self, pv: Real, dt: Real) -> ControlResult<Real> {
        self.lock()?.update(pv, dt)
    }

    /// See [`Controller::scan`].
    pub fn scan(&self, pv: Real, dt: Real) -> ControlResult<ScanRecord> {
        self.lock()?.scan(pv, dt)
    }

    /// See [`Controller::set_mode`].
    pub fn set_mode(&self, mode: Mode) -> ControlResult<()> {
        self.lock()?.set_mode(mode);
        Ok(())
    }

    /// See [`Controller::set_manual_output`].
    pub fn set_manual_output(&self, value: Real) -> ControlResult<()> {
        self.lock()?.set_manual_output(value)
    }

    /// See [`Controller::set_setpoint`].
    pub fn set_setpoint(&self, setpoint: Real) -> ControlResult<()> {
        self.lock()?.set_setpoint(setpoint)
    }

    /// See [`Controller::set_tuning`].
    pub fn set_tuning(&self, kp: Real, ki: Real, kd: Real) -> ControlResult<()> {
        self.lock()?.set_tuning(kp, ki, kd)
    }

    /// See [`Controller::set_output_limits`].
    pub fn set_output_limits(&self, out_min: Real, out_max: Real) -> ControlResult<()> {
        self.lock()?.set_output_limits(out_min, out_max)
    }

    /// See [`Controller::set_structure`].
    pub fn set_structure(&self, structure: Structure) -> ControlResult<()> {
        self.lock()?.set_structure(structure);
        Ok(())
    }

    /// See [`Controller::set_anti_windup`].
    pub fn set_anti_windup(&self, enabled: bool) -> ControlResult<()> {
        self.lock()?.set_anti_windup(enabled);
        Ok(())
    }

    /// See [`Controller::seed_integral`].
    pub fn seed_integral(&self, value: Real) -> ControlResult<()> {
        self.lock()?.seed_integral(value)
    }

    /// Latest bounded output.
    pub fn output(&self) -> ControlResult<Real> {
        Ok(self.lock()?.output())
    }

    /// Current operating mode.
    pub fn mode(&self) -> ControlResult<Mode> {
        Ok(self.lock()?.mode())
    }

    /// Current setpoint.
    pub fn setpoint(&self) -> ControlResult<Real> {
        Ok(self.lock()?.setpoint())
    }

    /// Copy of the current configuration.
    pub fn config(&self) -> ControlResult<ControllerConfig> {
        Ok(self.lock()?.config())
    }

    /// Copy of the current numeric state.
    pub fn state(&self) -> ControlResult<ControllerState> {
        Ok(*self.lock()?.state())
    }
}
