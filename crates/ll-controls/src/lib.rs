//! Control-law engine for looplab.
//!
//! This crate is the arithmetic heart of an educational process-control
//! playground: a scan-based PID controller that turns a
//! setpoint/measurement error into a bounded actuator command. A host
//! scheduler invokes the engine once per scan with the latest measurement
//! and the elapsed interval; a plant model supplies that measurement and
//! consumes the output; a tuning surface may adjust gains, limits,
//! structure and mode between scans.
//!
//! # Architecture
//!
//! - Three classical algorithm structures ([`Structure`]): the textbook
//!   form plus the I-PD and PI-D variants that move terms off the error
//!   and onto the measurement to soften setpoint steps.
//! - Two numerical formulations ([`Formulation`]), fixed per controller:
//!   the velocity form emits output increments and is inherently
//!   windup-resistant and bumpless; the position form emits absolute
//!   outputs from an explicit integral accumulator guarded by an
//!   anti-windup clamp.
//! - Mode arbitration ([`Mode`]) with bumpless automatic-to-manual
//!   transfer and history that keeps advancing through manual scans.
//! - [`SharedController`] wraps the engine in a single mutex for a
//!   scheduler thread plus a tuning thread.

pub mod config;
pub mod controller;
pub mod error;
mod position;
pub mod record;
pub mod shared;
pub mod state;
mod velocity;

pub use config::{ControllerConfig, Formulation, Structure};
pub use controller::Controller;
pub use error::{ControlError, ControlResult};
pub use record::ScanRecord;
pub use shared::SharedController;
pub use state::{ControllerState, Mode};
