//! Integration test: controllers closing the loop on a first-order plant.
//!
//! Plant: y' = -y + u, integrated with forward Euler at the scan rate.
//! Its steady state under a constant input u is y = u, so a converged
//! loop must settle with the output equal to the setpoint.
//!
//! Demonstrates:
//! - Both formulations regulating to a setpoint through integral action
//! - Anti-windup recovery after a long saturated stretch
//! - Setpoint-kick differences between the three structures

use ll_controls::{Controller, ControllerConfig, Formulation, Structure};
use ll_core::{nearly_equal, Tolerances};

/// Forward-Euler first-order lag driven by the controller.
struct Plant {
    y: f64,
}

impl Plant {
    fn new(y0: f64) -> Self {
        Self { y: y0 }
    }

    fn step(&mut self, u: f64, dt: f64) -> f64 {
        self.y += dt * (-self.y + u);
        self.y
    }
}

fn run_loop(controller: &mut Controller, plant: &mut Plant, dt: f64, scans: usize) -> f64 {
    let mut pv = plant.y;
    for _ in 0..scans {
        let u = controller.update(pv, dt).unwrap();
        pv = plant.step(u, dt);
    }
    pv
}

#[test]
fn velocity_pi_regulates_to_the_setpoint() {
    let config = ControllerConfig::new(Formulation::Velocity, 1.0, 2.0, 0.0, -100.0, 100.0)
        .unwrap();
    let mut controller = Controller::new(config);
    controller.set_setpoint(1.0).unwrap();
    controller.initialize(0.0, 0.0).unwrap();

    let mut plant = Plant::new(0.0);
    let pv = run_loop(&mut controller, &mut plant, 0.01, 20_000);

    let tol = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
    assert!(nearly_equal(pv, 1.0, tol), "pv settled at {pv}");
    assert!(nearly_equal(controller.output(), 1.0, tol));
}

#[test]
fn position_pi_regulates_to_the_setpoint() {
    let config = ControllerConfig::new(Formulation::Position, 1.0, 2.0, 0.0, -100.0, 100.0)
        .unwrap();
    let mut controller = Controller::new(config);
    controller.set_setpoint(1.0).unwrap();
    controller.initialize(0.0, 0.0).unwrap();

    let mut plant = Plant::new(0.0);
    let pv = run_loop(&mut controller, &mut plant, 0.01, 20_000);

    let tol = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
    assert!(nearly_equal(pv, 1.0, tol), "pv settled at {pv}");
}

#[test]
fn inverse_acting_velocity_loop_converges_with_negative_gains() {
    // A plant where more output pushes the measurement down:
    // y' = -y - u. Steady state y = -u, so negative gains close the loop.
    let config = ControllerConfig::new(Formulation::Velocity, -1.0, -2.0, 0.0, -100.0, 100.0)
        .unwrap();
    let mut controller = Controller::new(config);
    controller.set_setpoint(1.0).unwrap();
    controller.initialize(0.0, 0.0).unwrap();

    let mut y: f64 = 0.0;
    let dt = 0.01;
    for _ in 0..20_000 {
        let u = controller.update(y, dt).unwrap();
        y += dt * (-y - u);
    }

    let tol = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
    assert!(nearly_equal(y, 1.0, tol), "pv settled at {y}");
}

#[test]
fn anti_windup_recovers_within_one_scan() {
    // Integral-only position controller pinned at its upper limit by a
    // huge error, then hit with a sign reversal.
    let config = ControllerConfig::new(Formulation::Position, 0.0, 1.0, 0.0, -10.0, 10.0)
        .unwrap();
    let mut controller = Controller::new(config);
    controller.set_setpoint(100.0).unwrap();
    controller.initialize(0.0, 0.0).unwrap();

    for _ in 0..50 {
        assert_eq!(controller.update(0.0, 1.0).unwrap(), 10.0);
    }
    // The clamp held the accumulator at the limit-equivalent value.
    assert_eq!(controller.state().integral_sum, 10.0);

    // Error flips to -5: the very next scan leaves the limit.
    controller.set_setpoint(-5.0).unwrap();
    let out = controller.update(0.0, 1.0).unwrap();
    assert_eq!(out, 5.0);
}

#[test]
fn without_anti_windup_the_output_stays_pinned() {
    let config = ControllerConfig::new(Formulation::Position, 0.0, 1.0, 0.0, -10.0, 10.0)
        .unwrap()
        .with_anti_windup(false);
    let mut controller = Controller::new(config);
    controller.set_setpoint(100.0).unwrap();
    controller.initialize(0.0, 0.0).unwrap();

    for _ in 0..50 {
        controller.update(0.0, 1.0).unwrap();
    }
    // Accumulated far past the limit; a sign reversal cannot unwind it
    // quickly, so the output stays saturated for several more scans.
    controller.set_setpoint(-5.0).unwrap();
    for _ in 0..3 {
        assert_eq!(controller.update(0.0, 1.0).unwrap(), 10.0);
    }
}

/// Step the setpoint on a steady loop and report the first scan's record.
fn first_scan_after_step(structure: Structure) -> ll_controls::ScanRecord {
    let config = ControllerConfig::new(Formulation::Velocity, 1.0, 0.2, 2.0, -100.0, 100.0)
        .unwrap()
        .with_structure(structure);
    let mut controller = Controller::new(config);
    controller.set_setpoint(50.0).unwrap();
    controller.initialize(20.0, 50.0).unwrap();

    controller.set_setpoint(60.0).unwrap();
    controller.scan(50.0, 1.0).unwrap()
}

#[test]
fn setpoint_kick_depends_on_the_structure() {
    // Textbook form: full proportional and derivative kick.
    let basic = first_scan_after_step(Structure::BasicPid);
    assert_eq!(basic.p_term, 10.0);
    assert_eq!(basic.d_term, 20.0);

    // I-PD: the measurement is flat, so neither P nor D reacts.
    let i_pd = first_scan_after_step(Structure::IPd);
    assert_eq!(i_pd.p_term, 0.0);
    assert_eq!(i_pd.d_term, 0.0);

    // PI-D: proportional kick stays, derivative kick is gone.
    let pi_d = first_scan_after_step(Structure::PiD);
    assert_eq!(pi_d.p_term, 10.0);
    assert_eq!(pi_d.d_term, 0.0);

    // Integral action is identical in all three.
    assert_eq!(basic.i_term, 2.0);
    assert_eq!(i_pd.i_term, 2.0);
    assert_eq!(pi_d.i_term, 2.0);
}
