//! Per-scan observability record.

use crate::state::Mode;
use ll_core::Real;
use serde::{Deserialize, Serialize};

/// Everything one scan computed, for trend displays and loop analysis.
///
/// [`Controller::scan`](crate::Controller::scan) returns one of these per
/// invocation. For the velocity formulation the term fields are that
/// scan's increment contributions; for the position formulation they are
/// the literal decomposition of the absolute output before clamping.
/// Manual scans report all three terms as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Mode the scan executed in.
    pub mode: Mode,
    /// Setpoint at scan time.
    pub setpoint: Real,
    /// Measurement recorded for this scan.
    pub process_variable: Real,
    /// Error `setpoint - process_variable`.
    pub error: Real,
    /// Proportional contribution.
    pub p_term: Real,
    /// Integral contribution.
    pub i_term: Real,
    /// Derivative contribution.
    pub d_term: Real,
    /// Final output after clamping.
    pub output: Real,
    /// Whether the clamp changed the raw result. A NaN result passes
    /// through unflagged.
    pub saturated: bool,
}

/// Raw per-term evaluation produced by one of the engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Terms {
    pub p: Real,
    pub i: Real,
    pub d: Real,
}

impl Terms {
    pub(crate) const ZERO: Terms = Terms {
        p: 0.0,
        i: 0.0,
        d: 0.0,
    };

    pub(crate) fn sum(&self) -> Real {
        self.p + self.i + self.d
    }
}
