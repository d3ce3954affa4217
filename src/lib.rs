#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod calibration;
mod config;
mod curve;
mod errors;
mod geometry;

pub use calibration::{
    adjust_poisson_ratio, estimate_brittle_strength, estimate_yield_strength, fit_young_modulus,
    invert_failure_state, offset_yield_point, CalibrationParameters, FailureState,
    MaterialCalibrator,
};
pub use config::{
    CalibrationConfig, ELASTIC_ZONE_LIMIT, ESTIMATED_YIELD_STRAIN, MINIMUM_POINTS_FOR_REGRESSION,
    YIELD_OFFSET_STRAIN,
};
pub use curve::{StressStrainCurve, StressStrainSample, SyntheticCurve};
pub use errors::{CalibrationError, CurveError};
pub use geometry::{
    analytical_failure_point, circle_for, circle_reaches_envelope, envelope_value, failure_point,
    tangency_point, tangent_form_value, tangent_line, FailureEnvelope, FailurePoint, MohrCircle,
    StressState, TangentLine, MAX_SIN_PHI_SQUARED, MOHR_RADIUS_EPSILON, PROJECTION_TOLERANCE,
    SLOPE_TOLERANCE, STEEP_SLOPE_SENTINEL, TAN_PHI_SENTINEL,
};
