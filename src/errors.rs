//! Error types produced while building curves or calibrating materials.

use thiserror::Error;

/// Error returned when a material calibration cannot run.
///
/// # Examples
///
/// ```
/// use mohrx::{
///     CalibrationError, CalibrationParameters, FailureState, MaterialCalibrator, StressStrainCurve,
/// };
///
/// let curve = StressStrainCurve::from_pairs(&[(0.0, 0.0), (0.001, 50.0)]).unwrap();
/// let failure = FailureState::new(120.0, 20.0, 50.0, 0.001);
/// let error = MaterialCalibrator::new()
///     .calibrate(&curve, &CalibrationParameters::default(), &failure)
///     .expect_err("two samples cannot be regressed");
/// assert_eq!(error, CalibrationError::InsufficientData { required: 5, actual: 2 });
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// Returned when the curve holds fewer samples than the regression minimum.
    #[error(
        "not enough data: {actual} samples supplied, at least {required} required; \
         run a test first"
    )]
    InsufficientData {
        /// Minimum number of samples the calibrator needs.
        required: usize,
        /// Number of samples in the supplied curve.
        actual: usize,
    },
}

/// Error returned when a stress-strain curve is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CurveError {
    /// Returned when a sample holds a NaN or infinite value.
    #[error("sample {index} is not finite")]
    NonFiniteSample {
        /// Position of the offending sample.
        index: usize,
    },
    /// Returned when a sample has negative strain or stress.
    #[error("sample {index} has a negative strain or stress")]
    NegativeSample {
        /// Position of the offending sample.
        index: usize,
    },
    /// Returned when strain decreases between consecutive samples.
    #[error("strain decreases at sample {index} ({previous} -> {strain})")]
    DecreasingStrain {
        /// Position of the offending sample.
        index: usize,
        /// Strain of the preceding sample.
        previous: f64,
        /// Strain of the offending sample.
        strain: f64,
    },
    /// Returned when the shape of a synthetic curve is not physically meaningful.
    #[error("invalid synthetic curve: {reason}")]
    InvalidSyntheticCurve {
        /// Description of the rejected shape parameter.
        reason: &'static str,
    },
}

/// Numerical fallback taken while solving circle, line or regression equations.
///
/// These never cross the crate boundary. They are rendered into log records so a
/// caller running with debug logging can see which guard fired.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub(crate) enum DegenerateGeometry {
    /// A denominator fell inside its tolerance band.
    #[error("denominator {value:e} is within tolerance of zero")]
    NearZeroDenominator {
        /// The rejected denominator.
        value: f64,
    },
    /// The solved normal stress was NaN or infinite.
    #[error("solved normal stress is not finite")]
    NonFiniteSigma,
    /// The solved shear stress was NaN or infinite.
    #[error("solved shear stress is not finite")]
    NonFiniteTau,
    /// The tangency point sits directly above the circle centre.
    #[error("radial line is vertical")]
    SteepRadialSlope,
    /// The radial line is horizontal so the tangent is vertical.
    #[error("radial line is horizontal")]
    FlatRadialSlope,
    /// The least-squares normal equations are singular.
    #[error("regression denominator {value:e} is singular")]
    SingularRegression {
        /// The rejected denominator.
        value: f64,
    },
    /// The regression produced a NaN or infinite slope.
    #[error("regression slope {value} is not finite")]
    NonFiniteSlope {
        /// The rejected slope.
        value: f64,
    },
    /// The curve never crosses the offset line.
    #[error("curve never crosses the offset line")]
    NoOffsetCrossing,
    /// The mean stress of the failure state cannot be inverted.
    #[error("mean stress {value} cannot be inverted")]
    DegenerateMeanStress {
        /// The rejected mean stress.
        value: f64,
    },
}
