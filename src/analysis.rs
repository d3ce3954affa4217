use crate::conditions::TriaxialTest;
use mohrx::{
    circle_for, circle_reaches_envelope, envelope_value, failure_point, tangent_line,
    CalibrationError, CalibrationParameters, FailureEnvelope, FailurePoint, MaterialCalibrator,
    MohrCircle, TangentLine,
};

/// Summary of the calibration and failure geometry for one test.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Calibrated material parameters.
    pub parameters: CalibrationParameters,
    /// Mohr circle at failure.
    pub circle: MohrCircle,
    /// Envelope built from the calibrated parameters.
    pub envelope: FailureEnvelope,
    /// Whether the circle reaches the calibrated envelope.
    pub reaches_envelope: bool,
    /// Where the envelope meets the circle.
    pub failure_point: FailurePoint,
    /// Tangent to the circle through the failure point.
    pub tangent: TangentLine,
    /// Envelope shear strength at the failure point's normal stress.
    pub envelope_shear: f64,
}

/// Calibrate the material from the recorded test and derive the failure
/// geometry at the recorded failure state.
///
/// The geometry follows the Mohr-Coulomb construction described at
/// <https://en.wikipedia.org/wiki/Mohr%E2%80%93Coulomb_theory>.
pub fn run_analysis(test: &TriaxialTest) -> Result<AnalysisSummary, CalibrationError> {
    let parameters =
        MaterialCalibrator::new().calibrate(&test.curve, &test.setup.seed, &test.failure)?;

    let circle = circle_for(test.failure.stress_state());
    let envelope = FailureEnvelope::from_parameters(&parameters);
    let point = failure_point(circle, envelope);

    Ok(AnalysisSummary {
        parameters,
        circle,
        envelope,
        reaches_envelope: circle_reaches_envelope(circle, envelope),
        failure_point: point,
        tangent: tangent_line(circle, point),
        envelope_shear: envelope_value(envelope, point.sigma),
    })
}
