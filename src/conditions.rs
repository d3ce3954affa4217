use mohrx::{
    CalibrationParameters, CurveError, FailureState, StressState, StressStrainCurve,
    SyntheticCurve,
};

/// Loading and specimen description for the triaxial demonstration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriaxialSetup {
    /// Cell pressure held constant during the test.
    pub confining_pressure: f64,
    /// Shape of the deviatoric stress-strain response.
    pub response: SyntheticCurve,
    /// Parameter estimates before calibration.
    pub seed: CalibrationParameters,
}

impl Default for TriaxialSetup {
    fn default() -> Self {
        Self {
            confining_pressure: 30.0,
            response: SyntheticCurve::default(),
            seed: CalibrationParameters::default(),
        }
    }
}

/// A recorded test: the curve plus the stresses read at failure.
#[derive(Debug, Clone, PartialEq)]
pub struct TriaxialTest {
    /// The setup that produced the record.
    pub setup: TriaxialSetup,
    /// Deviatoric stress against axial strain.
    pub curve: StressStrainCurve,
    /// Stresses at the peak of the curve.
    pub failure: FailureState,
}

/// Run the synthetic triaxial test described by the default setup.
///
/// The curve records deviatoric stress, so the specimen fails at an axial
/// pressure of `confining + peak` (see
/// <https://en.wikipedia.org/wiki/Triaxial_shear_test>).
pub fn apply_triaxial_conditions() -> Result<TriaxialTest, CurveError> {
    let setup = TriaxialSetup::default();

    // Sample the elastic, hardening and softening segments into a curve.
    let curve = setup.response.generate()?;

    // Failure is read at the peak deviatoric stress. A generated curve is never
    // empty, so the peak always exists.
    let peak = curve.peak().unwrap_or_default();
    let at_failure = StressState::new(
        setup.confining_pressure,
        setup.confining_pressure + peak.stress,
    );
    let failure = FailureState::from_stress_state(at_failure, peak.strain);

    Ok(TriaxialTest {
        setup,
        curve,
        failure,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn fails_at_peak_deviatoric_stress() {
        let test = apply_triaxial_conditions().expect("default setup is valid");
        assert_eq!(test.curve.len(), 61);
        assert_relative_eq!(test.failure.sigma3, 30.0);
        assert_relative_eq!(test.failure.sigma1, 230.0, epsilon = 1.0e-6);
        assert_relative_eq!(test.failure.shear_stress, 100.0, epsilon = 1.0e-6);
        assert_relative_eq!(test.failure.strain_at_failure, 0.008, epsilon = 1.0e-9);
    }
}
