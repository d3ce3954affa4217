//! Material parameter calibration from a triaxial stress-strain history.
//!
//! [`MaterialCalibrator::calibrate`] runs five stages in a fixed order. Each one
//! is also exposed as a free function so it can be exercised on its own:
//!
//! 1. [`fit_young_modulus`] regresses the elastic window of the curve.
//! 2. [`adjust_poisson_ratio`] nudges the previous ratio from the failure stress ratio.
//! 3. [`estimate_yield_strength`] applies the 0.2% offset method.
//! 4. [`estimate_brittle_strength`] scales the peak stress by a softening-dependent margin.
//! 5. [`invert_failure_state`] recovers friction angle and cohesion from one failure reading.
//!
//! Later stages read the clamped outputs of earlier ones. Only a curve that is
//! too short fails; every numerical corner case is resolved by a fallback or a
//! clamp and logged at `debug` level.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::CalibrationConfig;
use crate::curve::{StressStrainCurve, StressStrainSample};
use crate::errors::{CalibrationError, DegenerateGeometry};
use crate::geometry::{circle_for, StressState};

/// Calibrated material parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Young's modulus, in stress units.
    pub young_modulus: f64,
    /// Poisson's ratio.
    pub poisson_ratio: f64,
    /// Yield strength from the offset method.
    pub yield_strength: f64,
    /// Peak strength including the brittle margin.
    pub brittle_strength: f64,
    /// Friction angle in degrees.
    pub friction_angle_deg: f64,
    /// Cohesion, in stress units.
    pub cohesion: f64,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            young_modulus: 50_000.0,
            poisson_ratio: 0.25,
            yield_strength: 100.0,
            brittle_strength: 150.0,
            friction_angle_deg: 30.0,
            cohesion: 20.0,
        }
    }
}

/// Principal and shear stresses observed when the specimen failed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureState {
    /// Major principal stress.
    pub sigma1: f64,
    /// Minor principal stress.
    pub sigma3: f64,
    /// Shear stress reading at failure.
    pub shear_stress: f64,
    /// Axial strain at failure.
    pub strain_at_failure: f64,
}

impl FailureState {
    /// Create a [`FailureState`] from its readings.
    #[must_use]
    pub const fn new(sigma1: f64, sigma3: f64, shear_stress: f64, strain_at_failure: f64) -> Self {
        Self {
            sigma1,
            sigma3,
            shear_stress,
            strain_at_failure,
        }
    }

    /// Failure reading for a stress state whose shear equals its Mohr circle radius.
    ///
    /// # Examples
    /// ```
    /// use mohrx::{FailureState, StressState};
    ///
    /// let failure = FailureState::from_stress_state(StressState::new(20.0, 120.0), 0.004);
    /// assert_eq!(failure.sigma1, 120.0);
    /// assert_eq!(failure.shear_stress, 50.0);
    /// ```
    #[must_use]
    pub fn from_stress_state(stress: StressState, strain_at_failure: f64) -> Self {
        Self::new(
            stress.sigma1(),
            stress.sigma3(),
            circle_for(stress).radius,
            strain_at_failure,
        )
    }

    /// Stress state with `σ3` as confining and `σ1` as axial pressure.
    #[must_use]
    pub fn stress_state(&self) -> StressState {
        StressState::new(self.sigma3, self.sigma1)
    }
}

/// Clamp without panicking on inverted bounds; NaN maps to the lower bound.
fn bounded(value: f64, (lower, upper): (f64, f64)) -> f64 {
    value.max(lower).min(upper)
}

/// Scale a pair of fractional bounds by `reference`.
fn scaled((lower, upper): (f64, f64), reference: f64) -> (f64, f64) {
    (lower * reference, upper * reference)
}

/// Closed-form least-squares slope of stress against strain.
///
/// Returns `None` when the normal equations are singular within `tolerance`.
fn least_squares_slope(window: &[StressStrainSample], tolerance: f64) -> Option<f64> {
    let strain = DVector::from_iterator(window.len(), window.iter().map(|s| s.strain));
    let stress = DVector::from_iterator(window.len(), window.iter().map(|s| s.stress));

    let n = window.len() as f64;
    let sum_x = strain.sum();
    let sum_y = stress.sum();
    let sum_xy = strain.dot(&stress);
    let sum_xx = strain.dot(&strain);

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < tolerance {
        let reason = DegenerateGeometry::SingularRegression { value: denominator };
        debug!(reason = %reason, samples = window.len(), "skipping regression");
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denominator)
}

/// Regress Young's modulus over the elastic window of `curve`.
///
/// The window holds the samples with strain up to
/// [`CalibrationConfig::elastic_strain_limit`]. If it is too small the first
/// `minimum_points_for_regression` samples are used instead. A singular or
/// non-finite regression keeps `previous`. The result is clamped to
/// `young_modulus_bounds`.
#[must_use]
pub fn fit_young_modulus(
    curve: &StressStrainCurve,
    previous: f64,
    config: &CalibrationConfig,
) -> f64 {
    let samples = curve.samples();
    let limit = config.elastic_strain_limit();
    let elastic = samples.partition_point(|sample| sample.strain <= limit);
    let window = if elastic >= config.minimum_points_for_regression {
        &samples[..elastic]
    } else {
        debug!(
            elastic,
            limit, "elastic window too small, regressing the leading samples"
        );
        &samples[..config.minimum_points_for_regression.min(samples.len())]
    };

    let modulus = match least_squares_slope(window, config.regression_tolerance) {
        Some(slope) if slope.is_finite() => slope,
        Some(slope) => {
            let reason = DegenerateGeometry::NonFiniteSlope { value: slope };
            debug!(reason = %reason, previous, "keeping young modulus");
            previous
        }
        None => previous,
    };
    bounded(modulus, config.young_modulus_bounds)
}

/// Nudge Poisson's ratio from the stress ratio `(σ1 - σ3) / max(σ3, floor)` at failure.
///
/// No lateral strain is recorded, so the ratio is not regressed. A high stress
/// ratio lowers it, a low one raises it, and the result is clamped to
/// `poisson_bounds`.
#[must_use]
pub fn adjust_poisson_ratio(
    previous: f64,
    failure: &FailureState,
    config: &CalibrationConfig,
) -> f64 {
    let ratio =
        (failure.sigma1 - failure.sigma3) / failure.sigma3.max(config.stress_ratio_floor);
    let adjusted = if ratio > config.high_stress_ratio {
        (previous - config.poisson_decrease).max(config.poisson_floor)
    } else if ratio < config.low_stress_ratio {
        (previous + config.poisson_increase).min(config.poisson_ceiling)
    } else {
        previous
    };
    bounded(adjusted, config.poisson_bounds)
}

/// Where `curve` first crosses the line `stress = E·(strain - offset)`.
///
/// Consecutive samples are scanned for a sign change of the curve's excess over
/// the offset line; the crossing is linearly interpolated between them.
///
/// # Examples
/// ```
/// use mohrx::{offset_yield_point, StressStrainCurve};
///
/// let curve = StressStrainCurve::from_pairs(&[
///     (0.0, 0.0),
///     (0.002, 100.0),
///     (0.004, 100.0),
///     (0.006, 100.0),
/// ])
/// .unwrap();
/// let point = offset_yield_point(&curve, 50_000.0, 0.002).unwrap();
/// assert!((point.strain - 0.004).abs() < 1.0e-9);
/// assert!((point.stress - 100.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn offset_yield_point(
    curve: &StressStrainCurve,
    young_modulus: f64,
    offset: f64,
) -> Option<StressStrainSample> {
    let excess = |sample: &StressStrainSample| {
        sample.stress - young_modulus * (sample.strain - offset)
    };
    curve.samples().windows(2).find_map(|pair| {
        let (before, after) = (pair[0], pair[1]);
        let (excess_before, excess_after) = (excess(&before), excess(&after));
        if (excess_before > 0.0) == (excess_after > 0.0) {
            return None;
        }
        let t = excess_before / (excess_before - excess_after);
        Some(StressStrainSample::new(
            before.strain + t * (after.strain - before.strain),
            before.stress + t * (after.stress - before.stress),
        ))
    })
}

/// Yield strength by the 0.2% offset method.
///
/// Without a crossing the yield strength falls back to a fraction of peak
/// stress: `ductile_yield_fraction` when the curve has more than
/// `ductile_min_samples` samples and ends above `ductile_final_fraction` of its
/// peak, `brittle_yield_fraction` otherwise. The result is clamped to
/// `yield_bounds_fraction` of `young_modulus`.
#[must_use]
pub fn estimate_yield_strength(
    curve: &StressStrainCurve,
    young_modulus: f64,
    config: &CalibrationConfig,
) -> f64 {
    let strength = match offset_yield_point(curve, young_modulus, config.yield_offset_strain) {
        Some(point) => point.stress,
        None => {
            let peak = curve.peak().map_or(0.0, |sample| sample.stress);
            let last = curve.samples().last().map_or(0.0, |sample| sample.stress);
            let ductile = curve.len() > config.ductile_min_samples
                && last > config.ductile_final_fraction * peak;
            debug!(
                reason = %DegenerateGeometry::NoOffsetCrossing,
                peak,
                ductile,
                "yield strength from peak stress"
            );
            if ductile {
                config.ductile_yield_fraction * peak
            } else {
                config.brittle_yield_fraction * peak
            }
        }
    };
    bounded(
        strength,
        scaled(config.yield_bounds_fraction, young_modulus),
    )
}

/// Brittle strength as a margin over peak stress.
///
/// The margin is `softened_brittle_margin` when the stress `post_peak_offset`
/// samples after the peak has dropped by more than `softening_drop_fraction` of
/// the peak, `brittle_margin` otherwise. The result is clamped to
/// `brittle_bounds_fraction` of `young_modulus`.
#[must_use]
pub fn estimate_brittle_strength(
    curve: &StressStrainCurve,
    young_modulus: f64,
    config: &CalibrationConfig,
) -> f64 {
    let samples = curve.samples();
    let (peak_index, peak) = curve
        .peak_index()
        .map_or((0, 0.0), |index| (index, samples[index].stress));

    let softened = peak_index
        .checked_add(config.post_peak_offset)
        .and_then(|index| samples.get(index))
        .is_some_and(|after| peak - after.stress > config.softening_drop_fraction * peak);
    let margin = if softened {
        config.softened_brittle_margin
    } else {
        config.brittle_margin
    };
    bounded(
        margin * peak,
        scaled(config.brittle_bounds_fraction, young_modulus),
    )
}

/// Friction angle (degrees) and cohesion from a single failure reading.
///
/// `φ = asin(τ / ((σ1 + σ3) / 2))`, clamped to `friction_angle_bounds_deg`, then
/// `c = (σ1 - σ3) / (2·cosφ) - (σ1 + σ3)·sinφ / (2·cosφ)`, clamped to
/// `cohesion_bounds_fraction` of `yield_strength`. This inverts the Coulomb
/// criterion at one point and is an approximation of a multi-test fit. A mean
/// stress of zero keeps `previous_friction_deg`.
#[must_use]
pub fn invert_failure_state(
    failure: &FailureState,
    yield_strength: f64,
    previous_friction_deg: f64,
    config: &CalibrationConfig,
) -> (f64, f64) {
    let mean = 0.5 * (failure.sigma1 + failure.sigma3);
    let friction_deg = if mean.is_finite() && mean.abs() > f64::EPSILON {
        (failure.shear_stress / mean).clamp(-1.0, 1.0).asin().to_degrees()
    } else {
        let reason = DegenerateGeometry::DegenerateMeanStress { value: mean };
        debug!(reason = %reason, previous_friction_deg, "keeping friction angle");
        previous_friction_deg
    };
    let friction_deg = bounded(friction_deg, config.friction_angle_bounds_deg);

    let (sin_phi, cos_phi) = friction_deg.to_radians().sin_cos();
    let cohesion = (failure.sigma1 - failure.sigma3) / (2.0 * cos_phi)
        - (failure.sigma1 + failure.sigma3) * sin_phi / (2.0 * cos_phi);
    let cohesion = bounded(
        cohesion,
        scaled(config.cohesion_bounds_fraction, yield_strength),
    );
    (friction_deg, cohesion)
}

/// Runs the calibration pipeline with a fixed [`CalibrationConfig`].
///
/// The calibrator holds no state between calls, so one instance may be shared
/// across threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialCalibrator {
    /// Thresholds and clamps for every stage.
    config: CalibrationConfig,
}

impl MaterialCalibrator {
    /// Create a calibrator using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calibrator using `config`.
    #[must_use]
    pub fn with_config(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Configuration used by this calibrator.
    #[must_use]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Calibrate material parameters from `curve` and one `failure` reading.
    ///
    /// `seed` supplies the previous estimates that regression falls back to and
    /// that the Poisson's ratio heuristic adjusts.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InsufficientData`] when `curve` holds fewer
    /// than `minimum_points_for_regression` samples.
    ///
    /// # Examples
    /// ```
    /// use mohrx::{CalibrationParameters, FailureState, MaterialCalibrator, SyntheticCurve};
    ///
    /// let curve = SyntheticCurve::default().generate().unwrap();
    /// let failure = FailureState::new(230.0, 30.0, 75.0, 0.008);
    /// let parameters = MaterialCalibrator::new()
    ///     .calibrate(&curve, &CalibrationParameters::default(), &failure)
    ///     .unwrap();
    /// assert!((parameters.young_modulus - 50_000.0).abs() < 1.0);
    /// ```
    #[instrument(skip_all, fields(samples = curve.len()))]
    pub fn calibrate(
        &self,
        curve: &StressStrainCurve,
        seed: &CalibrationParameters,
        failure: &FailureState,
    ) -> Result<CalibrationParameters, CalibrationError> {
        let config = &self.config;
        if curve.len() < config.minimum_points_for_regression {
            return Err(CalibrationError::InsufficientData {
                required: config.minimum_points_for_regression,
                actual: curve.len(),
            });
        }

        let young_modulus = fit_young_modulus(curve, seed.young_modulus, config);
        let poisson_ratio = adjust_poisson_ratio(seed.poisson_ratio, failure, config);
        let yield_strength = estimate_yield_strength(curve, young_modulus, config);
        let brittle_strength = estimate_brittle_strength(curve, young_modulus, config);
        let (friction_angle_deg, cohesion) =
            invert_failure_state(failure, yield_strength, seed.friction_angle_deg, config);

        let parameters = CalibrationParameters {
            young_modulus,
            poisson_ratio,
            yield_strength,
            brittle_strength,
            friction_angle_deg,
            cohesion,
        };
        info!(
            young_modulus,
            poisson_ratio,
            yield_strength,
            brittle_strength,
            friction_angle_deg,
            cohesion,
            "calibration complete"
        );
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::YIELD_OFFSET_STRAIN as YIELD_OFFSET;

    /// Evenly spaced samples of `stress(strain)` from zero strain.
    fn sampled(count: usize, step: f64, stress: impl Fn(f64) -> f64) -> StressStrainCurve {
        let samples = (0..count)
            .map(|index| {
                let strain = step * index as f64;
                StressStrainSample::new(strain, stress(strain))
            })
            .collect();
        StressStrainCurve::new(samples).expect("generated curve is valid")
    }

    /// Linear rise to 400 at strain 0.008 followed by three post-peak samples.
    fn peaked_curve(post_peak: [f64; 3]) -> StressStrainCurve {
        let mut samples: Vec<StressStrainSample> = (0..=80)
            .map(|index| {
                let strain = f64::from(index) / 10_000.0;
                StressStrainSample::new(strain, 50_000.0 * strain)
            })
            .collect();
        for (offset, stress) in post_peak.into_iter().enumerate() {
            samples.push(StressStrainSample::new(
                0.0081 + 0.0001 * offset as f64,
                stress,
            ));
        }
        StressStrainCurve::new(samples).expect("peaked curve is valid")
    }

    #[test]
    fn young_modulus_from_linear_curve() {
        let curve = sampled(20, 0.001 / 19.0, |strain| 50_000.0 * strain);
        let modulus = fit_young_modulus(&curve, 10_000.0, &CalibrationConfig::default());
        assert_relative_eq!(modulus, 50_000.0, max_relative = 0.01);
    }

    #[test]
    fn young_modulus_uses_leading_samples_when_window_is_sparse() {
        // Only two samples fall below the elastic strain limit.
        let curve = sampled(10, 0.0005, |strain| 30_000.0 * strain);
        let modulus = fit_young_modulus(&curve, 10_000.0, &CalibrationConfig::default());
        assert_relative_eq!(modulus, 30_000.0, max_relative = 1.0e-9);
    }

    #[test]
    fn singular_regression_keeps_previous_modulus() {
        let curve = StressStrainCurve::from_pairs(&[(0.0, 0.0); 5]).expect("valid curve");
        let modulus = fit_young_modulus(&curve, 42_000.0, &CalibrationConfig::default());
        assert_eq!(modulus, 42_000.0);
    }

    #[test]
    fn overflowing_regression_keeps_previous_modulus() {
        // The stress sum overflows, so the slope is infinite.
        let pairs: Vec<(f64, f64)> = (0..5)
            .map(|index| (0.0001 * f64::from(index), 1.0e308))
            .collect();
        let curve = StressStrainCurve::from_pairs(&pairs).expect("valid curve");
        let modulus = fit_young_modulus(&curve, 42_000.0, &CalibrationConfig::default());
        assert_eq!(modulus, 42_000.0);
    }

    #[test]
    fn young_modulus_is_clamped() {
        let config = CalibrationConfig::default();
        let stiff = sampled(20, 0.00003, |strain| 1.0e7 * strain);
        assert_eq!(fit_young_modulus(&stiff, 10_000.0, &config), 200_000.0);

        let soft = sampled(20, 0.00003, |strain| 10.0 * strain);
        assert_eq!(fit_young_modulus(&soft, 10_000.0, &config), 1_000.0);
    }

    #[test]
    fn poisson_ratio_follows_stress_ratio() {
        let config = CalibrationConfig::default();

        let high = FailureState::new(600.0, 100.0, 0.0, 0.0);
        assert_relative_eq!(adjust_poisson_ratio(0.3, &high, &config), 0.25);
        assert_relative_eq!(adjust_poisson_ratio(0.17, &high, &config), 0.15);

        let low = FailureState::new(150.0, 100.0, 0.0, 0.0);
        assert_relative_eq!(adjust_poisson_ratio(0.3, &low, &config), 0.33);
        assert_relative_eq!(adjust_poisson_ratio(0.44, &low, &config), 0.45);

        let middle = FailureState::new(400.0, 100.0, 0.0, 0.0);
        assert_relative_eq!(adjust_poisson_ratio(0.3, &middle, &config), 0.3);
        assert_relative_eq!(adjust_poisson_ratio(0.6, &middle, &config), 0.49);
    }

    #[test]
    fn poisson_ratio_floors_minor_stress() {
        // σ3 = 0 would divide by zero without the 0.1 floor.
        let unconfined = FailureState::new(50.0, 0.0, 0.0, 0.0);
        let ratio = adjust_poisson_ratio(0.3, &unconfined, &CalibrationConfig::default());
        assert_relative_eq!(ratio, 0.25);
    }

    #[test]
    fn offset_line_crossing_on_bilinear_curve() {
        let modulus = 50_000.0;
        let step = 0.00045;
        let curve = sampled(25, step, |strain| (modulus * strain).min(modulus * 0.004));
        let config = CalibrationConfig::default();

        let fitted = fit_young_modulus(&curve, 10_000.0, &config);
        assert_relative_eq!(fitted, modulus, max_relative = 1.0e-9);

        // stress = E·strain meets stress = E·(strain - 0.002) on the plateau at 0.006.
        let crossing =
            offset_yield_point(&curve, fitted, YIELD_OFFSET).expect("curve crosses offset line");
        assert!((crossing.strain - 0.006).abs() <= step);
        assert_relative_eq!(crossing.stress, 200.0, max_relative = 1.0e-6);

        let strength = estimate_yield_strength(&curve, fitted, &config);
        assert_relative_eq!(strength, 200.0, max_relative = 1.0e-6);
    }

    #[test]
    fn yield_falls_back_to_peak_fraction() {
        let config = CalibrationConfig::default();

        // Twelve samples ending at the peak: ductile.
        let ductile = sampled(12, 0.0001, |strain| 50_000.0 * strain);
        assert!(offset_yield_point(&ductile, 10_000.0, YIELD_OFFSET).is_none());
        let peak = 50_000.0 * 0.0011;
        assert_relative_eq!(
            estimate_yield_strength(&ductile, 10_000.0, &config),
            0.85 * peak,
            max_relative = 1.0e-9
        );

        // Too few samples to count as ductile.
        let short = sampled(8, 0.0001, |strain| 50_000.0 * strain);
        let peak = 50_000.0 * 0.0007;
        assert_relative_eq!(
            estimate_yield_strength(&short, 10_000.0, &config),
            0.70 * peak,
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn yield_strength_is_clamped_to_modulus_fraction() {
        let curve = sampled(8, 0.0001, |strain| 50_000.0 * strain);
        // 0.70 · 35 = 24.5 is below 0.001 · 100 000.
        let strength = estimate_yield_strength(&curve, 100_000.0, &CalibrationConfig::default());
        assert_relative_eq!(strength, 100.0, max_relative = 1.0e-9);
    }

    #[test]
    fn brittle_margin_for_gentle_softening() {
        // 15% drop three samples after the peak.
        let curve = peaked_curve([380.0, 360.0, 340.0]);
        let strength = estimate_brittle_strength(&curve, 50_000.0, &CalibrationConfig::default());
        assert_relative_eq!(strength, 1.05 * 400.0, max_relative = 1.0e-9);
    }

    #[test]
    fn brittle_margin_for_sharp_softening() {
        // 25% drop three samples after the peak.
        let curve = peaked_curve([360.0, 330.0, 300.0]);
        let strength = estimate_brittle_strength(&curve, 50_000.0, &CalibrationConfig::default());
        assert_relative_eq!(strength, 1.10 * 400.0, max_relative = 1.0e-9);
    }

    #[test]
    fn brittle_margin_threshold_is_strict() {
        // Exactly 20% is not sharp softening.
        let curve = peaked_curve([380.0, 350.0, 320.0]);
        let strength = estimate_brittle_strength(&curve, 50_000.0, &CalibrationConfig::default());
        assert_relative_eq!(strength, 1.05 * 400.0, max_relative = 1.0e-9);
    }

    #[test]
    fn brittle_margin_needs_post_peak_samples() {
        let curve = peaked_curve([360.0, 330.0, 300.0]);
        let truncated = StressStrainCurve::new(curve.samples()[..83].to_vec())
            .expect("prefix is valid");
        let strength =
            estimate_brittle_strength(&truncated, 50_000.0, &CalibrationConfig::default());
        assert_relative_eq!(strength, 1.05 * 400.0, max_relative = 1.0e-9);
    }

    #[test]
    fn brittle_margin_with_unreachable_post_peak_offset() {
        let config = CalibrationConfig {
            post_peak_offset: usize::MAX,
            ..CalibrationConfig::default()
        };
        let curve = peaked_curve([360.0, 330.0, 300.0]);
        let strength = estimate_brittle_strength(&curve, 50_000.0, &config);
        assert_relative_eq!(strength, 1.05 * 400.0, max_relative = 1.0e-9);

        let short = StressStrainCurve::from_pairs(&[(0.0, 0.0), (0.001, 50.0), (0.002, 40.0)])
            .expect("valid curve");
        let strength = estimate_brittle_strength(&short, 5_000.0, &config);
        assert_relative_eq!(strength, 1.05 * 50.0, max_relative = 1.0e-9);
    }

    #[test]
    fn coulomb_inversion_recovers_cohesive_envelope() {
        let (phi, cohesion) = (30.0_f64, 20.0);
        let (sin_phi, cos_phi) = phi.to_radians().sin_cos();
        let sigma3 = 50.0;
        let radius = (cohesion * cos_phi + sigma3 * sin_phi) / (1.0 - sin_phi);
        let sigma1 = sigma3 + 2.0 * radius;
        let shear = 0.5 * (sigma1 + sigma3) * sin_phi;

        let failure = FailureState::new(sigma1, sigma3, shear, 0.01);
        let (friction, recovered) =
            invert_failure_state(&failure, 200.0, 35.0, &CalibrationConfig::default());
        assert_relative_eq!(friction, phi, epsilon = 1.0e-9);
        assert_relative_eq!(recovered, cohesion, epsilon = 1.0e-9);
    }

    #[test]
    fn coulomb_inversion_of_frictional_material_hits_cohesion_floor() {
        let failure = FailureState::from_stress_state(StressState::new(100.0, 300.0), 0.01);
        let (friction, cohesion) =
            invert_failure_state(&failure, 200.0, 35.0, &CalibrationConfig::default());
        assert_relative_eq!(friction, 30.0, epsilon = 1.0e-9);
        assert_relative_eq!(cohesion, 0.05 * 200.0, epsilon = 1.0e-9);
    }

    #[test]
    fn coulomb_inversion_clamps_and_guards() {
        let config = CalibrationConfig::default();

        let shallow = FailureState::new(110.0, 90.0, 1.0, 0.0);
        assert_eq!(invert_failure_state(&shallow, 200.0, 35.0, &config).0, 10.0);

        let steep = FailureState::new(300.0, 10.0, 500.0, 0.0);
        assert_eq!(invert_failure_state(&steep, 200.0, 35.0, &config).0, 60.0);

        let zero_mean = FailureState::new(0.0, 0.0, 5.0, 0.0);
        let (friction, cohesion) = invert_failure_state(&zero_mean, 200.0, 35.0, &config);
        assert_eq!(friction, 35.0);
        assert!(cohesion.is_finite());
    }

    #[test]
    fn calibration_requires_five_samples() {
        let calibrator = MaterialCalibrator::new();
        let seed = CalibrationParameters::default();
        let failure = FailureState::new(230.0, 30.0, 75.0, 0.004);
        let pairs: Vec<(f64, f64)> = (0..5)
            .map(|index| {
                let strain = 0.0001 * f64::from(index);
                (strain, 50_000.0 * strain)
            })
            .collect();

        let four = StressStrainCurve::from_pairs(&pairs[..4]).expect("valid curve");
        assert_eq!(
            calibrator.calibrate(&four, &seed, &failure),
            Err(CalibrationError::InsufficientData {
                required: 5,
                actual: 4,
            })
        );

        let five = StressStrainCurve::from_pairs(&pairs).expect("valid curve");
        assert!(calibrator.calibrate(&five, &seed, &failure).is_ok());
    }

    #[test]
    fn calibration_is_deterministic() {
        let curve = peaked_curve([360.0, 330.0, 300.0]);
        let calibrator = MaterialCalibrator::new();
        let seed = CalibrationParameters::default();
        let failure = FailureState::new(230.0, 30.0, 75.0, 0.008);
        let first = calibrator
            .calibrate(&curve, &seed, &failure)
            .expect("calibration runs");
        let second = calibrator
            .calibrate(&curve, &seed, &failure)
            .expect("calibration runs");
        assert_eq!(first, second);
    }

    #[test]
    fn calibration_stays_within_bounds() {
        let curve = peaked_curve([360.0, 330.0, 300.0]);
        let failure = FailureState::new(230.0, 30.0, 75.0, 0.008);
        let parameters = MaterialCalibrator::new()
            .calibrate(&curve, &CalibrationParameters::default(), &failure)
            .expect("calibration runs");

        let e = parameters.young_modulus;
        assert!((1_000.0..=200_000.0).contains(&e));
        assert!(parameters.poisson_ratio > 0.0 && parameters.poisson_ratio < 0.5);
        assert!(parameters.yield_strength >= 0.001 * e && parameters.yield_strength <= 0.2 * e);
        assert!(parameters.brittle_strength >= 0.005 * e);
        assert!(parameters.brittle_strength <= 0.3 * e);
        assert!((10.0..=60.0).contains(&parameters.friction_angle_deg));
        assert!(parameters.cohesion >= 0.05 * parameters.yield_strength);
        assert!(parameters.cohesion <= parameters.yield_strength);
    }

    #[test]
    fn custom_config_changes_the_minimum() {
        let config = CalibrationConfig {
            minimum_points_for_regression: 8,
            ..CalibrationConfig::default()
        };
        let calibrator = MaterialCalibrator::with_config(config);
        let curve = sampled(6, 0.0001, |strain| 50_000.0 * strain);
        let failure = FailureState::new(230.0, 30.0, 75.0, 0.004);
        let error = calibrator
            .calibrate(&curve, &CalibrationParameters::default(), &failure)
            .expect_err("six samples are not enough");
        assert_eq!(
            error,
            CalibrationError::InsufficientData {
                required: 8,
                actual: 6,
            }
        );
    }
}
