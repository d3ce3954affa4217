//! Tunable constants for material calibration.
//!
//! Every heuristic threshold and clamp used by
//! [`MaterialCalibrator`](crate::MaterialCalibrator) lives in
//! [`CalibrationConfig`]. The defaults reproduce the standard procedure; callers
//! may override any subset through serde, for example from JSON.

use serde::{Deserialize, Serialize};

/// Fewest samples a curve must hold before calibration runs.
pub const MINIMUM_POINTS_FOR_REGRESSION: usize = 5;

/// Strain at which yielding is expected before any data is seen.
pub const ESTIMATED_YIELD_STRAIN: f64 = 0.003;

/// Fraction of [`ESTIMATED_YIELD_STRAIN`] treated as purely elastic.
pub const ELASTIC_ZONE_LIMIT: f64 = 0.2;

/// Strain offset of the 0.2% offset method.
pub const YIELD_OFFSET_STRAIN: f64 = 0.002;

/// Thresholds, fractions and clamps for each calibration stage.
///
/// Bounds are `(lower, upper)` pairs. Fraction bounds are multiplied by the
/// quantity named in the field documentation.
///
/// # Examples
/// ```
/// use mohrx::CalibrationConfig;
///
/// let config: CalibrationConfig =
///     serde_json::from_str(r#"{ "yield_offset_strain": 0.001 }"#).unwrap();
/// assert_eq!(config.yield_offset_strain, 0.001);
/// assert_eq!(config.minimum_points_for_regression, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fewest samples accepted by the calibrator.
    pub minimum_points_for_regression: usize,

    /// Expected yield strain used to size the elastic window.
    pub estimated_yield_strain: f64,
    /// Fraction of `estimated_yield_strain` regressed for Young's modulus.
    pub elastic_zone_limit: f64,
    /// Magnitude below which the least-squares denominator counts as singular.
    pub regression_tolerance: f64,
    /// Clamp applied to Young's modulus.
    pub young_modulus_bounds: (f64, f64),

    /// Floor applied to `σ3` when forming the stress ratio.
    pub stress_ratio_floor: f64,
    /// Stress ratio above which Poisson's ratio is lowered.
    pub high_stress_ratio: f64,
    /// Stress ratio below which Poisson's ratio is raised.
    pub low_stress_ratio: f64,
    /// Step subtracted for a high stress ratio.
    pub poisson_decrease: f64,
    /// Step added for a low stress ratio.
    pub poisson_increase: f64,
    /// Lowest value a decrease may reach.
    pub poisson_floor: f64,
    /// Highest value an increase may reach.
    pub poisson_ceiling: f64,
    /// Final clamp applied to Poisson's ratio.
    pub poisson_bounds: (f64, f64),

    /// Strain offset of the offset line.
    pub yield_offset_strain: f64,
    /// Curves with more samples than this may be classified as ductile.
    pub ductile_min_samples: usize,
    /// Final-to-peak stress ratio above which a curve is ductile.
    pub ductile_final_fraction: f64,
    /// Fraction of peak stress used as yield for a ductile curve.
    pub ductile_yield_fraction: f64,
    /// Fraction of peak stress used as yield for a brittle curve.
    pub brittle_yield_fraction: f64,
    /// Clamp on yield strength, as fractions of Young's modulus.
    pub yield_bounds_fraction: (f64, f64),

    /// Multiplier on peak stress for brittle strength.
    pub brittle_margin: f64,
    /// Multiplier used instead when the curve softens sharply after the peak.
    pub softened_brittle_margin: f64,
    /// How many samples after the peak the post-peak stress is read.
    pub post_peak_offset: usize,
    /// Post-peak drop, as a fraction of peak stress, that counts as sharp softening.
    pub softening_drop_fraction: f64,
    /// Clamp on brittle strength, as fractions of Young's modulus.
    pub brittle_bounds_fraction: (f64, f64),

    /// Clamp on the friction angle in degrees.
    pub friction_angle_bounds_deg: (f64, f64),
    /// Clamp on cohesion, as fractions of yield strength.
    pub cohesion_bounds_fraction: (f64, f64),
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            minimum_points_for_regression: MINIMUM_POINTS_FOR_REGRESSION,
            estimated_yield_strain: ESTIMATED_YIELD_STRAIN,
            elastic_zone_limit: ELASTIC_ZONE_LIMIT,
            regression_tolerance: 1.0e-10,
            young_modulus_bounds: (1_000.0, 200_000.0),
            stress_ratio_floor: 0.1,
            high_stress_ratio: 4.0,
            low_stress_ratio: 2.0,
            poisson_decrease: 0.05,
            poisson_increase: 0.03,
            poisson_floor: 0.15,
            poisson_ceiling: 0.45,
            poisson_bounds: (0.05, 0.49),
            yield_offset_strain: YIELD_OFFSET_STRAIN,
            ductile_min_samples: 10,
            ductile_final_fraction: 0.8,
            ductile_yield_fraction: 0.85,
            brittle_yield_fraction: 0.70,
            yield_bounds_fraction: (0.001, 0.2),
            brittle_margin: 1.05,
            softened_brittle_margin: 1.10,
            post_peak_offset: 3,
            softening_drop_fraction: 0.2,
            brittle_bounds_fraction: (0.005, 0.3),
            friction_angle_bounds_deg: (10.0, 60.0),
            cohesion_bounds_fraction: (0.05, 1.0),
        }
    }
}

impl CalibrationConfig {
    /// Largest strain included in the Young's modulus regression.
    #[must_use]
    pub fn elastic_strain_limit(&self) -> f64 {
        self.estimated_yield_strain * self.elastic_zone_limit
    }
}
