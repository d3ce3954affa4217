//! Mohr circle and Coulomb envelope geometry.
//!
//! All functions are pure: they take a stress state or circle and an envelope by
//! value and return plain values. Degenerate configurations never fail; each one
//! falls back to a fixed, documented value and leaves a `debug` log record.
//!
//! Two parameterisations of the Coulomb line are used and kept apart:
//! [`tangent_form_value`] (`τ = c·cosφ + σ·sinφ`) drives [`tangency_point`], while
//! [`envelope_value`] (`τ = c + σ·tanφ`) drives [`analytical_failure_point`] and
//! envelope plots. They do not produce the same failure point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::CalibrationParameters;
use crate::errors::DegenerateGeometry;

/// Smallest radius a [`MohrCircle`] may have.
pub const MOHR_RADIUS_EPSILON: f64 = 1.0e-3;

/// Largest magnitude `tan(φ)` may reach before it is clamped.
pub const TAN_PHI_SENTINEL: f64 = 1.0e6;

/// Upper clamp applied to `sin²(φ)` in [`tangency_point`].
pub const MAX_SIN_PHI_SQUARED: f64 = 0.9999;

/// Slope reported for lines that are vertical or nearly so.
pub const STEEP_SLOPE_SENTINEL: f64 = 1000.0;

/// Band around zero inside which a slope denominator counts as degenerate.
pub const SLOPE_TOLERANCE: f64 = 1.0e-4;

/// Band around zero inside which `1 + m²` counts as degenerate.
pub const PROJECTION_TOLERANCE: f64 = 1.0e-4;

/// Confining and axial pressure acting on a triaxial specimen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    /// Lateral (cell) pressure.
    pub confining_pressure: f64,
    /// Pressure along the specimen axis.
    pub axial_pressure: f64,
}

impl StressState {
    /// Create a [`StressState`] from its two pressures.
    #[must_use]
    pub const fn new(confining_pressure: f64, axial_pressure: f64) -> Self {
        Self {
            confining_pressure,
            axial_pressure,
        }
    }

    /// Major principal stress.
    #[must_use]
    pub fn sigma1(&self) -> f64 {
        self.confining_pressure.max(self.axial_pressure)
    }

    /// Minor principal stress.
    #[must_use]
    pub fn sigma3(&self) -> f64 {
        self.confining_pressure.min(self.axial_pressure)
    }
}

/// Mohr circle in the `(σ, τ)` plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MohrCircle {
    /// Normal stress at the centre, `(σ1 + σ3) / 2`.
    pub center: f64,
    /// Radius, `(σ1 - σ3) / 2`, never below [`MOHR_RADIUS_EPSILON`].
    pub radius: f64,
}

impl MohrCircle {
    /// Left-most normal stress on the circle.
    #[must_use]
    pub fn sigma_min(&self) -> f64 {
        self.center - self.radius
    }

    /// Right-most normal stress on the circle.
    #[must_use]
    pub fn sigma_max(&self) -> f64 {
        self.center + self.radius
    }
}

/// Linear Mohr-Coulomb failure envelope.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    /// Shear intercept at zero normal stress.
    pub cohesion: f64,
    /// Friction angle in degrees, expected in `[0, 90)`.
    pub friction_angle_deg: f64,
}

impl FailureEnvelope {
    /// Create a [`FailureEnvelope`] from cohesion and friction angle in degrees.
    ///
    /// # Examples
    /// ```
    /// use mohrx::FailureEnvelope;
    ///
    /// let envelope = FailureEnvelope::new(10.0, 30.0);
    /// assert!((envelope.friction_angle_rad() - std::f64::consts::FRAC_PI_6).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub const fn new(cohesion: f64, friction_angle_deg: f64) -> Self {
        Self {
            cohesion,
            friction_angle_deg,
        }
    }

    /// Build the envelope described by a calibration result.
    #[must_use]
    pub fn from_parameters(parameters: &CalibrationParameters) -> Self {
        Self::new(parameters.cohesion, parameters.friction_angle_deg)
    }

    /// Friction angle in radians.
    #[must_use]
    pub fn friction_angle_rad(&self) -> f64 {
        self.friction_angle_deg.to_radians()
    }
}

/// A point in the `(σ, τ)` plane where an envelope meets a circle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailurePoint {
    /// Normal stress.
    pub sigma: f64,
    /// Shear stress.
    pub tau: f64,
}

/// Line touching a Mohr circle at a failure point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TangentLine {
    /// Point the line passes through.
    pub point: FailurePoint,
    /// Slope of the line from the circle centre to `point`.
    pub radial_slope: f64,
    /// Slope of the tangent itself.
    pub slope: f64,
}

impl TangentLine {
    /// Shear stress on the tangent line at normal stress `sigma`.
    #[must_use]
    pub fn tau_at(&self, sigma: f64) -> f64 {
        self.point.tau + self.slope * (sigma - self.point.sigma)
    }
}

/// Derive the Mohr circle for a stress state.
///
/// # Examples
/// ```
/// use mohrx::{circle_for, StressState};
///
/// let circle = circle_for(StressState::new(20.0, 120.0));
/// assert_eq!(circle.center, 70.0);
/// assert_eq!(circle.radius, 50.0);
/// ```
#[must_use]
pub fn circle_for(stress: StressState) -> MohrCircle {
    let sigma1 = stress.sigma1();
    let sigma3 = stress.sigma3();
    MohrCircle {
        center: 0.5 * (sigma1 + sigma3),
        radius: (0.5 * (sigma1 - sigma3)).max(MOHR_RADIUS_EPSILON),
    }
}

/// `tan(φ)` clamped to `±TAN_PHI_SENTINEL`.
fn guarded_tan(phi: f64) -> f64 {
    phi.tan().clamp(-TAN_PHI_SENTINEL, TAN_PHI_SENTINEL)
}

/// Evaluate the envelope as `τ = c + σ·tanφ`.
///
/// Near ±90° the slope is clamped to [`TAN_PHI_SENTINEL`] so the result stays finite.
#[must_use]
pub fn envelope_value(envelope: FailureEnvelope, sigma: f64) -> f64 {
    envelope.cohesion + sigma * guarded_tan(envelope.friction_angle_rad())
}

/// Evaluate the envelope as `τ = c·cosφ + σ·sinφ`, the form used by [`tangency_point`].
#[must_use]
pub fn tangent_form_value(envelope: FailureEnvelope, sigma: f64) -> f64 {
    let (sin_phi, cos_phi) = envelope.friction_angle_rad().sin_cos();
    envelope.cohesion * cos_phi + sigma * sin_phi
}

/// Whether the circle touches or crosses the envelope.
///
/// The perpendicular distance from the centre to `τ = c + σ·tanφ` is
/// `c·cosφ + center·sinφ`; the circle has reached failure once its radius is at
/// least that distance.
#[must_use]
pub fn circle_reaches_envelope(circle: MohrCircle, envelope: FailureEnvelope) -> bool {
    circle.radius >= tangent_form_value(envelope, circle.center)
}

/// Failure point for a circle that has already reached the envelope.
///
/// Uses the `τ = c·cosφ + σ·sinφ` form of the envelope.
///
/// # Examples
/// ```
/// use mohrx::{tangency_point, FailureEnvelope, MohrCircle};
///
/// let circle = MohrCircle { center: 100.0, radius: 50.0 };
/// let point = tangency_point(circle, FailureEnvelope::new(0.0, 30.0));
/// assert!((point.sigma - 100.0).abs() < 1.0e-9);
/// assert!((point.tau - 50.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn tangency_point(circle: MohrCircle, envelope: FailureEnvelope) -> FailurePoint {
    let phi = envelope.friction_angle_rad();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let sin_phi_sq = (sin_phi * sin_phi).min(MAX_SIN_PHI_SQUARED);
    let denominator = 1.0 - sin_phi_sq;

    let mut sigma = (circle.center * denominator
        - 2.0 * envelope.cohesion * cos_phi * sin_phi)
        / denominator;
    if !sigma.is_finite() {
        debug!(
            reason = %DegenerateGeometry::NonFiniteSigma,
            center = circle.center,
            "tangency fallback"
        );
        sigma = circle.center;
    }

    let mut tau = envelope.cohesion * cos_phi + sigma * sin_phi;
    if !tau.is_finite() {
        debug!(
            reason = %DegenerateGeometry::NonFiniteTau,
            radius = circle.radius,
            "tangency fallback"
        );
        tau = circle.radius;
    }

    FailurePoint { sigma, tau }
}

/// Tangent line to `circle` through `point`.
///
/// Vertical radial lines report a slope of `±STEEP_SLOPE_SENTINEL`; a horizontal
/// radial line gives a tangent with the same sentinel magnitude.
#[must_use]
pub fn tangent_line(circle: MohrCircle, point: FailurePoint) -> TangentLine {
    let run = point.sigma - circle.center;
    let radial_slope = if run.abs() < SLOPE_TOLERANCE {
        debug!(reason = %DegenerateGeometry::SteepRadialSlope, run, "tangent line fallback");
        STEEP_SLOPE_SENTINEL.copysign(point.tau)
    } else {
        point.tau / run
    };

    let slope = if radial_slope.abs() < SLOPE_TOLERANCE {
        debug!(
            reason = %DegenerateGeometry::FlatRadialSlope,
            radial_slope,
            "tangent line fallback"
        );
        -STEEP_SLOPE_SENTINEL.copysign(radial_slope)
    } else {
        -1.0 / radial_slope
    };

    TangentLine {
        point,
        radial_slope,
        slope,
    }
}

/// Failure point for a circle that has not reached the envelope yet.
///
/// Projects the circle centre onto `τ = c + m·σ` with `m = tanφ`.
///
/// # Examples
/// ```
/// use mohrx::{analytical_failure_point, FailureEnvelope, MohrCircle};
///
/// let circle = MohrCircle { center: 100.0, radius: 10.0 };
/// let point = analytical_failure_point(circle, FailureEnvelope::new(0.0, 45.0));
/// assert!((point.sigma - 50.0).abs() < 1.0e-9);
/// assert!((point.tau - 50.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn analytical_failure_point(circle: MohrCircle, envelope: FailureEnvelope) -> FailurePoint {
    let slope = guarded_tan(envelope.friction_angle_rad());
    let denominator = 1.0 + slope * slope;
    let sigma = if denominator.abs() <= PROJECTION_TOLERANCE {
        let reason = DegenerateGeometry::NearZeroDenominator { value: denominator };
        debug!(reason = %reason, "analytical failure point fallback");
        circle.center
    } else {
        (circle.center - envelope.cohesion * slope) / denominator
    };
    FailurePoint {
        sigma,
        tau: envelope.cohesion + slope * sigma,
    }
}

/// Failure point for `circle`, picking [`tangency_point`] once the circle has
/// reached the envelope and [`analytical_failure_point`] before that.
#[must_use]
pub fn failure_point(circle: MohrCircle, envelope: FailureEnvelope) -> FailurePoint {
    if circle_reaches_envelope(circle, envelope) {
        tangency_point(circle, envelope)
    } else {
        analytical_failure_point(circle, envelope)
    }
}
