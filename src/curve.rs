//! Stress-strain histories recorded during a triaxial test.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::CurveError;

/// One reading of axial strain and deviatoric stress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StressStrainSample {
    /// Axial strain, dimensionless.
    pub strain: f64,
    /// Stress at that strain.
    pub stress: f64,
}

impl StressStrainSample {
    /// Create a [`StressStrainSample`].
    #[must_use]
    pub const fn new(strain: f64, stress: f64) -> Self {
        Self { strain, stress }
    }
}

/// Ordered, validated sequence of [`StressStrainSample`]s.
///
/// Strain never decreases along the curve and no value is negative or
/// non-finite. The curve is immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<StressStrainSample>",
    into = "Vec<StressStrainSample>"
)]
pub struct StressStrainCurve {
    /// Samples in test order.
    samples: Vec<StressStrainSample>,
}

impl StressStrainCurve {
    /// Build a curve from samples recorded in test order.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] when a sample is non-finite, negative, or has a
    /// smaller strain than the sample before it.
    pub fn new(samples: Vec<StressStrainSample>) -> Result<Self, CurveError> {
        for (index, sample) in samples.iter().enumerate() {
            if !sample.strain.is_finite() || !sample.stress.is_finite() {
                return Err(CurveError::NonFiniteSample { index });
            }
            if sample.strain < 0.0 || sample.stress < 0.0 {
                return Err(CurveError::NegativeSample { index });
            }
        }
        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].strain < pair[0].strain)
        {
            return Err(CurveError::DecreasingStrain {
                index: index + 1,
                previous: samples[index].strain,
                strain: samples[index + 1].strain,
            });
        }
        Ok(Self { samples })
    }

    /// Build a curve from `(strain, stress)` pairs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`StressStrainCurve::new`].
    ///
    /// # Examples
    /// ```
    /// use mohrx::StressStrainCurve;
    ///
    /// let curve = StressStrainCurve::from_pairs(&[(0.0, 0.0), (0.001, 50.0)]).unwrap();
    /// assert_eq!(curve.len(), 2);
    /// assert!(StressStrainCurve::from_pairs(&[(0.002, 0.0), (0.001, 50.0)]).is_err());
    /// ```
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, CurveError> {
        Self::new(
            pairs
                .iter()
                .map(|&(strain, stress)| StressStrainSample::new(strain, stress))
                .collect(),
        )
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the curve holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in test order.
    #[must_use]
    pub fn samples(&self) -> &[StressStrainSample] {
        &self.samples
    }

    /// Index of the first sample carrying the maximum stress.
    #[must_use]
    pub fn peak_index(&self) -> Option<usize> {
        let mut peak: Option<(usize, f64)> = None;
        for (index, sample) in self.samples.iter().enumerate() {
            match peak {
                Some((_, stress)) if sample.stress <= stress => {}
                _ => peak = Some((index, sample.stress)),
            }
        }
        peak.map(|(index, _)| index)
    }

    /// First sample carrying the maximum stress.
    #[must_use]
    pub fn peak(&self) -> Option<StressStrainSample> {
        self.peak_index().map(|index| self.samples[index])
    }
}

impl TryFrom<Vec<StressStrainSample>> for StressStrainCurve {
    type Error = CurveError;

    fn try_from(value: Vec<StressStrainSample>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StressStrainCurve> for Vec<StressStrainSample> {
    fn from(value: StressStrainCurve) -> Self {
        value.samples
    }
}

/// Three-segment curve shape used when no recorded test history exists.
///
/// Stress rises linearly with `young_modulus` up to `yield_strength`, hardens
/// linearly to `peak_strength` at `peak_strain`, then softens linearly to
/// `residual_strength` at `final_strain`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCurve {
    /// Slope of the elastic segment.
    pub young_modulus: f64,
    /// Stress at the end of the elastic segment.
    pub yield_strength: f64,
    /// Maximum stress reached.
    pub peak_strength: f64,
    /// Strain at the peak.
    pub peak_strain: f64,
    /// Stress at the last sample.
    pub residual_strength: f64,
    /// Strain at the last sample.
    pub final_strain: f64,
    /// Number of evenly spaced samples to generate.
    pub samples: usize,
}

impl Default for SyntheticCurve {
    fn default() -> Self {
        Self {
            young_modulus: 50_000.0,
            yield_strength: 150.0,
            peak_strength: 200.0,
            peak_strain: 0.008,
            residual_strength: 140.0,
            final_strain: 0.015,
            samples: 61,
        }
    }
}

impl SyntheticCurve {
    /// Strain at which the elastic segment ends.
    #[must_use]
    pub fn yield_strain(&self) -> f64 {
        self.yield_strength / self.young_modulus
    }

    /// Stress on the three-segment shape at `strain`.
    #[must_use]
    pub fn stress_at(&self, strain: f64) -> f64 {
        let yield_strain = self.yield_strain();
        if strain <= yield_strain {
            self.young_modulus * strain
        } else if strain <= self.peak_strain {
            let t = (strain - yield_strain) / (self.peak_strain - yield_strain);
            self.yield_strength + t * (self.peak_strength - self.yield_strength)
        } else {
            let t = ((strain - self.peak_strain) / (self.final_strain - self.peak_strain)).min(1.0);
            self.peak_strength + t * (self.residual_strength - self.peak_strength)
        }
    }

    /// Sample the shape into a [`StressStrainCurve`].
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSyntheticCurve`] when the segments are out of
    /// order or a strength is not positive.
    ///
    /// # Examples
    /// ```
    /// use mohrx::SyntheticCurve;
    ///
    /// let curve = SyntheticCurve::default().generate().unwrap();
    /// assert_eq!(curve.len(), 61);
    /// assert!((curve.peak().unwrap().stress - 200.0).abs() < 1.0e-6);
    /// ```
    pub fn generate(&self) -> Result<StressStrainCurve, CurveError> {
        self.validate()?;
        let last = (self.samples - 1) as f64;
        let samples = (0..self.samples)
            .map(|index| {
                let strain = self.final_strain * index as f64 / last;
                StressStrainSample::new(strain, self.stress_at(strain))
            })
            .collect();
        StressStrainCurve::new(samples)
    }

    /// Check the segment ordering.
    fn validate(&self) -> Result<(), CurveError> {
        let reason = if !exceeds(self.young_modulus, 0.0) {
            "young modulus must be positive"
        } else if !exceeds(self.yield_strength, 0.0) {
            "yield strength must be positive"
        } else if !reaches(self.peak_strength, self.yield_strength) {
            "peak strength must not be below yield strength"
        } else if !exceeds(self.peak_strain, self.yield_strain()) {
            "peak strain must exceed yield strain"
        } else if !exceeds(self.final_strain, self.peak_strain) {
            "final strain must exceed peak strain"
        } else if !reaches(self.residual_strength, 0.0)
            || !reaches(self.peak_strength, self.residual_strength)
        {
            "residual strength must lie between zero and peak strength"
        } else if self.samples < 2 {
            "at least two samples are required"
        } else {
            return Ok(());
        };
        Err(CurveError::InvalidSyntheticCurve { reason })
    }
}

/// `value > bound`, false when either side is NaN.
fn exceeds(value: f64, bound: f64) -> bool {
    value.partial_cmp(&bound) == Some(Ordering::Greater)
}

/// `value >= bound`, false when either side is NaN.
fn reaches(value: f64, bound: f64) -> bool {
    matches!(
        value.partial_cmp(&bound),
        Some(Ordering::Greater | Ordering::Equal)
    )
}
