use crate::analysis::AnalysisSummary;
use std::fmt::Write;

/// Render a textual summary of the triaxial analysis.
///
/// The report lists the calibrated parameters first, then the failure
/// geometry, so the numbers can be checked by hand against a Mohr diagram.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();
    let parameters = &summary.parameters;

    writeln!(&mut output, "Triaxial calibration").expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Elastic: E = {:.1}, nu = {:.3}",
        parameters.young_modulus, parameters.poisson_ratio
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Strength: yield = {:.2}, brittle = {:.2}",
        parameters.yield_strength, parameters.brittle_strength
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Envelope: c = {:.2}, phi = {:.2} deg",
        summary.envelope.cohesion, summary.envelope.friction_angle_deg
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Mohr circle: center = {:.2}, radius = {:.2}",
        summary.circle.center, summary.circle.radius
    )
    .expect("writing to string cannot fail");

    // Which path produced the failure point matters when reading the numbers:
    // the tangency path and the projection path use different envelope forms.
    let path = if summary.reaches_envelope {
        "tangency"
    } else {
        "projection"
    };
    writeln!(
        &mut output,
        "Failure point ({path}): sigma = {:.2}, tau = {:.2}",
        summary.failure_point.sigma, summary.failure_point.tau
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Tangent slope: {:+.4}, envelope tau at sigma: {:.2}",
        summary.tangent.slope, summary.envelope_shear
    )
    .expect("writing to string cannot fail");

    output
}
