use mohrx::{CalibrationParameters, FailureState, MaterialCalibrator, StressStrainCurve};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Record a short stress-strain history: elastic rise, then a softening tail
    let curve = StressStrainCurve::from_pairs(&[
        (0.0000, 0.0),
        (0.0001, 4.0),
        (0.0002, 8.0),
        (0.0003, 12.0),
        (0.0004, 16.0),
        (0.0005, 20.0),
        (0.0030, 95.0),
        (0.0050, 110.0),
        (0.0060, 90.0),
        (0.0070, 80.0),
        (0.0080, 75.0),
    ])?;

    // Stresses read when the specimen failed
    let failure = FailureState::new(160.0, 50.0, 45.0, 0.005);

    // Calibrate, starting from the default estimates
    let parameters =
        MaterialCalibrator::new().calibrate(&curve, &CalibrationParameters::default(), &failure)?;

    println!("E     = {:.1}", parameters.young_modulus);
    println!("nu    = {:.3}", parameters.poisson_ratio);
    println!("yield = {:.2}", parameters.yield_strength);
    println!("peak  = {:.2}", parameters.brittle_strength);
    println!("phi   = {:.2} deg", parameters.friction_angle_deg);
    println!("c     = {:.2}", parameters.cohesion);

    // All done
    Ok(())
}
