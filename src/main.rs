mod analysis;
mod conditions;
mod report;

use analysis::run_analysis;
use conditions::apply_triaxial_conditions;
use report::render_summary;
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn Error>> {
    // Calibration reports its fallbacks at debug level; show them when asked.
    let log_level = if std::env::var_os("MOHRX_DEBUG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Record a synthetic triaxial test: a stress-strain curve at fixed cell
    // pressure and the principal stresses at its peak.
    let test = apply_triaxial_conditions()?;

    // Calibrate the material and build the Mohr-Coulomb geometry at failure.
    let summary = run_analysis(&test)?;

    println!("{}", render_summary(&summary));

    Ok(())
}
