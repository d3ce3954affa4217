use mohrx::{
    analytical_failure_point, circle_for, tangency_point, tangent_line, FailureEnvelope,
    StressState,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let envelope = FailureEnvelope::new(15.0, 32.0);

    for axial in [60.0, 120.0, 180.0] {
        let circle = circle_for(StressState::new(20.0, axial));
        let tangency = tangency_point(circle, envelope);
        let projection = analytical_failure_point(circle, envelope);
        let tangent = tangent_line(circle, tangency);
        println!(
            "axial = {axial:>5.1}: tangency ({:.2}, {:.2}) slope {:+.3}, projection ({:.2}, {:.2})",
            tangency.sigma, tangency.tau, tangent.slope, projection.sigma, projection.tau
        );
    }

    let config = serde_json::to_string_pretty(&envelope)?;
    println!("{config}");

    Ok(())
}
