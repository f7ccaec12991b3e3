use lunar_descent::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = MissionFactory::reference_descent();
    tracing::info!("Simulating {}", config.name);

    let mut lander = DescentSimulator::new(config)?;
    let mut telemetry = Telemetry::new();
    telemetry.collect_data(&lander);

    while lander.ticks() < MAX_TICKS {
        lander.step();
        telemetry.collect_data(&lander);

        if lander.status().is_terminal() {
            break;
        }
    }

    telemetry.display_data();

    if !lander.status().is_terminal() {
        return Err(Box::new(SimulationError::MissionError(format!(
            "descent did not finish within {} ticks",
            MAX_TICKS
        ))));
    }

    Ok(())
}
