//! Solves the configured schedule once and prints the response as JSON.

use std::process::ExitCode;

use shift_scheduling::load_config;
use shiftforge::generate_schedule;

fn run() -> Result<String, String> {
    let config = load_config().map_err(|e| format!("failed to load config: {e}"))?;
    let params = config.schedule.to_parameters().map_err(|e| e.to_string())?;
    let response = generate_schedule(&params, &config.solver).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
