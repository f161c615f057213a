use std::process::ExitCode;

use sdkgen::{cli::build_cli, setup::init_tracing};

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Warning: {e}");
    }

    let matches = build_cli().get_matches();
    match sdkgen::cli::handlers::dispatch(&matches) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
