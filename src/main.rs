use batchmover::cli::{Args, run_cli};
use batchmover::output::OutputFormatter;
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    let stdin = std::io::stdin();
    match run_cli(&args, stdin.lock(), std::io::stdout()) {
        Ok(report) if report.has_failures() => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            process::exit(1);
        }
    }
}
