// Algoscope: step-through algorithm visualizer for the terminal

use std::io;

use algoscope::config::{Cli, Config, Mode};
use algoscope::controller::compute_trace_with_limit;
use algoscope::logging::{init_logging, LogTarget};
use algoscope::registry::registry;
use algoscope::session::Session;
use algoscope::ui::{install_panic_hook, App, TerminalGuard};
use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Run with --list to see the available problems and their inputs.");
            std::process::exit(2);
        }
    };

    // The TUI owns the terminal, so it logs to a file
    let target = match config.mode {
        Mode::Interactive => LogTarget::File(&config.log_file),
        Mode::List | Mode::Dump => LogTarget::Stderr,
    };
    init_logging(config.log_level.as_deref(), config.log_format, target)?;

    match config.mode {
        Mode::List => print_catalog(),
        Mode::Dump => {
            let trace = compute_trace_with_limit(config.problem, &config.inputs, config.max_steps);
            if trace.is_empty() {
                error!(problem = config.problem.id, "inputs produced no trace");
            }
            println!("{}", serde_json::to_string_pretty(&trace)?);
        }
        Mode::Interactive => run_tui(config)?,
    }

    Ok(())
}

fn print_catalog() {
    for category in registry().categories() {
        println!("{}", category.title);
        if category.problems.is_empty() {
            println!("  (no problems yet)");
        }
        for problem in &category.problems {
            let inputs = problem
                .inputs
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {:<34} {}  [{}]", problem.id, problem.title, inputs);
        }
    }
}

fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        problem = config.problem.id,
        log_file = %config.log_file.display(),
        "starting terminal UI"
    );
    install_panic_hook();

    let session = Session::with_inputs(config.problem, config.inputs, config.speed, config.max_steps);

    // Set up terminal; the guard restores it on every exit path
    let mut guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    guard.cleanup()?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal UI failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
