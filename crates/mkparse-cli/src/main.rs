//! mkparse CLI
//!
//! A command-line tool for scanning makefiles into rules, assignments and
//! recipe commands.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig};
use cli::files::parse_all;
use cli::output::{HumanOutput, ParseReports};

#[tokio::main]
async fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    // Set up signal handling for graceful shutdown
    let terminated = Arc::new(AtomicBool::new(false));
    let terminated_clone = terminated.clone();

    tokio::spawn(async move {
        let ctrl_c = signal::ctrl_c();
        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT, shutting down...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down...");
            }
        }

        terminated_clone.store(true, Ordering::SeqCst);
    });

    let exit_code = run(args, &terminated).await;

    // Check if we were terminated by signal
    if terminated.load(Ordering::SeqCst) {
        return ExitCode::Terminated.into();
    }

    exit_code.into()
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    // The directory walker is chatty at debug level
    for directive in ["ignore=warn", "globset=warn"] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive '{}': {}", directive, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the parser with the given arguments.
async fn run(args: Args, terminated: &AtomicBool) -> ExitCode {
    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            let _ = HumanOutput::new(io::stderr().lock(), use_colors).write_error(&e.to_string());
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config);
    info!("Parsing {} makefile(s)", config.files.len());

    // Check for termination
    if terminated.load(Ordering::SeqCst) {
        return ExitCode::Terminated;
    }

    let reports = match parse_all(&config.files, &config.parser_config).await {
        Ok(reports) => ParseReports::new(reports),
        Err(e) => {
            error!("Parser task failed: {}", e);
            return ExitCode::StartupFailure;
        }
    };

    if terminated.load(Ordering::SeqCst) {
        return ExitCode::Terminated;
    }

    for report in reports.iter() {
        if let Some(message) = report.failure_message() {
            debug!("{}: {}", report.path.display(), message);
        }
    }
    debug!(
        "Parsed {} node(s) from {} file(s)",
        reports.total_nodes(),
        reports.total_files()
    );

    // Output results
    let mut stdout = io::stdout().lock();
    let written = if config.json_output {
        reports.write_json(&mut stdout)
    } else {
        reports.write_human(&mut stdout, use_colors, config.dump)
    };
    if let Err(e) = written.and_then(|()| stdout.flush()) {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    config.exit_code_for_results(reports.has_failures())
}
