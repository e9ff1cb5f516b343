//! bridge — runs the two-sided single-lane crossing simulation.
//!
//! Settings come from the built-in defaults, then `--config <file.toml>`,
//! then individual flags.  Status lines go to stdout; logs go to stderr.
//!
//! ```text
//! bridge --target 40 --time-scale 0.2 --log-dir output/bridge -v
//! ```

mod cli;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use br_core::{CrossingConfig, Side};
use br_output::{CsvWriter, EventLogObserver, TerminalRenderer};
use br_sim::{NoopObserver, RunReport, SimBuilder};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    // 1. Configuration: defaults → file → flags.
    let mut config = match &cli.config {
        Some(path) => CrossingConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CrossingConfig::default(),
    };
    cli.apply(&mut config);
    info!(?config, "configuration resolved");

    // 2. Build.
    let sim = SimBuilder::new(config).build()?;

    // 3. Output.
    let mut screen = (!cli.no_display).then(|| TerminalRenderer::new(io::stdout()));
    let mut log = match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            Some(EventLogObserver::new(CsvWriter::new(dir)?))
        }
        None => None,
    };

    // 4. Run.
    let t0 = Instant::now();
    let report = match (&mut screen, &mut log) {
        (Some(s), Some(l)) => sim.run(&mut (s, l))?,
        (Some(s), None)    => sim.run(s)?,
        (None, Some(l))    => sim.run(l)?,
        (None, None)       => sim.run(&mut NoopObserver)?,
    };
    let wall = t0.elapsed();

    if let Some(e) = screen.as_mut().and_then(TerminalRenderer::take_error) {
        eprintln!("display error: {e}");
    }
    if let Some(e) = log.as_mut().and_then(EventLogObserver::take_error) {
        eprintln!("event log error: {e}");
    }

    // 5. Summary.
    print_summary(&report, wall.as_secs_f64());
    if let Some(dir) = &cli.log_dir {
        println!("Event log written to {}", dir.display());
    }
    Ok(())
}

fn print_summary(report: &RunReport, wall_secs: f64) {
    println!();
    println!(
        "Completed {}/{} crossings in {} turns ({:.3} s simulated, {:.3} s wall)",
        report.completed,
        report.target,
        report.epochs.len(),
        report.elapsed_secs,
        wall_secs,
    );
    println!();
    println!("{:<8} {:>8} {:>8} {:>8} {:>8} {:>8}", "Side", "Arrived", "Refused", "Turns", "Crossed", "Waiting");
    println!("{}", "-".repeat(53));
    for side in Side::BOTH {
        let i = side.index();
        println!(
            "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            side.as_str(),
            report.arrivals[i],
            report.refused[i],
            report.epochs_for(side).count(),
            report.crossed_from(side),
            report.waiting[i],
        );
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
