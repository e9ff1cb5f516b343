//! Command-line flags.  Every flag is optional and overrides the value from
//! `--config` (or the built-in default).

use std::path::PathBuf;

use br_core::{CrossingConfig, Side, SimRng};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "bridge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Two-sided single-lane crossing simulation",
    long_about = "Occupants arrive on both sides of a single-lane bridge and take turns \
                  crossing.  Each turn admits a window of occupants from one side, lets \
                  them cross, then hands the bridge to the other side."
)]
pub struct Cli {
    /// TOML file with simulation settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Slots in each approach queue
    #[arg(long)]
    pub approach_capacity: Option<usize>,

    /// Slots on the bridge itself
    #[arg(long)]
    pub transit_capacity: Option<usize>,

    /// Window for the first turn
    #[arg(long)]
    pub initial_window: Option<usize>,

    /// Completed crossings before the run stops
    #[arg(short, long)]
    pub target: Option<u64>,

    /// Length of one time unit in milliseconds
    #[arg(long)]
    pub unit_ms: Option<u64>,

    /// Real seconds per simulated second (0 runs without sleeping)
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Units to wait before the first turn
    #[arg(long)]
    pub startup_delay: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Side served by the first turn
    #[arg(long, value_enum)]
    pub direction: Option<Direction>,

    #[arg(long)]
    pub left_preload: Option<usize>,

    #[arg(long)]
    pub right_preload: Option<usize>,

    /// Preload each side with 4 to 6 occupants chosen from the seed
    #[arg(long, conflicts_with_all = ["left_preload", "right_preload"])]
    pub random_preload: bool,

    /// Do not generate arrivals on the left
    #[arg(long)]
    pub no_left_arrivals: bool,

    /// Do not generate arrivals on the right
    #[arg(long)]
    pub no_right_arrivals: bool,

    /// Write events.csv and epochs.csv into this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Skip the per-event status lines
    #[arg(long)]
    pub no_display: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Left,
    Right,
}

impl From<Direction> for Side {
    fn from(d: Direction) -> Side {
        match d {
            Direction::Left  => Side::Left,
            Direction::Right => Side::Right,
        }
    }
}

impl Cli {
    /// Layer the flags over `config`.
    pub fn apply(&self, config: &mut CrossingConfig) {
        if let Some(v) = self.approach_capacity {
            config.approach_capacity = v;
        }
        if let Some(v) = self.transit_capacity {
            config.transit_capacity = v;
        }
        if let Some(v) = self.initial_window {
            config.initial_window = v;
        }
        if let Some(v) = self.target {
            config.target_crossings = v;
        }
        if let Some(v) = self.unit_ms {
            config.unit_latency_ms = v;
        }
        if let Some(v) = self.time_scale {
            config.time_scale = v;
        }
        if let Some(v) = self.startup_delay {
            config.startup_delay_units = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(d) = self.direction {
            config.initial_direction = d.into();
        }
        if let Some(v) = self.left_preload {
            config.left.preload = v;
        }
        if let Some(v) = self.right_preload {
            config.right.preload = v;
        }
        if self.random_preload {
            let mut rng = SimRng::new(config.seed);
            for side in Side::BOTH {
                config.side_mut(side).preload = rng.gen_range(4..=6);
            }
        }
        if self.no_left_arrivals {
            config.left.enabled = false;
        }
        if self.no_right_arrivals {
            config.right.enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bridge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_keep_config() {
        let mut cfg = CrossingConfig::default();
        parse(&[]).apply(&mut cfg);
        assert_eq!(cfg, CrossingConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = CrossingConfig::default();
        parse(&["--target", "12", "--direction", "right", "--time-scale", "0", "--no-left-arrivals"])
            .apply(&mut cfg);
        assert_eq!(cfg.target_crossings, 12);
        assert_eq!(cfg.initial_direction, Side::Right);
        assert_eq!(cfg.time_scale, 0.0);
        assert!(!cfg.left.enabled);
        assert!(cfg.right.enabled);
    }

    #[test]
    fn random_preload_stays_in_range_and_follows_seed() {
        let mut a = CrossingConfig::default();
        let mut b = CrossingConfig::default();
        parse(&["--random-preload", "--seed", "9"]).apply(&mut a);
        parse(&["--random-preload", "--seed", "9"]).apply(&mut b);
        for side in Side::BOTH {
            assert!((4..=6).contains(&a.side(side).preload));
            assert_eq!(a.side(side).preload, b.side(side).preload);
        }
    }

    #[test]
    fn random_preload_conflicts_with_explicit_preload() {
        let args = ["bridge", "--random-preload", "--left-preload", "2"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
