//! Unit tests for br-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EpochId, OccupantId, OccupantIssuer};

    #[test]
    fn issuer_starts_at_one_and_increments() {
        let issuer = OccupantIssuer::new();
        assert_eq!(issuer.issue(), OccupantId(1));
        assert_eq!(issuer.issue(), OccupantId(2));
        assert_eq!(issuer.issued(), 2);
    }

    #[test]
    fn issuer_is_unique_across_threads() {
        let issuer = OccupantIssuer::new();
        let mut all: Vec<OccupantId> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..250).map(|_| issuer.issue()).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 1000);
        assert_eq!(all[0], OccupantId::FIRST);
    }

    #[test]
    fn next_and_display() {
        assert_eq!(EpochId::FIRST.next(), EpochId(2));
        assert_eq!(OccupantId(7).to_string(), "OccupantId#7");
    }

    #[test]
    fn occupant_ids_go_past_u32() {
        let past = OccupantId(u64::from(u32::MAX)).next();
        assert_eq!(past.0, 1 << 32);
        assert_ne!(past, OccupantId(0));
        assert_eq!(OccupantIssuer::new().issued(), 0);
    }
}

#[cfg(test)]
mod side {
    use crate::Side;

    #[test]
    fn opposite_is_involution() {
        for side in Side::BOTH {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn index_roundtrip() {
        for side in Side::BOTH {
            assert_eq!(Side::from_index(side.index()), side);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.arrow(), "R→L");
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Pacer, SimClock};

    #[test]
    fn pacer_scales_units() {
        let pacer = Pacer::new(Duration::from_millis(50), 0.5);
        assert_eq!(pacer.simulated(2.0), Duration::from_millis(100));
        assert_eq!(pacer.real(2.0), Duration::from_millis(50));
    }

    #[test]
    fn zero_scale_never_sleeps() {
        let pacer = Pacer::new(Duration::from_secs(10), 0.0);
        assert_eq!(pacer.real(100.0), Duration::ZERO);
        pacer.pause(100.0); // returns immediately
    }

    #[test]
    fn negative_units_clamp_to_zero() {
        let pacer = Pacer::new(Duration::from_millis(50), 1.0);
        assert_eq!(pacer.simulated(-3.0), Duration::ZERO);
    }

    #[test]
    fn huge_delays_saturate() {
        let pacer = Pacer::new(Duration::from_millis(50), 2.0);
        assert_eq!(pacer.simulated(1.0e30), Duration::MAX);
        assert_eq!(pacer.real(1.0e30), Duration::MAX);
        assert_eq!(pacer.real(f64::INFINITY), Duration::MAX);
    }

    #[test]
    fn clock_reads_in_simulated_seconds() {
        let clock = SimClock::start(0.5);
        std::thread::sleep(Duration::from_millis(20));
        // 20 ms of wall time at half scale is at least 40 ms simulated.
        assert!(clock.elapsed_secs() >= 0.04, "got {}", clock.elapsed_secs());
    }
}

#[cfg(test)]
mod rng {
    use crate::{ArrivalProfile, ArrivalRng, Side};

    #[test]
    fn deterministic_same_seed() {
        let profile = ArrivalProfile::default();
        let mut a = ArrivalRng::new(7, Side::Left);
        let mut b = ArrivalRng::new(7, Side::Left);
        for _ in 0..100 {
            assert_eq!(a.next_gap(&profile), b.next_gap(&profile));
        }
    }

    #[test]
    fn sides_diverge() {
        let profile = ArrivalProfile::default();
        let mut l = ArrivalRng::new(7, Side::Left);
        let mut r = ArrivalRng::new(7, Side::Right);
        let ls: Vec<f64> = (0..8).map(|_| l.next_gap(&profile)).collect();
        let rs: Vec<f64> = (0..8).map(|_| r.next_gap(&profile)).collect();
        assert_ne!(ls, rs);
    }

    #[test]
    fn gap_in_bounds() {
        let profile = ArrivalProfile::new(2.0, 5.0);
        let mut rng = ArrivalRng::new(0, Side::Right);
        for _ in 0..1000 {
            let g = rng.next_gap(&profile);
            assert!((2.0..7.0).contains(&g), "got {g}");
        }
    }

    #[test]
    fn zero_spread_is_constant() {
        let profile = ArrivalProfile::new(3.0, 0.0);
        let mut rng = ArrivalRng::new(0, Side::Left);
        assert_eq!(rng.next_gap(&profile), 3.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, CrossingConfig, Side};

    #[test]
    fn defaults_are_valid() {
        let cfg = CrossingConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.approach_capacity, 20);
        assert_eq!(cfg.transit_capacity, 10);
        assert_eq!(cfg.initial_window, 3);
        assert_eq!(cfg.side(Side::Right).arrivals.spread_units, 5.0);
    }

    #[test]
    fn window_outside_range_rejected() {
        let mut cfg = CrossingConfig::default();
        cfg.initial_window = 11;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
        cfg.initial_window = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn preload_over_capacity_rejected() {
        let mut cfg = CrossingConfig::default();
        cfg.side_mut(Side::Left).preload = 21;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_time_scale_rejected() {
        let mut cfg = CrossingConfig::default();
        cfg.time_scale = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn disabled_side_may_have_zero_profile() {
        let mut cfg = CrossingConfig::default();
        let right = cfg.side_mut(Side::Right);
        right.enabled = false;
        right.arrivals.base_units = 0.0;
        right.arrivals.spread_units = 0.0;
        cfg.validate().unwrap();
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let cfg = CrossingConfig::from_toml_str(
            r#"
            target_crossings  = 40
            initial_direction = "right"

            [right]
            preload  = 2
            enabled  = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.target_crossings, 40);
        assert_eq!(cfg.initial_direction, Side::Right);
        assert_eq!(cfg.right.preload, 2);
        assert!(!cfg.right.enabled);
        assert_eq!(cfg.approach_capacity, 20);
        assert_eq!(cfg.left.preload, 5);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = CrossingConfig::from_toml_str("target_crossings = \"many\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = CrossingConfig::load(std::path::Path::new("/nonexistent/bridge.toml")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigRead { .. }));
    }
}
