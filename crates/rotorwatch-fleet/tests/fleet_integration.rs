//! End-to-end fleet monitoring runs against the simulated sensors.

use std::time::Duration;

use rotorwatch_core::{MonitorConfig, SinkKind};
use rotorwatch_fleet::FleetMonitor;

fn small_config(cycles: u32, capacity: usize) -> MonitorConfig {
    MonitorConfig::builder()
        .history_capacity(capacity)
        .cycles_per_run(cycles)
        .cycle_delay(Duration::ZERO)
        .sink(SinkKind::Local)
        .degrading_machine("EQP-002")
        .build()
        .unwrap()
}

#[tokio::test]
async fn fleet_run_preserves_history_invariants() {
    let monitor = FleetMonitor::new(small_config(20, 16));
    let store = monitor.store();

    monitor.run().await;

    let machines = store.list_machines();
    assert_eq!(machines.len(), 3);

    for machine_id in &machines {
        let history = store.get_history(machine_id);

        // 20 cycles through a 16-slot ring leaves exactly 16 entries.
        assert_eq!(history.len(), 16);
        assert_eq!(history.health.len(), history.anomaly.len());
        assert_eq!(history.health.len(), history.rul.len());
        assert_eq!(history.health.len(), history.timestamps.len());
        assert_eq!(history.health.len(), history.features.len());

        for (i, &health) in history.health.iter().enumerate() {
            assert!(
                health > 0.0 && health <= 1.0,
                "{machine_id} entry {i}: health out of range: {health}"
            );
        }
        for &score in &history.anomaly {
            assert!(score >= 0.0);
        }
        for &rul in &history.rul {
            assert!(rul >= 0.0);
        }
        for pair in history.timestamps.windows(2) {
            assert!(pair[1] >= pair[0], "{machine_id}: timestamps regressed");
        }

        let latest = store.latest(machine_id).unwrap();
        assert!((latest.health - *history.health.last().unwrap()).abs() < f64::EPSILON);
    }
}

#[tokio::test]
async fn simulated_fleet_scores_anomalous_against_default_baseline() {
    // The simulated machines run around health 0.4 while the default
    // baseline is calibrated at 0.1 +/- 0.05, so every cycle should
    // score well past the 3-sigma trigger.
    let monitor = FleetMonitor::new(small_config(5, 16));
    let store = monitor.store();

    monitor.run().await;

    for machine_id in store.list_machines() {
        let history = store.get_history(&machine_id);
        assert!(
            history.anomaly.iter().all(|&score| score >= 3.0),
            "{machine_id}: expected every cycle above the z threshold"
        );
    }
}

#[tokio::test]
async fn degrading_machine_loses_health_over_the_run() {
    let cycles = 150;
    let monitor = FleetMonitor::new(small_config(cycles, cycles as usize));
    let store = monitor.store();

    monitor.run().await;

    let history = store.get_history(&"EQP-002".into());
    assert_eq!(history.len(), cycles as usize);

    let early: f64 = history.health[..10].iter().sum::<f64>() / 10.0;
    let late: f64 = history.health[history.len() - 10..].iter().sum::<f64>() / 10.0;
    assert!(
        late < early,
        "degrading machine should trend less healthy: {early} -> {late}"
    );

    // The healthy neighbours should not show the same trend magnitude.
    let healthy = store.get_history(&"EQP-001".into());
    let healthy_early: f64 = healthy.health[..10].iter().sum::<f64>() / 10.0;
    let healthy_late: f64 = healthy.health[healthy.len() - 10..].iter().sum::<f64>() / 10.0;
    assert!(
        (healthy_early - healthy_late).abs() < (early - late),
        "healthy drift should be smaller than degrading drift"
    );
}
