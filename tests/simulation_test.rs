//! End-to-end simulation tests
//!
//! These drive the full traffic population through the library at a
//! reduced timescale, then smoke-test the compiled binary the way it is
//! run by hand.

use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use bridge_sim::simulation::{run_simulation, SimConfig, StreamTiming};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A configuration scaled from seconds down to milliseconds so a whole
/// population crosses in well under a minute
fn fast_config(cars_per_direction: u32, pedestrians: u32, seed: u64) -> SimConfig {
    SimConfig {
        cars_per_direction,
        pedestrians,
        car_arrival_mean_secs: 0.003,
        ped_arrival_mean_secs: 0.010,
        car_crossing_mean_secs: 0.004,
        car_crossing_std_secs: 0.002,
        ped_crossing_mean_secs: 0.012,
        ped_crossing_std_secs: 0.004,
        seed: Some(seed),
    }
}

#[test]
fn test_full_population_crosses_without_conflicts() {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(run_simulation(&fast_config(100, 10, 7)));
    });
    let report = rx
        .recv_timeout(Duration::from_secs(120))
        .expect("simulation deadlocked")
        .expect("simulation failed");

    assert_eq!(report.cars_north, 100);
    assert_eq!(report.cars_south, 100);
    assert_eq!(report.pedestrians, 10);
    assert_eq!(report.total_crossings(), 210);
    assert_eq!(
        report.class_conflicts, 0,
        "rival classes overlapped on the bridge"
    );
    assert!(report.wall_clock > Duration::ZERO);
}

#[test]
fn test_empty_population_completes_immediately() {
    let report = run_simulation(&fast_config(0, 0, 1)).expect("simulation failed");
    assert_eq!(report.total_crossings(), 0);
    assert_eq!(report.class_conflicts, 0);
    assert_eq!(report.longest_wait, Duration::ZERO);
}

#[test]
fn test_rejects_unusable_configuration() {
    let mut config = fast_config(1, 1, 1);
    config.car_arrival_mean_secs = 0.0;
    assert!(run_simulation(&config).is_err());

    let mut config = fast_config(1, 1, 1);
    config.ped_crossing_std_secs = -1.0;
    assert!(run_simulation(&config).is_err());

    let mut config = fast_config(1, 1, 1);
    config.car_crossing_mean_secs = f64::NAN;
    assert!(run_simulation(&config).is_err());
}

#[test]
fn test_seeded_timing_is_reproducible() {
    let mut first = StreamTiming::new(0.5, 1.0, 0.5, StdRng::seed_from_u64(9)).unwrap();
    let mut second = StreamTiming::new(0.5, 1.0, 0.5, StdRng::seed_from_u64(9)).unwrap();

    for _ in 0..32 {
        assert_eq!(first.next_arrival_gap(), second.next_arrival_gap());
        assert_eq!(first.next_crossing_time(), second.next_crossing_time());
    }
}

/// Test that the binary runs a small population and logs the summary
#[test]
fn test_binary_reports_summary_statistics() {
    let output = Command::new("cargo")
        .args(&[
            "run",
            "--",
            "--cars",
            "4",
            "--pedestrians",
            "2",
            "--car-interval",
            "0.005",
            "--ped-interval",
            "0.01",
            "--car-time",
            "0.01",
            "--car-time-std",
            "0.003",
            "--ped-time",
            "0.02",
            "--ped-time-std",
            "0.005",
            "--seed",
            "11",
        ])
        .env("RUST_LOG", "warn,bridge_sim=info")
        .output()
        .expect("Failed to execute simulation");

    assert!(
        output.status.success(),
        "Simulation failed to run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Cars crossed north: 4"),
        "Missing north car total. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Cars crossed south: 4"),
        "Missing south car total. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Pedestrians crossed: 2"),
        "Missing pedestrian total. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Total crossings: 10"),
        "Missing total crossings. stderr: {}",
        stderr
    );
}

/// Test that a contended binary run stays conflict free
#[test]
fn test_binary_run_is_conflict_free() {
    let output = Command::new("cargo")
        .args(&[
            "run",
            "--",
            "--cars",
            "20",
            "--pedestrians",
            "3",
            "--car-interval",
            "0.003",
            "--ped-interval",
            "0.008",
            "--car-time",
            "0.006",
            "--car-time-std",
            "0.002",
            "--ped-time",
            "0.015",
            "--ped-time-std",
            "0.004",
            "--seed",
            "23",
        ])
        .env("RUST_LOG", "warn,bridge_sim=info")
        .output()
        .expect("Failed to execute simulation");

    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);

    // Extract the conflict count from the summary line
    let conflicts_line = stderr
        .lines()
        .find(|line| line.contains("Class conflicts:"))
        .expect("Could not find 'Class conflicts' line");

    // Parse the number - handle log format with timestamp
    let parts: Vec<&str> = conflicts_line.split("Class conflicts:").collect();
    let conflicts: usize = parts
        .get(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse conflict count");

    assert_eq!(conflicts, 0, "Rival classes overlapped on the bridge");
}
