use golf_flight_engine::config::SimulatorConfig;
use golf_flight_engine::{
    analyze_swing, analyze_trajectory, estimate_launch, simulate_trajectory, ClubSpec, ClubTable,
    FlightError, LaunchConditions, ShotSimulator, SwingSample,
};
use nalgebra::Vector3;

const G: f64 = 9.81;

fn swing_with_peak(peak_rate: f64, club: &str) -> Vec<SwingSample> {
    [0.4, 0.8, 1.0, 0.6]
        .iter()
        .enumerate()
        .map(|(i, f)| {
            SwingSample::new(
                i as u64 * 10,
                Vector3::new(2.0 * f, 1.0, 9.8),
                Vector3::new(0.0, peak_rate * f, 0.0),
                club,
                "tester",
            )
        })
        .collect()
}

#[test]
fn test_seven_iron_full_pipeline() {
    let config = SimulatorConfig::default();
    let samples = swing_with_peak(180.0, "7-Iron");

    let swing = analyze_swing(&samples, &config.swing);
    assert!((swing.club_head_speed - 90.0).abs() < 1e-9);

    let estimate = estimate_launch(&swing, "7-Iron", ClubTable::standard(), &config.launch);
    let launch = estimate.conditions;
    assert!(!estimate.club.fell_back);
    assert!((launch.ball_speed - 126.0).abs() < 1e-9);
    assert!((launch.launch_angle - 23.8).abs() < 1e-9);
    assert!((launch.spin_rate - 9000.0).abs() < 1e-9);

    let trajectory = simulate_trajectory(&launch, &config).unwrap();
    let metrics = analyze_trajectory(&trajectory).unwrap();

    let (_, vy0) = launch.velocity_components();
    let vacuum_apex = vy0 * vy0 / (2.0 * G);
    assert!(metrics.carry_distance > 0.0);
    assert!(metrics.apex_height > 0.0);
    assert!(metrics.apex_height < vacuum_apex);
    assert!(metrics.flight_time > 0.0);
    assert!(trajectory.last().unwrap().y <= 0.0);
}

#[test]
fn test_empty_batch_never_leaves_the_tee() {
    let result = ShotSimulator::default().simulate_shot(&[], "7-Iron").unwrap();
    assert_eq!(result.swing.club_head_speed, 0.0);
    assert_eq!(result.launch.ball_speed, 0.0);
    assert_eq!(result.trajectory.len(), 1);
    assert_eq!(result.metrics.carry_distance, 0.0);
    assert_eq!(result.metrics.apex_height, 0.0);
}

#[test]
fn test_flat_launch_ends_within_two_steps() {
    let launch = LaunchConditions::new(50.0, 0.0, 0.0);
    let trajectory = simulate_trajectory(&launch, &SimulatorConfig::default()).unwrap();
    assert!(trajectory.len() <= 3);
    assert!(trajectory.last().unwrap().y <= 0.0);
}

#[test]
fn test_runs_are_repeatable() {
    let sim = ShotSimulator::default();
    let samples = swing_with_peak(150.0, "5-Iron");
    let a = sim.simulate_shot(&samples, "5-Iron").unwrap();
    let b = sim.simulate_shot(&samples, "5-Iron").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_apex_bounds_every_height() {
    let sim = ShotSimulator::default();
    for club in ClubTable::standard().iter() {
        let result = sim.simulate_shot(&swing_with_peak(160.0, &club.name), &club.name).unwrap();
        assert!(result.trajectory.iter().all(|p| p.y <= result.metrics.apex_height));
        assert!(result.metrics.apex_height >= 0.0);
    }
}

#[test]
fn test_carry_non_negative_for_upward_launches() {
    let config = SimulatorConfig::default();
    for angle in [1.0, 10.0, 25.0, 45.0, 60.0, 80.0, 89.0] {
        let launch = LaunchConditions::new(60.0, angle, 3000.0);
        let trajectory = simulate_trajectory(&launch, &config).unwrap();
        let metrics = analyze_trajectory(&trajectory).unwrap();
        assert!(metrics.carry_distance >= 0.0, "angle {}", angle);
    }
}

#[test]
fn test_every_standard_club_lands() {
    let sim = ShotSimulator::default();
    for rate in [60.0, 120.0, 180.0, 240.0] {
        for club in ClubTable::standard().iter() {
            let result = sim.simulate_shot(&swing_with_peak(rate, &club.name), &club.name);
            assert!(result.is_ok(), "{} at peak rate {} did not land", club.name, rate);
        }
    }
}

#[test]
fn test_more_loft_flies_higher() {
    let sim = ShotSimulator::default();
    let samples = swing_with_peak(180.0, "");
    let three = sim.simulate_shot(&samples, "3-Iron").unwrap();
    let wedge = sim.simulate_shot(&samples, "P-Wedge").unwrap();
    assert!(wedge.metrics.apex_height > three.metrics.apex_height);
    assert!(wedge.launch.launch_angle > three.launch.launch_angle);
}

#[test]
fn test_unknown_club_falls_back_to_default() {
    let sim = ShotSimulator::default();
    let samples = swing_with_peak(180.0, "Spoon");
    let fallback = sim.simulate_shot(&samples, "Spoon").unwrap();
    let seven = sim.simulate_shot(&samples, "7-Iron").unwrap();
    assert!(fallback.club.fell_back);
    assert_eq!(fallback.club.requested, "Spoon");
    assert_eq!(fallback.metrics, seven.metrics);
}

#[test]
fn test_custom_club_table() {
    let clubs = ClubTable::new(
        vec![ClubSpec::new("Hybrid", 19.0, 190.0), ClubSpec::new("Lob-Wedge", 60.0, 60.0)],
        "Hybrid",
    )
    .unwrap();
    let sim = ShotSimulator::new(SimulatorConfig::default(), clubs).unwrap();
    let samples = swing_with_peak(140.0, "Lob-Wedge");

    let lob = sim.simulate_shot(&samples, "Lob-Wedge").unwrap();
    assert!((lob.launch.launch_angle - 42.0).abs() < 1e-9);

    let missing = sim.simulate_shot(&samples, "7-Iron").unwrap();
    assert!(missing.club.fell_back);
    assert_eq!(missing.club.used.name, "Hybrid");
}

#[test]
fn test_ceiling_reports_no_ground_contact() {
    let mut config = SimulatorConfig::default();
    config.ball.lift_coefficient = 0.25;
    let result = simulate_trajectory(&LaunchConditions::new(126.0, 23.8, 9000.0), &config);
    match result {
        Err(FlightError::NoGroundContact { steps, .. }) => assert_eq!(steps, 6000),
        other => panic!("expected NoGroundContact, got {:?}", other),
    }
}
