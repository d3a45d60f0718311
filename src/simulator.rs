//! End-to-end shot pipeline: swing analysis, launch estimate, flight
//! integration and trajectory analysis.

use crate::clubs::{ClubTable, ResolvedClub};
use crate::config::SimulatorConfig;
use crate::error::FlightError;
use crate::launch::{estimate_launch, LaunchConditions};
use crate::metrics::{analyze_trajectory, ShotMetrics};
use crate::swing::{analyze_swing, SwingCharacteristics, SwingSample};
use crate::trajectory::{simulate_trajectory, TrajectoryPoint};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything produced for one shot, handed to storage and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub club: ResolvedClub,
    pub swing: SwingCharacteristics,
    pub launch: LaunchConditions,
    pub trajectory: Vec<TrajectoryPoint>,
    pub metrics: ShotMetrics,
}

/// Flight of caller-supplied launch conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub launch: LaunchConditions,
    pub trajectory: Vec<TrajectoryPoint>,
    pub metrics: ShotMetrics,
}

/// Stateless simulator holding its configuration and club table
#[derive(Debug, Clone)]
pub struct ShotSimulator {
    config: SimulatorConfig,
    clubs: ClubTable,
}

impl Default for ShotSimulator {
    fn default() -> Self {
        Self {
            config: SimulatorConfig::default(),
            clubs: ClubTable::default(),
        }
    }
}

impl ShotSimulator {
    pub fn new(config: SimulatorConfig, clubs: ClubTable) -> Result<Self, FlightError> {
        config.validate()?;
        Ok(Self { config, clubs })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn clubs(&self) -> &ClubTable {
        &self.clubs
    }

    /// Run the full pipeline for one swing
    pub fn simulate_shot(
        &self,
        samples: &[SwingSample],
        club_name: &str,
    ) -> Result<ShotResult, FlightError> {
        let swing = analyze_swing(samples, &self.config.swing);
        let estimate = estimate_launch(&swing, club_name, &self.clubs, &self.config.launch);
        let flight = self.simulate_launch(&estimate.conditions)?;

        tracing::debug!(
            club = %estimate.club.used.name,
            carry = flight.metrics.carry_distance,
            apex = flight.metrics.apex_height,
            "shot simulated"
        );

        Ok(ShotResult {
            club: estimate.club,
            swing,
            launch: flight.launch,
            trajectory: flight.trajectory,
            metrics: flight.metrics,
        })
    }

    /// Integrate and analyze known launch conditions
    pub fn simulate_launch(&self, launch: &LaunchConditions) -> Result<FlightResult, FlightError> {
        let trajectory = simulate_trajectory(launch, &self.config)?;
        let metrics = analyze_trajectory(&trajectory)?;
        Ok(FlightResult {
            launch: *launch,
            trajectory,
            metrics,
        })
    }

    /// Run the same swing through several clubs, in parallel.
    ///
    /// Results come back in the order the clubs were given.
    pub fn compare_clubs(
        &self,
        samples: &[SwingSample],
        clubs: &[&str],
    ) -> Result<Vec<ShotResult>, FlightError> {
        clubs
            .par_iter()
            .map(|club| self.simulate_shot(samples, club))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn swing(rates: &[f64]) -> Vec<SwingSample> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                SwingSample::new(
                    i as u64 * 10,
                    Vector3::new(1.0, 2.0, 9.8),
                    Vector3::new(0.0, r, 0.0),
                    "7-Iron",
                    "tester",
                )
            })
            .collect()
    }

    #[test]
    fn test_simulate_shot() {
        let sim = ShotSimulator::default();
        let result = sim.simulate_shot(&swing(&[40.0, 80.0, 60.0]), "5-Iron").unwrap();
        assert_eq!(result.club.used.name, "5-Iron");
        assert!((result.swing.club_head_speed - 40.0).abs() < 1e-12);
        assert!((result.launch.ball_speed - 56.0).abs() < 1e-9);
        assert!(result.metrics.carry_distance > 0.0);
        assert_eq!(result.metrics.carry_distance, result.trajectory.last().unwrap().x);
    }

    #[test]
    fn test_empty_swing_stays_on_tee() {
        let result = ShotSimulator::default().simulate_shot(&[], "Driver").unwrap();
        assert_eq!(result.trajectory.len(), 1);
        assert_eq!(result.metrics.carry_distance, 0.0);
        assert_eq!(result.metrics.flight_time, 0.0);
    }

    #[test]
    fn test_compare_clubs_keeps_order() {
        let sim = ShotSimulator::default();
        let clubs = ["Driver", "7-Iron", "S-Wedge"];
        let results = sim.compare_clubs(&swing(&[100.0]), &clubs).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.club.used.name.as_str()).collect();
        assert_eq!(names, clubs);
        // Higher loft climbs higher with the same swing
        assert!(results[2].metrics.apex_height > results[0].metrics.apex_height);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulatorConfig::default();
        config.ball.mass_kg = 0.0;
        assert!(ShotSimulator::new(config, ClubTable::default()).is_err());
    }

    #[test]
    fn test_shot_result_serializes() {
        let result = ShotSimulator::default().simulate_shot(&swing(&[60.0]), "9-Iron").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["club"]["used"]["name"], "9-Iron");
        assert!(json["trajectory"].as_array().unwrap().len() > 1);
        assert!(json["metrics"]["carry_distance"].as_f64().unwrap() > 0.0);
    }
}
