//! Tunable parameters for every stage of the simulator.
//!
//! All groups default to the constants in [`crate::constants`] and
//! deserialize with `#[serde(default)]`, so a JSON file only needs to name
//! the values it overrides.

use crate::constants::*;
use crate::error::FlightError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Linear scale factors used by the swing analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingScaling {
    pub club_head_speed_per_rate: f64,
    pub impact_force_per_accel: f64,
}

impl Default for SwingScaling {
    fn default() -> Self {
        Self {
            club_head_speed_per_rate: CLUB_HEAD_SPEED_PER_RATE,
            impact_force_per_accel: IMPACT_FORCE_PER_ACCEL,
        }
    }
}

/// First-order launch model constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchModel {
    pub smash_factor: f64,
    pub launch_angle_factor: f64,
    pub spin_per_speed: f64,  // rpm per m/s of club-head speed
}

impl Default for LaunchModel {
    fn default() -> Self {
        Self {
            smash_factor: SMASH_FACTOR,
            launch_angle_factor: LAUNCH_ANGLE_PER_LOFT,
            spin_per_speed: SPIN_RPM_PER_SPEED,
        }
    }
}

/// Ball geometry and aerodynamic coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallProperties {
    pub mass_kg: f64,
    pub radius_m: f64,
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
}

impl Default for BallProperties {
    fn default() -> Self {
        Self {
            mass_kg: BALL_MASS_KG,
            radius_m: BALL_RADIUS_M,
            drag_coefficient: BALL_DRAG_COEFFICIENT,
            lift_coefficient: BALL_LIFT_COEFFICIENT,
        }
    }
}

impl BallProperties {
    /// Cross-sectional area (m²)
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius_m * self.radius_m
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub air_density: f64,  // kg/m³
    pub gravity: f64,      // m/s²
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            air_density: AIR_DENSITY_SEA_LEVEL,
            gravity: GRAVITY_MPS2,
        }
    }
}

/// Fixed-step integration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub time_step: f64,
    pub max_flight_time: f64,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP_S,
            max_flight_time: MAX_FLIGHT_TIME_S,
        }
    }
}

impl IntegrationSettings {
    /// Number of steps allowed before integration is abandoned
    pub fn max_steps(&self) -> usize {
        (self.max_flight_time / self.time_step).ceil() as usize
    }
}

/// Complete simulator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub swing: SwingScaling,
    pub launch: LaunchModel,
    pub ball: BallProperties,
    pub atmosphere: Atmosphere,
    pub integration: IntegrationSettings,
}

impl SimulatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FlightError> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FlightError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<(), FlightError> {
        let positive = [
            ("ball.mass_kg", self.ball.mass_kg),
            ("ball.radius_m", self.ball.radius_m),
            ("atmosphere.air_density", self.atmosphere.air_density),
            ("atmosphere.gravity", self.atmosphere.gravity),
            ("integration.time_step", self.integration.time_step),
            ("integration.max_flight_time", self.integration.max_flight_time),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlightError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("swing.club_head_speed_per_rate", self.swing.club_head_speed_per_rate),
            ("swing.impact_force_per_accel", self.swing.impact_force_per_accel),
            ("launch.smash_factor", self.launch.smash_factor),
            ("launch.launch_angle_factor", self.launch.launch_angle_factor),
            ("launch.spin_per_speed", self.launch.spin_per_speed),
            ("ball.drag_coefficient", self.ball.drag_coefficient),
            ("ball.lift_coefficient", self.ball.lift_coefficient),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlightError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SimulatorConfig::default();
        assert_eq!(config.launch.smash_factor, 1.4);
        assert_eq!(config.swing.club_head_speed_per_rate, 0.5);
        assert_eq!(config.integration.time_step, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_steps_from_ceiling() {
        let settings = IntegrationSettings::default();
        assert_eq!(settings.max_steps(), 6000);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = SimulatorConfig::from_json_str(
            r#"{ "launch": { "smash_factor": 1.5 }, "ball": { "drag_coefficient": 0.25 } }"#,
        )
        .unwrap();
        assert_eq!(config.launch.smash_factor, 1.5);
        assert_eq!(config.launch.launch_angle_factor, 0.7);
        assert_eq!(config.ball.drag_coefficient, 0.25);
        assert_eq!(config.ball.mass_kg, BALL_MASS_KG);
    }

    #[test]
    fn test_rejects_zero_time_step() {
        let result = SimulatorConfig::from_json_str(r#"{ "integration": { "time_step": 0.0 } }"#);
        assert!(matches!(result, Err(FlightError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_negative_smash_factor() {
        let mut config = SimulatorConfig::default();
        config.launch.smash_factor = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ball_area() {
        let ball = BallProperties::default();
        assert!((ball.area() - 0.001432).abs() < 1e-6);
    }
}
