use crate::clubs::{ClubTable, ResolvedClub};
use crate::config::LaunchModel;
use crate::error::FlightError;
use crate::swing::SwingCharacteristics;
use serde::{Deserialize, Serialize};

/// Ball state at the moment it leaves the club face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub ball_speed: f64,    // m/s
    pub launch_angle: f64,  // degrees
    pub spin_rate: f64,     // rpm, backspin
}

impl LaunchConditions {
    pub fn new(ball_speed: f64, launch_angle: f64, spin_rate: f64) -> Self {
        Self {
            ball_speed,
            launch_angle,
            spin_rate,
        }
    }

    /// Checks the values the integrator relies on
    pub fn validate(&self) -> Result<(), FlightError> {
        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            return Err(FlightError::InvalidLaunch(format!(
                "ball speed must be finite and non-negative, got {}",
                self.ball_speed
            )));
        }
        if !self.launch_angle.is_finite() {
            return Err(FlightError::InvalidLaunch(format!(
                "launch angle must be finite, got {}",
                self.launch_angle
            )));
        }
        if !self.spin_rate.is_finite() {
            return Err(FlightError::InvalidLaunch(format!(
                "spin rate must be finite, got {}",
                self.spin_rate
            )));
        }
        Ok(())
    }

    /// Initial horizontal and vertical velocity (m/s)
    pub fn velocity_components(&self) -> (f64, f64) {
        let angle_rad = self.launch_angle.to_radians();
        (self.ball_speed * angle_rad.cos(), self.ball_speed * angle_rad.sin())
    }
}

/// Launch conditions together with the club they were computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchEstimate {
    pub club: ResolvedClub,
    pub conditions: LaunchConditions,
}

/// Map swing characteristics and a club name to launch conditions.
///
/// Unknown club names resolve to the table's default club. A zero swing
/// gives a zero ball speed and spin.
pub fn estimate_launch(
    swing: &SwingCharacteristics,
    club_name: &str,
    clubs: &ClubTable,
    model: &LaunchModel,
) -> LaunchEstimate {
    let club = clubs.resolve(club_name);
    let club_head_speed = swing.club_head_speed.max(0.0);

    let conditions = LaunchConditions {
        ball_speed: club_head_speed * model.smash_factor,
        launch_angle: club.used.loft_deg * model.launch_angle_factor,
        spin_rate: club_head_speed * model.spin_per_speed,
    };

    tracing::debug!(
        club = %club.used.name,
        ball_speed = conditions.ball_speed,
        launch_angle = conditions.launch_angle,
        spin_rate = conditions.spin_rate,
        "estimated launch"
    );

    LaunchEstimate { club, conditions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swing_with_speed(speed: f64) -> SwingCharacteristics {
        SwingCharacteristics {
            club_head_speed: speed,
            ..Default::default()
        }
    }

    #[test]
    fn test_seven_iron_launch() {
        let estimate = estimate_launch(
            &swing_with_speed(90.0),
            "7-Iron",
            ClubTable::standard(),
            &LaunchModel::default(),
        );
        assert!(!estimate.club.fell_back);
        assert!((estimate.conditions.ball_speed - 126.0).abs() < 1e-9);
        assert!((estimate.conditions.launch_angle - 23.8).abs() < 1e-9);
        assert!((estimate.conditions.spin_rate - 9000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_swing_gives_zero_speed() {
        let estimate = estimate_launch(
            &SwingCharacteristics::default(),
            "Driver",
            ClubTable::standard(),
            &LaunchModel::default(),
        );
        assert_eq!(estimate.conditions.ball_speed, 0.0);
        assert_eq!(estimate.conditions.spin_rate, 0.0);
        assert!((estimate.conditions.launch_angle - 7.35).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_club_uses_default() {
        let swing = swing_with_speed(40.0);
        let model = LaunchModel::default();
        let known = estimate_launch(&swing, "7-Iron", ClubTable::standard(), &model);
        let unknown = estimate_launch(&swing, "Mystery", ClubTable::standard(), &model);
        assert!(unknown.club.fell_back);
        assert_eq!(unknown.conditions, known.conditions);
    }

    #[test]
    fn test_custom_model() {
        let model = LaunchModel {
            smash_factor: 1.5,
            launch_angle_factor: 1.0,
            spin_per_speed: 50.0,
        };
        let estimate =
            estimate_launch(&swing_with_speed(40.0), "Driver", ClubTable::standard(), &model);
        assert!((estimate.conditions.ball_speed - 60.0).abs() < 1e-9);
        assert!((estimate.conditions.launch_angle - 10.5).abs() < 1e-9);
        assert!((estimate.conditions.spin_rate - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_negative_speed() {
        assert!(LaunchConditions::new(-1.0, 10.0, 0.0).validate().is_err());
        assert!(LaunchConditions::new(10.0, f64::NAN, 0.0).validate().is_err());
        assert!(LaunchConditions::new(10.0, 10.0, 3000.0).validate().is_ok());
    }

    #[test]
    fn test_velocity_components() {
        let (vx, vy) = LaunchConditions::new(10.0, 90.0, 0.0).velocity_components();
        assert!(vx.abs() < 1e-9);
        assert!((vy - 10.0).abs() < 1e-9);
    }
}
