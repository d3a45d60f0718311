use crate::error::FlightError;
use crate::trajectory::TrajectoryPoint;
use serde::{Deserialize, Serialize};

/// Summary of a completed flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotMetrics {
    pub carry_distance: f64,  // m, x of the last point
    pub apex_height: f64,     // m
    pub apex_time: f64,       // s, earliest time at apex height
    pub apex_distance: f64,   // m, x at apex
    pub flight_time: f64,     // s
    pub landing_speed: f64,   // m/s
    pub landing_angle: f64,   // degrees below horizontal
    pub launch_speed: f64,    // m/s
    pub launch_angle: f64,    // degrees
}

/// Reduce a trajectory to shot metrics.
///
/// An empty trajectory means the integrator misbehaved and is rejected.
pub fn analyze_trajectory(trajectory: &[TrajectoryPoint]) -> Result<ShotMetrics, FlightError> {
    let first = trajectory.first().ok_or(FlightError::EmptyTrajectory)?;
    let last = trajectory.last().ok_or(FlightError::EmptyTrajectory)?;

    // Strict comparison keeps the earliest point on ties
    let apex = trajectory
        .iter()
        .fold(first, |best, p| if p.y > best.y { p } else { best });

    Ok(ShotMetrics {
        carry_distance: last.x,
        apex_height: apex.y,
        apex_time: apex.time,
        apex_distance: apex.x,
        flight_time: last.time,
        landing_speed: last.speed(),
        landing_angle: (-last.vy).atan2(last.vx).to_degrees(),
        launch_speed: first.speed(),
        launch_angle: first.vy.atan2(first.vx).to_degrees(),
    })
}
