//! Fixed-step ball flight integration.
//!
//! The ball moves in the vertical plane under gravity, quadratic drag
//! opposite to the velocity and a linear Magnus lift that acts straight
//! up. Each call to [`FlightIntegrator::step`] advances one explicit Euler
//! step and reports whether the ball is still airborne.

use crate::config::{Atmosphere, BallProperties, IntegrationSettings, SimulatorConfig};
use crate::constants::MIN_VELOCITY_THRESHOLD;
use crate::error::FlightError;
use crate::launch::LaunchConditions;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// One recorded sample of the flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,  // s
    pub x: f64,     // horizontal distance (m)
    pub y: f64,     // height (m)
    pub vx: f64,    // m/s
    pub vy: f64,    // m/s
}

impl TrajectoryPoint {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Integrator state between steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub steps: usize,
    pub time: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl FlightState {
    /// State at the tee for the given launch
    pub fn at_launch(launch: &LaunchConditions) -> Self {
        let (vx, vy) = launch.velocity_components();
        Self {
            steps: 0,
            time: 0.0,
            position: Vector2::zeros(),
            velocity: Vector2::new(vx, vy),
        }
    }

    pub fn to_point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            time: self.time,
            x: self.position.x,
            y: self.position.y,
            vx: self.velocity.x,
            vy: self.velocity.y,
        }
    }
}

/// Outcome of a single integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Airborne(FlightState),
    /// The step ended at or below the ground plane
    Landed(FlightState),
}

impl StepOutcome {
    pub fn state(&self) -> &FlightState {
        match self {
            StepOutcome::Airborne(s) | StepOutcome::Landed(s) => s,
        }
    }
}

/// Equations of motion for one launch
#[derive(Debug, Clone)]
pub struct FlightIntegrator {
    ball: BallProperties,
    atmosphere: Atmosphere,
    settings: IntegrationSettings,
    spin_rate: f64,
    drag_factor: f64,  // ½·ρ·Cd·A / m
}

impl FlightIntegrator {
    /// Build an integrator. The configuration is validated first.
    pub fn new(config: &SimulatorConfig, spin_rate: f64) -> Result<Self, FlightError> {
        config.validate()?;

        let ball = config.ball;
        let atmosphere = config.atmosphere;
        let drag_factor =
            0.5 * atmosphere.air_density * ball.drag_coefficient * ball.area() / ball.mass_kg;

        Ok(Self {
            ball,
            atmosphere,
            settings: config.integration,
            spin_rate,
            drag_factor,
        })
    }

    /// Net acceleration for the given velocity
    pub fn acceleration(&self, velocity: &Vector2<f64>) -> Vector2<f64> {
        let speed = velocity.norm();

        // Drag is undefined at rest
        let drag = if speed > MIN_VELOCITY_THRESHOLD {
            -velocity * (self.drag_factor * speed)
        } else {
            Vector2::zeros()
        };

        let lift = self.ball.lift_coefficient * self.spin_rate * speed / 1000.0 / self.ball.mass_kg;

        Vector2::new(drag.x, drag.y + lift - self.atmosphere.gravity)
    }

    /// Advance one forward Euler step
    pub fn step(&self, state: &FlightState) -> StepOutcome {
        let dt = self.settings.time_step;
        let acceleration = self.acceleration(&state.velocity);

        let velocity = state.velocity + acceleration * dt;
        let position = state.position + velocity * dt;
        let steps = state.steps + 1;

        let next = FlightState {
            steps,
            time: steps as f64 * dt,
            position,
            velocity,
        };

        if next.position.y <= 0.0 {
            StepOutcome::Landed(next)
        } else {
            StepOutcome::Airborne(next)
        }
    }

    /// Integrate from launch until the first ground contact.
    ///
    /// The first point is the launch state at time zero. A ball with no
    /// speed never leaves the tee and yields that single point. The last
    /// point may sit slightly below the ground; no interpolation is done.
    pub fn integrate(
        &self,
        launch: &LaunchConditions,
    ) -> Result<Vec<TrajectoryPoint>, FlightError> {
        launch.validate()?;

        let mut state = FlightState::at_launch(launch);
        let max_steps = self.settings.max_steps();
        let mut points = Vec::with_capacity(max_steps.min(1024) + 1);
        points.push(state.to_point());

        if launch.ball_speed <= 0.0 {
            return Ok(points);
        }

        while state.steps < max_steps {
            match self.step(&state) {
                StepOutcome::Airborne(next) => {
                    points.push(next.to_point());
                    state = next;
                }
                StepOutcome::Landed(next) => {
                    points.push(next.to_point());
                    tracing::debug!(steps = next.steps, flight_time = next.time, "ball landed");
                    return Ok(points);
                }
            }
        }

        Err(FlightError::NoGroundContact {
            steps: state.steps,
            elapsed_s: state.time,
        })
    }
}

/// Simulate a full flight with the given configuration
pub fn simulate_trajectory(
    launch: &LaunchConditions,
    config: &SimulatorConfig,
) -> Result<Vec<TrajectoryPoint>, FlightError> {
    FlightIntegrator::new(config, launch.spin_rate)?.integrate(launch)
}
