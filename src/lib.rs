//! # Golf Flight Engine
//!
//! Golf shot simulation from inertial swing samples: peak-based swing
//! analysis, launch condition estimation per club, fixed-step flight
//! integration under gravity, drag and Magnus lift, and shot metrics.

// Re-export the main types and functions
pub use clubs::{ClubSpec, ClubTable, ResolvedClub};
pub use config::SimulatorConfig;
pub use dispersion::{run_dispersion, DispersionParams, DispersionResults, Statistics};
pub use error::FlightError;
pub use launch::{estimate_launch, LaunchConditions, LaunchEstimate};
pub use metrics::{analyze_trajectory, ShotMetrics};
pub use sampling::{sample_by_distance, TrajectoryFlag, TrajectorySample};
pub use simulator::{FlightResult, ShotResult, ShotSimulator};
pub use swing::{analyze_swing, SwingCharacteristics, SwingSample};
pub use trajectory::{
    simulate_trajectory, FlightIntegrator, FlightState, StepOutcome, TrajectoryPoint,
};

// Module declarations
pub mod clubs;
pub mod config;
pub mod constants;
pub mod dispersion;
pub mod error;
pub mod launch;
pub mod metrics;
pub mod sampling;
pub mod simulator;
pub mod swing;
pub mod trajectory;
