//! Monte Carlo shot dispersion.
//!
//! Launch conditions are drawn from normal distributions centred on a
//! nominal launch, each draw is flown independently and the landed shots
//! are summarized. Draws come from a seeded generator before any flight is
//! simulated, so a fixed seed reproduces the same result regardless of
//! thread scheduling.

use crate::error::FlightError;
use crate::launch::LaunchConditions;
use crate::simulator::ShotSimulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispersionParams {
    pub num_shots: usize,
    pub ball_speed_std_dev: f64,    // m/s
    pub launch_angle_std_dev: f64,  // degrees
    pub spin_rate_std_dev: f64,     // rpm
    pub seed: Option<u64>,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            num_shots: 500,
            ball_speed_std_dev: 2.0,
            launch_angle_std_dev: 1.0,
            spin_rate_std_dev: 250.0,
            seed: None,
        }
    }
}

/// Mean, spread and range of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        Some(Self { mean, std_dev, min, max })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispersionResults {
    pub num_landed: usize,
    pub num_failed: usize,
    pub carry: Statistics,
    pub apex_height: Statistics,
    pub flight_time: Statistics,
    pub landing_angle: Statistics,
    pub carries: Vec<f64>,
}

/// Fly `params.num_shots` perturbed copies of `base` and summarize them
pub fn run_dispersion(
    simulator: &ShotSimulator,
    base: &LaunchConditions,
    params: &DispersionParams,
) -> Result<DispersionResults, FlightError> {
    base.validate()?;
    if params.num_shots == 0 {
        return Err(FlightError::InvalidConfig("dispersion needs at least one shot".into()));
    }

    let speed_dist = normal(base.ball_speed, params.ball_speed_std_dev, "ball speed")?;
    let angle_dist = normal(base.launch_angle, params.launch_angle_std_dev, "launch angle")?;
    let spin_dist = normal(base.spin_rate, params.spin_rate_std_dev, "spin rate")?;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let launches: Vec<LaunchConditions> = (0..params.num_shots)
        // Negative spin is topspin and is kept
        .map(|_| LaunchConditions {
            ball_speed: speed_dist.sample(&mut rng).max(0.0),
            launch_angle: angle_dist.sample(&mut rng),
            spin_rate: spin_dist.sample(&mut rng),
        })
        .collect();

    let outcomes: Vec<_> = launches
        .par_iter()
        .map(|launch| simulator.simulate_launch(launch).map(|flight| flight.metrics))
        .collect();

    let mut landed = Vec::with_capacity(outcomes.len());
    let mut num_failed = 0;
    for outcome in outcomes {
        match outcome {
            Ok(metrics) => landed.push(metrics),
            Err(e) => {
                num_failed += 1;
                tracing::warn!(error = %e, "dispersion shot skipped");
            }
        }
    }

    if landed.is_empty() {
        return Err(FlightError::InvalidLaunch(
            "no dispersion shot returned to the ground".into(),
        ));
    }

    let carries: Vec<f64> = landed.iter().map(|m| m.carry_distance).collect();
    let summarize = |values: Vec<f64>| {
        Statistics::from_values(&values)
            .ok_or_else(|| FlightError::InvalidLaunch("empty dispersion sample".into()))
    };

    let results = DispersionResults {
        num_landed: landed.len(),
        num_failed,
        carry: summarize(carries.clone())?,
        apex_height: summarize(landed.iter().map(|m| m.apex_height).collect())?,
        flight_time: summarize(landed.iter().map(|m| m.flight_time).collect())?,
        landing_angle: summarize(landed.iter().map(|m| m.landing_angle).collect())?,
        carries,
    };

    tracing::debug!(
        landed = results.num_landed,
        failed = num_failed,
        mean_carry = results.carry.mean,
        "dispersion complete"
    );

    Ok(results)
}

fn normal(mean: f64, std_dev: f64, what: &str) -> Result<Normal<f64>, FlightError> {
    Normal::new(mean, std_dev)
        .map_err(|e| FlightError::InvalidConfig(format!("invalid {} distribution: {}", what, e)))
}
