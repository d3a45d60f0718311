//! Swing samples from the inertial sensor and the swing analyzer.

use crate::config::SwingScaling;
use crate::error::FlightError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One inertial reading taken during a swing
#[derive(Debug, Clone, PartialEq)]
pub struct SwingSample {
    pub timestamp: u64,
    pub accel: Vector3<f64>,
    pub gyro: Vector3<f64>,  // angular rate
    pub club: String,
    pub player: String,
    pub device_id: String,
}

impl SwingSample {
    pub fn new(
        timestamp: u64,
        accel: Vector3<f64>,
        gyro: Vector3<f64>,
        club: &str,
        player: &str,
    ) -> Self {
        Self {
            timestamp,
            accel,
            gyro,
            club: club.to_string(),
            player: player.to_string(),
            device_id: "unknown".to_string(),
        }
    }
}

/// Scalars derived from a batch of samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SwingCharacteristics {
    pub peak_angular_rate: f64,
    pub peak_acceleration: f64,
    pub club_head_speed: f64,  // m/s
    pub impact_force: f64,
}

/// Reduce a batch of samples to peak-based swing characteristics.
///
/// An empty batch yields all zeros. Sample order does not matter.
pub fn analyze_swing(samples: &[SwingSample], scaling: &SwingScaling) -> SwingCharacteristics {
    let peak_angular_rate = samples.iter().map(|s| s.gyro.norm()).fold(0.0, f64::max);
    let peak_acceleration = samples.iter().map(|s| s.accel.norm()).fold(0.0, f64::max);

    let characteristics = SwingCharacteristics {
        peak_angular_rate,
        peak_acceleration,
        club_head_speed: peak_angular_rate * scaling.club_head_speed_per_rate,
        impact_force: peak_acceleration * scaling.impact_force_per_accel,
    };

    tracing::debug!(
        samples = samples.len(),
        peak_angular_rate,
        peak_acceleration,
        club_head_speed = characteristics.club_head_speed,
        "analyzed swing"
    );

    characteristics
}

/// True when timestamps never decrease
pub fn is_time_ordered(samples: &[SwingSample]) -> bool {
    samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}

// Wire form of one sensor packet
#[derive(Debug, Deserialize)]
struct SwingPacket {
    timestamp: u64,
    accel_x: f64,
    accel_y: f64,
    accel_z: f64,
    gyro_x: f64,
    gyro_y: f64,
    gyro_z: f64,
    club: String,
    player: String,
    #[serde(default = "unknown_device")]
    device_id: String,
}

fn unknown_device() -> String {
    "unknown".to_string()
}

impl From<SwingPacket> for SwingSample {
    fn from(p: SwingPacket) -> Self {
        SwingSample {
            timestamp: p.timestamp,
            accel: Vector3::new(p.accel_x, p.accel_y, p.accel_z),
            gyro: Vector3::new(p.gyro_x, p.gyro_y, p.gyro_z),
            club: p.club,
            player: p.player,
            device_id: p.device_id,
        }
    }
}

/// Parse one JSON sensor packet
pub fn parse_packet(json: &str) -> Result<SwingSample, FlightError> {
    serde_json::from_str::<SwingPacket>(json)
        .map(SwingSample::from)
        .map_err(|e| FlightError::Packet(e.to_string()))
}

/// Read newline-delimited packets, skipping blank and malformed lines
pub fn read_packets<R: BufRead>(reader: R) -> Result<Vec<SwingSample>, FlightError> {
    let mut samples = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_packet(trimmed) {
            Ok(sample) => samples.push(sample),
            Err(e) => tracing::warn!(line = line_no + 1, error = %e, "skipping packet"),
        }
    }
    Ok(samples)
}

/// Parse either a JSON array of packets or newline-delimited packets
pub fn parse_batch(input: &str) -> Result<Vec<SwingSample>, FlightError> {
    if input.trim_start().starts_with('[') {
        let packets: Vec<SwingPacket> =
            serde_json::from_str(input).map_err(|e| FlightError::Packet(e.to_string()))?;
        Ok(packets.into_iter().map(SwingSample::from).collect())
    } else {
        read_packets(input.as_bytes())
    }
}
