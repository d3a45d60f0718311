use crate::trajectory::TrajectoryPoint;
use serde::{Deserialize, Serialize};

/// Notable events marked on distance samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Apex,
    Landing,
}

impl std::fmt::Display for TrajectoryFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrajectoryFlag::Apex => write!(f, "apex"),
            TrajectoryFlag::Landing => write!(f, "landing"),
        }
    }
}

/// Trajectory state interpolated at a horizontal distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub distance_m: f64,
    pub height_m: f64,
    pub speed_mps: f64,
    pub time_s: f64,
    pub flags: Vec<TrajectoryFlag>,
}

/// Sample a trajectory at regular horizontal intervals.
///
/// Samples run from the tee to the landing distance, which always gets a
/// final sample. The sample nearest the apex and the landing sample are
/// flagged.
pub fn sample_by_distance(trajectory: &[TrajectoryPoint], step_m: f64) -> Vec<TrajectorySample> {
    let step_size = if step_m <= 0.0 {
        return Vec::new();
    } else if step_m < 0.1 {
        0.1
    } else {
        step_m
    };

    let (first, last) = match (trajectory.first(), trajectory.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };
    let carry = last.x;
    if carry <= first.x {
        return Vec::new();
    }

    let mut distances: Vec<f64> = (0..)
        .map(|i| first.x + i as f64 * step_size)
        .take_while(|&d| d < carry - 1e-9)
        .collect();
    distances.push(carry);

    let mut samples: Vec<TrajectorySample> = distances
        .iter()
        .map(|&distance| sample_at_distance(trajectory, distance))
        .collect();

    let apex = trajectory
        .iter()
        .fold(first, |best, p| if p.y > best.y { p } else { best });
    if apex.y > first.y {
        if let Some(idx) = find_closest_sample_index(&samples, apex.x) {
            samples[idx].flags.push(TrajectoryFlag::Apex);
        }
    }
    if let Some(landing) = samples.last_mut() {
        landing.flags.push(TrajectoryFlag::Landing);
    }

    samples
}

/// Interpolate the flight at `distance` downrange.
///
/// Points must be non-empty with non-decreasing `x`. Distances outside the
/// flight clamp to its first or last point.
fn sample_at_distance(trajectory: &[TrajectoryPoint], distance: f64) -> TrajectorySample {
    let at_point = |p: &TrajectoryPoint| TrajectorySample {
        distance_m: distance,
        height_m: p.y,
        speed_mps: p.speed(),
        time_s: p.time,
        flags: Vec::new(),
    };

    // First point strictly past `distance`
    let idx = trajectory.partition_point(|p| p.x <= distance);
    if idx == 0 {
        return at_point(&trajectory[0]);
    }
    if idx == trajectory.len() {
        return at_point(&trajectory[idx - 1]);
    }

    let (before, after) = (&trajectory[idx - 1], &trajectory[idx]);
    let span = after.x - before.x;
    if span < f64::EPSILON {
        return at_point(before);
    }

    let t = (distance - before.x) / span;
    let lerp = |a: f64, b: f64| a + (b - a) * t;
    TrajectorySample {
        distance_m: distance,
        height_m: lerp(before.y, after.y),
        speed_mps: lerp(before.speed(), after.speed()),
        time_s: lerp(before.time, after.time),
        flags: Vec::new(),
    }
}

fn find_closest_sample_index(samples: &[TrajectorySample], target_distance: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }

    let idx = samples.partition_point(|s| s.distance_m < target_distance);
    let mut best_idx = idx.min(samples.len() - 1);

    if idx > 0 {
        let left_dist = (samples[idx - 1].distance_m - target_distance).abs();
        let right_dist = (samples[best_idx].distance_m - target_distance).abs();
        if left_dist < right_dist {
            best_idx = idx - 1;
        }
    }

    Some(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight() -> Vec<TrajectoryPoint> {
        vec![
            TrajectoryPoint { time: 0.0, x: 0.0, y: 0.0, vx: 40.0, vy: 20.0 },
            TrajectoryPoint { time: 1.0, x: 40.0, y: 15.0, vx: 38.0, vy: 10.0 },
            TrajectoryPoint { time: 2.0, x: 78.0, y: 20.0, vx: 36.0, vy: 0.0 },
            TrajectoryPoint { time: 3.0, x: 114.0, y: 15.0, vx: 34.0, vy: -10.0 },
            TrajectoryPoint { time: 4.0, x: 148.0, y: -0.2, vx: 32.0, vy: -20.0 },
        ]
    }

    #[test]
    fn test_sample_between_points() {
        let points = flight();
        let s = sample_at_distance(&points, 59.0);
        assert!((s.height_m - 17.5).abs() < 1e-12);
        assert!((s.time_s - 1.5).abs() < 1e-12);
        let expected_speed = (points[1].speed() + points[2].speed()) / 2.0;
        assert!((s.speed_mps - expected_speed).abs() < 1e-12);
    }

    #[test]
    fn test_sample_clamps_outside_flight() {
        let points = flight();
        let before = sample_at_distance(&points, -10.0);
        assert_eq!(before.height_m, 0.0);
        assert_eq!(before.time_s, 0.0);
        let after = sample_at_distance(&points, 500.0);
        assert_eq!(after.height_m, -0.2);
        assert_eq!(after.time_s, 4.0);
        assert_eq!(after.distance_m, 500.0);
    }

    #[test]
    fn test_samples_cover_carry() {
        let samples = sample_by_distance(&flight(), 50.0);
        let distances: Vec<f64> = samples.iter().map(|s| s.distance_m).collect();
        assert_eq!(distances, vec![0.0, 50.0, 100.0, 148.0]);
        assert!((samples[1].time_s - (1.0 + 10.0 / 38.0)).abs() < 1e-9);
        assert!(samples[3].flags.contains(&TrajectoryFlag::Landing));
    }

    #[test]
    fn test_apex_flag_on_nearest_sample() {
        let samples = sample_by_distance(&flight(), 50.0);
        assert!(samples[2].flags.contains(&TrajectoryFlag::Apex));
        assert_eq!(samples.iter().filter(|s| s.flags.contains(&TrajectoryFlag::Apex)).count(), 1);
    }

    #[test]
    fn test_non_positive_interval_gives_nothing() {
        assert!(sample_by_distance(&flight(), 0.0).is_empty());
        assert!(sample_by_distance(&flight(), -5.0).is_empty());
    }

    #[test]
    fn test_tiny_interval_is_clamped() {
        let samples = sample_by_distance(&flight(), 0.01);
        assert!((samples[1].distance_m - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_no_carry_gives_nothing() {
        let rest = vec![TrajectoryPoint { time: 0.0, x: 0.0, y: 0.0, vx: 0.0, vy: 0.0 }];
        assert!(sample_by_distance(&rest, 10.0).is_empty());
        assert!(sample_by_distance(&[], 10.0).is_empty());
    }
}
